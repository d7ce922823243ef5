//! Referential integrity, order totals and the public/latent split.

use fraudmart_core::{
    config::GeneratorConfig,
    engine::{Dataset, GeneratorEngine},
    error::GenError,
    export::{write_public, write_table},
    types::{Cents, RowId},
};
use std::collections::{HashMap, HashSet};

fn dataset() -> Dataset {
    GeneratorEngine::new(GeneratorConfig::default_test())
        .expect("valid config")
        .run()
        .expect("generation")
}

fn header(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

#[test]
fn primary_keys_are_dense_and_sequential() {
    let d = dataset();
    let check = |name: &str, ids: Vec<RowId>| {
        let expected: Vec<RowId> = (1..=ids.len() as RowId).collect();
        assert_eq!(ids, expected, "{name} ids are not 1..=n");
    };
    check("stores", d.stores.iter().map(|r| r.store_id).collect());
    check("employees", d.employees.iter().map(|r| r.employee_id).collect());
    check("suppliers", d.suppliers.iter().map(|r| r.supplier_id).collect());
    check("products", d.products.iter().map(|r| r.product_id).collect());
    check("customers", d.customers.iter().map(|r| r.record.customer_id).collect());
    check("orders", d.orders.iter().map(|r| r.record.order_id).collect());
    check("order_items", d.order_items.iter().map(|r| r.order_item_id).collect());
}

#[test]
fn every_foreign_key_resolves() {
    let d = dataset();
    let stores: HashSet<RowId> = d.stores.iter().map(|r| r.store_id).collect();
    let employees: HashSet<RowId> = d.employees.iter().map(|r| r.employee_id).collect();
    let suppliers: HashSet<RowId> = d.suppliers.iter().map(|r| r.supplier_id).collect();
    let products: HashSet<RowId> = d.products.iter().map(|r| r.product_id).collect();
    let customers: HashSet<RowId> = d.customers.iter().map(|r| r.record.customer_id).collect();
    let orders: HashSet<RowId> = d.orders.iter().map(|r| r.record.order_id).collect();
    let days: HashSet<_> = d.dates.iter().map(|r| r.date).collect();

    for e in &d.employees {
        if let Some(m) = e.manager_id {
            assert!(employees.contains(&m), "employee {} -> manager {m}", e.employee_id);
        }
    }
    for p in &d.products {
        assert!(suppliers.contains(&p.supplier_id), "product {} -> supplier", p.product_id);
    }
    for o in &d.orders {
        let r = &o.record;
        assert!(customers.contains(&r.customer_id), "order {} -> customer", r.order_id);
        assert!(employees.contains(&r.employee_id), "order {} -> employee", r.order_id);
        assert!(stores.contains(&r.store_id), "order {} -> store", r.order_id);
        assert!(days.contains(&r.order_date), "order {} -> date {}", r.order_id, r.order_date);
    }
    for i in &d.order_items {
        assert!(orders.contains(&i.order_id), "item {} -> order", i.order_item_id);
        assert!(products.contains(&i.product_id), "item {} -> product", i.order_item_id);
    }
    for l in d.fraud_labels() {
        assert!(orders.contains(&l.order_id));
        assert!(customers.contains(&l.customer_id));
    }
}

#[test]
fn order_total_is_sum_of_lines() {
    let d = dataset();
    let mut sums: HashMap<RowId, Cents> = HashMap::new();
    for i in &d.order_items {
        let sum = sums.entry(i.order_id).or_default();
        *sum = *sum + i.unit_price * i.quantity;
    }
    for o in &d.orders {
        assert_eq!(
            o.record.order_total, sums[&o.record.order_id],
            "order {} total mismatch",
            o.record.order_id
        );
    }
}

#[test]
fn products_are_unique_within_an_order() {
    let d = dataset();
    let mut seen: HashSet<(RowId, RowId)> = HashSet::new();
    for i in &d.order_items {
        assert!(
            seen.insert((i.order_id, i.product_id)),
            "product {} twice in order {}",
            i.product_id,
            i.order_id
        );
    }
}

#[test]
fn fraud_labels_match_latent_signals() {
    let d = dataset();
    let labels = d.fraud_labels();
    assert_eq!(labels.len(), d.orders.len());
    let high_risk: HashSet<RowId> = d
        .customers
        .iter()
        .filter(|c| c.label.is_high_risk)
        .map(|c| c.record.customer_id)
        .collect();
    for (label, order) in labels.iter().zip(&d.orders) {
        assert_eq!(label.order_id, order.record.order_id);
        assert_eq!(label.is_fraud, order.label.is_fraud);
        assert_eq!(
            label.is_high_risk_customer,
            high_risk.contains(&order.record.customer_id)
        );
    }
}

#[test]
fn exported_headers_match_the_published_schema() {
    let d = dataset();
    let mut out = Vec::new();

    write_table(&mut out, &d.dates).unwrap();
    assert_eq!(header(&out), "Date,Day,Month,Year,Quarter,DayOfWeek,WeekOfYear,Updated_at");

    out.clear();
    write_table(&mut out, &d.stores).unwrap();
    assert_eq!(header(&out), "StoreID,StoreName,Address,City,State,ZipCode,Email,Phone,Updated_at");

    out.clear();
    write_table(&mut out, &d.employees).unwrap();
    assert_eq!(
        header(&out),
        "EmployeeID,FirstName,LastName,Email,JobTitle,HireDate,ManagerID,Address,City,State,ZipCode,Updated_at"
    );

    out.clear();
    write_table(&mut out, &d.suppliers).unwrap();
    assert_eq!(
        header(&out),
        "SupplierID,SupplierName,ContactPerson,Email,Phone,Address,City,State,ZipCode,Updated_at"
    );

    out.clear();
    write_table(&mut out, &d.products).unwrap();
    assert_eq!(
        header(&out),
        "ProductID,Name,Category,RetailPrice,SupplierPrice,SupplierID,Updated_at"
    );

    out.clear();
    write_public(&mut out, &d.customers).unwrap();
    assert_eq!(
        header(&out),
        "CustomerID,FirstName,LastName,Email,Phone,Address,City,State,ZipCode,Updated_at"
    );

    out.clear();
    write_public(&mut out, &d.orders).unwrap();
    assert_eq!(
        header(&out),
        "OrderID,OrderDate,CustomerID,EmployeeID,StoreID,Status,Updated_at,OrderTotal,PaymentMethod,IPAddress,DeviceType"
    );

    out.clear();
    write_table(&mut out, &d.order_items).unwrap();
    assert_eq!(header(&out), "OrderItemID,OrderID,ProductID,Quantity,UnitPrice,Updated_at");

    out.clear();
    write_table(&mut out, &d.fraud_labels()).unwrap();
    assert_eq!(header(&out), "OrderID,IsFraud,CustomerID,OrderHour,IsHighRiskCustomer");
}

#[test]
fn public_files_never_contain_latent_fields() {
    let d = dataset();
    let mut customers = Vec::new();
    let mut orders = Vec::new();
    write_public(&mut customers, &d.customers).unwrap();
    write_public(&mut orders, &d.orders).unwrap();

    for (name, bytes) in [("customers", &customers), ("orders", &orders)] {
        let head = header(bytes).to_lowercase();
        for latent in ["high_risk", "highrisk", "is_fraud", "isfraud", "order_hour", "shipping"] {
            assert!(!head.contains(latent), "{name}.csv header leaks {latent}: {head}");
        }
    }
}

#[test]
fn prices_are_written_with_two_decimals() {
    let d = dataset();
    let mut out = Vec::new();
    write_table(&mut out, &d.products).unwrap();
    let text = String::from_utf8(out).unwrap();
    for line in text.lines().skip(1) {
        let retail = line.split(',').nth(3).expect("RetailPrice column");
        let (_, cents) = retail.split_once('.').expect("decimal point");
        assert_eq!(cents.len(), 2, "bad price {retail} in {line}");
    }
}

#[test]
fn sample_larger_than_catalog_fails_before_generation() {
    let config = GeneratorConfig {
        products: 12,
        ..GeneratorConfig::default_test()
    };
    match GeneratorEngine::new(config) {
        Err(GenError::SampleExceedsPopulation { requested, available, .. }) => {
            assert_eq!((requested, available), (15, 12));
        }
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("configuration should have been rejected"),
    }
}
