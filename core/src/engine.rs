//! The generation engine.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Dates
//!   2. Stores
//!   3. Employees
//!   4. Suppliers
//!   5. Products
//!   6. Customers      (high-risk selection)
//!   7. Orders         (fraud decision, timing and shipping signals)
//!   8. OrderItems     (item count, quantity and price patterns)
//!   9. Enrichment     (totals, payment, IP, device)
//!
//! RULES:
//!   - Each stage reads ONLY tables built by earlier stages.
//!   - Foreign keys are drawn from id ranges that already exist.
//!   - All randomness flows through the RngBank, one stream per stage.

use crate::{
    config::GeneratorConfig,
    customer_table::{generate_customers, Customer},
    date_dimension::{generate_dates, DateRecord},
    employee_table::{generate_employees, EmployeeRecord},
    enrichment::{enrich_orders, Order},
    error::GenResult,
    order_item_table::{generate_order_items, OrderItemRecord},
    order_table::{generate_orders, FraudLabelRecord},
    product_table::{generate_products, ProductRecord},
    rng::{RngBank, StreamSlot},
    store_table::{generate_stores, StoreRecord},
    supplier_table::{generate_suppliers, SupplierRecord},
};
use uuid::Uuid;

/// Every table of one run, in dependency order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub run_id: Uuid,
    pub dates: Vec<DateRecord>,
    pub stores: Vec<StoreRecord>,
    pub employees: Vec<EmployeeRecord>,
    pub suppliers: Vec<SupplierRecord>,
    pub products: Vec<ProductRecord>,
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItemRecord>,
}

impl Dataset {
    /// Ground truth, one row per order.
    pub fn fraud_labels(&self) -> Vec<FraudLabelRecord> {
        self.orders
            .iter()
            .map(|o| FraudLabelRecord::new(o.record.order_id, o.record.customer_id, &o.label))
            .collect()
    }

    pub fn high_risk_customers(&self) -> usize {
        self.customers.iter().filter(|c| c.label.is_high_risk).count()
    }
}

pub struct GeneratorEngine {
    pub config: GeneratorConfig,
    pub rng_bank: RngBank,
}

impl GeneratorEngine {
    /// Validates the configuration up front so that no stage can fail
    /// half-way on a sample that is larger than its population.
    pub fn new(config: GeneratorConfig) -> GenResult<Self> {
        config.validate()?;
        Ok(Self {
            rng_bank: RngBank::new(config.seed),
            config,
        })
    }

    /// Run every stage in the documented order.
    pub fn run(&self) -> GenResult<Dataset> {
        let config = &self.config;
        let bank = &self.rng_bank;
        let stamp = config.stamp();
        log::info!(
            "engine: seed={} range={}..={} orders={}",
            config.seed,
            config.start_date,
            config.end_date,
            config.orders
        );

        let run_id = uuid::Builder::from_random_bytes(bank.for_stream(StreamSlot::Run).next_bytes())
            .into_uuid();

        let dates = generate_dates(config.start_date, config.end_date, stamp);
        log::info!("dates: generated {} rows", dates.len());

        let stores = generate_stores(config.stores, &mut bank.for_stream(StreamSlot::Stores), stamp);
        let employees = generate_employees(config, &mut bank.for_stream(StreamSlot::Employees));
        let suppliers =
            generate_suppliers(config.suppliers, &mut bank.for_stream(StreamSlot::Suppliers), stamp);
        let products = generate_products(config, &mut bank.for_stream(StreamSlot::Products));
        let customers = generate_customers(config, &mut bank.for_stream(StreamSlot::Customers));

        let drafts = generate_orders(config, &customers, &mut bank.for_stream(StreamSlot::Orders));
        let order_items = generate_order_items(
            config,
            &drafts,
            &products,
            &mut bank.for_stream(StreamSlot::OrderItems),
        )?;
        let orders = enrich_orders(
            config,
            drafts,
            &order_items,
            &mut bank.for_stream(StreamSlot::Enrichment),
        )?;

        log::info!("engine: run {run_id} complete");
        Ok(Dataset {
            run_id,
            dates,
            stores,
            employees,
            suppliers,
            products,
            customers,
            orders,
            order_items,
        })
    }
}
