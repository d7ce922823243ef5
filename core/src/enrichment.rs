//! Second pass over orders: totals, payment method, IP address and
//! device type.
//!
//! Runs after the order lines exist because the total depends on them,
//! and every derived field depends on the already-decided fraud flag.

use crate::{
    config::GeneratorConfig,
    contact_generator::ContactGenerator,
    error::{GenError, GenResult},
    latent::{Labeled, OrderSignals},
    order_item_table::OrderItemRecord,
    order_table::{DraftOrder, OrderStatus},
    rng::SubsystemRng,
    types::{Cents, RowId},
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    PayPal,
    #[serde(rename = "Gift Card")]
    GiftCard,
    Cash,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::PayPal,
        PaymentMethod::GiftCard,
        PaymentMethod::Cash,
    ];

    /// Fraudsters favour credit cards 3:1 over gift cards.
    pub const FRAUD_WEIGHTS: [(PaymentMethod, u32); 2] =
        [(PaymentMethod::CreditCard, 3), (PaymentMethod::GiftCard, 1)];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeviceType {
    Mobile,
    Desktop,
    Tablet,
}

impl DeviceType {
    pub const ALL: [DeviceType; 3] = [DeviceType::Mobile, DeviceType::Desktop, DeviceType::Tablet];

    /// Legitimate shoppers are mobile-heavy.
    pub const LEGIT_WEIGHTS: [(DeviceType, u32); 3] = [
        (DeviceType::Mobile, 2),
        (DeviceType::Desktop, 1),
        (DeviceType::Tablet, 1),
    ];
}

/// The exported order row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    #[serde(rename = "OrderID")]
    pub order_id: RowId,
    #[serde(rename = "OrderDate")]
    pub order_date: NaiveDate,
    #[serde(rename = "CustomerID")]
    pub customer_id: RowId,
    #[serde(rename = "EmployeeID")]
    pub employee_id: RowId,
    #[serde(rename = "StoreID")]
    pub store_id: RowId,
    #[serde(rename = "Status")]
    pub status: OrderStatus,
    #[serde(rename = "Updated_at", with = "crate::export::timestamp")]
    pub updated_at: NaiveDateTime,
    #[serde(rename = "OrderTotal")]
    pub order_total: Cents,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "IPAddress")]
    pub ip_address: Ipv4Addr,
    #[serde(rename = "DeviceType")]
    pub device_type: DeviceType,
}

pub type Order = Labeled<OrderRecord, OrderSignals>;

/// Σ quantity × unit price per order.
pub fn order_totals(items: &[OrderItemRecord]) -> HashMap<RowId, Cents> {
    let mut totals: HashMap<RowId, Cents> = HashMap::new();
    for item in items {
        let total = totals.entry(item.order_id).or_default();
        *total = *total + item.line_total();
    }
    totals
}

/// Issues IPv4 addresses: a small shared pool reused by colluding
/// fraudsters, and fresh addresses that are never handed out twice.
pub struct IpAllocator {
    shared_pool: Vec<Ipv4Addr>,
    issued: HashSet<Ipv4Addr>,
}

impl IpAllocator {
    pub fn new(pool_size: usize, rng: &mut SubsystemRng) -> Self {
        let mut issued = HashSet::new();
        let mut shared_pool = Vec::with_capacity(pool_size);
        while shared_pool.len() < pool_size {
            let ip = ContactGenerator::ipv4(rng);
            if issued.insert(ip) {
                shared_pool.push(ip);
            }
        }
        Self {
            shared_pool,
            issued,
        }
    }

    pub fn shared_pool(&self) -> &[Ipv4Addr] {
        &self.shared_pool
    }

    pub fn shared(&self, rng: &mut SubsystemRng) -> Ipv4Addr {
        *rng.pick(self.shared_pool.as_slice())
    }

    pub fn fresh(&mut self, rng: &mut SubsystemRng) -> Ipv4Addr {
        loop {
            let ip = ContactGenerator::ipv4(rng);
            if self.issued.insert(ip) {
                return ip;
            }
        }
    }
}

pub fn enrich_orders(
    config: &GeneratorConfig,
    drafts: Vec<DraftOrder>,
    items: &[OrderItemRecord],
    rng: &mut SubsystemRng,
) -> GenResult<Vec<Order>> {
    let fraud = &config.fraud;
    let totals = order_totals(items);
    let mut ips = IpAllocator::new(fraud.shared_ip_pool_size, rng);
    let updated_at = config.stamp();
    let mut shared_ip_orders = 0usize;

    let mut orders = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let Labeled { record, label } = draft;
        let order_total = *totals
            .get(&record.order_id)
            .ok_or(GenError::OrderWithoutItems {
                order_id: record.order_id,
            })?;

        let payment_method = if label.is_fraud {
            *rng.pick_weighted(&PaymentMethod::FRAUD_WEIGHTS)
        } else {
            *rng.pick(&PaymentMethod::ALL)
        };

        let ip_address = if label.is_fraud && rng.chance(fraud.shared_ip_probability) {
            shared_ip_orders += 1;
            ips.shared(rng)
        } else {
            ips.fresh(rng)
        };

        let device_type = if label.is_fraud {
            *rng.pick(&DeviceType::ALL)
        } else {
            *rng.pick_weighted(&DeviceType::LEGIT_WEIGHTS)
        };

        let public = OrderRecord {
            order_id: record.order_id,
            order_date: record.ordered_at.date(),
            customer_id: record.customer_id,
            employee_id: record.employee_id,
            store_id: record.store_id,
            status: record.status,
            updated_at,
            order_total,
            payment_method,
            ip_address,
            device_type,
        };
        orders.push(Labeled::new(public, label));
    }

    log::info!(
        "enrichment: totals attached to {} orders, {shared_ip_orders} on shared fraud IPs",
        orders.len()
    );
    log::debug!("enrichment: shared IP pool {:?}", ips.shared_pool());
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    fn item(order_id: RowId, quantity: u32, unit_price: i64) -> OrderItemRecord {
        OrderItemRecord {
            order_item_id: 0,
            order_id,
            product_id: 1,
            quantity,
            unit_price: Cents(unit_price),
            updated_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn totals_group_by_order() {
        let items = [item(1, 2, 1050), item(1, 1, 199), item(2, 3, 333)];
        let totals = order_totals(&items);
        assert_eq!(totals[&1], Cents(2299));
        assert_eq!(totals[&2], Cents(999));
    }

    #[test]
    fn fresh_ips_never_repeat_or_hit_the_pool() {
        let mut rng = RngBank::new(1).for_stream(StreamSlot::Enrichment);
        let mut ips = IpAllocator::new(20, &mut rng);
        let pool: HashSet<Ipv4Addr> = ips.shared_pool().iter().copied().collect();
        assert_eq!(pool.len(), 20);

        let mut seen = HashSet::new();
        for _ in 0..5_000 {
            let ip = ips.fresh(&mut rng);
            assert!(!pool.contains(&ip));
            assert!(seen.insert(ip), "fresh IP {ip} issued twice");
        }
    }

    #[test]
    fn order_without_items_is_an_error() {
        let config = GeneratorConfig::default_test();
        let draft = Labeled::new(
            crate::order_table::OrderDraft {
                order_id: 9,
                ordered_at: config.start_date.and_hms_opt(12, 0, 0).unwrap(),
                customer_id: 1,
                employee_id: 1,
                store_id: 1,
                status: OrderStatus::Pending,
            },
            OrderSignals {
                is_fraud: false,
                order_hour: 12,
                shipping_state_different: false,
                is_high_risk_customer: false,
            },
        );
        let mut rng = RngBank::new(1).for_stream(StreamSlot::Enrichment);
        let result = enrich_orders(&config, vec![draft], &[], &mut rng);
        assert!(matches!(result, Err(GenError::OrderWithoutItems { order_id: 9 })));
    }
}
