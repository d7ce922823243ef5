//! Orders and the fraud decision.
//!
//! Fraud probability is two-tier: orders of high-risk customers use
//! `high_risk_rate` in place of `base_rate`. Once the flag is set, the
//! timing and shipping patterns are each gated by their own draw.

use crate::{
    config::GeneratorConfig,
    customer_table::Customer,
    latent::{Labeled, OrderSignals},
    rng::SubsystemRng,
    types::RowId,
};
use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderStatus {
    Completed,
    Pending,
    Cancelled,
    Refunded,
    Shipped,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Completed,
        OrderStatus::Pending,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
        OrderStatus::Shipped,
    ];
}

/// An order before payment, device, IP and total are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub order_id: RowId,
    pub ordered_at: NaiveDateTime,
    pub customer_id: RowId,
    pub employee_id: RowId,
    pub store_id: RowId,
    pub status: OrderStatus,
}

pub type DraftOrder = Labeled<OrderDraft, OrderSignals>;

/// Ground-truth row, exported separately from the public tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FraudLabelRecord {
    #[serde(rename = "OrderID")]
    pub order_id: RowId,
    #[serde(rename = "IsFraud")]
    pub is_fraud: bool,
    #[serde(rename = "CustomerID")]
    pub customer_id: RowId,
    #[serde(rename = "OrderHour")]
    pub order_hour: u32,
    #[serde(rename = "IsHighRiskCustomer")]
    pub is_high_risk_customer: bool,
}

impl FraudLabelRecord {
    pub fn new(order_id: RowId, customer_id: RowId, signals: &OrderSignals) -> Self {
        Self {
            order_id,
            is_fraud: signals.is_fraud,
            customer_id,
            order_hour: signals.order_hour,
            is_high_risk_customer: signals.is_high_risk_customer,
        }
    }
}

pub fn generate_orders(
    config: &GeneratorConfig,
    customers: &[Customer],
    rng: &mut SubsystemRng,
) -> Vec<DraftOrder> {
    let fraud = &config.fraud;
    let range_start = config.start_date.and_time(NaiveTime::MIN);
    let range_end = config.end_date.and_time(NaiveTime::MIN) + chrono::Duration::days(1);
    let span_seconds = (range_end - range_start).num_seconds() as u64 - 1;

    let orders: Vec<DraftOrder> = (1..=config.orders)
        .map(|order_id| {
            let customer = rng.pick(customers);
            let is_high_risk_customer = customer.label.is_high_risk;
            let fraud_rate = if is_high_risk_customer {
                fraud.high_risk_rate
            } else {
                fraud.base_rate
            };
            let is_fraud = rng.chance(fraud_rate);

            let mut ordered_at = range_start
                + chrono::Duration::seconds(rng.range_inclusive(0, span_seconds) as i64);
            if is_fraud && rng.chance(fraud.night_shift_probability) {
                let hour = rng.range_inclusive(fraud.night_hours.lo(), fraud.night_hours.hi());
                ordered_at = ordered_at.with_hour(hour as u32).unwrap_or(ordered_at);
            }
            let shipping_state_different =
                is_fraud && rng.chance(fraud.shipping_mismatch_probability);

            let record = OrderDraft {
                order_id,
                ordered_at,
                customer_id: customer.record.customer_id,
                employee_id: rng.range_inclusive(1, u64::from(config.employees)) as RowId,
                store_id: rng.range_inclusive(1, u64::from(config.stores)) as RowId,
                status: *rng.pick(&OrderStatus::ALL),
            };
            let signals = OrderSignals {
                is_fraud,
                order_hour: ordered_at.hour(),
                shipping_state_different,
                is_high_risk_customer,
            };
            Labeled::new(record, signals)
        })
        .collect();

    let flagged = orders.iter().filter(|o| o.label.is_fraud).count();
    log::info!(
        "orders: generated {} rows, {flagged} fraudulent",
        orders.len()
    );
    orders
}
