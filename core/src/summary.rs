//! End-of-run summary report. Informational only, not part of the
//! exported data.

use crate::{engine::Dataset, types::Cents};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

pub const EMBEDDED_PATTERNS: [&str; 7] = [
    "High-risk customer segments",
    "Unusual transaction times (late night / early morning)",
    "Shipping state different from billing",
    "High order quantities and values",
    "Shared IP addresses across different customers",
    "Payment method preferences (credit cards, gift cards)",
    "Multiple items per transaction",
];

#[derive(Debug, Clone, Serialize)]
pub struct TableCounts {
    pub customers: usize,
    pub orders: usize,
    pub order_items: usize,
    pub products: usize,
    pub stores: usize,
    pub employees: usize,
    pub suppliers: usize,
    pub dates: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub run_id: String,
    pub counts: TableCounts,
    pub fraudulent_orders: usize,
    pub fraud_rate: f64,
    pub high_risk_customers: usize,
    pub high_risk_fraud_rate: f64,
    pub shared_ip_orders: usize,
    pub average_order_value: f64,
    pub median_order_value: f64,
    pub total_revenue: f64,
    pub average_fraudulent_order: f64,
    pub average_legitimate_order: f64,
    pub patterns: Vec<&'static str>,
}

impl GenerationSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let orders = &dataset.orders;
        let fraudulent: Vec<Cents> = orders
            .iter()
            .filter(|o| o.label.is_fraud)
            .map(|o| o.record.order_total)
            .collect();
        let legitimate: Vec<Cents> = orders
            .iter()
            .filter(|o| !o.label.is_fraud)
            .map(|o| o.record.order_total)
            .collect();
        let all: Vec<Cents> = orders.iter().map(|o| o.record.order_total).collect();

        let high_risk_orders: Vec<bool> = orders
            .iter()
            .filter(|o| o.label.is_high_risk_customer)
            .map(|o| o.label.is_fraud)
            .collect();
        let high_risk_fraud = high_risk_orders.iter().filter(|f| **f).count();

        let shared_ip_orders = {
            let mut owners: HashMap<_, HashSet<_>> = HashMap::new();
            for o in orders {
                owners
                    .entry(o.record.ip_address)
                    .or_default()
                    .insert(o.record.customer_id);
            }
            orders
                .iter()
                .filter(|o| owners[&o.record.ip_address].len() > 1)
                .count()
        };

        Self {
            run_id: dataset.run_id.to_string(),
            counts: TableCounts {
                customers: dataset.customers.len(),
                orders: orders.len(),
                order_items: dataset.order_items.len(),
                products: dataset.products.len(),
                stores: dataset.stores.len(),
                employees: dataset.employees.len(),
                suppliers: dataset.suppliers.len(),
                dates: dataset.dates.len(),
            },
            fraudulent_orders: fraudulent.len(),
            fraud_rate: ratio(fraudulent.len(), orders.len()),
            high_risk_customers: dataset.high_risk_customers(),
            high_risk_fraud_rate: ratio(high_risk_fraud, high_risk_orders.len()),
            shared_ip_orders,
            average_order_value: mean(&all),
            median_order_value: median(&all),
            total_revenue: all.iter().copied().sum::<Cents>().as_dollars(),
            average_fraudulent_order: mean(&fraudulent),
            average_legitimate_order: mean(&legitimate),
            patterns: EMBEDDED_PATTERNS.to_vec(),
        }
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn mean(values: &[Cents]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().sum::<Cents>().as_dollars() / values.len() as f64
}

fn median(values: &[Cents]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1].as_dollars() + sorted[mid].as_dollars()) / 2.0
    } else {
        sorted[mid].as_dollars()
    }
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.counts;
        writeln!(f, "=== GENERATION SUMMARY ===")?;
        writeln!(f, "  run_id:          {}", self.run_id)?;
        writeln!(f, "  customers:       {}", c.customers)?;
        writeln!(f, "  orders:          {}", c.orders)?;
        writeln!(f, "  order items:     {}", c.order_items)?;
        writeln!(f, "  products:        {}", c.products)?;
        writeln!(f, "  stores:          {}", c.stores)?;
        writeln!(f, "  employees:       {}", c.employees)?;
        writeln!(f, "  suppliers:       {}", c.suppliers)?;
        writeln!(f, "  date records:    {}", c.dates)?;
        writeln!(f)?;
        writeln!(f, "=== FRAUD ===")?;
        writeln!(
            f,
            "  fraudulent orders: {} ({:.1}%)",
            self.fraudulent_orders,
            self.fraud_rate * 100.0
        )?;
        writeln!(f, "  high-risk customers: {}", self.high_risk_customers)?;
        writeln!(
            f,
            "  high-risk fraud rate: {:.1}%",
            self.high_risk_fraud_rate * 100.0
        )?;
        writeln!(f, "  orders on shared IPs: {}", self.shared_ip_orders)?;
        writeln!(f)?;
        writeln!(f, "=== ORDER VALUE ===")?;
        writeln!(f, "  average:         ${:.2}", self.average_order_value)?;
        writeln!(f, "  median:          ${:.2}", self.median_order_value)?;
        writeln!(f, "  total revenue:   ${:.2}", self.total_revenue)?;
        writeln!(f, "  avg fraudulent:  ${:.2}", self.average_fraudulent_order)?;
        writeln!(f, "  avg legitimate:  ${:.2}", self.average_legitimate_order)?;
        writeln!(f)?;
        writeln!(f, "=== EMBEDDED PATTERNS ===")?;
        for (i, pattern) in self.patterns.iter().enumerate() {
            writeln!(f, "  {}. {pattern}", i + 1)?;
        }
        Ok(())
    }
}
