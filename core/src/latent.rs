//! Internal-only labels carried next to public records.
//!
//! A `Labeled<R, L>` keeps the exported record `R` apart from the
//! generation-time label `L`. Exporters take `&R` only, so a label can
//! never leak into a public file.

#[derive(Debug, Clone, PartialEq)]
pub struct Labeled<R, L> {
    pub record: R,
    pub label: L,
}

impl<R, L> Labeled<R, L> {
    pub fn new(record: R, label: L) -> Self {
        Self { record, label }
    }
}

/// Latent risk of a customer. Drives fraud probability of their orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CustomerRisk {
    pub is_high_risk: bool,
}

/// Latent fraud signals of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSignals {
    pub is_fraud: bool,
    pub order_hour: u32,
    pub shipping_state_different: bool,
    pub is_high_risk_customer: bool,
}
