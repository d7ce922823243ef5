//! Order lines. Fraudulent orders get more lines, larger quantities
//! and discounted unit prices.

use crate::{
    config::GeneratorConfig,
    error::{GenError, GenResult},
    order_table::DraftOrder,
    product_table::ProductRecord,
    rng::SubsystemRng,
    types::{Cents, RowId},
};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemRecord {
    #[serde(rename = "OrderItemID")]
    pub order_item_id: RowId,
    #[serde(rename = "OrderID")]
    pub order_id: RowId,
    #[serde(rename = "ProductID")]
    pub product_id: RowId,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "UnitPrice")]
    pub unit_price: Cents,
    #[serde(rename = "Updated_at", with = "crate::export::timestamp")]
    pub updated_at: NaiveDateTime,
}

impl OrderItemRecord {
    pub fn line_total(&self) -> Cents {
        self.unit_price * self.quantity
    }
}

pub fn generate_order_items(
    config: &GeneratorConfig,
    orders: &[DraftOrder],
    products: &[ProductRecord],
    rng: &mut SubsystemRng,
) -> GenResult<Vec<OrderItemRecord>> {
    let fraud = &config.fraud;
    let updated_at = config.stamp();
    let mut items = Vec::with_capacity(orders.len() * 3);
    let mut next_id: RowId = 1;

    for order in orders {
        let is_fraud = order.label.is_fraud;
        let (count_range, quantity_range) = if is_fraud {
            (fraud.fraud_items, fraud.fraud_quantity)
        } else {
            (fraud.legit_items, fraud.legit_quantity)
        };

        let line_count = rng.range_inclusive(count_range.lo(), count_range.hi());
        if line_count > products.len() as u64 {
            return Err(GenError::SampleExceedsPopulation {
                what: "products per order",
                requested: line_count,
                available: products.len() as u64,
            });
        }

        for index in rng.sample_indices(products.len(), line_count as usize) {
            let product = &products[index];
            let quantity = rng.range_inclusive(quantity_range.lo(), quantity_range.hi()) as u32;
            let unit_price = if is_fraud {
                let factor = fraud.fraud_price_factor;
                product.retail_price.scale(rng.uniform(factor.lo(), factor.hi()))
            } else {
                product.retail_price
            };
            items.push(OrderItemRecord {
                order_item_id: next_id,
                order_id: order.record.order_id,
                product_id: product.product_id,
                quantity,
                unit_price,
                updated_at,
            });
            next_id += 1;
        }
    }

    log::info!(
        "order_items: generated {} rows for {} orders",
        items.len(),
        orders.len()
    );
    Ok(items)
}
