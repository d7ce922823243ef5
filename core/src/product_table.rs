//! Product catalog with supplier cost derived from retail price.

use crate::{
    config::GeneratorConfig,
    name_generator::NameGenerator,
    rng::SubsystemRng,
    types::{Cents, RowId},
};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Electronics,
    Clothing,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    Sports,
    Toys,
    Books,
    Beauty,
    Automotive,
    Food,
    Health,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Electronics,
        Category::Clothing,
        Category::HomeAndGarden,
        Category::Sports,
        Category::Toys,
        Category::Books,
        Category::Beauty,
        Category::Automotive,
        Category::Food,
        Category::Health,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    #[serde(rename = "ProductID")]
    pub product_id: RowId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Category")]
    pub category: Category,
    #[serde(rename = "RetailPrice")]
    pub retail_price: Cents,
    #[serde(rename = "SupplierPrice")]
    pub supplier_price: Cents,
    #[serde(rename = "SupplierID")]
    pub supplier_id: RowId,
    #[serde(rename = "Updated_at", with = "crate::export::timestamp")]
    pub updated_at: NaiveDateTime,
}

pub fn generate_products(config: &GeneratorConfig, rng: &mut SubsystemRng) -> Vec<ProductRecord> {
    let updated_at = config.stamp();
    let price_lo = Cents::from_dollars(config.catalog.retail_price.lo()).0 as u64;
    let price_hi = Cents::from_dollars(config.catalog.retail_price.hi()).0 as u64;
    let factor = config.catalog.supplier_price_factor;

    let products: Vec<ProductRecord> = (1..=config.products)
        .map(|product_id| {
            let category = *rng.pick(&Category::ALL);
            let retail_price = Cents(rng.range_inclusive(price_lo, price_hi) as i64);
            let supplier_price = retail_price.scale(rng.uniform(factor.lo(), factor.hi()));
            ProductRecord {
                product_id,
                name: NameGenerator::generate_catch_phrase(rng),
                category,
                retail_price,
                supplier_price,
                supplier_id: rng.range_inclusive(1, u64::from(config.suppliers)) as RowId,
                updated_at,
            }
        })
        .collect();
    log::info!("products: generated {} rows", products.len());
    products
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    #[test]
    fn supplier_price_is_a_fraction_of_retail() {
        let config = GeneratorConfig::default_test();
        let mut rng = RngBank::new(config.seed).for_stream(StreamSlot::Products);
        for p in generate_products(&config, &mut rng) {
            let retail = p.retail_price.0 as f64;
            let supplier = p.supplier_price.0 as f64;
            // one cent of rounding slack on either side
            assert!(supplier >= retail * 0.4 - 1.0, "{p:?}");
            assert!(supplier <= retail * 0.7 + 1.0, "{p:?}");
        }
    }

    #[test]
    fn prices_and_suppliers_in_range() {
        let config = GeneratorConfig::default_test();
        let mut rng = RngBank::new(config.seed).for_stream(StreamSlot::Products);
        let products = generate_products(&config, &mut rng);
        assert_eq!(products.len(), config.products as usize);
        for p in &products {
            assert!(p.retail_price >= Cents(599) && p.retail_price <= Cents(99_999));
            assert!((1..=config.suppliers).contains(&p.supplier_id));
        }
    }
}
