//! Stores dimension.

use crate::{
    contact_generator::ContactGenerator, name_generator::NameGenerator, rng::SubsystemRng,
    types::RowId,
};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreRecord {
    #[serde(rename = "StoreID")]
    pub store_id: RowId,
    #[serde(rename = "StoreName")]
    pub store_name: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "ZipCode")]
    pub zip_code: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Updated_at", with = "crate::export::timestamp")]
    pub updated_at: NaiveDateTime,
}

pub fn generate_stores(
    count: u32,
    rng: &mut SubsystemRng,
    updated_at: NaiveDateTime,
) -> Vec<StoreRecord> {
    let stores: Vec<StoreRecord> = (1..=count)
        .map(|store_id| {
            let company = NameGenerator::generate_company_name(rng);
            let branch_city = ContactGenerator::city(rng);
            let address = ContactGenerator::postal_address(rng);
            StoreRecord {
                store_id,
                store_name: format!("{company} - {branch_city}"),
                address: address.street,
                city: address.city,
                state: address.state,
                zip_code: address.zip_code,
                email: ContactGenerator::company_email(rng, &company),
                phone: ContactGenerator::phone_number(rng),
                updated_at,
            }
        })
        .collect();
    log::info!("stores: generated {} rows", stores.len());
    stores
}
