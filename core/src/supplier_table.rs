//! Suppliers dimension.

use crate::{
    contact_generator::ContactGenerator, name_generator::NameGenerator, rng::SubsystemRng,
    types::RowId,
};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierRecord {
    #[serde(rename = "SupplierID")]
    pub supplier_id: RowId,
    #[serde(rename = "SupplierName")]
    pub supplier_name: String,
    #[serde(rename = "ContactPerson")]
    pub contact_person: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "ZipCode")]
    pub zip_code: String,
    #[serde(rename = "Updated_at", with = "crate::export::timestamp")]
    pub updated_at: NaiveDateTime,
}

pub fn generate_suppliers(
    count: u32,
    rng: &mut SubsystemRng,
    updated_at: NaiveDateTime,
) -> Vec<SupplierRecord> {
    let suppliers: Vec<SupplierRecord> = (1..=count)
        .map(|supplier_id| {
            let supplier_name = NameGenerator::generate_company_name(rng);
            let contact_person = NameGenerator::generate_full_name(rng);
            let email = ContactGenerator::company_email(rng, &supplier_name);
            let phone = ContactGenerator::phone_number(rng);
            let address = ContactGenerator::postal_address(rng);
            SupplierRecord {
                supplier_id,
                supplier_name,
                contact_person,
                email,
                phone,
                address: address.street,
                city: address.city,
                state: address.state,
                zip_code: address.zip_code,
                updated_at,
            }
        })
        .collect();
    log::info!("suppliers: generated {} rows", suppliers.len());
    suppliers
}
