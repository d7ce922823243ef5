//! Customers, each carrying a latent high-risk flag.

use crate::{
    config::GeneratorConfig,
    contact_generator::ContactGenerator,
    latent::{CustomerRisk, Labeled},
    name_generator::NameGenerator,
    rng::SubsystemRng,
    types::RowId,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRecord {
    #[serde(rename = "CustomerID")]
    pub customer_id: RowId,
    #[serde(rename = "FirstName")]
    pub first_name: &'static str,
    #[serde(rename = "LastName")]
    pub last_name: &'static str,
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

pub type Customer = Labeled<CustomerRecord, CustomerRisk>;

/// Uniform sample without replacement of floor(fraction × customers) ids.
pub fn select_high_risk(config: &GeneratorConfig, rng: &mut SubsystemRng) -> HashSet<RowId> {
    let population = config.customers as usize;
    let amount = config.high_risk_count().min(population);
    rng.sample_indices(population, amount)
        .into_iter()
        .map(|index| index as RowId + 1)
        .collect()
}

pub fn generate_customers(config: &GeneratorConfig, rng: &mut SubsystemRng) -> Vec<Customer> {
    let updated_at = config.stamp();
    let high_risk = select_high_risk(config, rng);

    let customers: Vec<Customer> = (1..=config.customers)
        .map(|customer_id| {
            let first_name = NameGenerator::generate_first_name(rng);
            let last_name = NameGenerator::generate_last_name(rng);
            let email = ContactGenerator::email(rng);
            let phone = ContactGenerator::phone_number(rng);
            let address = ContactGenerator::postal_address(rng);
            let record = CustomerRecord {
                customer_id,
                first_name,
                last_name,
                email,
                phone,
                address: address.street,
                city: address.city,
                state: address.state,
                zip_code: address.zip_code,
                updated_at,
            };
            let risk = CustomerRisk {
                is_high_risk: high_risk.contains(&customer_id),
            };
            Labeled::new(record, risk)
        })
        .collect();

    log::info!(
        "customers: generated {} rows, {} high-risk",
        customers.len(),
        high_risk.len()
    );
    customers
}
