//! Employees dimension with a backwards-only manager hierarchy.

use crate::{
    config::GeneratorConfig, contact_generator::ContactGenerator, name_generator::NameGenerator,
    rng::SubsystemRng, types::RowId,
};
use chrono::{Months, NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JobTitle {
    #[serde(rename = "Sales Associate")]
    SalesAssociate,
    #[serde(rename = "Store Manager")]
    StoreManager,
    #[serde(rename = "Assistant Manager")]
    AssistantManager,
    #[serde(rename = "Cashier")]
    Cashier,
    #[serde(rename = "Stock Clerk")]
    StockClerk,
    #[serde(rename = "Department Manager")]
    DepartmentManager,
}

impl JobTitle {
    pub const ALL: [JobTitle; 6] = [
        JobTitle::SalesAssociate,
        JobTitle::StoreManager,
        JobTitle::AssistantManager,
        JobTitle::Cashier,
        JobTitle::StockClerk,
        JobTitle::DepartmentManager,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeRecord {
    #[serde(rename = "EmployeeID")]
    pub employee_id: RowId,
    #[serde(rename = "FirstName")]
    pub first_name: &'static str,
    #[serde(rename = "LastName")]
    pub last_name: &'static str,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "JobTitle")]
    pub job_title: JobTitle,
    #[serde(rename = "HireDate")]
    pub hire_date: NaiveDate,
    #[serde(rename = "ManagerID")]
    pub manager_id: Option<RowId>,
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

pub fn generate_employees(config: &GeneratorConfig, rng: &mut SubsystemRng) -> Vec<EmployeeRecord> {
    let updated_at = config.stamp();
    let hire_end = config.end_date;
    let hire_start = hire_end
        .checked_sub_months(Months::new(12 * config.hire_window_years))
        .unwrap_or(NaiveDate::MIN);
    let hire_span_days = (hire_end - hire_start).num_days() as u64;
    // Manager candidates are 1..pool_top, exclusive.
    let pool_top = config.manager_pool.min(config.employees);

    let employees: Vec<EmployeeRecord> = (1..=config.employees)
        .map(|employee_id| {
            let first_name = NameGenerator::generate_first_name(rng);
            let last_name = NameGenerator::generate_last_name(rng);
            let email = ContactGenerator::email(rng);
            let job_title = *rng.pick(&JobTitle::ALL);
            let hire_date = hire_start + chrono::Days::new(rng.range_inclusive(0, hire_span_days));
            let manager_id = pick_manager(employee_id, pool_top, rng);
            let address = ContactGenerator::postal_address(rng);
            EmployeeRecord {
                employee_id,
                first_name,
                last_name,
                email,
                job_title,
                hire_date,
                manager_id,
                address: address.street,
                city: address.city,
                state: address.state,
                zip_code: address.zip_code,
                updated_at,
            }
        })
        .collect();

    let managed = employees.iter().filter(|e| e.manager_id.is_some()).count();
    log::info!(
        "employees: generated {} rows ({managed} with a manager)",
        employees.len()
    );
    employees
}

/// Uniform over {no manager} ∪ {1 .. pool_top} restricted to ids below
/// `employee_id`, so every reference points backwards and the
/// hierarchy cannot contain a cycle.
fn pick_manager(employee_id: RowId, pool_top: RowId, rng: &mut SubsystemRng) -> Option<RowId> {
    let candidates = (employee_id - 1).min(pool_top.saturating_sub(1));
    match rng.next_u64_below(u64::from(candidates) + 1) {
        0 => None,
        n => Some(n as RowId),
    }
}
