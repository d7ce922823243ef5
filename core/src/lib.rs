//! Synthetic e-commerce dataset with embedded fraud patterns.
//!
//! Builds eight related tables in dependency order, labels a subset of
//! orders as fraudulent, and exports everything as CSV together with a
//! separate ground-truth table.

pub mod config;
pub mod contact_generator;
pub mod customer_table;
pub mod date_dimension;
pub mod employee_table;
pub mod engine;
pub mod enrichment;
pub mod error;
pub mod export;
pub mod latent;
pub mod name_generator;
pub mod order_item_table;
pub mod order_table;
pub mod product_table;
pub mod rng;
pub mod store_table;
pub mod summary;
pub mod supplier_table;
pub mod types;
