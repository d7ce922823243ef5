//! CSV export.
//!
//! RULE: Only export.rs writes files.
//! Public tables are written from their public record types; latent
//! labels only reach disk through fraud_labels.csv.

use crate::{
    engine::Dataset,
    error::GenResult,
    latent::Labeled,
};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DATES_FILE: &str = "dates.csv";
pub const STORES_FILE: &str = "stores.csv";
pub const EMPLOYEES_FILE: &str = "employees.csv";
pub const SUPPLIERS_FILE: &str = "suppliers.csv";
pub const PRODUCTS_FILE: &str = "products.csv";
pub const CUSTOMERS_FILE: &str = "customers.csv";
pub const ORDERS_FILE: &str = "orders.csv";
pub const ORDER_ITEMS_FILE: &str = "order_items.csv";
pub const FRAUD_LABELS_FILE: &str = "fraud_labels.csv";

/// `Updated_at` and other timestamps as `YYYY-MM-DD HH:MM:SS`.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }
}

/// Write one table, header row first, to any writer.
pub fn write_table<W: Write, R: Serialize>(writer: W, rows: &[R]) -> GenResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    for row in rows {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}

/// Write the public half of labeled rows.
pub fn write_public<W: Write, R: Serialize, L>(writer: W, rows: &[Labeled<R, L>]) -> GenResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    for row in rows {
        out.serialize(&row.record)?;
    }
    out.flush()?;
    Ok(())
}

fn create(dir: &Path, name: &str) -> GenResult<BufWriter<File>> {
    let path = dir.join(name);
    log::debug!("export: writing {}", path.display());
    Ok(BufWriter::new(File::create(path)?))
}

/// Create `dir` if needed and write all nine files into it.
/// Returns the paths written, in dependency order.
pub fn write_all(dataset: &Dataset, dir: &Path) -> GenResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    write_table(create(dir, DATES_FILE)?, &dataset.dates)?;
    write_table(create(dir, STORES_FILE)?, &dataset.stores)?;
    write_table(create(dir, EMPLOYEES_FILE)?, &dataset.employees)?;
    write_table(create(dir, SUPPLIERS_FILE)?, &dataset.suppliers)?;
    write_table(create(dir, PRODUCTS_FILE)?, &dataset.products)?;
    write_public(create(dir, CUSTOMERS_FILE)?, &dataset.customers)?;
    write_public(create(dir, ORDERS_FILE)?, &dataset.orders)?;
    write_table(create(dir, ORDER_ITEMS_FILE)?, &dataset.order_items)?;
    write_table(create(dir, FRAUD_LABELS_FILE)?, &dataset.fraud_labels())?;

    let written: Vec<PathBuf> = ALL_FILES.iter().map(|name| dir.join(name)).collect();
    log::info!("export: wrote {} files to {}", written.len(), dir.display());
    Ok(written)
}

pub const ALL_FILES: [&str; 9] = [
    DATES_FILE,
    STORES_FILE,
    EMPLOYEES_FILE,
    SUPPLIERS_FILE,
    PRODUCTS_FILE,
    CUSTOMERS_FILE,
    ORDERS_FILE,
    ORDER_ITEMS_FILE,
    FRAUD_LABELS_FILE,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;
    use crate::latent::CustomerRisk;

    #[derive(Serialize, Clone)]
    struct Row {
        #[serde(rename = "RowID")]
        id: u32,
        #[serde(rename = "Maybe")]
        maybe: Option<u32>,
        #[serde(rename = "At", with = "timestamp")]
        at: chrono::NaiveDateTime,
    }

    fn at() -> chrono::NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 12, 18)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    }

    #[test]
    fn header_then_rows() {
        let mut out = Vec::new();
        let rows = [
            Row { id: 1, maybe: None, at: at() },
            Row { id: 2, maybe: Some(1), at: at() },
        ];
        write_table(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "RowID,Maybe,At\n1,,2025-12-18 09:05:00\n2,1,2025-12-18 09:05:00\n"
        );
    }

    #[test]
    fn labels_are_not_written() {
        let mut out = Vec::new();
        let rows = [Labeled::new(
            Row { id: 7, maybe: None, at: at() },
            CustomerRisk { is_high_risk: true },
        )];
        write_public(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.to_lowercase().contains("risk"), "label leaked: {text}");
        assert!(text.starts_with("RowID,Maybe,At\n7,,"));
    }

    #[test]
    fn write_failure_surfaces_as_io_error() {
        let engine = crate::engine::GeneratorEngine::new(crate::config::GeneratorConfig::default_test())
            .expect("valid config");
        let dataset = engine.run().expect("run");

        // A regular file where the output directory should be.
        let blocker = std::env::temp_dir().join(format!("fraudmart-blocked-{}", std::process::id()));
        std::fs::write(&blocker, b"not a directory").unwrap();

        let result = write_all(&dataset, &blocker);
        let _ = std::fs::remove_file(&blocker);
        assert!(matches!(result, Err(GenError::Io(_))), "got {result:?}");
    }
}
