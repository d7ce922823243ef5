use crate::contact_generator::USABLE_IPV4_ADDRESSES;
use crate::error::{GenError, GenResult};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Inclusive integer range, written `[lo, hi]` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange(pub u64, pub u64);

impl IntRange {
    pub fn lo(&self) -> u64 {
        self.0
    }
    pub fn hi(&self) -> u64 {
        self.1
    }
}

/// Half-open float range, written `[lo, hi]` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange(pub f64, pub f64);

impl FloatRange {
    pub fn lo(&self) -> f64 {
        self.0
    }
    pub fn hi(&self) -> f64 {
        self.1
    }
}

// ── Fraud patterns ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudPatternConfig {
    /// Fraud probability for orders of ordinary customers.
    pub base_rate: f64,
    /// Fraud probability for orders of high-risk customers.
    /// Replaces `base_rate`, it does not compound with it.
    pub high_risk_rate: f64,
    pub night_shift_probability: f64,
    pub night_hours: IntRange,
    pub shipping_mismatch_probability: f64,
    pub fraud_items: IntRange,
    pub legit_items: IntRange,
    pub fraud_quantity: IntRange,
    pub legit_quantity: IntRange,
    pub fraud_price_factor: FloatRange,
    pub shared_ip_pool_size: usize,
    pub shared_ip_probability: f64,
}

impl Default for FraudPatternConfig {
    fn default() -> Self {
        Self {
            base_rate: 0.03,
            high_risk_rate: 0.40,
            night_shift_probability: 0.60,
            night_hours: IntRange(1, 5),
            shipping_mismatch_probability: 0.70,
            fraud_items: IntRange(5, 15),
            legit_items: IntRange(1, 5),
            fraud_quantity: IntRange(2, 10),
            legit_quantity: IntRange(1, 3),
            fraud_price_factor: FloatRange(0.8, 1.0),
            shared_ip_pool_size: 20,
            shared_ip_probability: 0.60,
        }
    }
}

// ── Product catalog ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub retail_price: FloatRange,
    pub supplier_price_factor: FloatRange,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            retail_price: FloatRange(5.99, 999.99),
            supplier_price_factor: FloatRange(0.4, 0.7),
        }
    }
}

// ── Top level ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub customers: u32,
    pub stores: u32,
    pub employees: u32,
    pub suppliers: u32,
    pub products: u32,
    pub orders: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Value of every `Updated_at` column. `None` stamps `end_date`
    /// at midnight so that output is reproducible.
    pub updated_at: Option<NaiveDateTime>,
    pub hire_window_years: u32,
    pub manager_pool: u32,
    pub high_risk_fraction: f64,
    pub fraud: FraudPatternConfig,
    pub catalog: CatalogConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            customers: 10_000,
            stores: 50,
            employees: 200,
            suppliers: 30,
            products: 500,
            orders: 50_000,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date"),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 18).expect("valid date"),
            updated_at: None,
            hire_window_years: 5,
            manager_pool: 20,
            high_risk_fraction: 0.05,
            fraud: FraudPatternConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load from a JSON file. Missing keys take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(config)
    }

    /// Config with small hardcoded counts for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            seed: 12345,
            customers: 200,
            stores: 5,
            employees: 25,
            suppliers: 4,
            products: 40,
            orders: 500,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).expect("valid date"),
            ..Self::default()
        }
    }

    /// Timestamp written to every `Updated_at` column.
    pub fn stamp(&self) -> NaiveDateTime {
        self.updated_at
            .unwrap_or_else(|| self.end_date.and_time(chrono::NaiveTime::MIN))
    }

    /// Number of customers flagged high-risk: floor(fraction × customers).
    pub fn high_risk_count(&self) -> usize {
        (self.high_risk_fraction * f64::from(self.customers)).floor() as usize
    }

    /// Reject configurations that cannot be generated.
    pub fn validate(&self) -> GenResult<()> {
        for (field, count) in [
            ("customers", self.customers),
            ("stores", self.stores),
            ("employees", self.employees),
            ("suppliers", self.suppliers),
            ("products", self.products),
            ("manager_pool", self.manager_pool),
        ] {
            if count == 0 {
                return Err(invalid(field, "must be at least 1"));
            }
        }
        if self.orders == 0 {
            log::warn!("orders = 0: order tables will be empty");
        }
        if self.start_date > self.end_date {
            return Err(invalid(
                "start_date",
                format!("{} is after end_date {}", self.start_date, self.end_date),
            ));
        }

        let f = &self.fraud;
        for (field, p) in [
            ("high_risk_fraction", self.high_risk_fraction),
            ("fraud.base_rate", f.base_rate),
            ("fraud.high_risk_rate", f.high_risk_rate),
            ("fraud.night_shift_probability", f.night_shift_probability),
            ("fraud.shipping_mismatch_probability", f.shipping_mismatch_probability),
            ("fraud.shared_ip_probability", f.shared_ip_probability),
        ] {
            check_probability(field, p)?;
        }

        for (field, range) in [
            ("fraud.night_hours", f.night_hours),
            ("fraud.fraud_items", f.fraud_items),
            ("fraud.legit_items", f.legit_items),
            ("fraud.fraud_quantity", f.fraud_quantity),
            ("fraud.legit_quantity", f.legit_quantity),
        ] {
            if range.lo() > range.hi() {
                return Err(invalid(field, format!("lo {} > hi {}", range.lo(), range.hi())));
            }
        }
        if f.night_hours.hi() > 23 {
            return Err(invalid("fraud.night_hours", "hours must be within 0..=23"));
        }
        if f.fraud_items.lo() == 0 || f.legit_items.lo() == 0 {
            return Err(invalid("fraud.*_items", "every order needs at least one item"));
        }
        if f.fraud_quantity.lo() == 0 || f.legit_quantity.lo() == 0 {
            return Err(invalid("fraud.*_quantity", "quantities must be at least 1"));
        }

        for (field, range) in [
            ("fraud.fraud_price_factor", f.fraud_price_factor),
            ("catalog.retail_price", self.catalog.retail_price),
            ("catalog.supplier_price_factor", self.catalog.supplier_price_factor),
        ] {
            if !(range.lo() >= 0.0 && range.lo() <= range.hi()) {
                return Err(invalid(field, format!("bad range [{}, {}]", range.lo(), range.hi())));
            }
        }

        let max_items = f.fraud_items.hi().max(f.legit_items.hi());
        if max_items > u64::from(self.products) {
            return Err(GenError::SampleExceedsPopulation {
                what: "products per order",
                requested: max_items,
                available: u64::from(self.products),
            });
        }
        if f.shared_ip_pool_size == 0 && f.shared_ip_probability > 0.0 {
            return Err(invalid(
                "fraud.shared_ip_pool_size",
                "must be at least 1 when shared_ip_probability > 0",
            ));
        }
        // Every order may need a fresh address on top of the shared pool.
        let ips_needed = f.shared_ip_pool_size as u64 + u64::from(self.orders);
        if ips_needed > USABLE_IPV4_ADDRESSES {
            return Err(GenError::SampleExceedsPopulation {
                what: "IPv4 addresses",
                requested: ips_needed,
                available: USABLE_IPV4_ADDRESSES,
            });
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> GenError {
    GenError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

fn check_probability(field: &'static str, p: f64) -> GenResult<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(invalid(field, format!("probability {p} is outside [0, 1]")))
    }
}
