//! Calendar dimension: one row per day in the configured range.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Day")]
    pub day: String,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Quarter")]
    pub quarter: String,
    #[serde(rename = "DayOfWeek")]
    pub day_of_week: String,
    #[serde(rename = "WeekOfYear")]
    pub week_of_year: u32,
    #[serde(rename = "Updated_at", with = "crate::export::timestamp")]
    pub updated_at: NaiveDateTime,
}

impl DateRecord {
    pub fn for_day(date: NaiveDate, updated_at: NaiveDateTime) -> Self {
        Self {
            date,
            day: date.format("%a").to_string(),
            month: date.format("%B").to_string(),
            year: date.year(),
            quarter: format!("Q{}", date.month0() / 3 + 1),
            day_of_week: date.format("%A").to_string(),
            week_of_year: date.iso_week().week(),
            updated_at,
        }
    }
}

/// Every day in [start, end], both ends included. Empty when start > end.
pub fn generate_dates(
    start: NaiveDate,
    end: NaiveDate,
    updated_at: NaiveDateTime,
) -> Vec<DateRecord> {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|d| DateRecord::for_day(d, updated_at))
        .collect()
}
