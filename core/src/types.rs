//! Shared primitive types used across the entire generator.

use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// Dense sequential primary key, starting at 1.
pub type RowId = u32;

/// A monetary amount in integer cents.
///
/// Totals are summed in cents so an order total always equals the
/// sum of its line amounts exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(pub i64);

impl Cents {
    pub fn from_dollars(amount: f64) -> Self {
        Self((amount * 100.0).round() as i64)
    }

    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Scale by a factor, rounding to the nearest cent.
    pub fn scale(self, factor: f64) -> Self {
        Self((self.0 as f64 * factor).round() as i64)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Cents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Add for Cents {
    type Output = Cents;
    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0 + rhs.0)
    }
}

impl Mul<u32> for Cents {
    type Output = Cents;
    fn mul(self, rhs: u32) -> Cents {
        Cents(self.0 * i64::from(rhs))
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents(0), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_render_with_two_decimals() {
        assert_eq!(Cents(599).to_string(), "5.99");
        assert_eq!(Cents(100_000).to_string(), "1000.00");
        assert_eq!(Cents(7).to_string(), "0.07");
        assert_eq!(Cents(-250).to_string(), "-2.50");
    }

    #[test]
    fn scale_rounds_to_nearest_cent() {
        assert_eq!(Cents(1000).scale(0.4), Cents(400));
        assert_eq!(Cents(999).scale(0.5), Cents(500));
    }

    #[test]
    fn line_amounts_sum_exactly() {
        let total: Cents = [Cents(1999) * 3, Cents(1) * 10].into_iter().sum();
        assert_eq!(total, Cents(6007));
    }
}
