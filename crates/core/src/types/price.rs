//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are plain decimal amounts in the store currency (USD). Using
//! [`rust_decimal::Decimal`] keeps cart totals exact where binary floats
//! would accumulate rounding error.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative price in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The extended amount for `quantity` units of this price.
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Price::new(dec!(10)).to_string(), "$10.00");
        assert_eq!(Price::new(dec!(5.5)).to_string(), "$5.50");
    }

    #[test]
    fn test_line_total_is_exact() {
        let price = Price::new(dec!(5.50));
        assert_eq!(price.line_total(3), dec!(16.50));
    }

    #[test]
    fn test_parse() {
        let price: Price = "12.99".parse().unwrap();
        assert_eq!(price.amount(), dec!(12.99));
        assert!("not-a-price".parse::<Price>().is_err());
    }
}
