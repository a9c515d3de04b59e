//! Money Handling
//!
//! Charge amounts travel as integer minor units (cents) to avoid
//! floating-point rounding; the platform ledger wants major units, so the
//! conversion goes through `rust_decimal` (never use f64 for money).

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{CheckoutError, Result};

/// A positive charge amount in minor currency units (cents).
///
/// Serializes as a bare integer, matching the intent-creation wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Create an amount from minor units. Rejects zero and negative values.
    pub fn from_minor(minor: i64) -> Result<Self> {
        if minor <= 0 {
            return Err(CheckoutError::InvalidAmount(minor));
        }
        Ok(Self(minor))
    }

    /// The raw minor-unit value
    pub fn minor(self) -> i64 {
        self.0
    }

    /// Convert to major currency units (e.g. 999 -> 9.99)
    pub fn major(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}", self.major())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_minor_to_major() {
        let amount = Amount::from_minor(999).unwrap();
        assert_eq!(amount.minor(), 999);
        assert_eq!(amount.major(), dec!(9.99));
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Amount::from_minor(999).unwrap().to_string(), "$9.99");
        assert_eq!(Amount::from_minor(1000).unwrap().to_string(), "$10.00");
        assert_eq!(Amount::from_minor(5).unwrap().to_string(), "$0.05");
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(matches!(
            Amount::from_minor(0),
            Err(CheckoutError::InvalidAmount(0))
        ));
        assert!(matches!(
            Amount::from_minor(-500),
            Err(CheckoutError::InvalidAmount(-500))
        ));
    }

    #[test]
    fn test_serializes_as_integer() {
        let amount = Amount::from_minor(1999).unwrap();
        assert_eq!(serde_json::to_value(amount).unwrap(), serde_json::json!(1999));
    }
}
