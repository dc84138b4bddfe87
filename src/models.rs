use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{Result, VergerError};

#[derive(Debug, Clone)]
pub struct SubParish {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Bec {
    pub id: i64,
    pub name: String,
    pub subparish_id: i64,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Contribution {
    pub id: Option<i64>,
    pub faithful_id: i64,
    pub year: i32,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

/// Convert a stored minor-unit amount back to a scale-2 decimal.
pub fn decimal_from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Validate a user-supplied amount and convert it to minor units for
/// storage. Amounts must be positive with at most 2 fractional digits.
pub fn cents_from_decimal(amount: Decimal) -> Result<i64> {
    if amount <= Decimal::ZERO {
        return Err(VergerError::InvalidArgument(
            "contribution amount must be positive".to_string(),
        ));
    }
    if amount.normalize().scale() > 2 {
        return Err(VergerError::InvalidArgument(format!(
            "contribution amount {amount} has more than 2 decimal places"
        )));
    }
    (amount * Decimal::ONE_HUNDRED).to_i64().ok_or_else(|| {
        VergerError::InvalidArgument(format!("contribution amount {amount} is out of range"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cents_roundtrip() {
        let amount: Decimal = "1234.56".parse().unwrap();
        let cents = cents_from_decimal(amount).unwrap();
        assert_eq!(cents, 123_456);
        assert_eq!(decimal_from_cents(cents), amount);
    }

    #[test]
    fn test_whole_amounts() {
        let amount: Decimal = "500".parse().unwrap();
        assert_eq!(cents_from_decimal(amount).unwrap(), 50_000);
    }

    #[test]
    fn test_trailing_zeros_accepted() {
        let amount: Decimal = "10.500".parse().unwrap();
        assert_eq!(cents_from_decimal(amount).unwrap(), 1_050);
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert!(cents_from_decimal(Decimal::ZERO).is_err());
        assert!(cents_from_decimal("-5".parse().unwrap()).is_err());
    }

    #[test]
    fn test_rejects_sub_cent_precision() {
        let amount: Decimal = "1.005".parse().unwrap();
        assert!(cents_from_decimal(amount).is_err());
    }
}
