use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Minor units per major unit (cents per unit).
pub const MINOR_UNITS: i64 = 100;

/// An exact monetary quantity counted in minor currency units.
///
/// Balances and transfers never touch floating point; `from_major` is the one place a float
/// amount is rounded, on its way in from the boundary.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct Money(i64);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("amount must be a finite number")]
    NotFinite,
    #[error("amount is out of range")]
    OutOfRange,
    #[error("invalid money format: {0}")]
    InvalidFormat(String),
    #[error("amount cannot have more than 2 decimal places: {0}")]
    TooPrecise(String),
}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Rounds a major-unit float (e.g. `12.345`) to minor units, half away from zero.
    pub fn from_major(major: f64) -> Result<Self, MoneyError> {
        if !major.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        let scaled = (major * MINOR_UNITS as f64).round();
        // i64::MAX as f64 rounds up to 2^63, so the upper bound must be exclusive
        if scaled >= i64::MAX as f64 || scaled < i64::MIN as f64 {
            return Err(MoneyError::OutOfRange);
        }
        Ok(Money(scaled as i64))
    }

    /// Parses a decimal string such as `"12.34"`, `"12.5"`, `"100"` or `".50"` exactly.
    ///
    /// For library callers holding textual amounts; the HTTP boundary takes numbers through
    /// `from_major`.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let trimmed = input.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let invalid = || MoneyError::InvalidFormat(input.to_string());

        let (units_str, fraction_str) = match digits.split_once('.') {
            Some((units, fraction)) => (units, fraction),
            None => (digits, ""),
        };
        if units_str.is_empty() && fraction_str.is_empty() {
            return Err(invalid());
        }
        if !units_str.chars().all(|c| c.is_ascii_digit())
            || !fraction_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if fraction_str.len() > 2 {
            return Err(MoneyError::TooPrecise(input.to_string()));
        }

        let units: i64 = if units_str.is_empty() {
            0
        } else {
            units_str.parse().map_err(|_| MoneyError::OutOfRange)?
        };
        let fraction: i64 = match fraction_str.len() {
            0 => 0,
            1 => fraction_str.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction_str.parse().map_err(|_| invalid())?,
        };

        let minor = units
            .checked_mul(MINOR_UNITS)
            .and_then(|m| m.checked_add(fraction))
            .ok_or(MoneyError::OutOfRange)?;
        Ok(Money(if negative { -minor } else { minor }))
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_unit = MINOR_UNITS as u64;
        write!(f, "{}{}.{:02}", sign, abs / per_unit, abs % per_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(5000).to_string(), "50.00");
        assert_eq!(Money::from_minor(1).to_string(), "0.01");
        assert_eq!(Money::from_minor(-1234).to_string(), "-12.34");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("50.00"), Ok(Money::from_minor(5000)));
        assert_eq!(Money::parse("50"), Ok(Money::from_minor(5000)));
        assert_eq!(Money::parse("12.5"), Ok(Money::from_minor(1250)));
        assert_eq!(Money::parse(".50"), Ok(Money::from_minor(50)));
        assert_eq!(Money::parse("-0.01"), Ok(Money::from_minor(-1)));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(Money::parse("abc"), Err(MoneyError::InvalidFormat(_))));
        assert!(matches!(Money::parse("1.2.3"), Err(MoneyError::InvalidFormat(_))));
        assert!(matches!(Money::parse("."), Err(MoneyError::InvalidFormat(_))));
        assert!(matches!(Money::parse("100.999"), Err(MoneyError::TooPrecise(_))));
    }

    #[test]
    fn test_from_major_rounds_once() {
        assert_eq!(Money::from_major(100.0), Ok(Money::from_minor(10000)));
        assert_eq!(Money::from_major(10.125), Ok(Money::from_minor(1013)));
        assert_eq!(Money::from_major(0.1 + 0.2), Ok(Money::from_minor(30)));
        assert_eq!(Money::from_major(-2.5), Ok(Money::from_minor(-250)));
        assert_eq!(Money::from_major(f64::NAN), Err(MoneyError::NotFinite));
        assert_eq!(Money::from_major(1e30), Err(MoneyError::OutOfRange));
    }
}
