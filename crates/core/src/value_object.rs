//! Value objects: equality by value, not identity.

use core::iter::Sum;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two `Money`
/// amounts of 150 cents are the same amount, wherever they came from.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// A non-negative amount of money in the smallest currency unit (cents).
///
/// The catalog carries prices as decimal numbers (`1.5`); they are converted
/// to exact cents on the way in so totals never accumulate float error.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money {
    cents: u64,
}

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Convert a decimal amount (e.g. `2.99`) into cents, rounding half away
    /// from zero.
    pub fn from_decimal(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation(format!(
                "price cannot be negative (got {amount})"
            )));
        }
        whole_cents((amount * 100.0).round())
            .map(Self::from_cents)
            .ok_or_else(|| DomainError::validation("price is out of range"))
    }

    pub const fn cents(self) -> u64 {
        self.cents
    }

    pub fn as_decimal(self) -> f64 {
        self.cents as f64 / 100.0
    }

    pub const fn saturating_add(self, other: Money) -> Money {
        Money {
            cents: self.cents.saturating_add(other.cents),
        }
    }
}

/// `u64::MAX as f64` rounds up to 2^64, which does not fit in a `u64`.
fn whole_cents(cents: f64) -> Option<u64> {
    (cents >= 0.0 && cents < u64::MAX as f64).then_some(cents as u64)
}

impl TryFrom<f64> for Money {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Money::from_decimal(value)
    }
}

impl From<Money> for f64 {
    fn from(value: Money) -> Self {
        value.as_decimal()
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Renders as a dollar amount with two decimals: `$12.50`.
impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.cents / 100, self.cents % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_decimal_prices_to_cents() {
        assert_eq!(Money::from_decimal(1.0).unwrap().cents(), 100);
        assert_eq!(Money::from_decimal(2.99).unwrap().cents(), 299);
        assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_decimal(0.0).unwrap(), Money::ZERO);
    }

    #[test]
    fn rejects_negative_and_non_finite_prices() {
        assert!(matches!(
            Money::from_decimal(-0.01),
            Err(DomainError::Validation(_))
        ));
        assert!(Money::from_decimal(f64::NAN).is_err());
        assert!(Money::from_decimal(f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_cent_counts_beyond_u64() {
        let two_pow_64 = 2f64.powi(64);
        assert_eq!(whole_cents(two_pow_64), None);
        assert!(whole_cents(2f64.powi(63)).is_some());
        assert!(Money::from_decimal(two_pow_64).is_err());
        assert!(Money::from_decimal(1e300).is_err());
    }

    #[test]
    fn displays_two_decimal_places() {
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(105).to_string(), "$1.05");
        assert_eq!(Money::from_cents(123_456).to_string(), "$1234.56");
    }

    #[test]
    fn deserializes_from_json_number() {
        let m: Money = serde_json::from_str("19.5").unwrap();
        assert_eq!(m.cents(), 1950);
        assert!(serde_json::from_str::<Money>("-3").is_err());
        assert_eq!(serde_json::to_string(&m).unwrap(), "19.5");
    }

    #[test]
    fn sums_exactly() {
        let total: Money = [0.1, 0.2, 0.3]
            .iter()
            .map(|p| Money::from_decimal(*p).unwrap())
            .sum();
        assert_eq!(total.to_string(), "$0.60");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: cents survive the decimal representation used on the wire.
            #[test]
            fn decimal_representation_is_lossless(cents in 0u64..10_000_000) {
                let money = Money::from_cents(cents);
                let back = Money::from_decimal(money.as_decimal()).unwrap();
                prop_assert_eq!(back, money);
            }
        }
    }
}
