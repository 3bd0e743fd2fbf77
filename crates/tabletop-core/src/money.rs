//! # Money
//!
//! Every price and total in the ledger is a whole number of cents.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │    f64:   0.10 + 0.20 ──► 0.30000000000000004                          │
//! │    Money: 10 + 20     ──► 30                                           │
//! │                                                                         │
//! │    Caesar Salad × 2:  949 + 949 ──► 1898, every time                   │
//! │                                                                         │
//! │  Tables are re-totaled after every add/remove, so drift would compound │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```rust
//! use tabletop_core::money::Money;
//!
//! let salad = Money::from_cents(949);
//! let lemonade = Money::from_cents(449);
//!
//! assert_eq!((salad * 2).cents(), 1898);
//! assert_eq!([salad, lemonade].iter().sum::<Money>().to_string(), "$13.98");
//! ```
//!
//! Cents only become a float at the billing provider boundary, through
//! [`Money::to_major_units`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// An amount in cents of the table's currency.
///
/// Signed so that `total - unit_price` after a removal can be checked
/// without wrapping; the ledger never stores a negative amount.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// `None` when the sum does not fit in `i64` cents.
    #[inline]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Unit price × quantity, or `None` on overflow.
    #[inline]
    pub fn checked_mul(self, quantity: i64) -> Option<Money> {
        self.0.checked_mul(quantity).map(Money)
    }

    /// Decimal major units, as the billing provider expects (`949` → `9.49`).
    ///
    /// One division, so a two-decimal amount renders in its shortest form:
    /// ```rust
    /// use tabletop_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(949).to_major_units(), 9.49);
    /// assert_eq!(Money::from_cents(1200).to_major_units(), 12.0);
    /// ```
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// `$18.98` style, for logs. The frontend does its own currency formatting.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    #[inline]
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    #[inline]
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

/// Unit price × quantity.
impl Mul<i64> for Money {
    type Output = Money;

    #[inline]
    fn mul(self, quantity: i64) -> Money {
        Money(self.0 * quantity)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1898).to_string(), "$18.98");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_line_arithmetic() {
        let salad = Money::from_cents(949);
        let mut total = salad * 2;
        assert_eq!(total.cents(), 1898);

        total += Money::from_cents(499);
        assert_eq!(total.cents(), 2397);
        assert_eq!((total - salad).cents(), 1448);
        assert!((Money::zero() - salad).is_negative());
    }

    #[test]
    fn test_checked_arithmetic() {
        let salad = Money::from_cents(949);
        assert_eq!(salad.checked_mul(3), Some(Money::from_cents(2847)));
        assert_eq!(salad.checked_add(salad), Some(Money::from_cents(1898)));

        let huge = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!(huge.checked_mul(2), None);
        assert_eq!(huge.checked_add(huge), None);
    }

    #[test]
    fn test_sum_of_subtotals() {
        let subtotals = [Money::from_cents(949), Money::from_cents(1299), Money::zero()];
        assert_eq!(subtotals.iter().sum::<Money>().cents(), 2248);
        assert!(std::iter::empty::<Money>().sum::<Money>().is_zero());
    }

    #[test]
    fn test_to_major_units() {
        assert_eq!(Money::from_cents(1898).to_major_units(), 18.98);
        assert_eq!(Money::from_cents(449).to_major_units(), 4.49);
        assert_eq!(Money::zero().to_major_units(), 0.0);
    }

    #[test]
    fn test_serializes_as_plain_cents() {
        assert_eq!(serde_json::to_string(&Money::from_cents(949)).unwrap(), "949");
    }
}
