// Player prices and the squad budget.
//
// Backed by `rust_decimal::Decimal`, which the API already speaks: prices
// arrive as decimal strings ("12.50") or plain JSON numbers and compare
// exactly against the 70.00 budget.

use std::fmt;
use std::iter::Sum;
use std::ops::Sub;

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A price or a budget amount. Signed so a remaining budget can go negative
/// for an over-budget team loaded from the server; deserialized player
/// prices are never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);
    /// Largest representable amount. Saturated totals land here, which is
    /// always over any budget.
    pub const MAX: Price = Price(Decimal::MAX);

    pub fn new(amount: Decimal) -> Self {
        Price(amount)
    }

    pub fn from_cents(cents: i64) -> Self {
        Price(Decimal::new(cents, 2))
    }

    pub fn from_units(units: i64) -> Self {
        Price(Decimal::from(units))
    }

    pub fn amount(self) -> Decimal {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// `None` when the sum is not representable.
    pub fn checked_add(self, rhs: Price) -> Option<Price> {
        self.0.checked_add(rhs.0).map(Price)
    }

    pub fn saturating_add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:.2}", self.0))
    }
}

impl Sub for Price {
    type Output = Price;

    fn sub(self, rhs: Price) -> Price {
        Price(self.0.saturating_sub(rhs.0))
    }
}

/// Saturating: a catalog with absurd prices sums to [`Price::MAX`] instead
/// of panicking.
impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Price::saturating_add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Price {
        iter.copied().sum()
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        if amount < Decimal::ZERO {
            return Err(D::Error::custom(format!("price cannot be negative: {amount}")));
        }
        Ok(Price(amount))
    }
}
