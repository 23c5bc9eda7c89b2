//! Prices

use std::iter::Sum;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Represents a price in pence/cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self { value: 0 };

    /// Creates a new Price
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Price { value }
    }

    /// The price of `quantity` units at this unit price, saturating at the
    /// numeric ceiling rather than wrapping.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Price {
            value: self.value.saturating_mul(u64::from(quantity)),
        }
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, price| Price {
            value: acc.value.saturating_add(price.value),
        })
    }
}
