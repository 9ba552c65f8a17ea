//! Lot type: a cohort of units acquired together.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TimeMicros;

/// A cohort of units acquired together.
///
/// A lot records the timestamp of the entry that created it, the units it
/// still holds, and their aggregate cost. The per-unit cost is derived,
/// not stored, so partial consumption keeps quantity and amount
/// proportional.
///
/// # Examples
///
/// ```
/// use costflow_core::Lot;
/// use rust_decimal_macros::dec;
///
/// let lot = Lot::new(1, dec!(50), dec!(90));
/// assert_eq!(lot.unit_price(), Some(dec!(1.8)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lot {
    /// Timestamp of the entry that created this lot.
    pub origin: TimeMicros,
    /// Units held.
    pub quantity: Decimal,
    /// Aggregate cost of the units held.
    pub amount: Decimal,
}

impl Lot {
    /// Create a new lot.
    #[must_use]
    pub const fn new(origin: TimeMicros, quantity: Decimal, amount: Decimal) -> Self {
        Self {
            origin,
            quantity,
            amount,
        }
    }

    /// Cost per unit, or `None` when the lot holds no units.
    ///
    /// A lot can legitimately hold value without units (a value-only
    /// adjustment collapsed the inventory); its unit price is undefined
    /// and price-ordered draws place it before every priced lot.
    #[must_use]
    pub fn unit_price(&self) -> Option<Decimal> {
        if self.quantity.is_zero() {
            None
        } else {
            Some(self.amount / self.quantity)
        }
    }

    /// True when the lot holds neither units nor value.
    ///
    /// Void lots carry no information and are pruned after every
    /// inventory update.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.quantity.is_zero() && self.amount.is_zero()
    }
}

impl fmt::Display for Lot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {} (t={})", self.quantity, self.amount, self.origin)
    }
}
