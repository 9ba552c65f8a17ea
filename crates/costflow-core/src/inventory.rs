//! Inventory type: the ordered lots held by an account.
//!
//! An [`Inventory`] tracks one account's holdings as an ordered sequence
//! of [`Lot`]s and implements the consuming half of the engine: choosing
//! a draw order for a [`CostFlowMethod`] and walking lots until a
//! requested withdrawal is covered.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CostFlowMethod, LedgerError, Lot, TimeMicros};

/// The ordered lots currently held by an account.
///
/// Insertion order is meaningful: FIFO and LIFO order lots by the
/// timestamp of the entry that created them, and the sorts are stable, so
/// lots sharing an origin keep their insertion order.
///
/// # Examples
///
/// ```
/// use costflow_core::{CostFlowMethod, Inventory, Lot};
/// use rust_decimal_macros::dec;
///
/// let mut inv = Inventory::new();
/// inv.add(Lot::new(1, dec!(10), dec!(100)));
/// inv.add(Lot::new(2, dec!(10), dec!(200)));
/// assert_eq!(inv.totals(), (dec!(20), dec!(300)));
///
/// // LIFO draws from the newest lot at 20 per unit.
/// let inv = inv
///     .withdraw(CostFlowMethod::Lifo, 3, dec!(5), dec!(100))
///     .unwrap();
/// assert_eq!(inv.totals(), (dec!(15), dec!(200)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    lots: Vec<Lot>,
}

impl Inventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all lots in insertion order.
    #[must_use]
    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// Check if the inventory holds no lots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// Get the number of lots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lots.len()
    }

    /// Append a lot.
    ///
    /// Lots are never merged on the way in; each acquisition keeps its
    /// own origin and cost so the draw orders stay meaningful.
    pub fn add(&mut self, lot: Lot) {
        self.lots.push(lot);
    }

    /// Total quantity and amount across all lots.
    #[must_use]
    pub fn totals(&self) -> (Decimal, Decimal) {
        self.lots.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(quantity, amount), lot| (quantity + lot.quantity, amount + lot.amount),
        )
    }

    /// Drop lots that are zero in both quantity and amount.
    pub fn compact(&mut self) {
        self.lots.retain(|lot| !lot.is_void());
    }

    /// Collapse every lot into a single one carrying the adjusted totals.
    ///
    /// This is the raw adjustment path: value or units change without a
    /// cost computation (revaluation, shrinkage, write-down, or a NONE
    /// outflow). The deltas may be negative; the adjusted totals must not
    /// be, or the matching insufficiency error is returned. Adjusting by
    /// exactly `(0, 0)` leaves the inventory untouched.
    pub fn merge_adjust(
        self,
        origin: TimeMicros,
        quantity: Decimal,
        amount: Decimal,
    ) -> Result<Self, LedgerError> {
        if quantity.is_zero() && amount.is_zero() {
            return Ok(self);
        }

        let (total_quantity, total_amount) = self.totals();

        if total_amount + amount < Decimal::ZERO {
            return Err(LedgerError::InsufficientAmount {
                requested: amount.abs(),
                available: total_amount,
            });
        }
        if total_quantity + quantity < Decimal::ZERO {
            return Err(LedgerError::InsufficientQuantity {
                requested: quantity.abs(),
                available: total_quantity,
            });
        }

        Ok(Self {
            lots: vec![Lot::new(
                origin,
                total_quantity + quantity,
                total_amount + amount,
            )],
        })
    }

    /// Draw `(quantity, amount)` out of the inventory under `method`.
    ///
    /// Both magnitudes must be positive. The method fixes the order lots
    /// are consumed in; the shared walk then consumes them front to back
    /// and verifies that the cost it computed equals the declared
    /// `amount`, returning [`LedgerError::AmountMismatch`] otherwise.
    ///
    /// `Inflow` and `None` never reach this path: inflows only deposit,
    /// and NONE adjusts totals via [`merge_adjust`](Self::merge_adjust)
    /// without a cost computation.
    pub fn withdraw(
        self,
        method: CostFlowMethod,
        origin: TimeMicros,
        quantity: Decimal,
        amount: Decimal,
    ) -> Result<Self, LedgerError> {
        let ordered = match method {
            CostFlowMethod::Wac => {
                let (total_quantity, total_amount) = self.totals();
                vec![Lot::new(origin, total_quantity, total_amount)]
            }
            CostFlowMethod::Fifo => self.into_sorted_by_origin(),
            CostFlowMethod::Lifo => {
                let mut lots = self.into_sorted_by_origin();
                lots.reverse();
                lots
            }
            CostFlowMethod::Hifo => {
                let mut lots = self.into_sorted_by_unit_price();
                lots.reverse();
                lots
            }
            CostFlowMethod::Lofo => self.into_sorted_by_unit_price(),
            CostFlowMethod::Inflow | CostFlowMethod::None => {
                return Err(LedgerError::InvariantViolation {
                    detail: "withdraw called with a non-consuming cost flow method",
                });
            }
        };

        Ok(Self {
            lots: drain_in_order(ordered, quantity, amount)?,
        })
    }

    /// Lots sorted ascending by origin timestamp, stably.
    fn into_sorted_by_origin(self) -> Vec<Lot> {
        let mut lots = self.lots;
        lots.sort_by_key(|lot| lot.origin);
        lots
    }

    /// Lots sorted ascending by unit price, stably.
    ///
    /// Lots without units have no price and sort before every priced lot.
    fn into_sorted_by_unit_price(self) -> Vec<Lot> {
        let mut lots = self.lots;
        lots.sort_by_key(Lot::unit_price);
        lots
    }
}

/// Consume lots front to back until `quantity` is covered.
///
/// The last touched lot may be split at its unit price; lots after the
/// split point pass through unchanged. The accumulated cost of everything
/// consumed must equal the declared `amount` exactly.
fn drain_in_order(
    lots: Vec<Lot>,
    quantity: Decimal,
    amount: Decimal,
) -> Result<Vec<Lot>, LedgerError> {
    if lots.is_empty() {
        return Err(LedgerError::InventoryEmpty);
    }

    let (total_quantity, total_amount) = lots.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(q, a), lot| (q + lot.quantity, a + lot.amount),
    );
    if total_quantity < quantity {
        return Err(LedgerError::InsufficientQuantity {
            requested: quantity,
            available: total_quantity,
        });
    }
    if total_amount < amount {
        return Err(LedgerError::InsufficientAmount {
            requested: amount,
            available: total_amount,
        });
    }

    let mut residual = Vec::new();
    let mut consumed = Decimal::ZERO;
    let mut remaining = quantity;

    for lot in lots {
        if remaining.is_zero() {
            residual.push(lot);
        } else if lot.quantity <= remaining {
            remaining -= lot.quantity;
            consumed += lot.amount;
        } else {
            let price = lot.amount / lot.quantity;
            let kept = lot.quantity - remaining;
            residual.push(Lot::new(lot.origin, kept, kept * price));
            consumed += remaining * price;
            remaining = Decimal::ZERO;
        }
    }

    if consumed != amount {
        return Err(LedgerError::AmountMismatch {
            computed: consumed,
            declared: amount,
        });
    }

    Ok(residual)
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lots.is_empty() {
            return write!(f, "(empty)");
        }
        for (i, lot) in self.lots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{lot}")?;
        }
        Ok(())
    }
}

impl FromIterator<Lot> for Inventory {
    fn from_iter<I: IntoIterator<Item = Lot>>(iter: I) -> Self {
        Self {
            lots: iter.into_iter().collect(),
        }
    }
}
