//! Entry validation and line processing.
//!
//! This crate implements the gate every journal entry passes through
//! before anything is persisted:
//!
//! - Entry-level checks: strictly increasing timestamp, at least two
//!   lines, non-negative inputs, unique accounts, debit/credit balance
//! - Per-line processing: classify each line by the sign quadrant of its
//!   internal `(amount, quantity)` delta and apply the matching
//!   inventory transformation
//!
//! The validator is pure: it takes the subset of the ledger an entry
//! touches and either returns the updated subset or a typed
//! [`LedgerError`]. Persistence is the journal driver's concern.
//!
//! # Example
//!
//! ```
//! use costflow_core::{
//!     AccountId, AccountingEntry, CostFlowMethod, Ledger, SingleLine, TIME_FLOOR,
//! };
//! use costflow_validate::apply_entry;
//! use rust_decimal_macros::dec;
//!
//! // Seed capital: cash in, capital credited.
//! let entry = AccountingEntry::new(1)
//!     .with_line(SingleLine::new(
//!         CostFlowMethod::Inflow,
//!         AccountId(2001),
//!         dec!(1000),
//!         dec!(1000),
//!     ))
//!     .with_line(SingleLine::new(
//!         CostFlowMethod::Inflow,
//!         AccountId(-1001),
//!         dec!(0),
//!         dec!(1000),
//!     ));
//!
//! let ledger = apply_entry(TIME_FLOOR, &entry, Ledger::new()).unwrap();
//! assert_eq!(ledger[&AccountId(2001)].totals(), (dec!(1000), dec!(1000)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rust_decimal::Decimal;

use costflow_core::{
    AccountingEntry, CostFlowMethod, Inventory, Ledger, LedgerError, Lot, Side, SingleLine,
    TimeMicros,
};

/// Validate `entry` against the journal cursor `last` and apply it to the
/// ledger subset, returning the updated subset.
///
/// The subset must hold the inventory of every account the entry drains.
/// An account an inflow touches for the first time is created empty;
/// any other method on an unknown account is
/// [`LedgerError::InventoryNotFound`].
///
/// Checks run in a fixed order: timestamp, entry size, then per line
/// non-negative inputs and account uniqueness, then the debit/credit
/// balance, then inventory existence for every draining line, and only
/// then the per-line inventory transformations. On any error the
/// returned subset must be discarded; nothing reports partial progress.
pub fn apply_entry(
    last: TimeMicros,
    entry: &AccountingEntry,
    mut ledger: Ledger,
) -> Result<Ledger, LedgerError> {
    if entry.timestamp <= last {
        return Err(LedgerError::TimeShouldBeBigger {
            entry: entry.timestamp,
            last,
        });
    }

    if entry.lines.len() < 2 {
        return Err(LedgerError::EntryTooShort {
            lines: entry.lines.len(),
        });
    }

    let mut debit = Decimal::ZERO;
    let mut credit = Decimal::ZERO;
    let mut seen = BTreeSet::new();

    for line in &entry.lines {
        if line.quantity < Decimal::ZERO || line.amount < Decimal::ZERO {
            return Err(LedgerError::MustBePositive {
                account: line.account,
            });
        }
        if !seen.insert(line.account) {
            return Err(LedgerError::DuplicateAccount {
                account: line.account,
            });
        }
        match line.side() {
            Side::Debit => debit += line.amount,
            Side::Credit => credit += line.amount,
        }
    }

    if debit != credit {
        return Err(LedgerError::DebitNotEqualCredit {
            debit,
            credit,
            difference: debit - credit,
        });
    }

    // Draining lines need an inventory to drain; checked for the whole
    // entry before any line mutates the subset.
    for line in &entry.lines {
        if line.method != CostFlowMethod::Inflow && !ledger.contains_key(&line.account) {
            return Err(LedgerError::InventoryNotFound {
                account: line.account,
            });
        }
    }

    for line in &entry.lines {
        let inventory = match ledger.remove(&line.account) {
            Some(inventory) => inventory,
            None if line.method == CostFlowMethod::Inflow => Inventory::new(),
            None => {
                return Err(LedgerError::InventoryNotFound {
                    account: line.account,
                })
            }
        };
        let processed = process_line(entry.timestamp, line, inventory)?;
        ledger.insert(line.account, processed);
    }

    Ok(ledger)
}

/// Apply one validated line to its account's inventory.
///
/// The line's internal delta keeps its sign for an inflow and is negated
/// for every other method, then dispatched on the sign quadrant of
/// `(amount, quantity)`:
///
/// - both positive: a new lot is appended
/// - one leg positive, the other zero: the inventory collapses into one
///   lot carrying the adjusted totals (revaluation up, units gifted)
/// - both zero: the line carries no information and is rejected
/// - one leg negative, the other zero: only NONE may do this; the
///   inventory collapses with the decrement (shrinkage, write-down)
/// - both negative: a cost outflow under the line's method
///
/// Mixed positive/negative quadrants would mean an inflow with a negative
/// input, which entry validation already rejected; reaching one is an
/// internal invariant violation, not a user error.
fn process_line(
    timestamp: TimeMicros,
    line: &SingleLine,
    inventory: Inventory,
) -> Result<Inventory, LedgerError> {
    let (quantity, amount) = line.signed_delta();

    let mut next = match (amount.cmp(&Decimal::ZERO), quantity.cmp(&Decimal::ZERO)) {
        (Ordering::Greater, Ordering::Greater) => {
            let mut inventory = inventory;
            inventory.add(Lot::new(timestamp, quantity, amount));
            inventory
        }
        (Ordering::Greater, Ordering::Equal) | (Ordering::Equal, Ordering::Greater) => {
            inventory.merge_adjust(timestamp, quantity, amount)?
        }
        (Ordering::Equal, Ordering::Equal) => {
            return Err(LedgerError::QuantityAndAmountAreZero {
                account: line.account,
            });
        }
        (Ordering::Equal, Ordering::Less) | (Ordering::Less, Ordering::Equal) => {
            if line.method != CostFlowMethod::None {
                return Err(LedgerError::MustUseNoneWhenZero {
                    account: line.account,
                });
            }
            inventory.merge_adjust(timestamp, quantity, amount)?
        }
        (Ordering::Less, Ordering::Less) => match line.method {
            CostFlowMethod::None => inventory.merge_adjust(timestamp, quantity, amount)?,
            CostFlowMethod::Inflow => {
                return Err(LedgerError::InvariantViolation {
                    detail: "inflow line reached the outflow path",
                });
            }
            method => inventory.withdraw(method, timestamp, -quantity, -amount)?,
        },
        (Ordering::Greater, Ordering::Less) | (Ordering::Less, Ordering::Greater) => {
            return Err(LedgerError::InvariantViolation {
                detail: "quantity and amount deltas disagree in sign",
            });
        }
    };

    next.compact();
    Ok(next)
}
