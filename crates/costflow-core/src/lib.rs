//! Core types for costflow
//!
//! This crate provides the fundamental types of the costflow engine:
//!
//! - [`AccountId`] - A signed account identifier whose sign encodes the
//!   account's debit/credit nature
//! - [`CostFlowMethod`] - How value enters an account or which lots an
//!   outflow draws from
//! - [`Lot`] - A cohort of units acquired together, with its origin
//!   timestamp and aggregate cost
//! - [`Inventory`] - The ordered lots held by one account, with the
//!   withdrawal engine and cost-flow orderings
//! - [`SingleLine`] / [`AccountingEntry`] - One side of a transaction and
//!   the composite transaction itself
//! - [`LedgerError`] - The engine's error taxonomy
//!
//! # Example
//!
//! ```
//! use costflow_core::{CostFlowMethod, Inventory, Lot};
//! use rust_decimal_macros::dec;
//!
//! // An account bought twice: 50 units for 500, then 80 units for 160.
//! let mut inv = Inventory::new();
//! inv.add(Lot::new(1, dec!(50), dec!(500)));
//! inv.add(Lot::new(2, dec!(80), dec!(160)));
//!
//! // Sell 5 units under FIFO; the oldest lot costs 10 per unit.
//! let inv = inv
//!     .withdraw(CostFlowMethod::Fifo, 3, dec!(5), dec!(50))
//!     .unwrap();
//!
//! assert_eq!(inv.lots()[0], Lot::new(1, dec!(45), dec!(450)));
//! assert_eq!(inv.lots()[1], Lot::new(2, dec!(80), dec!(160)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod entry;
pub mod error;
pub mod inventory;
pub mod lot;
pub mod method;

pub use account::{side_of, AccountId, Side};
pub use entry::{AccountingEntry, SingleLine};
pub use error::LedgerError;
pub use inventory::Inventory;
pub use lot::Lot;
pub use method::CostFlowMethod;

/// Microseconds since the Unix epoch.
///
/// The engine never consults wall-clock time; timestamps are supplied by
/// the caller and only compared for strict monotonicity.
pub type TimeMicros = i64;

/// Minimum timestamp sentinel for an empty journal.
///
/// Every appended entry must carry a timestamp strictly greater than the
/// previous one, so a journal's first entry may carry anything above this
/// floor.
pub const TIME_FLOOR: TimeMicros = TimeMicros::MIN;

/// Mapping from account to its inventory.
///
/// The validator operates on a subset of this map holding only the
/// accounts an entry touches; the store owns the full, persisted form.
pub type Ledger = std::collections::BTreeMap<AccountId, Inventory>;

// Re-export commonly used external types
pub use rust_decimal::Decimal;
