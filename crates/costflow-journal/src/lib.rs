//! Journal driver: append entries and rebuild inventories.
//!
//! This crate connects the pure validator to a persistence capability.
//! The [`JournalStore`] trait is the engine's only external dependency;
//! it may be backed by memory, disk, or a remote service. The
//! [`Journal`] driver reads the inventories an entry touches, runs the
//! validator, and writes back the entry and the updated inventories.
//!
//! The driver assumes exclusive write access to the store. Callers that
//! want concurrent writers must serialize them externally; the engine
//! itself never suspends, retries, or locks.
//!
//! # Example
//!
//! ```
//! use costflow_core::{AccountId, AccountingEntry, CostFlowMethod, SingleLine};
//! use costflow_journal::{Journal, MemoryStore};
//! use rust_decimal_macros::dec;
//!
//! let mut journal = Journal::new(MemoryStore::new());
//!
//! journal
//!     .append(
//!         &AccountingEntry::new(1)
//!             .with_line(SingleLine::new(
//!                 CostFlowMethod::Inflow,
//!                 AccountId(2001),
//!                 dec!(1000),
//!                 dec!(1000),
//!             ))
//!             .with_line(SingleLine::new(
//!                 CostFlowMethod::Inflow,
//!                 AccountId(-1001),
//!                 dec!(0),
//!                 dec!(1000),
//!             )),
//!     )
//!     .unwrap();
//!
//! assert_eq!(journal.store().entries().len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod memory;

pub use memory::MemoryStore;

use costflow_core::{
    AccountId, AccountingEntry, Inventory, Ledger, LedgerError, TimeMicros, TIME_FLOOR,
};
use costflow_validate::apply_entry;
use thiserror::Error;

/// The persistence capability the journal driver runs against.
///
/// Five operations, no assumptions about the backing medium. Reads happen
/// strictly before validation and writes strictly after; a store that
/// fails mid-write leaves the journal as the system of record and
/// [`Journal::rebuild`] as the recovery path.
pub trait JournalStore {
    /// Store-side failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Current inventory of `account`, or `None` for an account the
    /// store has never seen.
    ///
    /// The distinction matters: an unknown account may be created by an
    /// inflow, while a draining line on one fails validation.
    fn inventory(&self, account: AccountId) -> Result<Option<Inventory>, Self::Error>;

    /// Persist `inventory` as the current inventory of `account`,
    /// replacing any prior value.
    fn set_inventory(&mut self, account: AccountId, inventory: Inventory)
        -> Result<(), Self::Error>;

    /// Timestamp of the most recently appended entry, or `None` for an
    /// empty journal.
    fn last_timestamp(&self) -> Result<Option<TimeMicros>, Self::Error>;

    /// Durably append `entry` to the journal.
    fn append_entry(&mut self, entry: &AccountingEntry) -> Result<(), Self::Error>;

    /// Cursor over the journal in append order.
    fn journal(&self) -> Box<dyn Iterator<Item = Result<AccountingEntry, Self::Error>> + '_>;
}

/// Error from driving a store: either the entry failed validation or the
/// store itself failed.
#[derive(Debug, Error)]
pub enum JournalError<E> {
    /// The entry violated a ledger rule; nothing was persisted.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    /// The store failed.
    #[error("store error: {0}")]
    Store(E),
}

/// Drives a [`JournalStore`], keeping per-account inventories consistent
/// with the journal of record.
#[derive(Debug)]
pub struct Journal<S> {
    store: S,
}

impl<S: JournalStore> Journal<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unwrap the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Validate `entry`, persist it, and write back the touched
    /// inventories.
    ///
    /// On a validation error nothing is written. The entry is appended
    /// before the inventories, so a store failure between the two leaves
    /// a journal that is ahead of the inventories;
    /// [`rebuild`](Self::rebuild) restores consistency from the journal.
    pub fn append(&mut self, entry: &AccountingEntry) -> Result<(), JournalError<S::Error>> {
        let mut subset = Ledger::new();
        for account in entry.accounts() {
            if let Some(inventory) = self
                .store
                .inventory(account)
                .map_err(JournalError::Store)?
            {
                subset.insert(account, inventory);
            }
        }

        let last = self
            .store
            .last_timestamp()
            .map_err(JournalError::Store)?
            .unwrap_or(TIME_FLOOR);

        let subset = apply_entry(last, entry, subset)?;

        self.store
            .append_entry(entry)
            .map_err(JournalError::Store)?;
        tracing::debug!(
            timestamp = entry.timestamp,
            lines = entry.lines.len(),
            accounts = subset.len(),
            "appended entry"
        );

        for (account, inventory) in subset {
            self.store
                .set_inventory(account, inventory)
                .map_err(JournalError::Store)?;
        }

        Ok(())
    }

    /// Replay the whole journal and regenerate every inventory from it.
    ///
    /// Replay applies the same validation as append, so a corrupt journal
    /// (a non-increasing timestamp, an entry that no longer balances)
    /// fails at the offending entry and persists nothing. The journal
    /// itself is never modified.
    pub fn rebuild(&mut self) -> Result<(), JournalError<S::Error>> {
        let mut ledger = Ledger::new();
        let mut last = TIME_FLOOR;
        let mut replayed = 0usize;

        {
            let cursor = self.store.journal();
            for entry in cursor {
                let entry = entry.map_err(JournalError::Store)?;
                ledger = apply_entry(last, &entry, ledger)?;
                last = entry.timestamp;
                replayed += 1;
            }
        }

        tracing::debug!(
            entries = replayed,
            accounts = ledger.len(),
            "rebuilt inventories from journal"
        );

        for (account, inventory) in ledger {
            self.store
                .set_inventory(account, inventory)
                .map_err(JournalError::Store)?;
        }

        Ok(())
    }
}
