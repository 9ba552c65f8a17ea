//! In-memory journal store.

use std::collections::BTreeMap;
use std::convert::Infallible;

use costflow_core::{AccountId, AccountingEntry, Inventory, TimeMicros};

use crate::JournalStore;

/// A [`JournalStore`] backed by process memory.
///
/// The journal is a vector in append order and the inventories a map.
/// Useful as the test double for the driver and for ephemeral ledgers;
/// it never fails, so its error type is [`Infallible`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inventories: BTreeMap<AccountId, Inventory>,
    journal: Vec<AccountingEntry>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an existing journal and no inventories,
    /// the starting point for a rebuild.
    #[must_use]
    pub fn with_journal(journal: Vec<AccountingEntry>) -> Self {
        Self {
            inventories: BTreeMap::new(),
            journal,
        }
    }

    /// All persisted inventories.
    #[must_use]
    pub fn inventories(&self) -> &BTreeMap<AccountId, Inventory> {
        &self.inventories
    }

    /// The persisted journal in append order.
    #[must_use]
    pub fn entries(&self) -> &[AccountingEntry] {
        &self.journal
    }
}

impl JournalStore for MemoryStore {
    type Error = Infallible;

    fn inventory(&self, account: AccountId) -> Result<Option<Inventory>, Infallible> {
        Ok(self.inventories.get(&account).cloned())
    }

    fn set_inventory(&mut self, account: AccountId, inventory: Inventory) -> Result<(), Infallible> {
        self.inventories.insert(account, inventory);
        Ok(())
    }

    fn last_timestamp(&self) -> Result<Option<TimeMicros>, Infallible> {
        Ok(self.journal.last().map(|entry| entry.timestamp))
    }

    fn append_entry(&mut self, entry: &AccountingEntry) -> Result<(), Infallible> {
        self.journal.push(entry.clone());
        Ok(())
    }

    fn journal(&self) -> Box<dyn Iterator<Item = Result<AccountingEntry, Infallible>> + '_> {
        Box::new(self.journal.iter().cloned().map(Ok))
    }
}
