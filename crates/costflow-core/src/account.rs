//! Account identifiers and the debit/credit side rule.
//!
//! Accounts carry no chart-of-accounts metadata; the only semantic the
//! engine reads off an [`AccountId`] is its nature, encoded in the sign.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::CostFlowMethod;

/// Identifier of an account.
///
/// The sign encodes the account's nature: zero and positive identifiers
/// are debit-natured (assets, expenses); negative identifiers are
/// credit-natured (liabilities, equity, revenues).
///
/// # Examples
///
/// ```
/// use costflow_core::AccountId;
///
/// assert!(AccountId(1001).is_debit_natured());
/// assert!(AccountId(0).is_debit_natured());
/// assert!(!AccountId(-4001).is_debit_natured());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct AccountId(pub i64);

impl AccountId {
    /// Whether increases to this account are recorded on the debit side.
    #[must_use]
    pub const fn is_debit_natured(self) -> bool {
        self.0 >= 0
    }
}

impl From<i64> for AccountId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The side of the double entry a line lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left side: increases to debit-natured accounts.
    Debit,
    /// Right side: increases to credit-natured accounts.
    Credit,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => write!(f, "debit"),
            Self::Credit => write!(f, "credit"),
        }
    }
}

/// Classify the side of a line from its method and account.
///
/// An inflow into a debit-natured account is a debit and an inflow into a
/// credit-natured account is a credit; every other method drains the
/// account and takes the opposite side. This single rule replaces an
/// explicit debit/credit flag on the line.
#[must_use]
pub fn side_of(method: CostFlowMethod, account: AccountId) -> Side {
    if (method == CostFlowMethod::Inflow) == account.is_debit_natured() {
        Side::Debit
    } else {
        Side::Credit
    }
}
