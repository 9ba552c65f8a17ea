//! The engine's error taxonomy.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AccountId, TimeMicros};

/// Everything that can go wrong while validating or applying an entry.
///
/// Each variant is a distinct, stable kind carrying the context a caller
/// needs to report the failure. The engine never retries and never
/// commits partially: an error means neither the entry nor any inventory
/// was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Entry timestamp is not strictly greater than the journal's last.
    #[error("entry timestamp {entry} must be greater than the last journal timestamp {last}")]
    TimeShouldBeBigger {
        /// Timestamp the rejected entry carried.
        entry: TimeMicros,
        /// Timestamp of the most recent journal entry.
        last: TimeMicros,
    },

    /// Entry carries fewer than two lines.
    #[error("entry must have at least two lines, got {lines}")]
    EntryTooShort {
        /// Number of lines the rejected entry carried.
        lines: usize,
    },

    /// A method code or name does not denote a cost-flow method.
    #[error("invalid cost flow method: {token}")]
    InvalidCostFlowMethod {
        /// The unrecognized code or name.
        token: String,
    },

    /// A line carries a negative quantity or amount.
    #[error("quantity and amount must both be positive for account {account}")]
    MustBePositive {
        /// Account named by the offending line.
        account: AccountId,
    },

    /// The same account appears on more than one line of an entry.
    #[error("duplicate account {account} in entry")]
    DuplicateAccount {
        /// The repeated account.
        account: AccountId,
    },

    /// Debit and credit sides of an entry do not balance.
    #[error("debit {debit} does not equal credit {credit} (difference {difference})")]
    DebitNotEqualCredit {
        /// Sum of debit-sided amounts.
        debit: Decimal,
        /// Sum of credit-sided amounts.
        credit: Decimal,
        /// `debit - credit`.
        difference: Decimal,
    },

    /// A draining line names an account with no inventory.
    #[error("inventory not found for account {account}")]
    InventoryNotFound {
        /// Account named by the offending line.
        account: AccountId,
    },

    /// A line carries neither quantity nor amount.
    #[error("quantity and amount are both zero for account {account}")]
    QuantityAndAmountAreZero {
        /// Account named by the offending line.
        account: AccountId,
    },

    /// A zero-quantity or zero-amount outflow used a cost-computing method.
    #[error("cost flow method must be NONE when quantity or amount is zero for account {account}")]
    MustUseNoneWhenZero {
        /// Account named by the offending line.
        account: AccountId,
    },

    /// Withdrawal from an account that holds no lots.
    #[error("inventory is empty")]
    InventoryEmpty,

    /// More quantity requested than the inventory holds.
    #[error("requested quantity {requested} exceeds available {available}")]
    InsufficientQuantity {
        /// Quantity the line asked to withdraw.
        requested: Decimal,
        /// Total quantity the inventory holds.
        available: Decimal,
    },

    /// More amount requested than the inventory holds.
    #[error("requested amount {requested} exceeds available {available}")]
    InsufficientAmount {
        /// Amount the line asked to withdraw.
        requested: Decimal,
        /// Total amount the inventory holds.
        available: Decimal,
    },

    /// The declared cost differs from the cost the chosen method computed.
    #[error("amount mismatch: method computed {computed}, entry declared {declared}")]
    AmountMismatch {
        /// Cost the cost-flow method computed from the lots.
        computed: Decimal,
        /// Cost the entry declared.
        declared: Decimal,
    },

    /// A state the validator is supposed to make unreachable.
    #[error("internal invariant violated: {detail}")]
    InvariantViolation {
        /// What went wrong.
        detail: &'static str,
    },
}
