//! Journal entry types.
//!
//! An [`AccountingEntry`] is one atomic transaction: a timestamp and at
//! least two [`SingleLine`]s that balance across the debit and credit
//! sides.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{side_of, AccountId, CostFlowMethod, Side, TimeMicros};

/// One side of a composite entry.
///
/// Quantity and amount are the positive magnitudes the business process
/// reported; the direction of movement is carried by the method, not by
/// signs on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleLine {
    /// How value moves through the account.
    pub method: CostFlowMethod,
    /// The account this line touches.
    pub account: AccountId,
    /// Units moved. Non-negative on input.
    pub quantity: Decimal,
    /// Monetary amount moved. Non-negative on input.
    pub amount: Decimal,
}

impl SingleLine {
    /// Create a new line.
    #[must_use]
    pub const fn new(
        method: CostFlowMethod,
        account: AccountId,
        quantity: Decimal,
        amount: Decimal,
    ) -> Self {
        Self {
            method,
            account,
            quantity,
            amount,
        }
    }

    /// The debit/credit side this line lands on.
    #[must_use]
    pub fn side(&self) -> Side {
        side_of(self.method, self.account)
    }

    /// The signed `(quantity, amount)` delta applied to the account's
    /// inventory: an inflow keeps its magnitudes, every other method
    /// drains the account and is negated.
    #[must_use]
    pub fn signed_delta(&self) -> (Decimal, Decimal) {
        if self.method == CostFlowMethod::Inflow {
            (self.quantity, self.amount)
        } else {
            (-self.quantity, -self.amount)
        }
    }
}

impl fmt::Display for SingleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} for {}",
            self.method, self.account, self.quantity, self.amount
        )
    }
}

/// A single atomic transaction.
///
/// Timestamps are strictly increasing across the journal; the validator
/// rejects an entry that does not advance the clock.
///
/// # Examples
///
/// ```
/// use costflow_core::{AccountId, AccountingEntry, CostFlowMethod, SingleLine};
/// use rust_decimal_macros::dec;
///
/// let entry = AccountingEntry::new(1)
///     .with_line(SingleLine::new(
///         CostFlowMethod::Inflow,
///         AccountId(2001),
///         dec!(1000),
///         dec!(1000),
///     ))
///     .with_line(SingleLine::new(
///         CostFlowMethod::Inflow,
///         AccountId(-1001),
///         dec!(0),
///         dec!(1000),
///     ));
/// assert_eq!(entry.lines.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingEntry {
    /// Microsecond unix timestamp of the transaction.
    pub timestamp: TimeMicros,
    /// The lines of the transaction, at least two.
    pub lines: Vec<SingleLine>,
}

impl AccountingEntry {
    /// Create an empty entry at `timestamp`.
    #[must_use]
    pub const fn new(timestamp: TimeMicros) -> Self {
        Self {
            timestamp,
            lines: Vec::new(),
        }
    }

    /// Add a line to this entry.
    #[must_use]
    pub fn with_line(mut self, line: SingleLine) -> Self {
        self.lines.push(line);
        self
    }

    /// The accounts this entry touches, in line order.
    pub fn accounts(&self) -> impl Iterator<Item = AccountId> + '_ {
        self.lines.iter().map(|line| line.account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_signed_delta_negates_outflows() {
        let inflow = SingleLine::new(CostFlowMethod::Inflow, AccountId(1), dec!(5), dec!(50));
        assert_eq!(inflow.signed_delta(), (dec!(5), dec!(50)));

        let outflow = SingleLine::new(CostFlowMethod::Fifo, AccountId(1), dec!(5), dec!(50));
        assert_eq!(outflow.signed_delta(), (dec!(-5), dec!(-50)));
    }

    #[test]
    fn test_builder() {
        let entry = AccountingEntry::new(7)
            .with_line(SingleLine::new(
                CostFlowMethod::Inflow,
                AccountId(1),
                dec!(1),
                dec!(1),
            ))
            .with_line(SingleLine::new(
                CostFlowMethod::Wac,
                AccountId(2),
                dec!(1),
                dec!(1),
            ));
        assert_eq!(entry.timestamp, 7);
        assert_eq!(
            entry.accounts().collect::<Vec<_>>(),
            vec![AccountId(1), AccountId(2)]
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let entry = AccountingEntry::new(3).with_line(SingleLine::new(
            CostFlowMethod::Hifo,
            AccountId(-9),
            dec!(2.5),
            dec!(10),
        ));
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(serde_json::from_str::<AccountingEntry>(&json).unwrap(), entry);
    }
}
