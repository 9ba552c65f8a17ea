//! Cost-flow methods.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::LedgerError;

/// How value moves through an account's inventory.
///
/// [`Inflow`](Self::Inflow) marks value entering the account; every other
/// method describes which historical lots an outflow draws from.
/// [`None`](Self::None) is a raw adjustment that decrements totals
/// without computing or verifying a cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostFlowMethod {
    /// Value enters the account, creating or adjusting lots.
    Inflow,
    /// Weighted-average cost: all lots merge into one before drawing.
    Wac,
    /// First in, first out: oldest lots are drawn first.
    Fifo,
    /// Last in, first out: newest lots are drawn first.
    Lifo,
    /// Highest in, first out: the costliest lots per unit are drawn first.
    Hifo,
    /// Lowest in, first out: the cheapest lots per unit are drawn first.
    Lofo,
    /// Raw decrement without cost verification.
    None,
}

impl CostFlowMethod {
    /// Stable numeric code, usable as a compact wire representation.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Inflow => 0,
            Self::Wac => 1,
            Self::Fifo => 2,
            Self::Lifo => 3,
            Self::Hifo => 4,
            Self::Lofo => 5,
            Self::None => 6,
        }
    }
}

impl TryFrom<u8> for CostFlowMethod {
    type Error = LedgerError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Inflow),
            1 => Ok(Self::Wac),
            2 => Ok(Self::Fifo),
            3 => Ok(Self::Lifo),
            4 => Ok(Self::Hifo),
            5 => Ok(Self::Lofo),
            6 => Ok(Self::None),
            _ => Err(LedgerError::InvalidCostFlowMethod {
                token: code.to_string(),
            }),
        }
    }
}

impl FromStr for CostFlowMethod {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INFLOW" => Ok(Self::Inflow),
            "WAC" => Ok(Self::Wac),
            "FIFO" => Ok(Self::Fifo),
            "LIFO" => Ok(Self::Lifo),
            "HIFO" => Ok(Self::Hifo),
            "LOFO" => Ok(Self::Lofo),
            "NONE" => Ok(Self::None),
            _ => Err(LedgerError::InvalidCostFlowMethod {
                token: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CostFlowMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inflow => write!(f, "INFLOW"),
            Self::Wac => write!(f, "WAC"),
            Self::Fifo => write!(f, "FIFO"),
            Self::Lifo => write!(f, "LIFO"),
            Self::Hifo => write!(f, "HIFO"),
            Self::Lofo => write!(f, "LOFO"),
            Self::None => write!(f, "NONE"),
        }
    }
}
