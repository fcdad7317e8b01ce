//! Vault history events.
//!
//! The history feed delivers the ordered, append-only list of events for
//! one vault. The overview only reads the USD flows out of it to derive
//! profit-and-loss; everything else passes through untouched.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One event in a vault's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VaultHistoryEvent {
    /// Collateral or DAI moved into the position.
    Deposit {
        amount_usd: Decimal,
        timestamp: DateTime<Utc>,
    },
    /// Collateral or DAI taken out of the position.
    Withdraw {
        amount_usd: Decimal,
        timestamp: DateTime<Utc>,
    },
    /// Any event the overview does not interpret (adjustments,
    /// liquidation auctions, transfers).
    Other {
        label: String,
        timestamp: DateTime<Utc>,
    },
}

impl VaultHistoryEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Deposit { timestamp, .. }
            | Self::Withdraw { timestamp, .. }
            | Self::Other { timestamp, .. } => *timestamp,
        }
    }
}
