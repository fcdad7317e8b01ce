//! Derived, ephemeral join records.
//!
//! Each stage of the pipeline widens the previous record. The records are
//! plain data with structural equality so the deduplication stages can
//! diff whole snapshots.

use crate::domain::{IlkBalance, StopLossTriggerData, Vault, VaultHistoryEvent};

/// A vault paired with its history.
#[derive(Debug, Clone, PartialEq)]
pub struct VaultWithHistory {
    pub vault: Vault,
    pub events: Vec<VaultHistoryEvent>,
}

/// A vault with history and, when one matched, its ilk balance record.
///
/// A missing balance is valid partial data: the vault stays in the
/// snapshot and its balance-derived display fields stay empty.
#[derive(Debug, Clone, PartialEq)]
pub struct VaultWithIlkBalance {
    pub vault: Vault,
    pub events: Vec<VaultHistoryEvent>,
    pub balance: Option<IlkBalance>,
}

impl VaultWithHistory {
    pub fn with_balance(self, balance: Option<IlkBalance>) -> VaultWithIlkBalance {
        VaultWithIlkBalance {
            vault: self.vault,
            events: self.events,
            balance,
        }
    }
}

/// The fully enriched record the view-model mapper consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct VaultWithAutomation {
    pub vault: Vault,
    pub events: Vec<VaultHistoryEvent>,
    pub balance: Option<IlkBalance>,
    pub stop_loss: StopLossTriggerData,
}

impl VaultWithIlkBalance {
    pub fn with_automation(self, stop_loss: StopLossTriggerData) -> VaultWithAutomation {
        VaultWithAutomation {
            vault: self.vault,
            events: self.events,
            balance: self.balance,
            stop_loss,
        }
    }
}
