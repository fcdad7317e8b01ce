//! Protocol-agnostic domain types and financial calculations.

mod automation;
mod history;
mod ids;
mod ilk;
mod summary;
mod vault;

pub mod calculations;
pub mod format;

pub use automation::{
    extract_stop_loss_data, StopLossTriggerData, Trigger, TriggerKind, TriggersData,
};
pub use history::VaultHistoryEvent;
pub use ids::{Address, Ilk, VaultId};
pub use ilk::IlkBalance;
pub use summary::{vault_summary, AssetBreakdown, VaultSummary};
pub use vault::{Vault, VaultType};
