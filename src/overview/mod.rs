//! The overview: a deduplicated feed of display-ready portfolio
//! snapshots.

mod mapper;
mod pipeline;
mod records;

pub use mapper::{
    map_to_position_vm, BorrowPositionVm, EarnPositionVm, MultiplyPositionVm, PositionActions,
    PositionVm,
};
pub use pipeline::create_vaults_overview;
pub use records::{VaultWithAutomation, VaultWithHistory, VaultWithIlkBalance};

use crate::domain::VaultSummary;

/// One full snapshot of the user's portfolio.
///
/// `vault_summary` is `None` only while the summary leg has not produced
/// its first value; an empty portfolio gets a zeroed summary instead.
#[derive(Debug, Clone, PartialEq)]
pub struct VaultsOverview {
    pub positions: Vec<PositionVm>,
    pub vault_summary: Option<VaultSummary>,
}
