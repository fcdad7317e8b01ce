//! The feed boundary.
//!
//! External collaborators (chain indexers, caches, replay files) deliver
//! data to the overview pipeline exclusively through the
//! [`OverviewFeeds`] trait. Every method returns a live [`Feed`]: a
//! push-style sequence of whole snapshots, never deltas.

mod memory;
mod scenario;

pub use memory::MemoryFeeds;
pub use scenario::Scenario;

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use tokio::sync::watch;

use crate::domain::{
    Address, IlkBalance, TriggersData, Vault, VaultHistoryEvent, VaultId,
};
use crate::stream::Feed;

/// Live data sources the overview pipeline joins.
///
/// Implementations decide freshness and staleness policy; the pipeline
/// only ever reacts to pushed snapshots. A feed that stops producing
/// stalls the joins that depend on it.
pub trait OverviewFeeds: Send + Sync + 'static {
    /// The vault list owned by `address`, re-emitted on every change.
    fn vaults(&self, address: &Address) -> Feed<Vec<Vault>>;

    /// Risk parameters and user balances for all ilks.
    fn ilk_balances(&self) -> Feed<Vec<IlkBalance>>;

    /// Automation triggers configured for one vault.
    fn automation_triggers(&self, id: VaultId) -> Feed<TriggersData>;

    /// The ordered history of one vault.
    fn vault_history(&self, id: VaultId) -> Feed<Vec<VaultHistoryEvent>>;
}

/// Navigation callback bound into position view-models.
///
/// Invoked only on user interaction, never by the pipeline itself.
pub type Redirect = Arc<dyn Fn(&Vault) + Send + Sync>;

/// Adapt a watch receiver into a feed: the current value immediately,
/// then every subsequent update.
pub(crate) fn watch_feed<T>(receiver: watch::Receiver<T>) -> Feed<T>
where
    T: Clone + Send + Sync + 'static,
{
    stream::unfold((receiver, true), |(mut receiver, first)| async move {
        if first {
            let value = receiver.borrow_and_update().clone();
            return Some((value, (receiver, false)));
        }
        receiver.changed().await.ok()?;
        let value = receiver.borrow_and_update().clone();
        Some((value, (receiver, false)))
    })
    .boxed()
}
