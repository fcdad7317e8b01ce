//! In-memory feeds backed by watch channels.

use std::collections::HashMap;

use parking_lot::RwLock;
use tokio::sync::watch;

use crate::domain::{
    Address, IlkBalance, TriggersData, Vault, VaultHistoryEvent, VaultId,
};
use crate::stream::Feed;

use super::{watch_feed, OverviewFeeds};

/// Feed collaborator holding the latest snapshot of every source.
///
/// Subscribers see the current value immediately and every update after
/// that. Sources that were never set start from their empty value; the
/// pipeline treats that like any other snapshot.
pub struct MemoryFeeds {
    vaults: RwLock<HashMap<Address, watch::Sender<Vec<Vault>>>>,
    ilk_balances: watch::Sender<Vec<IlkBalance>>,
    triggers: RwLock<HashMap<VaultId, watch::Sender<TriggersData>>>,
    history: RwLock<HashMap<VaultId, watch::Sender<Vec<VaultHistoryEvent>>>>,
}

impl MemoryFeeds {
    pub fn new() -> Self {
        Self {
            vaults: RwLock::new(HashMap::new()),
            ilk_balances: watch::channel(Vec::new()).0,
            triggers: RwLock::new(HashMap::new()),
            history: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the vault list for an address.
    pub fn set_vaults(&self, address: &Address, vaults: Vec<Vault>) {
        self.vaults
            .write()
            .entry(address.clone())
            .or_insert_with(|| watch::channel(Vec::new()).0)
            .send_replace(vaults);
    }

    /// Replace the ilk balance list.
    pub fn set_ilk_balances(&self, balances: Vec<IlkBalance>) {
        self.ilk_balances.send_replace(balances);
    }

    /// Replace the trigger data for one vault.
    pub fn set_triggers(&self, id: VaultId, data: TriggersData) {
        self.triggers
            .write()
            .entry(id)
            .or_insert_with(|| watch::channel(TriggersData::default()).0)
            .send_replace(data);
    }

    /// Replace the history of one vault.
    pub fn set_history(&self, id: VaultId, events: Vec<VaultHistoryEvent>) {
        self.history
            .write()
            .entry(id)
            .or_insert_with(|| watch::channel(Vec::new()).0)
            .send_replace(events);
    }
}

impl Default for MemoryFeeds {
    fn default() -> Self {
        Self::new()
    }
}

impl OverviewFeeds for MemoryFeeds {
    fn vaults(&self, address: &Address) -> Feed<Vec<Vault>> {
        let receiver = self
            .vaults
            .write()
            .entry(address.clone())
            .or_insert_with(|| watch::channel(Vec::new()).0)
            .subscribe();
        watch_feed(receiver)
    }

    fn ilk_balances(&self) -> Feed<Vec<IlkBalance>> {
        watch_feed(self.ilk_balances.subscribe())
    }

    fn automation_triggers(&self, id: VaultId) -> Feed<TriggersData> {
        let receiver = self
            .triggers
            .write()
            .entry(id)
            .or_insert_with(|| watch::channel(TriggersData::default()).0)
            .subscribe();
        watch_feed(receiver)
    }

    fn vault_history(&self, id: VaultId) -> Feed<Vec<VaultHistoryEvent>> {
        let receiver = self
            .history
            .write()
            .entry(id)
            .or_insert_with(|| watch::channel(Vec::new()).0)
            .subscribe();
        watch_feed(receiver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::vault;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn subscriber_sees_current_value_then_updates() {
        let feeds = MemoryFeeds::new();
        let address = Address::new("0xabc");
        feeds.set_vaults(&address, vec![vault(1).build()]);

        let mut stream = feeds.vaults(&address);
        assert_eq!(stream.next().await.unwrap().len(), 1);

        feeds.set_vaults(&address, vec![vault(1).build(), vault(2).build()]);
        assert_eq!(stream.next().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_sources_start_empty() {
        let feeds = MemoryFeeds::new();
        let mut history = feeds.vault_history(VaultId::new(9));
        assert_eq!(history.next().await, Some(Vec::new()));

        let mut triggers = feeds.automation_triggers(VaultId::new(9));
        assert_eq!(triggers.next().await, Some(TriggersData::default()));
    }
}
