//! Hand-driven feeds for exercising the combinators and the pipeline.

use std::collections::HashMap;

use futures_util::{stream, StreamExt};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::domain::{Address, IlkBalance, TriggersData, Vault, VaultHistoryEvent, VaultId};
use crate::feed::OverviewFeeds;
use crate::stream::Feed;

/// Finite feed over canned values.
pub fn feed_of<T: Send + 'static>(values: Vec<T>) -> Feed<T> {
    stream::iter(values).boxed()
}

/// A feed driven by explicit pushes. Ends when the sender is dropped.
pub fn push_feed<T: Send + 'static>() -> (PushSender<T>, Feed<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (PushSender { tx }, receiver_feed(rx))
}

pub struct PushSender<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> PushSender<T> {
    /// Push a value; silently dropped when the feed was abandoned.
    pub fn push(&self, value: T) {
        let _ = self.tx.send(value);
    }

    /// Whether the consuming feed has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl<T> Clone for PushSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

fn receiver_feed<T: Send + 'static>(rx: mpsc::UnboundedReceiver<T>) -> Feed<T> {
    stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|value| (value, rx)) }).boxed()
}

/// Feed collaborator whose sources stay silent until pushed.
///
/// Unlike [`crate::feed::MemoryFeeds`] there is no initial snapshot:
/// a subscription emits nothing until the test pushes into it, which is
/// what tests about join readiness and cancellation need. Every
/// subscription is tracked so tests can count the live ones.
#[derive(Default)]
pub struct ChannelFeeds {
    vaults: Mutex<Vec<mpsc::UnboundedSender<Vec<Vault>>>>,
    ilk_balances: Mutex<Vec<mpsc::UnboundedSender<Vec<IlkBalance>>>>,
    triggers: Mutex<HashMap<VaultId, Vec<mpsc::UnboundedSender<TriggersData>>>>,
    history: Mutex<HashMap<VaultId, Vec<mpsc::UnboundedSender<Vec<VaultHistoryEvent>>>>>,
}

impl ChannelFeeds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a vault list to every live vaults subscription.
    pub fn push_vaults(&self, vaults: Vec<Vault>) {
        let mut senders = self.vaults.lock();
        senders.retain(|tx| !tx.is_closed());
        for tx in senders.iter() {
            let _ = tx.send(vaults.clone());
        }
    }

    /// Push an ilk balance list to every live subscription.
    pub fn push_ilk_balances(&self, balances: Vec<IlkBalance>) {
        let mut senders = self.ilk_balances.lock();
        senders.retain(|tx| !tx.is_closed());
        for tx in senders.iter() {
            let _ = tx.send(balances.clone());
        }
    }

    /// Push trigger data for one vault.
    pub fn push_triggers(&self, id: VaultId, data: TriggersData) {
        let mut by_id = self.triggers.lock();
        let senders = by_id.entry(id).or_default();
        senders.retain(|tx| !tx.is_closed());
        for tx in senders.iter() {
            let _ = tx.send(data.clone());
        }
    }

    /// Push a history snapshot for one vault.
    pub fn push_history(&self, id: VaultId, events: Vec<VaultHistoryEvent>) {
        let mut by_id = self.history.lock();
        let senders = by_id.entry(id).or_default();
        senders.retain(|tx| !tx.is_closed());
        for tx in senders.iter() {
            let _ = tx.send(events.clone());
        }
    }

    /// Number of history subscriptions for one vault that are still
    /// being polled.
    pub fn live_history_subscriptions(&self, id: VaultId) -> usize {
        self.history
            .lock()
            .get(&id)
            .map(|senders| senders.iter().filter(|tx| !tx.is_closed()).count())
            .unwrap_or(0)
    }

    /// Number of live trigger subscriptions for one vault.
    pub fn live_trigger_subscriptions(&self, id: VaultId) -> usize {
        self.triggers
            .lock()
            .get(&id)
            .map(|senders| senders.iter().filter(|tx| !tx.is_closed()).count())
            .unwrap_or(0)
    }
}

impl OverviewFeeds for ChannelFeeds {
    fn vaults(&self, _address: &Address) -> Feed<Vec<Vault>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.vaults.lock().push(tx);
        receiver_feed(rx)
    }

    fn ilk_balances(&self) -> Feed<Vec<IlkBalance>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.ilk_balances.lock().push(tx);
        receiver_feed(rx)
    }

    fn automation_triggers(&self, id: VaultId) -> Feed<TriggersData> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.triggers.lock().entry(id).or_default().push(tx);
        receiver_feed(rx)
    }

    fn vault_history(&self, id: VaultId) -> Feed<Vec<VaultHistoryEvent>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.history.lock().entry(id).or_default().push(tx);
        receiver_feed(rx)
    }
}
