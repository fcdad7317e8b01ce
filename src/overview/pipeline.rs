//! The reactive composition producing `VaultsOverview` snapshots.
//!
//! Sources are joined stage by stage: the vault list drives per-vault
//! history subscriptions, the result is joined with ilk balances,
//! deduplicated, then split into a per-vault automation fan-out and a
//! portfolio summary before the final join. Subscriptions for vaults
//! that left the list are dropped when the fan-out restarts.
//!
//! The two shared legs advance at different speeds: the summary is a
//! plain map while the automation fan-out blocks until every trigger
//! subscription of the new vault set has emitted. Each deduplicated
//! snapshot therefore carries an epoch through both legs, and the final
//! join only emits pairs from the same epoch. A consumer can never see
//! a position list from one vault set next to a summary from another.

use std::sync::Arc;

use futures_util::{future, StreamExt};
use tracing::debug;

use crate::domain::{vault_summary, Address, Vault};
use crate::feed::{OverviewFeeds, Redirect};
use crate::stream::{
    combine_latest2, combine_latest_all, distinct_until_changed, share, switch_map, Feed,
};

use super::mapper::map_to_position_vm;
use super::records::{VaultWithAutomation, VaultWithHistory, VaultWithIlkBalance};
use super::VaultsOverview;

/// Build the overview feed for one address.
///
/// The feed emits a full snapshot whenever any source changes the
/// rendered output, and nothing when a source update leaves it
/// identical. It never terminates on its own and never errors; a source
/// that stops emitting simply stalls the stage that waits on it.
pub fn create_vaults_overview(
    feeds: Arc<dyn OverviewFeeds>,
    address: &Address,
    redirect: Redirect,
) -> Feed<VaultsOverview> {
    let with_history = with_history(feeds.clone(), feeds.vaults(address));
    let with_balances = with_ilk_balances(with_history, feeds.ilk_balances());
    let stable = distinct_until_changed(with_balances);

    // Both downstream legs consume the same deduplicated snapshots.
    // Each snapshot is numbered so the legs can be re-aligned after the
    // final join.
    let numbered = stable
        .scan(0u64, |epoch, records| {
            *epoch += 1;
            future::ready(Some((*epoch, records)))
        })
        .boxed();
    let (for_positions, for_summary) = share(numbered);

    let enriched = with_automation(feeds, for_positions);
    let summaries = for_summary
        .map(|(epoch, records): (u64, Vec<VaultWithIlkBalance>)| {
            let vaults: Vec<Vault> = records.iter().map(|record| record.vault.clone()).collect();
            (epoch, vault_summary(&vaults))
        })
        .boxed();

    // Pairs mixing different epochs are never shown; the join waits for
    // the slower leg to catch up.
    let aligned = combine_latest2(enriched, summaries)
        .filter_map(|((position_epoch, records), (summary_epoch, summary))| {
            future::ready((position_epoch == summary_epoch).then_some((records, summary)))
        })
        .boxed();
    let paired = distinct_until_changed(aligned);

    paired
        .map(move |(records, summary)| {
            let positions = map_to_position_vm(&records, &redirect);
            debug!(positions = positions.len(), "emitting overview snapshot");
            VaultsOverview {
                positions,
                vault_summary: Some(summary),
            }
        })
        .boxed()
}

/// Fan out one history subscription per vault in the current list.
///
/// Every new vault list restarts the fan-out, dropping subscriptions of
/// removed vaults. An empty list yields one empty snapshot immediately.
fn with_history(
    feeds: Arc<dyn OverviewFeeds>,
    vault_lists: Feed<Vec<Vault>>,
) -> Feed<Vec<VaultWithHistory>> {
    switch_map(vault_lists, move |vaults: Vec<Vault>| {
        debug!(vaults = vaults.len(), "vault list changed, resubscribing history");
        let legs = vaults
            .into_iter()
            .map(|vault| {
                feeds
                    .vault_history(vault.id)
                    .map(move |events| VaultWithHistory {
                        vault: vault.clone(),
                        events,
                    })
                    .boxed()
            })
            .collect();
        combine_latest_all(legs)
    })
}

/// Join each vault with the balance record of its ilk, if any.
fn with_ilk_balances(
    vaults: Feed<Vec<VaultWithHistory>>,
    balances: Feed<Vec<crate::domain::IlkBalance>>,
) -> Feed<Vec<VaultWithIlkBalance>> {
    combine_latest2(vaults, balances)
        .map(|(records, balances)| {
            records
                .into_iter()
                .map(|record| {
                    let balance = balances
                        .iter()
                        .find(|balance| balance.ilk == record.vault.ilk)
                        .cloned();
                    record.with_balance(balance)
                })
                .collect()
        })
        .boxed()
}

/// Fan out one automation trigger subscription per vault, carrying the
/// snapshot's epoch through to the join.
fn with_automation(
    feeds: Arc<dyn OverviewFeeds>,
    records: Feed<(u64, Vec<VaultWithIlkBalance>)>,
) -> Feed<(u64, Vec<VaultWithAutomation>)> {
    switch_map(records, move |(epoch, records): (u64, Vec<VaultWithIlkBalance>)| {
        let legs = records
            .into_iter()
            .map(|record| {
                feeds
                    .automation_triggers(record.vault.id)
                    .map(move |data| {
                        record
                            .clone()
                            .with_automation(crate::domain::extract_stop_loss_data(&data))
                    })
                    .boxed()
            })
            .collect();
        combine_latest_all(legs)
            .map(move |records| (epoch, records))
            .boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{MemoryFeeds, Scenario};
    use crate::testkit::domain::vault;

    fn noop_redirect() -> Redirect {
        Arc::new(|_| {})
    }

    #[tokio::test]
    async fn demo_scenario_produces_one_position_per_vault() {
        let feeds = Arc::new(MemoryFeeds::new());
        let scenario = Scenario::demo();
        scenario.apply(&feeds);

        let mut overview =
            create_vaults_overview(feeds, &scenario.address, noop_redirect());
        let snapshot = overview.next().await.unwrap();

        assert_eq!(snapshot.positions.len(), scenario.vaults.len());
        let summary = snapshot.vault_summary.unwrap();
        assert_eq!(summary.number_of_vaults, 3);
        assert_eq!(summary.vaults_at_risk, 1);
    }

    #[tokio::test]
    async fn empty_portfolio_still_emits_a_snapshot() {
        let feeds = Arc::new(MemoryFeeds::new());
        let address = Address::new("0xempty");
        feeds.set_vaults(&address, Vec::new());

        let mut overview = create_vaults_overview(feeds, &address, noop_redirect());
        let snapshot = overview.next().await.unwrap();

        assert!(snapshot.positions.is_empty());
        let summary = snapshot.vault_summary.unwrap();
        assert_eq!(summary.number_of_vaults, 0);
        assert!(summary.deposited_assets.is_empty());
    }

    #[tokio::test]
    async fn vault_removal_keeps_positions_and_summary_in_step() {
        let feeds = Arc::new(MemoryFeeds::new());
        let address = Address::new("0xabc");
        feeds.set_vaults(&address, vec![vault(1).build(), vault(2).build()]);

        let mut overview = create_vaults_overview(feeds.clone(), &address, noop_redirect());
        let snapshot = overview.next().await.unwrap();
        assert_eq!(snapshot.positions.len(), 2);
        assert_eq!(snapshot.vault_summary.unwrap().number_of_vaults, 2);

        // The summary leg reacts to the shrunk list before the
        // automation fan-out does; the next emission must still pair
        // the one-vault position list with the one-vault summary.
        feeds.set_vaults(&address, vec![vault(1).build()]);
        let snapshot = overview.next().await.unwrap();
        assert_eq!(snapshot.positions.len(), 1);
        assert_eq!(snapshot.positions[0].vault_id(), "1");
        assert_eq!(snapshot.vault_summary.unwrap().number_of_vaults, 1);
    }
}
