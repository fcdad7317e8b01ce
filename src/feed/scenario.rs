//! Replay scenarios: a JSON snapshot of every feed.
//!
//! A scenario file carries one full snapshot per source so the CLI can
//! exercise the pipeline without a chain connection. Keys of the
//! per-vault maps are vault ids.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Address, Ilk, IlkBalance, Trigger, TriggerKind, TriggersData, Vault, VaultHistoryEvent,
    VaultId, VaultType,
};
use crate::error::{Result, ScenarioError};

use super::MemoryFeeds;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub address: Address,
    #[serde(default)]
    pub vaults: Vec<Vault>,
    #[serde(default)]
    pub ilk_balances: Vec<IlkBalance>,
    #[serde(default)]
    pub history: BTreeMap<u64, Vec<VaultHistoryEvent>>,
    #[serde(default)]
    pub triggers: BTreeMap<u64, TriggersData>,
}

impl Scenario {
    /// Load a scenario from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ScenarioError::ReadFile)?;
        let scenario: Self = serde_json::from_str(&content).map_err(ScenarioError::Parse)?;
        Ok(scenario)
    }

    /// Seed a feed collaborator with every snapshot in this scenario.
    pub fn apply(&self, feeds: &MemoryFeeds) {
        feeds.set_vaults(&self.address, self.vaults.clone());
        feeds.set_ilk_balances(self.ilk_balances.clone());
        for (id, events) in &self.history {
            feeds.set_history(VaultId::new(*id), events.clone());
        }
        for (id, data) in &self.triggers {
            feeds.set_triggers(VaultId::new(*id), data.clone());
        }
        // Vaults without explicit history or triggers fall back to the
        // feeds' empty defaults on subscription.
    }

    /// A small built-in portfolio used when no scenario file is given.
    pub fn demo() -> Self {
        let address = Address::new("0x000000000000000000000000000000000000d3m0");
        let t0 = Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .unwrap_or_default();

        let vaults = vec![
            Vault {
                id: VaultId::new(101),
                ilk: Ilk::new("ETH-A"),
                token: "ETH".to_string(),
                kind: VaultType::Borrow,
                debt: dec!(12000),
                locked_collateral: dec!(10),
                locked_collateral_usd: dec!(30000),
                backing_collateral_usd: dec!(30000),
                collateralization_ratio: dec!(250),
                liquidation_price: dec!(1740),
                stability_fee: dec!(0.0225),
                at_risk_level_danger: false,
            },
            Vault {
                id: VaultId::new(102),
                ilk: Ilk::new("WBTC-B"),
                token: "WBTC".to_string(),
                kind: VaultType::Multiply,
                debt: dec!(20000),
                locked_collateral: dec!(0.9),
                locked_collateral_usd: dec!(54000),
                backing_collateral_usd: dec!(40000),
                collateralization_ratio: dec!(270),
                liquidation_price: dec!(32500),
                stability_fee: dec!(0.04),
                at_risk_level_danger: true,
            },
            Vault {
                id: VaultId::new(103),
                ilk: Ilk::new("GUNIV3DAIUSDC1-A"),
                token: "GUNIV3DAIUSDC1".to_string(),
                kind: VaultType::Earn,
                debt: dec!(95000),
                locked_collateral: dec!(100000),
                locked_collateral_usd: dec!(100000),
                backing_collateral_usd: dec!(100000),
                collateralization_ratio: dec!(105),
                liquidation_price: dec!(0.97),
                stability_fee: dec!(0.01),
                at_risk_level_danger: false,
            },
        ];

        let ilk_balances = vec![
            IlkBalance {
                ilk: Ilk::new("ETH-A"),
                token: "ETH".to_string(),
                balance: dec!(2.5),
                balance_usd: dec!(7500),
                ilk_debt_available: dec!(15000000),
            },
            IlkBalance {
                ilk: Ilk::new("GUNIV3DAIUSDC1-A"),
                token: "GUNIV3DAIUSDC1".to_string(),
                balance: dec!(0),
                balance_usd: dec!(0),
                ilk_debt_available: dec!(5000000),
            },
        ];

        let mut history = BTreeMap::new();
        history.insert(
            103,
            vec![
                VaultHistoryEvent::Deposit {
                    amount_usd: dec!(4000),
                    timestamp: t0,
                },
                VaultHistoryEvent::Withdraw {
                    amount_usd: dec!(200),
                    timestamp: t0 + chrono::Duration::days(30),
                },
            ],
        );

        let mut triggers = BTreeMap::new();
        triggers.insert(
            102,
            TriggersData {
                triggers: vec![Trigger {
                    trigger_id: 1,
                    kind: TriggerKind::StopLoss,
                    stop_loss_level: dec!(180),
                    is_to_collateral: false,
                }],
            },
        );

        Self {
            address,
            vaults,
            ilk_balances,
            history,
            triggers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_scenario_round_trips_through_json() {
        let demo = Scenario::demo();
        let json = serde_json::to_string(&demo).unwrap();
        let parsed: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.address, demo.address);
        assert_eq!(parsed.vaults, demo.vaults);
        assert_eq!(parsed.history, demo.history);
        assert_eq!(parsed.triggers, demo.triggers);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let parsed: Scenario =
            serde_json::from_str(r#"{ "address": "0xabc", "vaults": [] }"#).unwrap();
        assert!(parsed.ilk_balances.is_empty());
        assert!(parsed.history.is_empty());
        assert!(parsed.triggers.is_empty());
    }
}
