//! Automation trigger data and stop-loss extraction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of an automation trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Close the position when the collateralization ratio drops to the
    /// configured level.
    StopLoss,
    /// Any trigger type this overview does not interpret.
    Other,
}

/// One configured automation trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub trigger_id: u64,
    pub kind: TriggerKind,
    /// Collateralization ratio (as a percentage) at which the trigger
    /// fires. Only meaningful for stop-loss triggers.
    pub stop_loss_level: Decimal,
    /// Whether the close-out pays out in collateral rather than DAI.
    pub is_to_collateral: bool,
}

/// Raw trigger list for one vault, as delivered by the automation feed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TriggersData {
    pub triggers: Vec<Trigger>,
}

/// Stop-loss state derived from a vault's trigger list.
///
/// Absence of any stop-loss trigger means automation is disabled; that is
/// the `Default` value, never an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StopLossTriggerData {
    pub is_stop_loss_enabled: bool,
    pub stop_loss_level: Decimal,
    pub is_to_collateral: bool,
}

/// Extract the effective stop-loss configuration from raw trigger data.
///
/// When several stop-loss triggers exist the most recently created one
/// (highest trigger id) wins.
pub fn extract_stop_loss_data(data: &TriggersData) -> StopLossTriggerData {
    data.triggers
        .iter()
        .filter(|trigger| trigger.kind == TriggerKind::StopLoss)
        .max_by_key(|trigger| trigger.trigger_id)
        .map(|trigger| StopLossTriggerData {
            is_stop_loss_enabled: true,
            stop_loss_level: trigger.stop_loss_level,
            is_to_collateral: trigger.is_to_collateral,
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn stop_loss(trigger_id: u64, level: Decimal) -> Trigger {
        Trigger {
            trigger_id,
            kind: TriggerKind::StopLoss,
            stop_loss_level: level,
            is_to_collateral: false,
        }
    }

    #[test]
    fn no_triggers_means_disabled() {
        let extracted = extract_stop_loss_data(&TriggersData::default());
        assert!(!extracted.is_stop_loss_enabled);
        assert_eq!(extracted.stop_loss_level, Decimal::ZERO);
    }

    #[test]
    fn latest_stop_loss_trigger_wins() {
        let data = TriggersData {
            triggers: vec![stop_loss(3, dec!(150)), stop_loss(7, dec!(180))],
        };
        let extracted = extract_stop_loss_data(&data);
        assert!(extracted.is_stop_loss_enabled);
        assert_eq!(extracted.stop_loss_level, dec!(180));
    }

    #[test]
    fn non_stop_loss_triggers_are_ignored() {
        let data = TriggersData {
            triggers: vec![Trigger {
                trigger_id: 9,
                kind: TriggerKind::Other,
                stop_loss_level: dec!(200),
                is_to_collateral: true,
            }],
        };
        assert!(!extract_stop_loss_data(&data).is_stop_loss_enabled);
    }
}
