//! The vault entity observed from the lending protocol.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Ilk, VaultId};

/// Position type tag carried by every vault.
///
/// The overview partitions positions on this tag; anything that is not
/// explicitly borrow or multiply is treated as earn-like downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaultType {
    Borrow,
    Multiply,
    Earn,
}

/// A collateralized debt position as reported by the vault feed.
///
/// The aggregation pipeline only observes vaults; it never mutates them.
/// Monetary fields are denominated as reported by the protocol:
/// collateral amounts in collateral units, `*_usd` fields in USD, the
/// collateralization ratio as a percentage and the stability fee as a
/// decimal fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vault {
    pub id: VaultId,
    pub ilk: Ilk,
    /// Collateral token symbol, e.g. `ETH`.
    pub token: String,
    #[serde(rename = "type")]
    pub kind: VaultType,
    /// Outstanding DAI debt.
    pub debt: Decimal,
    /// Locked collateral in collateral units.
    pub locked_collateral: Decimal,
    /// Locked collateral valued in USD.
    pub locked_collateral_usd: Decimal,
    /// USD value of the collateral backing the debt.
    pub backing_collateral_usd: Decimal,
    /// Locked collateral value over debt, as a percentage (e.g. `250`).
    pub collateralization_ratio: Decimal,
    /// Collateral price at which the vault becomes liquidatable.
    pub liquidation_price: Decimal,
    /// Annual stability fee as a decimal fraction.
    pub stability_fee: Decimal,
    /// Risk flag set by the protocol when the ratio is near liquidation.
    pub at_risk_level_danger: bool,
}

impl Vault {
    /// Current net value of the position in USD.
    pub fn net_value_usd(&self) -> Decimal {
        self.locked_collateral_usd - self.debt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn net_value_is_collateral_minus_debt() {
        let vault = crate::testkit::domain::vault(1)
            .locked_collateral_usd(dec!(150))
            .debt(dec!(100))
            .build();
        assert_eq!(vault.net_value_usd(), dec!(50));
    }

    #[test]
    fn vault_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&VaultType::Multiply).unwrap(),
            "\"multiply\""
        );
    }
}
