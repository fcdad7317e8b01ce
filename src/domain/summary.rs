//! Portfolio-wide aggregates over a user's vaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Vault;

/// Share of the portfolio's collateral held in one token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBreakdown {
    pub token: String,
    pub amount_usd: Decimal,
    /// Fraction of total collateral value, zero when the portfolio is
    /// empty.
    pub proportion: Decimal,
}

/// Aggregate statistics over a vault list.
///
/// Defined for the empty portfolio as well: all totals zero, no
/// breakdown. "No data yet" is expressed by the *absence* of a summary,
/// never by a zeroed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultSummary {
    pub number_of_vaults: usize,
    pub vaults_at_risk: usize,
    pub total_collateral_price: Decimal,
    pub total_dai_debt: Decimal,
    pub deposited_assets: Vec<AssetBreakdown>,
}

/// Reduce a vault list to its portfolio summary.
///
/// Pure; called once per stable upstream snapshot.
pub fn vault_summary(vaults: &[Vault]) -> VaultSummary {
    let total_collateral_price: Decimal =
        vaults.iter().map(|vault| vault.locked_collateral_usd).sum();
    let total_dai_debt: Decimal = vaults.iter().map(|vault| vault.debt).sum();
    let vaults_at_risk = vaults
        .iter()
        .filter(|vault| vault.at_risk_level_danger)
        .count();

    // Token order follows first appearance in the vault list.
    let mut deposited_assets: Vec<AssetBreakdown> = Vec::new();
    for vault in vaults {
        match deposited_assets
            .iter_mut()
            .find(|asset| asset.token == vault.token)
        {
            Some(asset) => asset.amount_usd += vault.locked_collateral_usd,
            None => deposited_assets.push(AssetBreakdown {
                token: vault.token.clone(),
                amount_usd: vault.locked_collateral_usd,
                proportion: Decimal::ZERO,
            }),
        }
    }
    for asset in &mut deposited_assets {
        if !total_collateral_price.is_zero() {
            asset.proportion = asset.amount_usd / total_collateral_price;
        }
    }

    VaultSummary {
        number_of_vaults: vaults.len(),
        vaults_at_risk,
        total_collateral_price,
        total_dai_debt,
        deposited_assets,
    }
}
