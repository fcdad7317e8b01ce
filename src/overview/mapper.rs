//! Pure projection of enriched vault records into position view-models.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::domain::calculations::{calculate_funding_cost, calculate_multiply, calculate_pnl};
use crate::domain::format::{
    format_crypto_balance, format_fiat_balance, format_percent, format_percent_precision,
    format_percent_round_down,
};
use crate::domain::{Vault, VaultType};
use crate::feed::Redirect;

use super::records::VaultWithAutomation;

/// Yield placeholder shown for earn positions until a real seven-day
/// yield source is wired up.
const SEVEN_DAY_YIELD_PLACEHOLDER: Decimal = dec!(0.12);

/// Navigation callbacks bound to one position.
///
/// The mapper only binds the redirect callback to the vault record; it
/// never navigates by itself. Excluded from view-model equality because
/// it is freshly constructed on every mapping pass.
#[derive(Clone)]
pub struct PositionActions {
    vault: Vault,
    redirect: Redirect,
}

impl PositionActions {
    fn new(vault: Vault, redirect: Redirect) -> Self {
        Self { vault, redirect }
    }

    /// Navigate to the position's edit view.
    pub fn edit(&self) {
        (self.redirect)(&self.vault);
    }

    /// Navigate to the position's automation view.
    pub fn automation(&self) {
        (self.redirect)(&self.vault);
    }
}

impl fmt::Debug for PositionActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionActions")
            .field("vault", &self.vault.id)
            .finish_non_exhaustive()
    }
}

/// A borrow position, display-ready.
#[derive(Debug, Clone)]
pub struct BorrowPositionVm {
    pub vault_id: String,
    pub ilk: String,
    pub token: String,
    pub collateral_ratio: String,
    pub in_danger: bool,
    pub dai_debt: String,
    pub collateral_locked: String,
    pub variable: String,
    pub automation_enabled: bool,
    pub protection_amount: String,
    pub actions: PositionActions,
}

/// A multiply position, display-ready.
#[derive(Debug, Clone)]
pub struct MultiplyPositionVm {
    pub vault_id: String,
    pub ilk: String,
    pub token: String,
    pub multiple: String,
    pub net_value: String,
    pub liquidation_price: String,
    pub funding_cost: String,
    pub automation_enabled: bool,
    pub actions: PositionActions,
}

/// An earn position, display-ready.
#[derive(Debug, Clone)]
pub struct EarnPositionVm {
    pub vault_id: String,
    pub ilk: String,
    pub token: String,
    pub net_value: String,
    pub seven_day_yield: String,
    pub pnl: String,
    pub liquidity: String,
    pub actions: PositionActions,
}

/// One position view-model, tagged by position type.
#[derive(Debug, Clone)]
pub enum PositionVm {
    Borrow(BorrowPositionVm),
    Multiply(MultiplyPositionVm),
    Earn(EarnPositionVm),
}

impl PositionVm {
    pub fn vault_id(&self) -> &str {
        match self {
            Self::Borrow(vm) => &vm.vault_id,
            Self::Multiply(vm) => &vm.vault_id,
            Self::Earn(vm) => &vm.vault_id,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Borrow(_) => "borrow",
            Self::Multiply(_) => "multiply",
            Self::Earn(_) => "earn",
        }
    }
}

// Equality compares display data only; the freshly bound callbacks are
// deliberately excluded.
impl PartialEq for BorrowPositionVm {
    fn eq(&self, other: &Self) -> bool {
        self.vault_id == other.vault_id
            && self.ilk == other.ilk
            && self.token == other.token
            && self.collateral_ratio == other.collateral_ratio
            && self.in_danger == other.in_danger
            && self.dai_debt == other.dai_debt
            && self.collateral_locked == other.collateral_locked
            && self.variable == other.variable
            && self.automation_enabled == other.automation_enabled
            && self.protection_amount == other.protection_amount
    }
}

impl PartialEq for MultiplyPositionVm {
    fn eq(&self, other: &Self) -> bool {
        self.vault_id == other.vault_id
            && self.ilk == other.ilk
            && self.token == other.token
            && self.multiple == other.multiple
            && self.net_value == other.net_value
            && self.liquidation_price == other.liquidation_price
            && self.funding_cost == other.funding_cost
            && self.automation_enabled == other.automation_enabled
    }
}

impl PartialEq for EarnPositionVm {
    fn eq(&self, other: &Self) -> bool {
        self.vault_id == other.vault_id
            && self.ilk == other.ilk
            && self.token == other.token
            && self.net_value == other.net_value
            && self.seven_day_yield == other.seven_day_yield
            && self.pnl == other.pnl
            && self.liquidity == other.liquidity
    }
}

impl PartialEq for PositionVm {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Borrow(a), Self::Borrow(b)) => a == b,
            (Self::Multiply(a), Self::Multiply(b)) => a == b,
            (Self::Earn(a), Self::Earn(b)) => a == b,
            _ => false,
        }
    }
}

/// Partition enriched vault records into display-ready view-models.
///
/// Borrow and multiply positions match their tags exactly; everything
/// else falls through to earn.
// TODO: earn should get its own explicit tag instead of the fallthrough
pub fn map_to_position_vm(vaults: &[VaultWithAutomation], redirect: &Redirect) -> Vec<PositionVm> {
    let borrow = vaults
        .iter()
        .filter(|record| record.vault.kind == VaultType::Borrow)
        .map(|record| PositionVm::Borrow(borrow_vm(record, redirect)));

    let multiply = vaults
        .iter()
        .filter(|record| record.vault.kind == VaultType::Multiply)
        .map(|record| PositionVm::Multiply(multiply_vm(record, redirect)));

    let earn = vaults
        .iter()
        .filter(|record| {
            record.vault.kind != VaultType::Borrow && record.vault.kind != VaultType::Multiply
        })
        .map(|record| PositionVm::Earn(earn_vm(record, redirect)));

    borrow.chain(multiply).chain(earn).collect()
}

fn borrow_vm(record: &VaultWithAutomation, redirect: &Redirect) -> BorrowPositionVm {
    let vault = &record.vault;
    BorrowPositionVm {
        vault_id: vault.id.to_string(),
        ilk: vault.ilk.to_string(),
        token: vault.token.clone(),
        collateral_ratio: format_percent_precision(vault.collateralization_ratio, 2),
        in_danger: vault.at_risk_level_danger,
        dai_debt: format_crypto_balance(vault.debt),
        collateral_locked: format!(
            "{} {}",
            format_crypto_balance(vault.locked_collateral),
            vault.token
        ),
        variable: format_percent_precision(vault.stability_fee, 2),
        automation_enabled: record.stop_loss.is_stop_loss_enabled,
        protection_amount: format_percent(record.stop_loss.stop_loss_level),
        actions: PositionActions::new(vault.clone(), redirect.clone()),
    }
}

fn multiply_vm(record: &VaultWithAutomation, redirect: &Redirect) -> MultiplyPositionVm {
    let vault = &record.vault;
    let multiple =
        calculate_multiply(vault.locked_collateral_usd, vault.debt).unwrap_or(Decimal::ZERO);
    let funding_cost =
        calculate_funding_cost(vault.debt, vault.backing_collateral_usd, vault.stability_fee)
            .unwrap_or(Decimal::ZERO);
    MultiplyPositionVm {
        vault_id: vault.id.to_string(),
        ilk: vault.ilk.to_string(),
        token: vault.token.clone(),
        multiple: format!(
            "{:.2}x",
            multiple.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        net_value: format_crypto_balance(vault.backing_collateral_usd),
        liquidation_price: format!("${}", format_fiat_balance(vault.liquidation_price)),
        funding_cost: format_percent_precision(funding_cost * Decimal::ONE_HUNDRED, 2),
        automation_enabled: record.stop_loss.is_stop_loss_enabled,
        actions: PositionActions::new(vault.clone(), redirect.clone()),
    }
}

fn earn_vm(record: &VaultWithAutomation, redirect: &Redirect) -> EarnPositionVm {
    let vault = &record.vault;
    let pnl = calculate_pnl(&record.events, vault.net_value_usd()).unwrap_or(Decimal::ZERO);
    let liquidity = match &record.balance {
        Some(balance) => format!("{} DAI", format_crypto_balance(balance.ilk_debt_available)),
        None => "--".to_string(),
    };
    EarnPositionVm {
        vault_id: vault.id.to_string(),
        ilk: vault.ilk.to_string(),
        token: vault.token.clone(),
        net_value: format_crypto_balance(vault.backing_collateral_usd),
        seven_day_yield: format_percent_precision(
            SEVEN_DAY_YIELD_PLACEHOLDER * Decimal::ONE_HUNDRED,
            2,
        ),
        pnl: format_percent_round_down(pnl * Decimal::ONE_HUNDRED, 2),
        liquidity,
        actions: PositionActions::new(vault.clone(), redirect.clone()),
    }
}
