//! Builders for domain fixtures.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    Ilk, IlkBalance, StopLossTriggerData, Vault, VaultHistoryEvent, VaultId, VaultType,
};
use crate::overview::VaultWithAutomation;

/// Start building a vault with the given id and neutral defaults.
pub fn vault(id: u64) -> VaultBuilder {
    VaultBuilder {
        vault: Vault {
            id: VaultId::new(id),
            ilk: Ilk::new("ETH-A"),
            token: "ETH".to_string(),
            kind: VaultType::Borrow,
            debt: Decimal::ZERO,
            locked_collateral: Decimal::ZERO,
            locked_collateral_usd: Decimal::ZERO,
            backing_collateral_usd: Decimal::ZERO,
            collateralization_ratio: Decimal::ZERO,
            liquidation_price: Decimal::ZERO,
            stability_fee: Decimal::ZERO,
            at_risk_level_danger: false,
        },
    }
}

pub struct VaultBuilder {
    vault: Vault,
}

impl VaultBuilder {
    pub fn ilk(mut self, ilk: &str) -> Self {
        self.vault.ilk = Ilk::new(ilk);
        self
    }

    pub fn token(mut self, token: &str) -> Self {
        self.vault.token = token.to_string();
        self
    }

    pub fn kind(mut self, kind: VaultType) -> Self {
        self.vault.kind = kind;
        self
    }

    pub fn debt(mut self, debt: Decimal) -> Self {
        self.vault.debt = debt;
        self
    }

    pub fn locked_collateral(mut self, amount: Decimal) -> Self {
        self.vault.locked_collateral = amount;
        self
    }

    pub fn locked_collateral_usd(mut self, amount: Decimal) -> Self {
        self.vault.locked_collateral_usd = amount;
        self
    }

    pub fn backing_collateral_usd(mut self, amount: Decimal) -> Self {
        self.vault.backing_collateral_usd = amount;
        self
    }

    pub fn stability_fee(mut self, fee: Decimal) -> Self {
        self.vault.stability_fee = fee;
        self
    }

    pub fn at_risk(mut self, at_risk: bool) -> Self {
        self.vault.at_risk_level_danger = at_risk;
        self
    }

    pub fn build(self) -> Vault {
        self.vault
    }
}

/// Start building an ilk balance record for the given ilk.
pub fn ilk_balance(ilk: &str) -> IlkBalanceBuilder {
    IlkBalanceBuilder {
        balance: IlkBalance {
            ilk: Ilk::new(ilk),
            token: "ETH".to_string(),
            balance: Decimal::ZERO,
            balance_usd: Decimal::ZERO,
            ilk_debt_available: Decimal::ZERO,
        },
    }
}

pub struct IlkBalanceBuilder {
    balance: IlkBalance,
}

impl IlkBalanceBuilder {
    pub fn token(mut self, token: &str) -> Self {
        self.balance.token = token.to_string();
        self
    }

    pub fn balance(mut self, amount: Decimal) -> Self {
        self.balance.balance = amount;
        self
    }

    pub fn ilk_debt_available(mut self, amount: Decimal) -> Self {
        self.balance.ilk_debt_available = amount;
        self
    }

    pub fn build(self) -> IlkBalance {
        self.balance
    }
}

/// A deposit event with a fixed timestamp.
pub fn deposit(amount_usd: Decimal) -> VaultHistoryEvent {
    VaultHistoryEvent::Deposit {
        amount_usd,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// A withdrawal event with a fixed timestamp.
pub fn withdraw(amount_usd: Decimal) -> VaultHistoryEvent {
    VaultHistoryEvent::Withdraw {
        amount_usd,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
    }
}

/// Wrap a vault in a fully enriched record with empty history, no
/// balance and no automation.
pub fn enriched(vault: Vault) -> VaultWithAutomation {
    VaultWithAutomation {
        vault,
        events: Vec::new(),
        balance: None,
        stop_loss: StopLossTriggerData::default(),
    }
}
