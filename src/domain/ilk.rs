//! Per-ilk risk parameters and user balances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Ilk;

/// A collateral-type record joined to vaults by ilk.
///
/// One record covers every vault of the same ilk; the relationship is
/// many-vaults-to-one-record. Absence of a matching record for a vault is
/// valid data, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IlkBalance {
    pub ilk: Ilk,
    /// Collateral token symbol for this ilk.
    pub token: String,
    /// The user's wallet balance of the ilk's token.
    pub balance: Decimal,
    /// The same balance valued in USD.
    pub balance_usd: Decimal,
    /// Remaining DAI debt ceiling for this ilk.
    pub ilk_debt_available: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn balances_compare_structurally() {
        let a = crate::testkit::domain::ilk_balance("ETH-A")
            .balance(dec!(2))
            .build();
        let b = crate::testkit::domain::ilk_balance("ETH-A")
            .balance(dec!(2))
            .build();
        assert_eq!(a, b);
    }
}
