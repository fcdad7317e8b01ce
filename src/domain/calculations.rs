//! Financial calculations derived from vault state and history.

use rust_decimal::Decimal;

use super::VaultHistoryEvent;

/// Leverage multiple of a multiply position.
///
/// Defined as locked collateral value over net value; `None` when the
/// position has no positive net value (the multiple would be undefined
/// or negative).
pub fn calculate_multiply(locked_collateral_usd: Decimal, debt: Decimal) -> Option<Decimal> {
    let net_value = locked_collateral_usd - debt;
    if net_value <= Decimal::ZERO {
        return None;
    }
    Some(locked_collateral_usd / net_value)
}

/// Yearly funding cost of a position as a decimal fraction.
///
/// `debt / backing_collateral_usd * stability_fee`; `None` when nothing
/// backs the debt.
pub fn calculate_funding_cost(
    debt: Decimal,
    backing_collateral_usd: Decimal,
    stability_fee: Decimal,
) -> Option<Decimal> {
    if backing_collateral_usd.is_zero() {
        return None;
    }
    Some(debt / backing_collateral_usd * stability_fee)
}

/// Profit-and-loss of a position over its history, as a decimal fraction.
///
/// Compares the current net value plus everything withdrawn against
/// everything deposited: `(net_value + withdrawals - deposits) / deposits`.
/// `None` when the history records no deposits, which happens for vaults
/// whose history feed has not caught up yet.
pub fn calculate_pnl(events: &[VaultHistoryEvent], net_value_usd: Decimal) -> Option<Decimal> {
    let mut deposits = Decimal::ZERO;
    let mut withdrawals = Decimal::ZERO;
    for event in events {
        match event {
            VaultHistoryEvent::Deposit { amount_usd, .. } => deposits += amount_usd,
            VaultHistoryEvent::Withdraw { amount_usd, .. } => withdrawals += amount_usd,
            VaultHistoryEvent::Other { .. } => {}
        }
    }
    if deposits.is_zero() {
        return None;
    }
    Some((net_value_usd + withdrawals - deposits) / deposits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{deposit, withdraw};
    use rust_decimal_macros::dec;

    #[test]
    fn multiply_is_locked_over_net_value() {
        assert_eq!(calculate_multiply(dec!(200), dec!(100)), Some(dec!(2)));
        assert_eq!(calculate_multiply(dec!(150), dec!(50)), Some(dec!(1.5)));
    }

    #[test]
    fn multiply_undefined_without_positive_net_value() {
        assert_eq!(calculate_multiply(dec!(100), dec!(100)), None);
        assert_eq!(calculate_multiply(dec!(100), dec!(120)), None);
    }

    #[test]
    fn funding_cost_formula() {
        assert_eq!(
            calculate_funding_cost(dec!(100), dec!(200), dec!(0.02)),
            Some(dec!(0.01))
        );
        assert_eq!(calculate_funding_cost(dec!(100), dec!(0), dec!(0.02)), None);
    }

    #[test]
    fn pnl_over_deposits_and_withdrawals() {
        let events = vec![deposit(dec!(40)), withdraw(dec!(10))];
        // (50 + 10 - 40) / 40
        assert_eq!(calculate_pnl(&events, dec!(50)), Some(dec!(0.5)));
    }

    #[test]
    fn pnl_matches_reference_example() {
        let events = vec![deposit(dec!(40))];
        assert_eq!(calculate_pnl(&events, dec!(50)), Some(dec!(0.25)));
    }

    #[test]
    fn pnl_undefined_without_deposits() {
        assert_eq!(calculate_pnl(&[], dec!(50)), None);
        assert_eq!(calculate_pnl(&[withdraw(dec!(5))], dec!(50)), None);
    }

    #[test]
    fn pnl_can_be_negative() {
        let events = vec![deposit(dec!(100))];
        assert_eq!(calculate_pnl(&events, dec!(80)), Some(dec!(-0.2)));
    }
}
