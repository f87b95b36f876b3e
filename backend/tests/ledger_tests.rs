//! Inventory ledger tests
//!
//! Covers the stock effect of each transaction type and the invariant that
//! replaying a ledger reproduces the aggregate stock counter.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{stock_effect, AdjustmentDirection, TransactionType};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_purchase_and_production_increase_stock() {
        assert_eq!(
            stock_effect(TransactionType::Purchase, dec("25"), None),
            dec("25")
        );
        assert_eq!(
            stock_effect(TransactionType::Production, dec("10.5"), None),
            dec("10.5")
        );
    }

    #[test]
    fn test_sale_decreases_stock() {
        assert_eq!(
            stock_effect(TransactionType::Sale, dec("40"), None),
            dec("-40")
        );
    }

    #[test]
    fn test_transfer_leaves_aggregate_unchanged() {
        assert_eq!(
            stock_effect(TransactionType::Transfer, dec("999"), None),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_adjustment_follows_direction() {
        assert_eq!(
            stock_effect(
                TransactionType::Adjustment,
                dec("7"),
                Some(AdjustmentDirection::Increase)
            ),
            dec("7")
        );
        assert_eq!(
            stock_effect(
                TransactionType::Adjustment,
                dec("7"),
                Some(AdjustmentDirection::Decrease)
            ),
            dec("-7")
        );
    }

    #[test]
    fn test_only_adjustment_requires_direction() {
        for t in TransactionType::ALL {
            assert_eq!(t.requires_direction(), t == TransactionType::Adjustment);
        }
    }

    #[test]
    fn test_transaction_type_wire_names_round_trip() {
        for t in TransactionType::ALL {
            assert_eq!(TransactionType::parse(t.as_str()), Some(t));
        }
        assert_eq!(TransactionType::parse("RETURN"), None);
    }

    /// Replaying a fixed ledger reproduces the expected counter
    #[test]
    fn test_ledger_replay() {
        let ledger = [
            (TransactionType::Purchase, dec("100"), None),
            (TransactionType::Sale, dec("30"), None),
            (TransactionType::Production, dec("20"), None),
            (
                TransactionType::Adjustment,
                dec("5"),
                Some(AdjustmentDirection::Decrease),
            ),
            (TransactionType::Transfer, dec("50"), None),
        ];

        let stock: Decimal = ledger
            .iter()
            .map(|(t, q, d)| stock_effect(*t, *q, *d))
            .sum();

        // 100 - 30 + 20 - 5 + 0 = 85
        assert_eq!(stock, dec("85"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating valid quantities (positive decimals)
    fn quantity_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100000i64).prop_map(|n| Decimal::new(n, 2)) // 0.01 to 1000.00
    }

    fn transaction_strategy() -> impl Strategy<Value = (TransactionType, Option<AdjustmentDirection>)>
    {
        prop_oneof![
            Just((TransactionType::Purchase, None)),
            Just((TransactionType::Sale, None)),
            Just((TransactionType::Production, None)),
            Just((TransactionType::Transfer, None)),
            Just((
                TransactionType::Adjustment,
                Some(AdjustmentDirection::Increase)
            )),
            Just((
                TransactionType::Adjustment,
                Some(AdjustmentDirection::Decrease)
            )),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The magnitude of a stock effect never exceeds the quantity
        #[test]
        fn prop_effect_bounded_by_quantity(
            (transaction_type, direction) in transaction_strategy(),
            quantity in quantity_strategy()
        ) {
            let effect = stock_effect(transaction_type, quantity, direction);
            prop_assert!(effect.abs() <= quantity);
        }

        /// Transfers are the only zero-effect type; everything else moves
        /// stock by exactly the quantity
        #[test]
        fn prop_nonzero_effect_except_transfer(
            (transaction_type, direction) in transaction_strategy(),
            quantity in quantity_strategy()
        ) {
            let effect = stock_effect(transaction_type, quantity, direction);
            if transaction_type == TransactionType::Transfer {
                prop_assert_eq!(effect, Decimal::ZERO);
            } else {
                prop_assert_eq!(effect.abs(), quantity);
            }
        }

        /// Replaying a ledger in any order gives the same aggregate
        #[test]
        fn prop_replay_order_independent(
            entries in prop::collection::vec(
                (transaction_strategy(), quantity_strategy()),
                1..30
            )
        ) {
            let forward: Decimal = entries
                .iter()
                .map(|((t, d), q)| stock_effect(*t, *q, *d))
                .sum();
            let reverse: Decimal = entries
                .iter()
                .rev()
                .map(|((t, d), q)| stock_effect(*t, *q, *d))
                .sum();

            prop_assert_eq!(forward, reverse);
        }

        /// An adjustment up followed by the same adjustment down cancels out
        #[test]
        fn prop_adjustments_cancel(quantity in quantity_strategy()) {
            let up = stock_effect(
                TransactionType::Adjustment,
                quantity,
                Some(AdjustmentDirection::Increase),
            );
            let down = stock_effect(
                TransactionType::Adjustment,
                quantity,
                Some(AdjustmentDirection::Decrease),
            );
            prop_assert_eq!(up + down, Decimal::ZERO);
        }
    }
}
