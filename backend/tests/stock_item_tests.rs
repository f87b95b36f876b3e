//! Stock item tests
//!
//! Covers the derived stock flags, expiry classification, and valuation
//! used by listings and the CSV export.

use chrono::{Duration, NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::models::{ProcurementStatus, StockItem, NEAR_EXPIRY_WINDOW_DAYS};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn item(quantity: &str, threshold: &str) -> StockItem {
    StockItem {
        id: Uuid::new_v4(),
        product_id: Uuid::new_v4(),
        warehouse_id: Uuid::new_v4(),
        quantity: dec(quantity),
        unit_cost: dec("10.00"),
        batch_number: None,
        location: None,
        procurement_status: ProcurementStatus::Stocked,
        expiry_date: None,
        manufactured_date: None,
        reorder_threshold: dec(threshold),
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_stock_flag_boundaries() {
        // At the threshold counts as low
        let at_threshold = item("10", "10");
        assert!(at_threshold.is_low_stock());
        assert!(!at_threshold.is_out_of_stock());

        let above = item("10.001", "10");
        assert!(!above.is_low_stock());

        let zero = item("0", "10");
        assert!(zero.is_out_of_stock());
        assert!(zero.is_low_stock());
    }

    /// The low-stock predicate is a superset of out-of-stock; dashboard
    /// buckets count depleted items in both
    #[test]
    fn test_low_stock_includes_out_of_stock() {
        for quantity in ["0", "-2"] {
            let depleted = item(quantity, "5");
            assert!(depleted.is_out_of_stock());
            assert!(depleted.is_low_stock());
        }
    }

    #[test]
    fn test_status_label_partition() {
        assert_eq!(item("0", "5").status_label(), "Out of Stock");
        assert_eq!(item("3", "5").status_label(), "Low Stock");
        assert_eq!(item("50", "5").status_label(), "In Stock");
    }

    #[test]
    fn test_expiry_classification() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();

        let mut expired = item("10", "1");
        expired.expiry_date = Some(today - Duration::days(1));
        assert!(expired.is_expired(today));
        assert!(!expired.is_near_expiry(today));
        assert_eq!(expired.expiry_label(today), "Expired");

        let mut near = item("10", "1");
        near.expiry_date = Some(today + Duration::days(NEAR_EXPIRY_WINDOW_DAYS));
        assert!(near.is_near_expiry(today));
        assert_eq!(near.expiry_label(today), "Near Expiry");

        // Expiring today is near-expiry, not expired
        let mut today_item = item("10", "1");
        today_item.expiry_date = Some(today);
        assert!(!today_item.is_expired(today));
        assert!(today_item.is_near_expiry(today));

        let mut far = item("10", "1");
        far.expiry_date = Some(today + Duration::days(NEAR_EXPIRY_WINDOW_DAYS + 1));
        assert!(!far.is_near_expiry(today));
        assert_eq!(far.expiry_label(today), "2026-09-28");

        let none = item("10", "1");
        assert_eq!(none.expiry_label(today), "-");
    }

    #[test]
    fn test_total_value() {
        let stock = item("12.5", "1");
        assert_eq!(stock.total_value(), dec("125.000"));
    }

    #[test]
    fn test_procurement_status_wire_names() {
        for s in [
            ProcurementStatus::Requested,
            ProcurementStatus::Ordered,
            ProcurementStatus::Received,
            ProcurementStatus::Stocked,
        ] {
            assert_eq!(ProcurementStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(ProcurementStatus::parse("SHIPPED"), None);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 3))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Exactly one status label applies to any item
        #[test]
        fn prop_status_label_total(
            quantity in amount_strategy(),
            threshold in amount_strategy()
        ) {
            let mut stock = item("0", "0");
            stock.quantity = quantity;
            stock.reorder_threshold = threshold;

            let label = stock.status_label();
            prop_assert!(["Out of Stock", "Low Stock", "In Stock"].contains(&label));

            if quantity <= Decimal::ZERO {
                prop_assert_eq!(label, "Out of Stock");
            } else if quantity <= threshold {
                prop_assert_eq!(label, "Low Stock");
            } else {
                prop_assert_eq!(label, "In Stock");
            }
        }

        /// Value scales linearly with quantity
        #[test]
        fn prop_value_is_quantity_times_cost(
            quantity in amount_strategy(),
            cost in amount_strategy()
        ) {
            let mut stock = item("0", "0");
            stock.quantity = quantity;
            stock.unit_cost = cost;
            prop_assert_eq!(stock.total_value(), quantity * cost);
        }

        /// A date is never both expired and near-expiry
        #[test]
        fn prop_expiry_states_exclusive(offset in -400i64..400i64) {
            let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
            let mut stock = item("10", "1");
            stock.expiry_date = Some(today + Duration::days(offset));

            prop_assert!(!(stock.is_expired(today) && stock.is_near_expiry(today)));

            // Within [0, window] is near-expiry, below 0 is expired
            if offset < 0 {
                prop_assert!(stock.is_expired(today));
            } else if offset <= NEAR_EXPIRY_WINDOW_DAYS {
                prop_assert!(stock.is_near_expiry(today));
            } else {
                prop_assert!(!stock.is_expired(today));
                prop_assert!(!stock.is_near_expiry(today));
            }
        }
    }
}
