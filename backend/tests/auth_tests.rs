//! Authentication and authorization tests
//!
//! Covers role wire formats, the role gate matrix, and input validation
//! rules used by registration.

use proptest::prelude::*;

use shared::models::Role;
use shared::validation;

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_role_wire_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("SUPERUSER"), None);
        assert_eq!(Role::parse("admin"), None); // case sensitive
    }

    #[test]
    fn test_only_admin_manages_users() {
        for role in Role::ALL {
            assert_eq!(role.can_manage_users(), role == Role::Admin);
        }
    }

    #[test]
    fn test_ledger_gate() {
        assert!(Role::Admin.can_record_transactions());
        assert!(Role::Manager.can_record_transactions());
        assert!(Role::Inventory.can_record_transactions());
        assert!(!Role::Engineer.can_record_transactions());
        assert!(!Role::Finance.can_record_transactions());
        assert!(!Role::Viewer.can_record_transactions());
    }

    #[test]
    fn test_product_gate() {
        assert!(Role::Admin.can_manage_products());
        assert!(Role::Manager.can_manage_products());
        assert!(Role::Procurement.can_manage_products());
        assert!(!Role::Inventory.can_manage_products());
        assert!(!Role::Viewer.can_manage_products());
    }

    #[test]
    fn test_stock_gate() {
        assert!(Role::Admin.can_manage_stock());
        assert!(Role::Inventory.can_manage_stock());
        assert!(Role::Procurement.can_manage_stock());
        assert!(!Role::Manager.can_manage_stock());
        assert!(!Role::Viewer.can_manage_stock());
    }

    #[test]
    fn test_default_role_is_viewer() {
        assert_eq!(Role::default(), Role::Viewer);
    }

    #[test]
    fn test_username_rules() {
        assert!(validation::validate_username("jsmith").is_ok());
        assert!(validation::validate_username("a.b-c_d").is_ok());
        assert!(validation::validate_username("ab").is_err()); // too short
        assert!(validation::validate_username(&"x".repeat(31)).is_err());
        assert!(validation::validate_username("j smith").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validation::validate_email("ops@plant.example").is_ok());
        assert!(validation::validate_email("no-at-sign").is_err());
        assert!(validation::validate_email("").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(validation::validate_password("longenough").is_ok());
        assert!(validation::validate_password("short").is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn role_strategy() -> impl Strategy<Value = Role> {
        prop_oneof![
            Just(Role::Admin),
            Just(Role::Manager),
            Just(Role::Engineer),
            Just(Role::Inventory),
            Just(Role::Procurement),
            Just(Role::Finance),
            Just(Role::Viewer),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Admin passes every gate; Viewer passes none
        #[test]
        fn prop_admin_superset_viewer_empty(role in role_strategy()) {
            let gates = [
                role.can_manage_users(),
                role.can_record_transactions(),
                role.can_manage_products(),
                role.can_manage_stock(),
            ];
            if role == Role::Admin {
                prop_assert!(gates.iter().all(|g| *g));
            }
            if role == Role::Viewer {
                prop_assert!(gates.iter().all(|g| !*g));
            }
        }

        /// Wire names survive a round trip for every role
        #[test]
        fn prop_role_round_trip(role in role_strategy()) {
            prop_assert_eq!(Role::parse(role.as_str()), Some(role));
        }

        /// Valid usernames are exactly 3-30 chars of the allowed alphabet
        #[test]
        fn prop_username_alphabet(s in "[a-z0-9._-]{3,30}") {
            prop_assert!(validation::validate_username(&s).is_ok());
        }

        /// Anything with whitespace is rejected
        #[test]
        fn prop_username_rejects_whitespace(
            a in "[a-z]{1,10}",
            b in "[a-z]{1,10}"
        ) {
            let s = format!("{} {}", a, b);
            prop_assert!(validation::validate_username(&s).is_err());
        }
    }
}
