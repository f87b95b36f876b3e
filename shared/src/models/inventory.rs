//! Inventory ledger models
//!
//! The ledger is append-only: a transaction is written once and never edited,
//! and its creation is the only writer of a product's aggregate stock.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of ledger transactions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Purchase,
    Sale,
    Production,
    Adjustment,
    Transfer,
}

impl TransactionType {
    pub const ALL: [TransactionType; 5] = [
        TransactionType::Purchase,
        TransactionType::Sale,
        TransactionType::Production,
        TransactionType::Adjustment,
        TransactionType::Transfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Purchase => "PURCHASE",
            TransactionType::Sale => "SALE",
            TransactionType::Production => "PRODUCTION",
            TransactionType::Adjustment => "ADJUSTMENT",
            TransactionType::Transfer => "TRANSFER",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TransactionType::Purchase => "Purchase",
            TransactionType::Sale => "Sale",
            TransactionType::Production => "Production",
            TransactionType::Adjustment => "Stock Adjustment",
            TransactionType::Transfer => "Warehouse Transfer",
        }
    }

    pub fn parse(s: &str) -> Option<TransactionType> {
        match s {
            "PURCHASE" => Some(TransactionType::Purchase),
            "SALE" => Some(TransactionType::Sale),
            "PRODUCTION" => Some(TransactionType::Production),
            "ADJUSTMENT" => Some(TransactionType::Adjustment),
            "TRANSFER" => Some(TransactionType::Transfer),
            _ => None,
        }
    }

    /// Whether this type requires an explicit adjustment direction
    pub fn requires_direction(&self) -> bool {
        matches!(self, TransactionType::Adjustment)
    }
}

/// Direction of a stock adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentDirection {
    Increase,
    Decrease,
}

impl AdjustmentDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentDirection::Increase => "increase",
            AdjustmentDirection::Decrease => "decrease",
        }
    }

    pub fn parse(s: &str) -> Option<AdjustmentDirection> {
        match s {
            "increase" => Some(AdjustmentDirection::Increase),
            "decrease" => Some(AdjustmentDirection::Decrease),
            _ => None,
        }
    }
}

/// Signed effect a transaction has on the product's aggregate stock
///
/// Purchase and Production add, Sale subtracts. Adjustment applies the given
/// quantity with the caller's direction. Transfer moves stock between
/// warehouses and leaves the product aggregate untouched.
pub fn stock_effect(
    transaction_type: TransactionType,
    quantity: Decimal,
    direction: Option<AdjustmentDirection>,
) -> Decimal {
    match transaction_type {
        TransactionType::Purchase | TransactionType::Production => quantity,
        TransactionType::Sale => -quantity,
        TransactionType::Adjustment => match direction {
            Some(AdjustmentDirection::Decrease) => -quantity,
            _ => quantity,
        },
        TransactionType::Transfer => Decimal::ZERO,
    }
}

/// An append-only ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub id: Uuid,
    pub product_id: Uuid,
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    pub adjustment_direction: Option<AdjustmentDirection>,
    pub reference_number: String,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_purchase_and_production_add() {
        assert_eq!(
            stock_effect(TransactionType::Purchase, dec("10.5"), None),
            dec("10.5")
        );
        assert_eq!(
            stock_effect(TransactionType::Production, dec("3"), None),
            dec("3")
        );
    }

    #[test]
    fn test_sale_subtracts() {
        assert_eq!(
            stock_effect(TransactionType::Sale, dec("4.25"), None),
            dec("-4.25")
        );
    }

    #[test]
    fn test_adjustment_is_signed() {
        assert_eq!(
            stock_effect(
                TransactionType::Adjustment,
                dec("2"),
                Some(AdjustmentDirection::Increase)
            ),
            dec("2")
        );
        assert_eq!(
            stock_effect(
                TransactionType::Adjustment,
                dec("2"),
                Some(AdjustmentDirection::Decrease)
            ),
            dec("-2")
        );
    }

    #[test]
    fn test_transfer_is_aggregate_noop() {
        assert_eq!(
            stock_effect(TransactionType::Transfer, dec("100"), None),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_transaction_type_round_trip() {
        for t in TransactionType::ALL {
            assert_eq!(TransactionType::parse(t.as_str()), Some(t));
        }
        assert_eq!(TransactionType::parse("RETURN"), None);
    }

    #[test]
    fn test_only_adjustment_requires_direction() {
        assert!(TransactionType::Adjustment.requires_direction());
        assert!(!TransactionType::Purchase.requires_direction());
        assert!(!TransactionType::Transfer.requires_direction());
    }
}
