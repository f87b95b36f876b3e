//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of products tracked by the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Raw,
    Finished,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Raw => "RAW",
            ProductType::Finished => "FINISHED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProductType::Raw => "Raw Material",
            ProductType::Finished => "Finished Good",
        }
    }

    pub fn parse(s: &str) -> Option<ProductType> {
        match s {
            "RAW" => Some(ProductType::Raw),
            "FINISHED" => Some(ProductType::Finished),
            _ => None,
        }
    }
}

/// A product category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A catalog product
///
/// `current_stock` is the running sum of ledger transaction effects for this
/// product; it is never edited directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub category_id: Option<Uuid>,
    pub product_type: ProductType,
    pub description: Option<String>,
    /// Display symbol for quantities (e.g. "pcs", "kg")
    pub unit: String,
    pub unit_price: Decimal,
    pub current_stock: Decimal,
    pub minimum_stock_level: Decimal,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Aggregate stock at or below the configured minimum
    pub fn is_below_minimum(&self) -> bool {
        self.current_stock <= self.minimum_stock_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_type_round_trip() {
        assert_eq!(ProductType::parse("RAW"), Some(ProductType::Raw));
        assert_eq!(ProductType::parse("FINISHED"), Some(ProductType::Finished));
        assert_eq!(ProductType::parse("WIP"), None);
    }
}
