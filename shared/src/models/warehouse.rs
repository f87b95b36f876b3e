//! Warehouse and per-warehouse stock item models
//!
//! Stock items are physical records per (product, warehouse) and are tracked
//! independently of the product's ledger-derived aggregate stock.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Days before expiry at which a stock item counts as near-expiry
pub const NEAR_EXPIRY_WINDOW_DAYS: i64 = 30;

/// A physical warehouse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Purchasing lifecycle of a stock item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProcurementStatus {
    Requested,
    Ordered,
    Received,
    Stocked,
}

impl ProcurementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcurementStatus::Requested => "requested",
            ProcurementStatus::Ordered => "ordered",
            ProcurementStatus::Received => "received",
            ProcurementStatus::Stocked => "stocked",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProcurementStatus::Requested => "Requested",
            ProcurementStatus::Ordered => "Ordered",
            ProcurementStatus::Received => "Received",
            ProcurementStatus::Stocked => "Stocked",
        }
    }

    pub fn parse(s: &str) -> Option<ProcurementStatus> {
        match s {
            "requested" => Some(ProcurementStatus::Requested),
            "ordered" => Some(ProcurementStatus::Ordered),
            "received" => Some(ProcurementStatus::Received),
            "stocked" => Some(ProcurementStatus::Stocked),
            _ => None,
        }
    }
}

/// A per-warehouse physical stock record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    pub batch_number: Option<String>,
    pub location: Option<String>,
    pub procurement_status: ProcurementStatus,
    pub expiry_date: Option<NaiveDate>,
    pub manufactured_date: Option<NaiveDate>,
    pub reorder_threshold: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StockItem {
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity <= Decimal::ZERO
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_threshold
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|d| d < today)
    }

    /// Expiry falls within the near-expiry window (today inclusive)
    pub fn is_near_expiry(&self, today: NaiveDate) -> bool {
        self.expiry_date
            .is_some_and(|d| d >= today && d <= today + Duration::days(NEAR_EXPIRY_WINDOW_DAYS))
    }

    /// Total value of the record (quantity x unit cost)
    pub fn total_value(&self) -> Decimal {
        self.quantity * self.unit_cost
    }

    /// Human status label used by listings and CSV export
    pub fn status_label(&self) -> &'static str {
        if self.is_out_of_stock() {
            "Out of Stock"
        } else if self.is_low_stock() {
            "Low Stock"
        } else {
            "In Stock"
        }
    }

    /// Human expiry label used by listings and CSV export
    pub fn expiry_label(&self, today: NaiveDate) -> String {
        if self.is_expired(today) {
            "Expired".to_string()
        } else if self.is_near_expiry(today) {
            "Near Expiry".to_string()
        } else {
            match self.expiry_date {
                Some(d) => d.to_string(),
                None => "-".to_string(),
            }
        }
    }
}

/// State of a reorder alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Resolved => "resolved",
        }
    }

    pub fn parse(s: &str) -> Option<AlertStatus> {
        match s {
            "active" => Some(AlertStatus::Active),
            "acknowledged" => Some(AlertStatus::Acknowledged),
            "resolved" => Some(AlertStatus::Resolved),
            _ => None,
        }
    }
}

/// Alert raised when a stock item falls to or below its reorder threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderAlert {
    pub id: Uuid,
    pub stock_item_id: Uuid,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(quantity: &str, threshold: &str, expiry: Option<NaiveDate>) -> StockItem {
        StockItem {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            warehouse_id: Uuid::new_v4(),
            quantity: dec(quantity),
            unit_cost: dec("2.50"),
            batch_number: None,
            location: None,
            procurement_status: ProcurementStatus::Stocked,
            expiry_date: expiry,
            manufactured_date: None,
            reorder_threshold: dec(threshold),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_label_thresholds() {
        assert_eq!(item("0", "5", None).status_label(), "Out of Stock");
        assert_eq!(item("-1", "5", None).status_label(), "Out of Stock");
        assert_eq!(item("5", "5", None).status_label(), "Low Stock");
        assert_eq!(item("6", "5", None).status_label(), "In Stock");
    }

    #[test]
    fn test_total_value() {
        assert_eq!(item("10", "5", None).total_value(), dec("25.00"));
    }

    #[test]
    fn test_expiry_labels() {
        let today = day(2025, 6, 15);
        assert_eq!(
            item("10", "5", Some(day(2025, 6, 1))).expiry_label(today),
            "Expired"
        );
        assert_eq!(
            item("10", "5", Some(day(2025, 6, 30))).expiry_label(today),
            "Near Expiry"
        );
        assert_eq!(
            item("10", "5", Some(day(2025, 12, 1))).expiry_label(today),
            "2025-12-01"
        );
        assert_eq!(item("10", "5", None).expiry_label(today), "-");
    }

    #[test]
    fn test_near_expiry_window_boundaries() {
        let today = day(2025, 6, 15);
        // Expiring today counts as near expiry, not expired
        assert!(item("1", "0", Some(today)).is_near_expiry(today));
        assert!(!item("1", "0", Some(today)).is_expired(today));
        // Exactly 30 days out is still inside the window
        let edge = today + Duration::days(NEAR_EXPIRY_WINDOW_DAYS);
        assert!(item("1", "0", Some(edge)).is_near_expiry(today));
        // 31 days out is not
        let outside = today + Duration::days(NEAR_EXPIRY_WINDOW_DAYS + 1);
        assert!(!item("1", "0", Some(outside)).is_near_expiry(today));
    }

    #[test]
    fn test_procurement_status_round_trip() {
        for s in [
            ProcurementStatus::Requested,
            ProcurementStatus::Ordered,
            ProcurementStatus::Received,
            ProcurementStatus::Stocked,
        ] {
            assert_eq!(ProcurementStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(ProcurementStatus::parse("shipped"), None);
    }
}
