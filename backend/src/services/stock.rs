//! Stock item registry: per-warehouse stock records, reorder alerts, and
//! CSV export
//!
//! Stock items track physical batches independently of the product ledger's
//! aggregate counter.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{AlertStatus, ProcurementStatus, ReorderAlert, StockItem};
use shared::types::{PaginatedResponse, Pagination, PaginationMeta, DEFAULT_PAGE_SIZE};

/// Stock registry service
#[derive(Clone)]
pub struct StockService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct StockItemRow {
    id: Uuid,
    product_id: Uuid,
    warehouse_id: Uuid,
    quantity: Decimal,
    unit_cost: Decimal,
    batch_number: Option<String>,
    location: Option<String>,
    procurement_status: String,
    expiry_date: Option<NaiveDate>,
    manufactured_date: Option<NaiveDate>,
    reorder_threshold: Decimal,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const STOCK_ITEM_COLUMNS: &str = "id, product_id, warehouse_id, quantity, unit_cost, \
                                  batch_number, location, procurement_status, expiry_date, \
                                  manufactured_date, reorder_threshold, notes, created_at, \
                                  updated_at";

impl StockItemRow {
    fn into_stock_item(self) -> AppResult<StockItem> {
        let procurement_status =
            ProcurementStatus::parse(&self.procurement_status).ok_or_else(|| {
                AppError::Internal(format!(
                    "Unknown procurement status in database: {}",
                    self.procurement_status
                ))
            })?;
        Ok(StockItem {
            id: self.id,
            product_id: self.product_id,
            warehouse_id: self.warehouse_id,
            quantity: self.quantity,
            unit_cost: self.unit_cost,
            batch_number: self.batch_number,
            location: self.location,
            procurement_status,
            expiry_date: self.expiry_date,
            manufactured_date: self.manufactured_date,
            reorder_threshold: self.reorder_threshold,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Input for creating a stock item
#[derive(Debug, Deserialize)]
pub struct CreateStockItemInput {
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    pub batch_number: Option<String>,
    pub location: Option<String>,
    pub procurement_status: Option<ProcurementStatus>,
    pub expiry_date: Option<NaiveDate>,
    pub manufactured_date: Option<NaiveDate>,
    pub reorder_threshold: Option<Decimal>,
    pub notes: Option<String>,
}

/// Input for updating a stock item; omitted fields keep their value
#[derive(Debug, Deserialize)]
pub struct UpdateStockItemInput {
    pub quantity: Option<Decimal>,
    pub unit_cost: Option<Decimal>,
    pub batch_number: Option<String>,
    pub location: Option<String>,
    pub procurement_status: Option<ProcurementStatus>,
    pub expiry_date: Option<NaiveDate>,
    pub manufactured_date: Option<NaiveDate>,
    pub reorder_threshold: Option<Decimal>,
    pub notes: Option<String>,
}

/// Filters for the stock item listing
#[derive(Debug, Default, Deserialize)]
pub struct StockItemFilter {
    pub warehouse_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub procurement_status: Option<ProcurementStatus>,
    pub expiring_within_days: Option<i64>,
    pub search: Option<String>,
    pub page: Option<u32>,
}

/// Stock item joined with product and warehouse names for listings
#[derive(Debug, Serialize)]
pub struct StockItemView {
    #[serde(flatten)]
    pub item: StockItem,
    pub product_name: String,
    pub product_code: String,
    pub product_unit: String,
    pub warehouse_code: String,
    pub warehouse_name: String,
    pub status: String,
    pub total_value: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct StockItemJoinedRow {
    #[sqlx(flatten)]
    item: StockItemRow,
    product_name: String,
    product_code: String,
    product_unit: String,
    warehouse_code: String,
    warehouse_name: String,
}

impl StockItemJoinedRow {
    fn into_view(self) -> AppResult<StockItemView> {
        let item = self.item.into_stock_item()?;
        let status = item.status_label().to_string();
        let total_value = item.total_value();
        Ok(StockItemView {
            item,
            product_name: self.product_name,
            product_code: self.product_code,
            product_unit: self.product_unit,
            warehouse_code: self.warehouse_code,
            warehouse_name: self.warehouse_name,
            status,
            total_value,
        })
    }
}

/// Aggregate figures for the stock dashboard
#[derive(Debug, Serialize)]
pub struct StockSummary {
    pub total_items: i64,
    pub total_value: Decimal,
    pub low_stock_count: i64,
    pub out_of_stock_count: i64,
    pub expired_count: i64,
    pub near_expiry_count: i64,
    pub active_alert_count: i64,
}

/// One row of the stock CSV export
#[derive(Debug, Serialize)]
pub struct StockExportRow {
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Batch Number")]
    pub batch_number: String,
    #[serde(rename = "Warehouse")]
    pub warehouse: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Quantity")]
    pub quantity: Decimal,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "Value")]
    pub value: Decimal,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Procurement")]
    pub procurement: String,
    #[serde(rename = "Expiry")]
    pub expiry: String,
    #[serde(rename = "Created At")]
    pub created_at: String,
    #[serde(rename = "Updated At")]
    pub updated_at: String,
}

#[derive(Debug, sqlx::FromRow)]
struct AlertRow {
    id: Uuid,
    stock_item_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
}

impl AlertRow {
    fn into_alert(self) -> AppResult<ReorderAlert> {
        let status = AlertStatus::parse(&self.status).ok_or_else(|| {
            AppError::Internal(format!("Unknown alert status in database: {}", self.status))
        })?;
        Ok(ReorderAlert {
            id: self.id,
            stock_item_id: self.stock_item_id,
            status,
            created_at: self.created_at,
        })
    }
}

const JOINED_SELECT: &str = r#"
    SELECT si.id, si.product_id, si.warehouse_id, si.quantity, si.unit_cost,
           si.batch_number, si.location, si.procurement_status, si.expiry_date,
           si.manufactured_date, si.reorder_threshold, si.notes, si.created_at,
           si.updated_at,
           p.name AS product_name, p.code AS product_code, p.unit AS product_unit,
           w.code AS warehouse_code, w.name AS warehouse_name
    FROM stock_items si
    JOIN products p ON p.id = si.product_id
    JOIN warehouses w ON w.id = si.warehouse_id
"#;

impl StockService {
    /// Create a new StockService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a stock item
    pub async fn create_stock_item(&self, input: CreateStockItemInput) -> AppResult<StockItem> {
        Self::validate_amounts(input.quantity, input.unit_cost)?;
        Self::validate_dates(input.manufactured_date, input.expiry_date)?;

        self.ensure_product_exists(input.product_id).await?;
        self.ensure_warehouse_active(input.warehouse_id).await?;

        let procurement = input.procurement_status.unwrap_or(ProcurementStatus::Stocked);
        let threshold = input.reorder_threshold.unwrap_or(Decimal::ZERO);

        let row = sqlx::query_as::<_, StockItemRow>(&format!(
            r#"
            INSERT INTO stock_items
                (product_id, warehouse_id, quantity, unit_cost, batch_number, location,
                 procurement_status, expiry_date, manufactured_date, reorder_threshold, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            STOCK_ITEM_COLUMNS
        ))
        .bind(input.product_id)
        .bind(input.warehouse_id)
        .bind(input.quantity)
        .bind(input.unit_cost)
        .bind(&input.batch_number)
        .bind(&input.location)
        .bind(procurement.as_str())
        .bind(input.expiry_date)
        .bind(input.manufactured_date)
        .bind(threshold)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        let item = row.into_stock_item()?;
        self.sync_reorder_alert(&item).await?;

        Ok(item)
    }

    /// Get a single stock item with product and warehouse context
    pub async fn get_stock_item(&self, stock_item_id: Uuid) -> AppResult<StockItemView> {
        let row = sqlx::query_as::<_, StockItemJoinedRow>(&format!(
            "{} WHERE si.id = $1",
            JOINED_SELECT
        ))
        .bind(stock_item_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Stock item".to_string()))?;

        row.into_view()
    }

    /// Update a stock item
    pub async fn update_stock_item(
        &self,
        stock_item_id: Uuid,
        input: UpdateStockItemInput,
    ) -> AppResult<StockItem> {
        let current = self.get_stock_item(stock_item_id).await?.item;

        let quantity = input.quantity.unwrap_or(current.quantity);
        let unit_cost = input.unit_cost.unwrap_or(current.unit_cost);
        let batch_number = input.batch_number.or(current.batch_number);
        let location = input.location.or(current.location);
        let procurement = input
            .procurement_status
            .unwrap_or(current.procurement_status);
        let expiry_date = input.expiry_date.or(current.expiry_date);
        let manufactured_date = input.manufactured_date.or(current.manufactured_date);
        let threshold = input.reorder_threshold.unwrap_or(current.reorder_threshold);
        let notes = input.notes.or(current.notes);

        Self::validate_amounts(quantity, unit_cost)?;
        Self::validate_dates(manufactured_date, expiry_date)?;

        let row = sqlx::query_as::<_, StockItemRow>(&format!(
            r#"
            UPDATE stock_items
            SET quantity = $1, unit_cost = $2, batch_number = $3, location = $4,
                procurement_status = $5, expiry_date = $6, manufactured_date = $7,
                reorder_threshold = $8, notes = $9, updated_at = NOW()
            WHERE id = $10
            RETURNING {}
            "#,
            STOCK_ITEM_COLUMNS
        ))
        .bind(quantity)
        .bind(unit_cost)
        .bind(&batch_number)
        .bind(&location)
        .bind(procurement.as_str())
        .bind(expiry_date)
        .bind(manufactured_date)
        .bind(threshold)
        .bind(&notes)
        .bind(stock_item_id)
        .fetch_one(&self.db)
        .await?;

        let item = row.into_stock_item()?;
        self.sync_reorder_alert(&item).await?;

        Ok(item)
    }

    /// Delete a stock item and its alerts
    pub async fn delete_stock_item(&self, stock_item_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM stock_items WHERE id = $1")
            .bind(stock_item_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Stock item".to_string()));
        }

        Ok(())
    }

    /// List stock items with warehouse, status, expiry, and search filters
    pub async fn list_stock_items(
        &self,
        filter: StockItemFilter,
    ) -> AppResult<PaginatedResponse<StockItemView>> {
        let pagination = Pagination {
            page: filter.page.unwrap_or(1),
            per_page: DEFAULT_PAGE_SIZE,
        };

        let (where_clause, search, status, expiry_cutoff) = Self::filter_clause(&filter);

        let total_items = sqlx::query_scalar::<_, i64>(&format!(
            r#"
            SELECT COUNT(*)
            FROM stock_items si
            JOIN products p ON p.id = si.product_id
            JOIN warehouses w ON w.id = si.warehouse_id
            {}
            "#,
            where_clause
        ))
        .bind(filter.warehouse_id)
        .bind(filter.product_id)
        .bind(status)
        .bind(expiry_cutoff)
        .bind(&search)
        .fetch_one(&self.db)
        .await? as u64;

        let rows = sqlx::query_as::<_, StockItemJoinedRow>(&format!(
            r#"
            {} {}
            ORDER BY si.created_at DESC
            LIMIT $6 OFFSET $7
            "#,
            JOINED_SELECT, where_clause
        ))
        .bind(filter.warehouse_id)
        .bind(filter.product_id)
        .bind(status)
        .bind(expiry_cutoff)
        .bind(&search)
        .bind(pagination.per_page as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.db)
        .await?;

        let items = rows
            .into_iter()
            .map(StockItemJoinedRow::into_view)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PaginatedResponse {
            data: items,
            pagination: PaginationMeta::new(&pagination, total_items),
        })
    }

    /// Aggregate dashboard figures across all stock items
    pub async fn summary(&self) -> AppResult<StockSummary> {
        let today = Utc::now().date_naive();
        let near_cutoff = today + chrono::Duration::days(shared::models::NEAR_EXPIRY_WINDOW_DAYS);

        let row = sqlx::query_as::<_, (i64, Option<Decimal>, i64, i64, i64, i64)>(
            r#"
            SELECT COUNT(*),
                   SUM(quantity * unit_cost),
                   COUNT(*) FILTER (WHERE quantity <= reorder_threshold),
                   COUNT(*) FILTER (WHERE quantity <= 0),
                   COUNT(*) FILTER (WHERE expiry_date < $1),
                   COUNT(*) FILTER (WHERE expiry_date >= $1 AND expiry_date <= $2)
            FROM stock_items
            "#,
        )
        .bind(today)
        .bind(near_cutoff)
        .fetch_one(&self.db)
        .await?;

        let active_alert_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reorder_alerts WHERE status = 'active'",
        )
        .fetch_one(&self.db)
        .await?;

        Ok(StockSummary {
            total_items: row.0,
            total_value: row.1.unwrap_or(Decimal::ZERO),
            low_stock_count: row.2,
            out_of_stock_count: row.3,
            expired_count: row.4,
            near_expiry_count: row.5,
            active_alert_count,
        })
    }

    /// Export stock items matching the filter as CSV
    pub async fn export_csv(&self, filter: StockItemFilter) -> AppResult<String> {
        let (where_clause, search, status, expiry_cutoff) = Self::filter_clause(&filter);

        let rows = sqlx::query_as::<_, StockItemJoinedRow>(&format!(
            "{} {} ORDER BY p.code, si.created_at",
            JOINED_SELECT, where_clause
        ))
        .bind(filter.warehouse_id)
        .bind(filter.product_id)
        .bind(status)
        .bind(expiry_cutoff)
        .bind(&search)
        .fetch_all(&self.db)
        .await?;

        let today = Utc::now().date_naive();
        let mut wtr = csv::Writer::from_writer(vec![]);

        for row in rows {
            let view = row.into_view()?;
            wtr.serialize(Self::export_row(&view, today))
                .map_err(|e| AppError::Internal(format!("CSV serialization failed: {}", e)))?;
        }

        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV generation failed: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("CSV encoding failed: {}", e)))?;

        Ok(csv_data)
    }

    /// Build one export row from a joined stock item view
    fn export_row(view: &StockItemView, today: NaiveDate) -> StockExportRow {
        StockExportRow {
            sku: view.product_code.clone(),
            name: view.product_name.clone(),
            batch_number: view.item.batch_number.clone().unwrap_or_else(|| "-".to_string()),
            warehouse: view.warehouse_code.clone(),
            location: view.item.location.clone().unwrap_or_else(|| "Main".to_string()),
            quantity: view.item.quantity,
            unit: view.product_unit.clone(),
            value: view.item.total_value(),
            status: view.item.status_label().to_string(),
            procurement: view.item.procurement_status.display_name().to_string(),
            expiry: view.item.expiry_label(today),
            created_at: view.item.created_at.format("%Y-%m-%d %H:%M").to_string(),
            updated_at: view.item.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }

    // --- Reorder alerts ---

    /// List reorder alerts, optionally only open ones
    pub async fn list_alerts(&self, only_open: bool) -> AppResult<Vec<ReorderAlert>> {
        let rows = sqlx::query_as::<_, AlertRow>(
            r#"
            SELECT id, stock_item_id, status, created_at
            FROM reorder_alerts
            WHERE NOT $1 OR status = 'active'
            ORDER BY created_at DESC
            "#,
        )
        .bind(only_open)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(AlertRow::into_alert).collect()
    }

    /// Acknowledge an active alert
    pub async fn acknowledge_alert(&self, alert_id: Uuid) -> AppResult<ReorderAlert> {
        let row = sqlx::query_as::<_, AlertRow>(
            r#"
            UPDATE reorder_alerts
            SET status = 'acknowledged'
            WHERE id = $1 AND status = 'active'
            RETURNING id, stock_item_id, status, created_at
            "#,
        )
        .bind(alert_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Alert".to_string()))?;

        row.into_alert()
    }

    /// Reconcile the item's alert state with its current quantity
    ///
    /// A low item gets one open alert; recovering above the threshold
    /// resolves whatever is open.
    async fn sync_reorder_alert(&self, item: &StockItem) -> AppResult<()> {
        if item.is_low_stock() {
            let open = sqlx::query_scalar::<_, bool>(
                r#"
                SELECT EXISTS(
                    SELECT 1 FROM reorder_alerts
                    WHERE stock_item_id = $1 AND status IN ('active', 'acknowledged')
                )
                "#,
            )
            .bind(item.id)
            .fetch_one(&self.db)
            .await?;

            if !open {
                sqlx::query("INSERT INTO reorder_alerts (stock_item_id) VALUES ($1)")
                    .bind(item.id)
                    .execute(&self.db)
                    .await?;
                tracing::info!(
                    "Reorder alert raised for stock item {} (quantity {})",
                    item.id,
                    item.quantity
                );
            }
        } else {
            sqlx::query(
                r#"
                UPDATE reorder_alerts
                SET status = 'resolved'
                WHERE stock_item_id = $1 AND status IN ('active', 'acknowledged')
                "#,
            )
            .bind(item.id)
            .execute(&self.db)
            .await?;
        }

        Ok(())
    }

    // --- Helpers ---

    /// Shared WHERE clause for listing and export; bind order is
    /// warehouse_id, product_id, procurement_status, expiry cutoff, search.
    fn filter_clause(
        filter: &StockItemFilter,
    ) -> (&'static str, Option<String>, Option<&'static str>, Option<NaiveDate>) {
        let search = filter
            .search
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!("%{}%", s.trim()));
        let status = filter.procurement_status.map(|s| s.as_str());
        let expiry_cutoff = filter
            .expiring_within_days
            .map(|days| Utc::now().date_naive() + chrono::Duration::days(days));

        let where_clause = r#"
            WHERE ($1::uuid IS NULL OR si.warehouse_id = $1)
              AND ($2::uuid IS NULL OR si.product_id = $2)
              AND ($3::text IS NULL OR si.procurement_status = $3)
              AND ($4::date IS NULL OR (si.expiry_date IS NOT NULL AND si.expiry_date <= $4))
              AND ($5::text IS NULL OR p.name ILIKE $5 OR p.code ILIKE $5
                   OR si.batch_number ILIKE $5 OR si.location ILIKE $5
                   OR si.notes ILIKE $5)
        "#;

        (where_clause, search, status, expiry_cutoff)
    }

    fn validate_amounts(quantity: Decimal, unit_cost: Decimal) -> AppResult<()> {
        if quantity < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Quantity cannot be negative".to_string(),
            });
        }
        if unit_cost < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "unit_cost".to_string(),
                message: "Unit cost cannot be negative".to_string(),
            });
        }
        Ok(())
    }

    fn validate_dates(
        manufactured: Option<NaiveDate>,
        expiry: Option<NaiveDate>,
    ) -> AppResult<()> {
        if let (Some(m), Some(e)) = (manufactured, expiry) {
            if e < m {
                return Err(AppError::Validation {
                    field: "expiry_date".to_string(),
                    message: "Expiry date cannot be before the manufactured date".to_string(),
                });
            }
        }
        Ok(())
    }

    async fn ensure_product_exists(&self, product_id: Uuid) -> AppResult<()> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)",
        )
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        if !exists {
            return Err(AppError::NotFound("Product".to_string()));
        }
        Ok(())
    }

    async fn ensure_warehouse_active(&self, warehouse_id: Uuid) -> AppResult<()> {
        let active = sqlx::query_scalar::<_, Option<bool>>(
            "SELECT is_active FROM warehouses WHERE id = $1",
        )
        .bind(warehouse_id)
        .fetch_optional(&self.db)
        .await?
        .flatten();

        match active {
            None => Err(AppError::NotFound("Warehouse".to_string())),
            Some(false) => Err(AppError::ValidationError(
                "Warehouse is inactive".to_string(),
            )),
            Some(true) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(quantity: Decimal, threshold: Decimal) -> StockItem {
        StockItem {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            warehouse_id: Uuid::new_v4(),
            quantity,
            unit_cost: d("12.50"),
            batch_number: Some("B-100".to_string()),
            location: None,
            procurement_status: ProcurementStatus::Stocked,
            expiry_date: None,
            manufactured_date: None,
            reorder_threshold: threshold,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn view(stock: StockItem) -> StockItemView {
        StockItemView {
            product_name: "Steel Bolt M8".to_string(),
            product_code: "RM-BOLT-M8".to_string(),
            product_unit: "pcs".to_string(),
            warehouse_code: "CDC".to_string(),
            warehouse_name: "Central Distribution Center".to_string(),
            status: stock.status_label().to_string(),
            total_value: stock.total_value(),
            item: stock,
        }
    }

    #[test]
    fn test_export_row_defaults_location_and_batch() {
        let mut stock = item(d("4"), d("10"));
        stock.batch_number = None;
        let today = Utc::now().date_naive();
        let row = StockService::export_row(&view(stock), today);

        assert_eq!(row.location, "Main");
        assert_eq!(row.batch_number, "-");
        assert_eq!(row.sku, "RM-BOLT-M8");
        assert_eq!(row.status, "Low Stock");
        assert_eq!(row.value, d("50.00"));
        assert_eq!(row.expiry, "-");
    }

    #[test]
    fn test_export_row_warehouse_column_is_the_code() {
        let stock = item(d("20"), d("5"));
        let today = Utc::now().date_naive();
        let row = StockService::export_row(&view(stock), today);

        assert_eq!(row.warehouse, "CDC");
        assert_ne!(row.warehouse, "Central Distribution Center");
    }

    #[test]
    fn test_validate_amounts_rejects_negatives() {
        assert!(StockService::validate_amounts(d("-1"), d("0")).is_err());
        assert!(StockService::validate_amounts(d("0"), d("-1")).is_err());
        assert!(StockService::validate_amounts(d("0"), d("0")).is_ok());
    }

    #[test]
    fn test_validate_dates_rejects_expiry_before_manufacture() {
        let m = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let e = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        assert!(StockService::validate_dates(Some(m), Some(e)).is_err());
        assert!(StockService::validate_dates(Some(e), Some(m)).is_ok());
        assert!(StockService::validate_dates(None, Some(e)).is_ok());
    }
}
