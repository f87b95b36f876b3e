//! Stock item handlers, including the CSV export switch

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::stock::{
    CreateStockItemInput, StockItemFilter, StockItemView, StockService, StockSummary,
    UpdateStockItemInput,
};
use crate::AppState;
use shared::models::{ReorderAlert, StockItem};
use shared::types::PaginatedResponse;

#[derive(Debug, Default, Deserialize)]
pub struct StockItemListQuery {
    pub warehouse_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub procurement_status: Option<shared::models::ProcurementStatus>,
    pub expiring_within_days: Option<i64>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub export: Option<String>, // "csv" switches the response format
}

impl StockItemListQuery {
    fn into_filter(self) -> StockItemFilter {
        StockItemFilter {
            warehouse_id: self.warehouse_id,
            product_id: self.product_id,
            procurement_status: self.procurement_status,
            expiring_within_days: self.expiring_within_days,
            search: self.search,
            page: self.page,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertListQuery {
    #[serde(default)]
    pub only_open: bool,
}

/// List stock items; `?export=csv` streams the same selection as a CSV file
pub async fn list_stock_items(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<StockItemListQuery>,
) -> AppResult<Response> {
    let service = StockService::new(state.db);
    let export = query.export.clone();
    let filter = query.into_filter();

    if export.as_deref() == Some("csv") {
        let csv = service.export_csv(filter).await?;
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"stock_items.csv\"",
                ),
            ],
            csv,
        )
            .into_response());
    }

    let items: PaginatedResponse<StockItemView> = service.list_stock_items(filter).await?;
    Ok(Json(items).into_response())
}

/// Create a stock item
pub async fn create_stock_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateStockItemInput>,
) -> AppResult<(StatusCode, Json<StockItem>)> {
    current_user.0.require_stock_access()?;
    let service = StockService::new(state.db);
    let item = service.create_stock_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Get a single stock item
pub async fn get_stock_item(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(stock_item_id): Path<Uuid>,
) -> AppResult<Json<StockItemView>> {
    let service = StockService::new(state.db);
    let item = service.get_stock_item(stock_item_id).await?;
    Ok(Json(item))
}

/// Update a stock item
pub async fn update_stock_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(stock_item_id): Path<Uuid>,
    Json(input): Json<UpdateStockItemInput>,
) -> AppResult<Json<StockItem>> {
    current_user.0.require_stock_access()?;
    let service = StockService::new(state.db);
    let item = service.update_stock_item(stock_item_id, input).await?;
    Ok(Json(item))
}

/// Delete a stock item
pub async fn delete_stock_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(stock_item_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    current_user.0.require_stock_access()?;
    let service = StockService::new(state.db);
    service.delete_stock_item(stock_item_id).await?;
    Ok(Json(()))
}

/// Aggregate dashboard figures
pub async fn get_stock_summary(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<StockSummary>> {
    let service = StockService::new(state.db);
    let summary = service.summary().await?;
    Ok(Json(summary))
}

/// List reorder alerts
pub async fn list_reorder_alerts(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<AlertListQuery>,
) -> AppResult<Json<Vec<ReorderAlert>>> {
    let service = StockService::new(state.db);
    let alerts = service.list_alerts(query.only_open).await?;
    Ok(Json(alerts))
}

/// Acknowledge an active reorder alert
pub async fn acknowledge_reorder_alert(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(alert_id): Path<Uuid>,
) -> AppResult<Json<ReorderAlert>> {
    current_user.0.require_stock_access()?;
    let service = StockService::new(state.db);
    let alert = service.acknowledge_alert(alert_id).await?;
    Ok(Json(alert))
}
