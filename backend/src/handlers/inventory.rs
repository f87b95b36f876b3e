//! Inventory ledger handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::ledger::{
    LedgerService, ProductLedger, RecordTransactionInput, TransactionFilter,
};
use crate::AppState;
use shared::models::InventoryTransaction;
use shared::types::PaginatedResponse;

/// Record a ledger transaction
pub async fn record_transaction(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordTransactionInput>,
) -> AppResult<(StatusCode, Json<InventoryTransaction>)> {
    current_user.0.require_ledger_access()?;
    let service = LedgerService::new(state.db);
    let transaction = service
        .record_transaction(current_user.0.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// List ledger transactions
pub async fn list_transactions(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(filter): Query<TransactionFilter>,
) -> AppResult<Json<PaginatedResponse<InventoryTransaction>>> {
    let service = LedgerService::new(state.db);
    let transactions = service.list_transactions(filter).await?;
    Ok(Json(transactions))
}

/// Get a single transaction
pub async fn get_transaction(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(transaction_id): Path<Uuid>,
) -> AppResult<Json<InventoryTransaction>> {
    let service = LedgerService::new(state.db);
    let transaction = service.get_transaction(transaction_id).await?;
    Ok(Json(transaction))
}

/// Ledger view for a product: aggregate stock plus full history
pub async fn get_product_ledger(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ProductLedger>> {
    let service = LedgerService::new(state.db);
    let ledger = service.product_ledger(product_id).await?;
    Ok(Json(ledger))
}
