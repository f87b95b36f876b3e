//! Account management handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::users::{AccountFilter, UpdateProfileInput, UpdateRoleInput, UserService};
use crate::AppState;
use shared::models::User;
use shared::types::PaginatedResponse;

/// Get the caller's own account
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<User>> {
    let service = UserService::new(state.db);
    let user = service.get_account(current_user.0.user_id).await?;
    Ok(Json(user))
}

/// Update the caller's own profile
pub async fn update_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<UpdateProfileInput>,
) -> AppResult<Json<User>> {
    let service = UserService::new(state.db);
    let user = service.update_profile(current_user.0.user_id, input).await?;
    Ok(Json(user))
}

/// List accounts (admin only)
pub async fn list_accounts(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(filter): Query<AccountFilter>,
) -> AppResult<Json<PaginatedResponse<User>>> {
    current_user.0.require_admin()?;
    let service = UserService::new(state.db);
    let accounts = service.list_accounts(filter).await?;
    Ok(Json(accounts))
}

/// Get a single account (admin only)
pub async fn get_account(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<User>> {
    current_user.0.require_admin()?;
    let service = UserService::new(state.db);
    let user = service.get_account(user_id).await?;
    Ok(Json(user))
}

/// Change an account's role (admin only)
pub async fn update_account_role(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(input): Json<UpdateRoleInput>,
) -> AppResult<Json<User>> {
    current_user.0.require_admin()?;
    let service = UserService::new(state.db);
    let user = service.update_role(user_id, input).await?;
    Ok(Json(user))
}

/// Toggle an account's active flag (admin only)
pub async fn toggle_account_status(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<User>> {
    current_user.0.require_admin()?;
    let service = UserService::new(state.db);
    let user = service
        .toggle_status(current_user.0.user_id, user_id)
        .await?;
    Ok(Json(user))
}
