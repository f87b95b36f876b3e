//! Product catalog handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::product::{
    CategoryInput, CreateProductInput, ProductFilter, ProductService, UpdateProductInput,
};
use crate::AppState;
use shared::models::{Product, ProductCategory};
use shared::types::PaginatedResponse;

// --- Categories ---

/// List all product categories
pub async fn list_categories(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<ProductCategory>>> {
    let service = ProductService::new(state.db);
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}

/// Create a product category
pub async fn create_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CategoryInput>,
) -> AppResult<(StatusCode, Json<ProductCategory>)> {
    current_user.0.require_product_access()?;
    let service = ProductService::new(state.db);
    let category = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Delete a product category
pub async fn delete_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    current_user.0.require_product_access()?;
    let service = ProductService::new(state.db);
    service.delete_category(category_id).await?;
    Ok(Json(()))
}

// --- Products ---

/// List products
pub async fn list_products(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Json<PaginatedResponse<Product>>> {
    let service = ProductService::new(state.db);
    let products = service.list_products(filter).await?;
    Ok(Json(products))
}

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    current_user.0.require_product_access()?;
    let service = ProductService::new(state.db);
    let product = service
        .create_product(current_user.0.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a single product
pub async fn get_product(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.get_product(product_id).await?;
    Ok(Json(product))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<Product>> {
    current_user.0.require_product_access()?;
    let service = ProductService::new(state.db);
    let product = service.update_product(product_id, input).await?;
    Ok(Json(product))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    current_user.0.require_product_access()?;
    let service = ProductService::new(state.db);
    service.delete_product(product_id).await?;
    Ok(Json(()))
}
