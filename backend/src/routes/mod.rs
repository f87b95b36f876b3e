//! Route definitions for the Manufacturing ERP Platform

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - account management
        .nest("/users", user_routes())
        // Protected routes - product catalog
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        // Protected routes - inventory ledger
        .nest("/inventory", inventory_routes())
        // Protected routes - warehouses and stock items
        .nest("/warehouses", warehouse_routes())
        .nest("/stock-items", stock_item_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
        .route("/password-reset", post(handlers::request_password_reset))
        .route(
            "/password-reset/confirm",
            post(handlers::confirm_password_reset),
        )
}

/// Account management routes (protected)
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::me).put(handlers::update_profile))
        .route("/", get(handlers::list_accounts))
        .route("/:user_id", get(handlers::get_account))
        .route("/:user_id/role", post(handlers::update_account_role))
        .route("/:user_id/status", post(handlers::toggle_account_status))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product catalog routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Category routes (protected)
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route("/:category_id", axum::routing::delete(handlers::delete_category))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Inventory ledger routes (protected)
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::record_transaction),
        )
        .route(
            "/transactions/:transaction_id",
            get(handlers::get_transaction),
        )
        .route(
            "/products/:product_id/ledger",
            get(handlers::get_product_ledger),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Warehouse routes (protected)
fn warehouse_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_warehouses).post(handlers::create_warehouse),
        )
        .route(
            "/:warehouse_id",
            get(handlers::get_warehouse).put(handlers::update_warehouse),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock item routes (protected)
fn stock_item_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_stock_items).post(handlers::create_stock_item),
        )
        .route("/summary", get(handlers::get_stock_summary))
        .route(
            "/alerts",
            get(handlers::list_reorder_alerts),
        )
        .route(
            "/alerts/:alert_id/acknowledge",
            post(handlers::acknowledge_reorder_alert),
        )
        .route(
            "/:stock_item_id",
            get(handlers::get_stock_item)
                .put(handlers::update_stock_item)
                .delete(handlers::delete_stock_item),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}
