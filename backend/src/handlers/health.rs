//! Health and readiness reporting

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub database: &'static str,
}

/// Liveness probe; reports degraded instead of failing when the database
/// is unreachable
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await
    {
        Ok(_) => "reachable",
        Err(_) => "unreachable",
    };

    Json(HealthResponse {
        status: if database == "reachable" {
            "ok"
        } else {
            "degraded"
        },
        service: "manufacturing-erp-backend",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        database,
    })
}
