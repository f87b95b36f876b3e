//! Warehouse registry service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{map_unique_violation, AppError, AppResult};
use shared::models::Warehouse;

/// Warehouse registry service
#[derive(Clone)]
pub struct WarehouseService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct WarehouseRow {
    id: Uuid,
    code: String,
    name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WarehouseRow {
    fn into_warehouse(self) -> Warehouse {
        Warehouse {
            id: self.id,
            code: self.code,
            name: self.name,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Input for creating a warehouse
#[derive(Debug, Deserialize)]
pub struct CreateWarehouseInput {
    pub code: String,
    pub name: String,
}

/// Input for updating a warehouse
#[derive(Debug, Deserialize)]
pub struct UpdateWarehouseInput {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl WarehouseService {
    /// Create a new WarehouseService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List warehouses; inactive ones are included only on request
    pub async fn list_warehouses(&self, include_inactive: bool) -> AppResult<Vec<Warehouse>> {
        let rows = sqlx::query_as::<_, WarehouseRow>(
            r#"
            SELECT id, code, name, is_active, created_at, updated_at
            FROM warehouses
            WHERE is_active = true OR $1
            ORDER BY code
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(WarehouseRow::into_warehouse).collect())
    }

    /// Get a single warehouse
    pub async fn get_warehouse(&self, warehouse_id: Uuid) -> AppResult<Warehouse> {
        let row = sqlx::query_as::<_, WarehouseRow>(
            "SELECT id, code, name, is_active, created_at, updated_at FROM warehouses WHERE id = $1",
        )
        .bind(warehouse_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Warehouse".to_string()))?;

        Ok(row.into_warehouse())
    }

    /// Create a warehouse with a unique short code
    pub async fn create_warehouse(&self, input: CreateWarehouseInput) -> AppResult<Warehouse> {
        let code = input.code.trim().to_uppercase();
        if code.is_empty() || code.len() > 20 {
            return Err(AppError::Validation {
                field: "code".to_string(),
                message: "Warehouse code must be 1-20 characters".to_string(),
            });
        }
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Warehouse name is required".to_string(),
            });
        }

        let row = sqlx::query_as::<_, WarehouseRow>(
            r#"
            INSERT INTO warehouses (code, name)
            VALUES ($1, $2)
            RETURNING id, code, name, is_active, created_at, updated_at
            "#,
        )
        .bind(&code)
        .bind(input.name.trim())
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_unique_violation(e, "code"))?;

        Ok(row.into_warehouse())
    }

    /// Rename or (de)activate a warehouse
    pub async fn update_warehouse(
        &self,
        warehouse_id: Uuid,
        input: UpdateWarehouseInput,
    ) -> AppResult<Warehouse> {
        let current = self.get_warehouse(warehouse_id).await?;

        let name = input.name.unwrap_or(current.name);
        let is_active = input.is_active.unwrap_or(current.is_active);

        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Warehouse name is required".to_string(),
            });
        }

        let row = sqlx::query_as::<_, WarehouseRow>(
            r#"
            UPDATE warehouses
            SET name = $1, is_active = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, code, name, is_active, created_at, updated_at
            "#,
        )
        .bind(name.trim())
        .bind(is_active)
        .bind(warehouse_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into_warehouse())
    }
}
