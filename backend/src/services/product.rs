//! Product catalog service: categories and products
//!
//! `current_stock` is owned by the inventory ledger and is never writable
//! through this service.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{map_unique_violation, AppError, AppResult};
use shared::models::{Product, ProductCategory, ProductType};
use shared::types::{PaginatedResponse, Pagination, PaginationMeta, DEFAULT_PAGE_SIZE};
use shared::validation;

/// Product catalog service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    code: String,
    category_id: Option<Uuid>,
    product_type: String,
    description: Option<String>,
    unit: String,
    unit_price: Decimal,
    current_stock: Decimal,
    minimum_stock_level: Decimal,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const PRODUCT_COLUMNS: &str = "id, name, code, category_id, product_type, description, unit, \
                               unit_price, current_stock, minimum_stock_level, created_by, \
                               created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> ProductCategory {
        ProductCategory {
            id: self.id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

impl ProductRow {
    fn into_product(self) -> AppResult<Product> {
        let product_type = ProductType::parse(&self.product_type).ok_or_else(|| {
            AppError::Internal(format!(
                "Unknown product type in database: {}",
                self.product_type
            ))
        })?;
        Ok(Product {
            id: self.id,
            name: self.name,
            code: self.code,
            category_id: self.category_id,
            product_type,
            description: self.description,
            unit: self.unit,
            unit_price: self.unit_price,
            current_stock: self.current_stock,
            minimum_stock_level: self.minimum_stock_level,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub code: String,
    pub category_id: Option<Uuid>,
    pub product_type: ProductType,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub unit_price: Decimal,
    pub minimum_stock_level: Option<Decimal>,
}

/// Input for updating a product; omitted fields keep their value
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub category_id: Option<Uuid>,
    pub product_type: Option<ProductType>,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub unit_price: Option<Decimal>,
    pub minimum_stock_level: Option<Decimal>,
}

/// Filters for the product listing
#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    pub product_type: Option<ProductType>,
    pub category_id: Option<Uuid>,
    pub search: Option<String>,
    pub below_minimum: Option<bool>,
    pub page: Option<u32>,
}

/// Input for creating or renaming a category
#[derive(Debug, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // --- Categories ---

    /// List all categories
    pub async fn list_categories(&self) -> AppResult<Vec<ProductCategory>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, created_at FROM product_categories ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    /// Create a category
    pub async fn create_category(&self, input: CategoryInput) -> AppResult<ProductCategory> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Category name is required".to_string(),
            });
        }

        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO product_categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.description)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_unique_violation(e, "name"))?;

        Ok(row.into_category())
    }

    /// Delete a category; products referencing it fall back to uncategorized
    pub async fn delete_category(&self, category_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM product_categories WHERE id = $1")
            .bind(category_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category".to_string()));
        }

        Ok(())
    }

    // --- Products ---

    /// Create a product with zero opening stock
    pub async fn create_product(
        &self,
        created_by: Uuid,
        input: CreateProductInput,
    ) -> AppResult<Product> {
        if let Err(message) = validation::validate_product_code(&input.code) {
            return Err(AppError::Validation {
                field: "code".to_string(),
                message: message.to_string(),
            });
        }
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Product name is required".to_string(),
            });
        }
        if input.unit_price < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "unit_price".to_string(),
                message: "Unit price cannot be negative".to_string(),
            });
        }

        if let Some(category_id) = input.category_id {
            self.ensure_category_exists(category_id).await?;
        }

        let unit = input.unit.unwrap_or_else(|| "pcs".to_string());
        let minimum = input.minimum_stock_level.unwrap_or(Decimal::ZERO);

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (name, code, category_id, product_type, description, unit,
                                  unit_price, minimum_stock_level, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(input.name.trim())
        .bind(&input.code)
        .bind(input.category_id)
        .bind(input.product_type.as_str())
        .bind(&input.description)
        .bind(&unit)
        .bind(input.unit_price)
        .bind(minimum)
        .bind(created_by)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_unique_violation(e, "code"))?;

        row.into_product()
    }

    /// Get a single product
    pub async fn get_product(&self, product_id: Uuid) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        row.into_product()
    }

    /// Update product attributes; stock is excluded by construction
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        let current = self.get_product(product_id).await?;

        let name = input.name.unwrap_or(current.name);
        let category_id = input.category_id.or(current.category_id);
        let product_type = input.product_type.unwrap_or(current.product_type);
        let description = input.description.or(current.description);
        let unit = input.unit.unwrap_or(current.unit);
        let unit_price = input.unit_price.unwrap_or(current.unit_price);
        let minimum = input
            .minimum_stock_level
            .unwrap_or(current.minimum_stock_level);

        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Product name is required".to_string(),
            });
        }
        if unit_price < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "unit_price".to_string(),
                message: "Unit price cannot be negative".to_string(),
            });
        }

        if let Some(category_id) = category_id {
            self.ensure_category_exists(category_id).await?;
        }

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET name = $1, category_id = $2, product_type = $3, description = $4,
                unit = $5, unit_price = $6, minimum_stock_level = $7, updated_at = NOW()
            WHERE id = $8
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(name.trim())
        .bind(category_id)
        .bind(product_type.as_str())
        .bind(&description)
        .bind(&unit)
        .bind(unit_price)
        .bind(minimum)
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        row.into_product()
    }

    /// Delete a product along with its ledger history
    pub async fn delete_product(&self, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }

    /// List products with optional type, category, and search filters
    pub async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> AppResult<PaginatedResponse<Product>> {
        let pagination = Pagination {
            page: filter.page.unwrap_or(1),
            per_page: DEFAULT_PAGE_SIZE,
        };

        let search = filter
            .search
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!("%{}%", s.trim()));
        let product_type = filter.product_type.map(|t| t.as_str());
        let below_minimum = filter.below_minimum.unwrap_or(false);

        let total_items = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM products
            WHERE ($1::text IS NULL OR product_type = $1)
              AND ($2::uuid IS NULL OR category_id = $2)
              AND ($3::text IS NULL OR name ILIKE $3 OR code ILIKE $3)
              AND (NOT $4 OR current_stock <= minimum_stock_level)
            "#,
        )
        .bind(product_type)
        .bind(filter.category_id)
        .bind(&search)
        .bind(below_minimum)
        .fetch_one(&self.db)
        .await? as u64;

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {} FROM products
            WHERE ($1::text IS NULL OR product_type = $1)
              AND ($2::uuid IS NULL OR category_id = $2)
              AND ($3::text IS NULL OR name ILIKE $3 OR code ILIKE $3)
              AND (NOT $4 OR current_stock <= minimum_stock_level)
            ORDER BY name
            LIMIT $5 OFFSET $6
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(product_type)
        .bind(filter.category_id)
        .bind(&search)
        .bind(below_minimum)
        .bind(pagination.per_page as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.db)
        .await?;

        let items = rows
            .into_iter()
            .map(ProductRow::into_product)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PaginatedResponse {
            data: items,
            pagination: PaginationMeta::new(&pagination, total_items),
        })
    }

    async fn ensure_category_exists(&self, category_id: Uuid) -> AppResult<()> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM product_categories WHERE id = $1)",
        )
        .bind(category_id)
        .fetch_one(&self.db)
        .await?;

        if !exists {
            return Err(AppError::NotFound("Category".to_string()));
        }

        Ok(())
    }
}
