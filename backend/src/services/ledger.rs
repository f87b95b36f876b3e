//! Inventory ledger service
//!
//! Transactions are append-only. Recording one atomically adjusts the
//! product's aggregate stock inside the same database transaction, so the
//! ledger and the counter cannot drift under concurrent writers.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{map_unique_violation, AppError, AppResult};
use shared::models::{
    stock_effect, AdjustmentDirection, InventoryTransaction, TransactionType,
};
use shared::types::{PaginatedResponse, Pagination, PaginationMeta, DEFAULT_PAGE_SIZE};
use shared::validation;

/// Inventory ledger service
#[derive(Clone)]
pub struct LedgerService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    product_id: Uuid,
    transaction_type: String,
    quantity: Decimal,
    adjustment_direction: Option<String>,
    reference_number: String,
    notes: Option<String>,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
}

const TRANSACTION_COLUMNS: &str = "id, product_id, transaction_type, quantity, \
                                   adjustment_direction, reference_number, notes, \
                                   created_by, created_at";

impl TransactionRow {
    fn into_transaction(self) -> AppResult<InventoryTransaction> {
        let transaction_type = TransactionType::parse(&self.transaction_type).ok_or_else(|| {
            AppError::Internal(format!(
                "Unknown transaction type in database: {}",
                self.transaction_type
            ))
        })?;
        let adjustment_direction = match self.adjustment_direction.as_deref() {
            None => None,
            Some(s) => Some(AdjustmentDirection::parse(s).ok_or_else(|| {
                AppError::Internal(format!("Unknown adjustment direction in database: {}", s))
            })?),
        };
        Ok(InventoryTransaction {
            id: self.id,
            product_id: self.product_id,
            transaction_type,
            quantity: self.quantity,
            adjustment_direction,
            reference_number: self.reference_number,
            notes: self.notes,
            created_by: self.created_by,
            created_at: self.created_at,
        })
    }
}

/// Input for recording a ledger transaction
///
/// `transaction_type` and `direction` arrive as wire strings so an
/// out-of-set value gets the same field-addressable 400 as any other
/// invalid input.
#[derive(Debug, Deserialize)]
pub struct RecordTransactionInput {
    pub product_id: Uuid,
    pub transaction_type: String,
    pub quantity: Decimal,
    pub direction: Option<String>,
    pub reference_number: String,
    pub notes: Option<String>,
}

/// Filters for the ledger listing
#[derive(Debug, Default, Deserialize)]
pub struct TransactionFilter {
    pub product_id: Option<Uuid>,
    pub transaction_type: Option<TransactionType>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub page: Option<u32>,
}

/// Ledger view for a single product
#[derive(Debug, Serialize)]
pub struct ProductLedger {
    pub product_id: Uuid,
    pub product_name: String,
    pub product_code: String,
    pub current_stock: Decimal,
    pub transactions: Vec<InventoryTransaction>,
}

impl LedgerService {
    /// Create a new LedgerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a ledger transaction and apply its stock effect
    pub async fn record_transaction(
        &self,
        user_id: Uuid,
        input: RecordTransactionInput,
    ) -> AppResult<InventoryTransaction> {
        let (transaction_type, direction) = Self::validate_input(&input)?;

        let delta = stock_effect(transaction_type, input.quantity, direction);

        let mut tx = self.db.begin().await?;

        // The stock update takes the product's row lock, serializing
        // concurrent transactions against the same product.
        let updated = sqlx::query_scalar::<_, Decimal>(
            r#"
            UPDATE products
            SET current_stock = current_stock + $1, updated_at = NOW()
            WHERE id = $2
            RETURNING current_stock
            "#,
        )
        .bind(delta)
        .bind(input.product_id)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            INSERT INTO inventory_transactions
                (product_id, transaction_type, quantity, adjustment_direction,
                 reference_number, notes, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(input.product_id)
        .bind(transaction_type.as_str())
        .bind(input.quantity)
        .bind(direction.map(|d| d.as_str()))
        .bind(input.reference_number.trim())
        .bind(&input.notes)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, "reference_number"))?;

        tx.commit().await?;

        row.into_transaction()
    }

    /// Validate a recording input, resolving its wire enums
    fn validate_input(
        input: &RecordTransactionInput,
    ) -> AppResult<(TransactionType, Option<AdjustmentDirection>)> {
        if let Err(message) = validation::validate_positive_quantity(input.quantity) {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: message.to_string(),
            });
        }
        if let Err(message) = validation::validate_reference_number(&input.reference_number) {
            return Err(AppError::Validation {
                field: "reference_number".to_string(),
                message: message.to_string(),
            });
        }

        let transaction_type =
            TransactionType::parse(&input.transaction_type).ok_or_else(|| AppError::Validation {
                field: "transaction_type".to_string(),
                message: format!("Unknown transaction type: {}", input.transaction_type),
            })?;

        let direction = match input.direction.as_deref() {
            None => None,
            Some(s) => Some(AdjustmentDirection::parse(s).ok_or_else(|| AppError::Validation {
                field: "direction".to_string(),
                message: format!("Unknown adjustment direction: {}", s),
            })?),
        };

        if transaction_type.requires_direction() && direction.is_none() {
            return Err(AppError::Validation {
                field: "direction".to_string(),
                message: "Adjustments must specify a direction".to_string(),
            });
        }
        if !transaction_type.requires_direction() && direction.is_some() {
            return Err(AppError::Validation {
                field: "direction".to_string(),
                message: "Only adjustments take a direction".to_string(),
            });
        }

        Ok((transaction_type, direction))
    }

    /// Get a single transaction
    pub async fn get_transaction(&self, transaction_id: Uuid) -> AppResult<InventoryTransaction> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {} FROM inventory_transactions WHERE id = $1",
            TRANSACTION_COLUMNS
        ))
        .bind(transaction_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction".to_string()))?;

        row.into_transaction()
    }

    /// List transactions, newest first, with optional filters
    pub async fn list_transactions(
        &self,
        filter: TransactionFilter,
    ) -> AppResult<PaginatedResponse<InventoryTransaction>> {
        let pagination = Pagination {
            page: filter.page.unwrap_or(1),
            per_page: DEFAULT_PAGE_SIZE,
        };
        let transaction_type = filter.transaction_type.map(|t| t.as_str());

        let total_items = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM inventory_transactions
            WHERE ($1::uuid IS NULL OR product_id = $1)
              AND ($2::text IS NULL OR transaction_type = $2)
              AND ($3::date IS NULL OR created_at::date >= $3)
              AND ($4::date IS NULL OR created_at::date <= $4)
            "#,
        )
        .bind(filter.product_id)
        .bind(transaction_type)
        .bind(filter.from)
        .bind(filter.to)
        .fetch_one(&self.db)
        .await? as u64;

        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            SELECT {} FROM inventory_transactions
            WHERE ($1::uuid IS NULL OR product_id = $1)
              AND ($2::text IS NULL OR transaction_type = $2)
              AND ($3::date IS NULL OR created_at::date >= $3)
              AND ($4::date IS NULL OR created_at::date <= $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(filter.product_id)
        .bind(transaction_type)
        .bind(filter.from)
        .bind(filter.to)
        .bind(pagination.per_page as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.db)
        .await?;

        let items = rows
            .into_iter()
            .map(TransactionRow::into_transaction)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PaginatedResponse {
            data: items,
            pagination: PaginationMeta::new(&pagination, total_items),
        })
    }

    /// Full ledger view for a product: aggregate stock plus its history
    pub async fn product_ledger(&self, product_id: Uuid) -> AppResult<ProductLedger> {
        let product = sqlx::query_as::<_, (String, String, Decimal)>(
            "SELECT name, code, current_stock FROM products WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            SELECT {} FROM inventory_transactions
            WHERE product_id = $1
            ORDER BY created_at DESC
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        let transactions = rows
            .into_iter()
            .map(TransactionRow::into_transaction)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(ProductLedger {
            product_id,
            product_name: product.0,
            product_code: product.1,
            current_stock: product.2,
            transactions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn input(transaction_type: &str, direction: Option<&str>) -> RecordTransactionInput {
        RecordTransactionInput {
            product_id: Uuid::new_v4(),
            transaction_type: transaction_type.to_string(),
            quantity: Decimal::from_str("5").unwrap(),
            direction: direction.map(|d| d.to_string()),
            reference_number: "PO-2026-00042".to_string(),
            notes: None,
        }
    }

    fn rejected_field(input: &RecordTransactionInput) -> String {
        match LedgerService::validate_input(input).unwrap_err() {
            AppError::Validation { field, .. } => field,
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validate_input_resolves_wire_enums() {
        let (t, d) = LedgerService::validate_input(&input("PURCHASE", None)).unwrap();
        assert_eq!(t, TransactionType::Purchase);
        assert_eq!(d, None);

        let (t, d) =
            LedgerService::validate_input(&input("ADJUSTMENT", Some("decrease"))).unwrap();
        assert_eq!(t, TransactionType::Adjustment);
        assert_eq!(d, Some(AdjustmentDirection::Decrease));
    }

    #[test]
    fn test_validate_input_rejects_unknown_type_as_field_error() {
        assert_eq!(rejected_field(&input("RETURN", None)), "transaction_type");
        assert_eq!(rejected_field(&input("purchase", None)), "transaction_type");
    }

    #[test]
    fn test_validate_input_rejects_unknown_direction() {
        assert_eq!(
            rejected_field(&input("ADJUSTMENT", Some("sideways"))),
            "direction"
        );
    }

    #[test]
    fn test_validate_input_direction_rules() {
        assert_eq!(rejected_field(&input("ADJUSTMENT", None)), "direction");
        assert_eq!(rejected_field(&input("SALE", Some("increase"))), "direction");
    }

    #[test]
    fn test_validate_input_rejects_nonpositive_quantity() {
        let mut i = input("PURCHASE", None);
        i.quantity = Decimal::ZERO;
        assert_eq!(rejected_field(&i), "quantity");
    }
}
