//! Account management service: profiles, role assignment, activation

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{map_unique_violation, AppError, AppResult};
use shared::models::{Role, User};
use shared::types::{PaginatedResponse, PaginationMeta};
use shared::validation;

/// Account management service
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// Full account row; role is stored as text
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    role: String,
    phone: Option<String>,
    department: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
}

const ACCOUNT_COLUMNS: &str = "id, username, email, first_name, last_name, role, phone, \
                               department, is_active, created_at, updated_at, last_login_at";

impl AccountRow {
    fn into_user(self) -> AppResult<User> {
        let role = Role::parse(&self.role)
            .ok_or_else(|| AppError::Internal(format!("Unknown role in database: {}", self.role)))?;
        Ok(User {
            id: self.id,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role,
            phone: self.phone,
            department: self.department,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            last_login_at: self.last_login_at,
        })
    }
}

/// Input for updating the caller's own profile
#[derive(Debug, Deserialize)]
pub struct UpdateProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
}

/// Input for changing an account's role; the role arrives as its wire
/// string so an out-of-set value gets a field-addressable 400
#[derive(Debug, Deserialize)]
pub struct UpdateRoleInput {
    pub role: String,
}

/// Filters for the account listing
#[derive(Debug, Default, Deserialize)]
pub struct AccountFilter {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
    pub page: Option<u32>,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get a single account by id
    pub async fn get_account(&self, user_id: Uuid) -> AppResult<User> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Account".to_string()))?;

        row.into_user()
    }

    /// Update the caller's own profile fields
    pub async fn update_profile(&self, user_id: Uuid, input: UpdateProfileInput) -> AppResult<User> {
        if let Some(email) = &input.email {
            if let Err(message) = validation::validate_email(email) {
                return Err(AppError::Validation {
                    field: "email".to_string(),
                    message: message.to_string(),
                });
            }
        }

        let current = self.get_account(user_id).await?;

        let first_name = input.first_name.unwrap_or(current.first_name);
        let last_name = input.last_name.unwrap_or(current.last_name);
        let email = input.email.unwrap_or(current.email);
        let phone = input.phone.or(current.phone);
        let department = input.department.or(current.department);

        if first_name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "first_name".to_string(),
                message: "First name is required".to_string(),
            });
        }

        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            UPDATE users
            SET first_name = $1, last_name = $2, email = $3, phone = $4, department = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(&first_name)
        .bind(&last_name)
        .bind(&email)
        .bind(&phone)
        .bind(&department)
        .bind(user_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_unique_violation(e, "email"))?;

        row.into_user()
    }

    /// List accounts with optional role, activation, and search filters
    pub async fn list_accounts(&self, filter: AccountFilter) -> AppResult<PaginatedResponse<User>> {
        let pagination = shared::types::Pagination {
            page: filter.page.unwrap_or(1),
            per_page: shared::types::DEFAULT_PAGE_SIZE,
        };

        let search = filter
            .search
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!("%{}%", s.trim()));
        let role = filter.role.map(|r| r.as_str());

        let total_items = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM users
            WHERE ($1::text IS NULL OR role = $1)
              AND ($2::boolean IS NULL OR is_active = $2)
              AND ($3::text IS NULL OR username ILIKE $3 OR email ILIKE $3
                   OR first_name ILIKE $3 OR last_name ILIKE $3)
            "#,
        )
        .bind(role)
        .bind(filter.is_active)
        .bind(&search)
        .fetch_one(&self.db)
        .await? as u64;

        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            SELECT {} FROM users
            WHERE ($1::text IS NULL OR role = $1)
              AND ($2::boolean IS NULL OR is_active = $2)
              AND ($3::text IS NULL OR username ILIKE $3 OR email ILIKE $3
                   OR first_name ILIKE $3 OR last_name ILIKE $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(role)
        .bind(filter.is_active)
        .bind(&search)
        .bind(pagination.per_page as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.db)
        .await?;

        let items = rows
            .into_iter()
            .map(AccountRow::into_user)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PaginatedResponse {
            data: items,
            pagination: PaginationMeta::new(&pagination, total_items),
        })
    }

    /// Change an account's role; the role is validated before any write
    pub async fn update_role(&self, user_id: Uuid, input: UpdateRoleInput) -> AppResult<User> {
        let role = Self::parse_role_input(&input.role)?;

        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            UPDATE users
            SET role = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(role.as_str())
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Account".to_string()))?;

        row.into_user()
    }

    /// Flip an account's active flag; deactivation revokes its sessions
    ///
    /// An administrator cannot deactivate their own account.
    pub async fn toggle_status(&self, actor_id: Uuid, user_id: Uuid) -> AppResult<User> {
        if actor_id == user_id {
            return Err(AppError::ValidationError(
                "You cannot change the status of your own account".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            UPDATE users
            SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Account".to_string()))?;

        let user = row.into_user()?;

        if !user.is_active {
            sqlx::query(
                "UPDATE refresh_tokens SET revoked_at = NOW() WHERE user_id = $1 AND revoked_at IS NULL",
            )
            .bind(user_id)
            .execute(&self.db)
            .await?;
        }

        Ok(user)
    }

    fn parse_role_input(role: &str) -> AppResult<Role> {
        Role::parse(role).ok_or_else(|| AppError::Validation {
            field: "role".to_string(),
            message: format!("Unknown role: {}", role),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_input_accepts_wire_names() {
        for role in Role::ALL {
            assert_eq!(UserService::parse_role_input(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn test_parse_role_input_rejects_out_of_set_as_field_error() {
        for bad in ["SUPERUSER", "admin", ""] {
            match UserService::parse_role_input(bad).unwrap_err() {
                AppError::Validation { field, .. } => assert_eq!(field, "role"),
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }
}
