//! Authentication service for account registration, login, and token management

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{map_unique_violation_for, AppError, AppResult};
use crate::external::MailClient;
use shared::models::Role;
use shared::validation;

/// How long a password-reset token stays valid
const RESET_TOKEN_EXPIRY_HOURS: i64 = 24;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

/// Input for registering a new account
#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub department: Option<String>,
}

/// Response after successful registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication tokens
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Account row used during authentication
#[derive(Debug, sqlx::FromRow)]
struct AuthRow {
    id: Uuid,
    password_hash: String,
    role: String,
    is_active: bool,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
            refresh_token_expiry: config.jwt.refresh_token_expiry,
        }
    }

    /// Register a new account with the default Viewer role
    pub async fn register(
        &self,
        input: RegisterInput,
        mail: &MailClient,
    ) -> AppResult<RegisterResponse> {
        Self::validate_registration(&input)?;

        // Hash password
        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        // New accounts always start as viewers; an administrator promotes them
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (username, email, password_hash, first_name, last_name, role, phone, department)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(&password_hash)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(Role::Viewer.as_str())
        .bind(&input.phone)
        .bind(&input.department)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            map_unique_violation_for(e, &[("username", "username"), ("email", "email")])
        })?;

        // Welcome mail; delivery failure surfaces to the caller
        mail.send_welcome(&input.email, &input.first_name).await?;

        let tokens = self.generate_tokens(user_id, Role::Viewer)?;
        self.store_refresh_token(user_id, &tokens.refresh_token)
            .await?;

        Ok(RegisterResponse {
            user_id,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
        })
    }

    /// Authenticate with username (or email) and password
    pub async fn login(&self, username: &str, password: &str) -> AppResult<AuthTokens> {
        let user = sqlx::query_as::<_, AuthRow>(
            "SELECT id, password_hash, role, is_active FROM users WHERE username = $1 OR email = $1",
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AppError::Unauthorized("Account is disabled".to_string()));
        }

        let valid = verify(password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let role = Self::parse_role(&user.role)?;

        // Update last login
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(user.id)
            .execute(&self.db)
            .await?;

        let tokens = self.generate_tokens(user.id, role)?;
        self.store_refresh_token(user.id, &tokens.refresh_token)
            .await?;

        Ok(tokens)
    }

    /// Refresh access token using a refresh token; the old token is revoked
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<AuthTokens> {
        let token_hash = Self::hash_token(refresh_token);

        let record = sqlx::query_as::<_, (Uuid, String)>(
            r#"
            SELECT rt.user_id, u.role
            FROM refresh_tokens rt
            JOIN users u ON u.id = rt.user_id
            WHERE rt.token_hash = $1
              AND rt.expires_at > NOW()
              AND rt.revoked_at IS NULL
              AND u.is_active = true
            "#,
        )
        .bind(&token_hash)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidToken)?;

        let (user_id, role_str) = record;
        let role = Self::parse_role(&role_str)?;

        // Revoke old refresh token
        sqlx::query("UPDATE refresh_tokens SET revoked_at = NOW() WHERE token_hash = $1")
            .bind(&token_hash)
            .execute(&self.db)
            .await?;

        let tokens = self.generate_tokens(user_id, role)?;
        self.store_refresh_token(user_id, &tokens.refresh_token)
            .await?;

        Ok(tokens)
    }

    /// Request a password reset for the account registered under `email`
    ///
    /// Stores a hashed single-use token and mails the plain token to the
    /// account's address.
    pub async fn request_password_reset(&self, email: &str, mail: &MailClient) -> AppResult<()> {
        let user = sqlx::query_as::<_, (Uuid, bool)>(
            "SELECT id, is_active FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Account".to_string()))?;

        let (user_id, is_active) = user;
        if !is_active {
            return Err(AppError::Unauthorized("Account is disabled".to_string()));
        }

        let token = Uuid::new_v4().to_string();
        let token_hash = Self::hash_token(&token);
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_EXPIRY_HOURS);

        // A newer request replaces any outstanding token
        sqlx::query(
            r#"
            UPDATE users
            SET reset_token_hash = $1, reset_token_expires_at = $2
            WHERE id = $3
            "#,
        )
        .bind(&token_hash)
        .bind(expires_at)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        mail.send_password_reset(email, &token).await?;

        Ok(())
    }

    /// Confirm a password reset with the mailed token and a new password
    pub async fn confirm_password_reset(&self, token: &str, new_password: &str) -> AppResult<()> {
        if let Err(message) = validation::validate_password(new_password) {
            return Err(AppError::Validation {
                field: "new_password".to_string(),
                message: message.to_string(),
            });
        }

        let token_hash = Self::hash_token(token);

        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM users
            WHERE reset_token_hash = $1
              AND reset_token_expires_at > NOW()
              AND is_active = true
            "#,
        )
        .bind(&token_hash)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidToken)?;

        let password_hash = hash(new_password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        // Setting the new password consumes the token
        sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $1, reset_token_hash = NULL, reset_token_expires_at = NULL
            WHERE id = $2
            "#,
        )
        .bind(&password_hash)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        // Existing sessions are invalidated along with the old password
        sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = NOW() WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Generate access and refresh tokens
    fn generate_tokens(&self, user_id: Uuid, role: Role) -> AppResult<AuthTokens> {
        let now = Utc::now();
        let access_exp = now + Duration::seconds(self.access_token_expiry);

        let access_claims = Claims {
            sub: user_id.to_string(),
            role: role.as_str().to_string(),
            exp: access_exp.timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &access_claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        // Refresh token (opaque random token)
        let refresh_token = Uuid::new_v4().to_string();

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Store refresh token hash in database
    async fn store_refresh_token(&self, user_id: Uuid, token: &str) -> AppResult<()> {
        let token_hash = Self::hash_token(token);
        let expires_at = Utc::now() + Duration::seconds(self.refresh_token_expiry);

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(&token_hash)
        .bind(expires_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Hash a token for storage
    fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn parse_role(role: &str) -> AppResult<Role> {
        Role::parse(role)
            .ok_or_else(|| AppError::Internal(format!("Unknown role in database: {}", role)))
    }

    fn validate_registration(input: &RegisterInput) -> AppResult<()> {
        let checks = [
            ("username", validation::validate_username(&input.username)),
            ("email", validation::validate_email(&input.email)),
            ("password", validation::validate_password(&input.password)),
        ];

        for (field, result) in checks {
            if let Err(message) = result {
                return Err(AppError::Validation {
                    field: field.to_string(),
                    message: message.to_string(),
                });
            }
        }

        if input.password != input.confirm_password {
            return Err(AppError::Validation {
                field: "confirm_password".to_string(),
                message: "Passwords do not match".to_string(),
            });
        }

        if input.first_name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "first_name".to_string(),
                message: "First name is required".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> RegisterInput {
        RegisterInput {
            username: "jsmith".to_string(),
            email: "jsmith@example.com".to_string(),
            password: "s3cret-password".to_string(),
            confirm_password: "s3cret-password".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            phone: None,
            department: None,
        }
    }

    #[test]
    fn test_registration_accepts_valid_input() {
        assert!(AuthService::validate_registration(&input()).is_ok());
    }

    #[test]
    fn test_registration_rejects_password_mismatch() {
        let mut i = input();
        i.confirm_password = "different-password".to_string();
        let err = AuthService::validate_registration(&i).unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field, "confirm_password"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_registration_rejects_short_password() {
        let mut i = input();
        i.password = "short".to_string();
        i.confirm_password = "short".to_string();
        let err = AuthService::validate_registration(&i).unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field, "password"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_registration_rejects_blank_first_name() {
        let mut i = input();
        i.first_name = "  ".to_string();
        assert!(AuthService::validate_registration(&i).is_err());
    }

    #[test]
    fn test_token_hash_is_stable_and_hex() {
        let a = AuthService::hash_token("token-one");
        let b = AuthService::hash_token("token-one");
        let c = AuthService::hash_token("token-two");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}
