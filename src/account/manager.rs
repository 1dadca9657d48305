/// Account service implementation using runtime queries
use crate::{
    account::password::{hash_password, verify_password},
    account::AccountView,
    auth,
    config::ServerConfig,
    db::{self, account::Account},
    error::{ApiError, ApiResult},
    profile::ProfileView,
};
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// Generic credential-failure message. Unknown usernames and wrong
/// passwords produce the identical response so the caller cannot tell
/// which check failed.
const INVALID_CREDENTIALS: &str = "invalid username or password";

/// Account manager service
pub struct AccountManager {
    db: SqlitePool,
    config: Arc<ServerConfig>,
}

impl AccountManager {
    /// Create a new account manager
    pub fn new(db: SqlitePool, config: Arc<ServerConfig>) -> Self {
        Self { db, config }
    }

    /// Create a new account; returns the generated id.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> ApiResult<i64> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "username, email, and password are required".to_string(),
            ));
        }

        let password_hash = hash_password(password)?;

        // Uniqueness is enforced by the insert itself; a pre-check would
        // race with concurrent registrations.
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO account (username, email, password_hash, is_verified, is_deleted, created_at)
             VALUES (?1, ?2, ?3, FALSE, FALSE, ?4)
             RETURNING id",
        )
        .bind(username)
        .bind(email)
        .bind(&password_hash)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if db::is_unique_violation(&e) {
                ApiError::Conflict("username or email already exists".to_string())
            } else {
                tracing::error!("account insert failed: {}", e);
                ApiError::Database(e)
            }
        })?;

        Ok(id)
    }

    /// All accounts, soft-deleted included; deletion is logical only.
    pub async fn list_accounts(&self) -> ApiResult<Vec<AccountView>> {
        let rows = sqlx::query_as::<_, Account>("SELECT * FROM account")
            .fetch_all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|account| AccountView {
                id: account.id,
                username: account.username,
                email: account.email,
                is_verified: account.is_verified,
            })
            .collect())
    }

    /// Account joined with its profile.
    ///
    /// A brand-new account has no profile row yet, so the join is a LEFT
    /// join and missing profile fields come back zero-valued rather than
    /// as an error.
    pub async fn get_account_with_profile(
        &self,
        id: i64,
    ) -> ApiResult<(AccountView, ProfileView)> {
        let row = sqlx::query(
            "SELECT u.id, u.username, u.email, u.is_verified, p.full_name, p.age, p.gender
             FROM account u
             LEFT JOIN profile p ON u.id = p.user_id
             WHERE u.id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("account not found".to_string()))?;

        let user = AccountView {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            is_verified: row.get("is_verified"),
        };

        let profile = ProfileView {
            full_name: row.get::<Option<String>, _>("full_name").unwrap_or_default(),
            age: row.get::<Option<i64>, _>("age").unwrap_or_default(),
            gender: row.get::<Option<String>, _>("gender").unwrap_or_default(),
        };

        Ok((user, profile))
    }

    /// Verify credentials and issue a signed token.
    ///
    /// Soft-deleted accounts are excluded by the lookup, so signing in to
    /// one fails exactly as if the account did not exist.
    pub async fn sign_in(
        &self,
        username: &str,
        password: &str,
    ) -> ApiResult<(String, i64, bool)> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT * FROM account WHERE username = ?1 AND is_deleted = FALSE",
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::Authentication(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(password, &account.password_hash)? {
            return Err(ApiError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        let token = auth::issue_token(account.id, &self.config.authentication.jwt_secret)?;

        Ok((token, account.id, account.is_verified))
    }
}
