/// Account and profile row models
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account record in the database
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_verified: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

/// Profile record, keyed by the owning account id
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: i64,
    pub full_name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub is_deleted: bool,
}
