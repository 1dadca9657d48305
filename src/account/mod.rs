/// Account management
///
/// Handles registration, credential verification, and account lookups.

mod manager;
mod password;

pub use manager::AccountManager;

use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub id: i64,
    pub is_verified: bool,
}

/// Sign-in request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Sign-in response: the signed token plus account status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    pub token: String,
    pub user_id: i64,
    pub is_verified: bool,
}

/// Account fields exposed to callers (never the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountView {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_verified: bool,
}

/// Account detail: the account joined with its profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDetailResponse {
    pub user: AccountView,
    pub profile: crate::profile::ProfileView,
}
