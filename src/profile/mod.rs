/// Profile management
///
/// Profiles are owned by accounts and carry the user-facing identity
/// fields; creating one also marks the owning account verified.

mod manager;

pub use manager::ProfileManager;

use serde::{Deserialize, Serialize};

/// Profile creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    #[serde(default)]
    pub full_name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
}

/// Partial update request: only supplied fields are written.
///
/// An explicit `Option` per field distinguishes "not supplied" from a
/// real value, so `age: 0` is a valid update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
}

/// Profile fields exposed to callers; zero-valued when no profile exists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub full_name: String,
    pub age: i64,
    pub gender: String,
}
