/// API routes and handlers
pub mod account;
pub mod middleware;
pub mod profile;

use crate::context::AppContext;
use axum::Router;
use serde::{Deserialize, Serialize};

/// Flat message body returned by mutation endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Build API routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .merge(account::routes())
        .merge(profile::routes())
}
