/// Application context and dependency injection
use crate::{
    account::AccountManager,
    config::ServerConfig,
    db,
    error::ApiResult,
    profile::ProfileManager,
};
use std::sync::Arc;

/// Application context holding all shared services.
///
/// Built once at startup and cloned into every handler; there is no
/// process-wide store handle.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub account_manager: Arc<AccountManager>,
    pub profile_manager: Arc<ProfileManager>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub async fn new(config: ServerConfig) -> ApiResult<Self> {
        config.validate()?;

        if !config.storage.data_directory.exists() {
            tokio::fs::create_dir_all(&config.storage.data_directory).await?;
        }

        let db = db::create_pool(
            &config.storage.account_db,
            db::DatabaseOptions::default(),
        )
        .await?;

        db::run_migrations(&db).await?;
        db::test_connection(&db).await?;

        let config = Arc::new(config);
        let account_manager = Arc::new(AccountManager::new(db.clone(), Arc::clone(&config)));
        let profile_manager = Arc::new(ProfileManager::new(db));

        Ok(Self {
            config,
            account_manager,
            profile_manager,
        })
    }
}
