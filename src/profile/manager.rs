/// Profile service: creation, dynamic partial update, and soft deletion
use crate::{
    db,
    error::{ApiError, ApiResult},
    profile::{CreateProfileRequest, UpdateProfileRequest},
};
use sqlx::SqlitePool;

/// Profile manager service
pub struct ProfileManager {
    db: SqlitePool,
}

impl ProfileManager {
    /// Create a new profile manager
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Create a profile and mark the owning account verified.
    ///
    /// Both statements run inside one transaction: either the profile row
    /// exists and the account is verified, or neither change is visible.
    pub async fn create_profile(
        &self,
        user_id: i64,
        req: &CreateProfileRequest,
    ) -> ApiResult<()> {
        if req.full_name.is_empty() {
            return Err(ApiError::Validation("full name is required".to_string()));
        }

        let mut tx = self.db.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO profile (user_id, full_name, age, gender, is_deleted)
             VALUES (?1, ?2, ?3, ?4, FALSE)",
        )
        .bind(user_id)
        .bind(&req.full_name)
        .bind(req.age)
        .bind(&req.gender)
        .execute(&mut *tx)
        .await;

        if let Err(e) = inserted {
            rollback(tx).await;
            if db::is_foreign_key_violation(&e) {
                return Err(ApiError::Validation("account does not exist".to_string()));
            }
            tracing::error!("profile insert failed: {}", e);
            return Err(ApiError::Database(e));
        }

        if let Err(e) = sqlx::query("UPDATE account SET is_verified = TRUE WHERE id = ?1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
        {
            rollback(tx).await;
            tracing::error!("verified-flag update failed: {}", e);
            return Err(ApiError::Database(e));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Apply a partial update containing only the supplied fields.
    ///
    /// Single statement, single row: no transaction needed. The update
    /// with zero populated fields is rejected before any SQL is built,
    /// since a SET clause with no assignments is not a valid statement.
    pub async fn update_profile(
        &self,
        user_id: i64,
        req: &UpdateProfileRequest,
    ) -> ApiResult<()> {
        if req.full_name.is_none() && req.age.is_none() && req.gender.is_none() {
            return Err(ApiError::Validation(
                "at least one profile field is required".to_string(),
            ));
        }
        if matches!(req.full_name.as_deref(), Some("")) {
            return Err(ApiError::Validation("full name is required".to_string()));
        }

        let mut builder: sqlx::QueryBuilder<sqlx::Sqlite> =
            sqlx::QueryBuilder::new("UPDATE profile SET ");
        {
            let mut fields = builder.separated(", ");
            if let Some(full_name) = &req.full_name {
                fields.push("full_name = ").push_bind_unseparated(full_name);
            }
            if let Some(age) = req.age {
                fields.push("age = ").push_bind_unseparated(age);
            }
            if let Some(gender) = &req.gender {
                fields.push("gender = ").push_bind_unseparated(gender);
            }
        }
        builder.push(" WHERE user_id = ").push_bind(user_id);

        builder.build().execute(&self.db).await?;

        Ok(())
    }

    /// Soft-delete the account and its profile together.
    ///
    /// Flips the deleted flag on both rows inside one transaction; no row
    /// is ever physically removed.
    pub async fn delete_account(&self, user_id: i64) -> ApiResult<()> {
        let mut tx = self.db.begin().await?;

        if let Err(e) = sqlx::query("UPDATE account SET is_deleted = TRUE WHERE id = ?1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
        {
            rollback(tx).await;
            tracing::error!("account soft-delete failed: {}", e);
            return Err(ApiError::Database(e));
        }

        if let Err(e) = sqlx::query("UPDATE profile SET is_deleted = TRUE WHERE user_id = ?1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
        {
            rollback(tx).await;
            tracing::error!("profile soft-delete failed: {}", e);
            return Err(ApiError::Database(e));
        }

        tx.commit().await?;

        Ok(())
    }
}

/// Roll back explicitly so a failed transaction never lingers until drop.
async fn rollback(tx: sqlx::Transaction<'_, sqlx::Sqlite>) {
    if let Err(e) = tx.rollback().await {
        tracing::warn!("rollback failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::account::Profile;

    async fn test_pool(dir: &tempfile::TempDir) -> SqlitePool {
        let pool = db::create_pool(
            &dir.path().join("test.sqlite"),
            db::DatabaseOptions::default(),
        )
        .await
        .unwrap();
        db::run_migrations(&pool).await.unwrap();
        pool
    }

    async fn seed_account(pool: &SqlitePool, username: &str, email: &str) -> i64 {
        sqlx::query_scalar(
            "INSERT INTO account (username, email, password_hash, is_verified, is_deleted, created_at)
             VALUES (?1, ?2, 'x', FALSE, FALSE, ?3)
             RETURNING id",
        )
        .bind(username)
        .bind(email)
        .bind(chrono::Utc::now())
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn full_profile() -> CreateProfileRequest {
        CreateProfileRequest {
            full_name: "Alice Smith".to_string(),
            age: Some(30),
            gender: Some("female".to_string()),
        }
    }

    async fn fetch_profile(pool: &SqlitePool, user_id: i64) -> Profile {
        sqlx::query_as::<_, Profile>("SELECT * FROM profile WHERE user_id = ?1")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_profile_marks_account_verified() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let manager = ProfileManager::new(pool.clone());

        let id = seed_account(&pool, "alice", "alice@example.com").await;
        manager.create_profile(id, &full_profile()).await.unwrap();

        let is_verified: bool =
            sqlx::query_scalar("SELECT is_verified FROM account WHERE id = ?1")
                .bind(id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert!(is_verified);

        let profile = fetch_profile(&pool, id).await;
        assert_eq!(profile.full_name, "Alice Smith");
        assert_eq!(profile.age, Some(30));
        assert_eq!(profile.gender.as_deref(), Some("female"));
        assert!(!profile.is_deleted);
    }

    #[tokio::test]
    async fn create_profile_requires_full_name() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let manager = ProfileManager::new(pool.clone());

        let id = seed_account(&pool, "alice", "alice@example.com").await;
        let err = manager
            .create_profile(
                id,
                &CreateProfileRequest {
                    full_name: String::new(),
                    age: None,
                    gender: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profile")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn create_profile_for_missing_account_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let manager = ProfileManager::new(pool.clone());

        let err = manager.create_profile(4242, &full_profile()).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        // Nothing persisted: the failed insert left no partial effect.
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profile")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn zero_field_update_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let manager = ProfileManager::new(pool.clone());

        let id = seed_account(&pool, "alice", "alice@example.com").await;
        manager.create_profile(id, &full_profile()).await.unwrap();

        let err = manager
            .update_profile(
                id,
                &UpdateProfileRequest {
                    full_name: None,
                    age: None,
                    gender: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn age_only_update_touches_only_age() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let manager = ProfileManager::new(pool.clone());

        let id = seed_account(&pool, "alice", "alice@example.com").await;
        manager.create_profile(id, &full_profile()).await.unwrap();

        manager
            .update_profile(
                id,
                &UpdateProfileRequest {
                    full_name: None,
                    age: Some(31),
                    gender: None,
                },
            )
            .await
            .unwrap();

        let profile = fetch_profile(&pool, id).await;
        assert_eq!(profile.age, Some(31));
        assert_eq!(profile.full_name, "Alice Smith");
        assert_eq!(profile.gender.as_deref(), Some("female"));
    }

    #[tokio::test]
    async fn zero_age_is_a_real_update() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let manager = ProfileManager::new(pool.clone());

        let id = seed_account(&pool, "alice", "alice@example.com").await;
        manager.create_profile(id, &full_profile()).await.unwrap();

        manager
            .update_profile(
                id,
                &UpdateProfileRequest {
                    full_name: None,
                    age: Some(0),
                    gender: None,
                },
            )
            .await
            .unwrap();

        let profile = fetch_profile(&pool, id).await;
        assert_eq!(profile.age, Some(0));
    }

    #[tokio::test]
    async fn update_rejects_empty_full_name() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let manager = ProfileManager::new(pool.clone());

        let id = seed_account(&pool, "alice", "alice@example.com").await;
        manager.create_profile(id, &full_profile()).await.unwrap();

        let err = manager
            .update_profile(
                id,
                &UpdateProfileRequest {
                    full_name: Some(String::new()),
                    age: None,
                    gender: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_flips_both_flags_without_removing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let manager = ProfileManager::new(pool.clone());

        let id = seed_account(&pool, "alice", "alice@example.com").await;
        manager.create_profile(id, &full_profile()).await.unwrap();

        manager.delete_account(id).await.unwrap();

        let account_deleted: bool =
            sqlx::query_scalar("SELECT is_deleted FROM account WHERE id = ?1")
                .bind(id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert!(account_deleted);

        let profile = fetch_profile(&pool, id).await;
        assert!(profile.is_deleted);

        let accounts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM account")
            .fetch_one(&pool)
            .await
            .unwrap();
        let profiles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profile")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!((accounts, profiles), (1, 1));
    }
}
