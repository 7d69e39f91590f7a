//! User repository backed by SeaORM.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use super::entities::user::{ActiveModel, Entity as UserEntity};
use crate::infra::db;
use common::{AppError, AppResult};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Insert a new user with a fresh ID
    async fn create(&self, first_name: String, last_name: String, email: String)
        -> AppResult<User>;

    /// Apply the given field changes; `None` leaves a field untouched
    async fn update(
        &self,
        id: Uuid,
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
    ) -> AppResult<User>;

    /// Permanently delete user by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    fn conn(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(
        &self,
        first_name: String,
        last_name: String,
        email: String,
    ) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(first_name),
            last_name: Set(last_name),
            email: Set(email),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.conn()).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
    ) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(self.conn())
            .await?
            .ok_or_else(|| AppError::not_found("User not found").with_meta("user_id", id))?;

        let mut active: ActiveModel = user.into();

        if let Some(first_name) = first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = email {
            active.email = Set(email);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(self.conn()).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(self.conn())
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("User not found").with_meta("user_id", id));
        }

        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        db::ping(self.conn()).await.map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::entities::user::Model;
    use chrono::{DateTime, Utc};
    use common::ErrorKind;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn model(id: Uuid) -> Model {
        let at: DateTime<Utc> = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        Model {
            id,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_maps_model() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(id)], vec![]])
            .into_connection();
        let store = UserStore::new(db);

        let found = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.full_name(), "Ada Lovelace");

        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_returns_inserted_user() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(id)]])
            .into_connection();
        let store = UserStore::new(db);

        let user = store
            .create(
                "Ada".to_string(),
                "Lovelace".to_string(),
                "ada@example.com".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();
        let store = UserStore::new(db);

        let err = store
            .update(Uuid::new_v4(), Some("Grace".to_string()), None, None)
            .await
            .unwrap_err();
        assert_eq!(err, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_applies_changes() {
        let id = Uuid::new_v4();
        let updated = Model {
            first_name: "Augusta".to_string(),
            ..model(id)
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(id)], vec![updated]])
            .into_connection();
        let store = UserStore::new(db);

        let user = store
            .update(id, Some("Augusta".to_string()), None, None)
            .await
            .unwrap();
        assert_eq!(user.first_name, "Augusta");
        assert_eq!(user.last_name, "Lovelace");
    }

    #[tokio::test]
    async fn test_delete_reports_missing_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let store = UserStore::new(db);

        assert!(store.delete(Uuid::new_v4()).await.is_ok());
        assert_eq!(
            store.delete(Uuid::new_v4()).await.unwrap_err(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_database_failure_is_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let store = UserStore::new(db);

        let err = store.find_by_id(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err, ErrorKind::Internal);
        assert!(err.cause().is_some());
    }
}
