//! User service - user-related use cases over the repository.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult, OptionExt};

use crate::dto::{validation_error, CreateUserDto, UpdateUserDto, UserResponseDto};
use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_user_by_id(&self, id: Uuid) -> AppResult<UserResponseDto>;

    async fn create_user(&self, dto: CreateUserDto) -> AppResult<UserResponseDto>;

    /// Partial update; an empty update is rejected
    async fn update_user(&self, id: Uuid, dto: UpdateUserDto) -> AppResult<UserResponseDto>;

    /// Hard delete
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    /// Check the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user_by_id(&self, id: Uuid) -> AppResult<UserResponseDto> {
        tracing::info!(user_id = %id, "GetUserById");

        self.repo
            .find_by_id(id)
            .await?
            .ok_or_not_found()
            .map(UserResponseDto::from)
    }

    async fn create_user(&self, dto: CreateUserDto) -> AppResult<UserResponseDto> {
        tracing::info!(email = %dto.email, "CreateUser");
        dto.validate().map_err(validation_error)?;

        let user = self
            .repo
            .create(
                dto.first_name.trim().to_string(),
                dto.last_name.trim().to_string(),
                dto.email.trim().to_string(),
            )
            .await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(UserResponseDto::from(user))
    }

    async fn update_user(&self, id: Uuid, dto: UpdateUserDto) -> AppResult<UserResponseDto> {
        tracing::info!(user_id = %id, "UpdateUser");

        if dto.is_empty() {
            return Err(AppError::bad_request("No fields to update"));
        }
        dto.validate().map_err(validation_error)?;

        let trimmed = |value: Option<String>| value.map(|v| v.trim().to_string());
        let user = self
            .repo
            .update(
                id,
                trimmed(dto.first_name),
                trimmed(dto.last_name),
                trimmed(dto.email),
            )
            .await?;

        Ok(UserResponseDto::from(user))
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        tracing::info!(user_id = %id, "DeleteUser");
        self.repo.delete(id).await
    }

    async fn ping(&self) -> AppResult<()> {
        self.repo.ping().await
    }
}
