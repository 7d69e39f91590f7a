//! Request and response shapes for the user resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use common::AppError;
use domain::User;

/// Create user request with validation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, message = "first_name cannot be empty"))]
    #[schema(example = "Ada")]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name cannot be empty"))]
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, message = "first_name cannot be empty"))]
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "last_name cannot be empty"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

impl UpdateUserDto {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}

/// User response (public view of the entity)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Turn validation failures into a `BadRequest`, naming the first bad field.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let first = errors
        .field_errors()
        .into_iter()
        .min_by_key(|(field, _)| *field)
        .and_then(|(field, errs)| errs.first().map(|e| (field, e.clone())));

    match first {
        Some((field, error)) => {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            AppError::bad_request(message).with_meta("field", field)
        }
        None => AppError::bad_request("Validation failed"),
    }
}
