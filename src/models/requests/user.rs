//! User-related request models.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validators::validate_not_blank;

/// Request payload for creating a user. The id is assigned by the store.
///
/// Missing fields deserialize as empty strings so they are reported by
/// validation rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateUserRequest {
    #[validate(
        custom(function = "validate_not_blank", message = "First name is required"),
        length(max = 50, message = "First name must be at most 50 characters")
    )]
    pub first_name: String,
    #[validate(
        custom(function = "validate_not_blank", message = "Last name is required"),
        length(max = 50, message = "Last name must be at most 50 characters")
    )]
    pub last_name: String,
    #[validate(
        custom(function = "validate_not_blank", message = "Email is required"),
        email(message = "Invalid email format"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,
    #[validate(
        custom(function = "validate_not_blank", message = "Phone is required"),
        length(max = 20, message = "Phone must be at most 20 characters")
    )]
    pub phone: String,
}

/// Request payload for replacing the mutable fields of an existing user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", default)]
pub struct UpdateUserRequest {
    #[validate(range(min = 1, message = "Id must be greater than 0"))]
    pub id: i64,
    #[validate(
        custom(function = "validate_not_blank", message = "First name is required"),
        length(max = 50, message = "First name must be at most 50 characters")
    )]
    pub first_name: String,
    #[validate(
        custom(function = "validate_not_blank", message = "Last name is required"),
        length(max = 50, message = "Last name must be at most 50 characters")
    )]
    pub last_name: String,
    #[validate(
        custom(function = "validate_not_blank", message = "Email is required"),
        email(message = "Invalid email format"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,
    #[validate(
        custom(function = "validate_not_blank", message = "Phone is required"),
        length(max = 20, message = "Phone must be at most 20 characters")
    )]
    pub phone: String,
}

/// Query string of `GET /api/users/search`.
#[derive(Debug, Deserialize)]
pub struct EmailSearchQuery {
    pub email: Option<String>,
}
