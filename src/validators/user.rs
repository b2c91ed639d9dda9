//! Validation entry points for user payloads.
//!
//! Both functions are pure: an empty result means the payload is valid.

use validator::Validate;

use crate::errors::FieldError;
use crate::models::{CreateUserRequest, UpdateUserRequest};
use crate::validators::collect_field_errors;

pub fn validate_create_user(req: &CreateUserRequest) -> Vec<FieldError> {
    req.validate().err().map(collect_field_errors).unwrap_or_default()
}

pub fn validate_update_user(req: &UpdateUserRequest) -> Vec<FieldError> {
    req.validate().err().map(collect_field_errors).unwrap_or_default()
}
