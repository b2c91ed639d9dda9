//! Error message constants used throughout the application.

// User errors
pub const ERR_INVALID_USER_ID: &str = "Invalid user ID";
pub const ERR_ID_MISMATCH: &str = "ID in URL does not match ID in request body";
pub const ERR_EMAIL_PARAM_REQUIRED: &str = "Email parameter is required";

// Request shape errors
pub const ERR_VALIDATION_FAILED: &str = "Validation failed";
pub const ERR_MALFORMED_BODY: &str = "Request body is malformed";
pub const ERR_MALFORMED_QUERY: &str = "Query string is malformed";

// Persistence errors (details are logged, never returned)
pub const ERR_CREATE_USER: &str = "Error creating user";
pub const ERR_UPDATE_USER: &str = "Error updating user";
pub const ERR_DELETE_USER: &str = "Error deleting user";
pub const ERR_DATABASE: &str = "A database error occurred";

/// Message for a user id that has no active row.
pub fn err_user_not_found(id: i64) -> String {
    format!("User with ID {} not found", id)
}
