use crate::dispatcher::Request;
use crate::models::{CreateUserRequest, UpdateUserRequest};

/// Insert a new user; resolves to the generated id.
#[derive(Debug, Clone)]
pub struct CreateUserCommand(pub CreateUserRequest);

/// Replace the mutable fields of an active user; resolves to whether a row
/// matched.
#[derive(Debug, Clone)]
pub struct UpdateUserCommand(pub UpdateUserRequest);

/// Soft-delete an active user; resolves to whether a row was affected.
#[derive(Debug, Clone, Copy)]
pub struct DeleteUserCommand {
    pub id: i64,
}

impl Request for CreateUserCommand {
    type Response = i64;
}

impl Request for UpdateUserCommand {
    type Response = bool;
}

impl Request for DeleteUserCommand {
    type Response = bool;
}
