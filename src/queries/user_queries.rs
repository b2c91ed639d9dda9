use crate::dispatcher::Request;
use crate::models::User;

/// Every active user, newest first.
#[derive(Debug, Clone, Copy)]
pub struct GetAllUsersQuery;

/// The active user with `id`, if any.
#[derive(Debug, Clone, Copy)]
pub struct GetUserByIdQuery {
    pub id: i64,
}

/// Active users whose email contains `email`, ignoring case.
#[derive(Debug, Clone)]
pub struct SearchUsersByEmailQuery {
    pub email: String,
}

impl Request for GetAllUsersQuery {
    type Response = Vec<User>;
}

impl Request for GetUserByIdQuery {
    type Response = Option<User>;
}

impl Request for SearchUsersByEmailQuery {
    type Response = Vec<User>;
}
