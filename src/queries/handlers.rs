//! Query handlers. Each runs one parameterized read on its own connection.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::database::ConnectionFactory;
use crate::dispatcher::RequestHandler;
use crate::errors::ApiError;
use crate::models::User;
use crate::queries::{GetAllUsersQuery, GetUserByIdQuery, SearchUsersByEmailQuery};
use crate::utils::mask_email;

const SELECT_ACTIVE_USERS_SQL: &str = r#"
SELECT Id, FirstName, LastName, Email, Phone, CreatedDate, UpdatedDate, IsActive
FROM Users
WHERE IsActive = 1
ORDER BY CreatedDate DESC, Id DESC
"#;

const SELECT_USER_BY_ID_SQL: &str = r#"
SELECT Id, FirstName, LastName, Email, Phone, CreatedDate, UpdatedDate, IsActive
FROM Users
WHERE Id = ? AND IsActive = 1
"#;

const SEARCH_USERS_BY_EMAIL_SQL: &str = r#"
SELECT Id, FirstName, LastName, Email, Phone, CreatedDate, UpdatedDate, IsActive
FROM Users
WHERE LOWER(Email) LIKE LOWER(?) ESCAPE '\' AND IsActive = 1
ORDER BY CreatedDate DESC, Id DESC
"#;

/// Wrap `fragment` for a containment `LIKE`, escaping the wildcards so they
/// match literally.
pub fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub struct GetAllUsersQueryHandler {
    connections: Arc<dyn ConnectionFactory>,
}

impl GetAllUsersQueryHandler {
    pub fn new(connections: Arc<dyn ConnectionFactory>) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl RequestHandler<GetAllUsersQuery> for GetAllUsersQueryHandler {
    async fn handle(&self, _request: GetAllUsersQuery) -> Result<Vec<User>, ApiError> {
        let mut conn = self.connections.create_connection().await?;
        let result = sqlx::query_as::<_, User>(SELECT_ACTIVE_USERS_SQL)
            .fetch_all(&mut conn)
            .await;
        self.connections.release(conn).await;

        let users = result?;
        debug!("Fetched {} active users", users.len());
        Ok(users)
    }
}

pub struct GetUserByIdQueryHandler {
    connections: Arc<dyn ConnectionFactory>,
}

impl GetUserByIdQueryHandler {
    pub fn new(connections: Arc<dyn ConnectionFactory>) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl RequestHandler<GetUserByIdQuery> for GetUserByIdQueryHandler {
    async fn handle(&self, request: GetUserByIdQuery) -> Result<Option<User>, ApiError> {
        let mut conn = self.connections.create_connection().await?;
        let result = sqlx::query_as::<_, User>(SELECT_USER_BY_ID_SQL)
            .bind(request.id)
            .fetch_optional(&mut conn)
            .await;
        self.connections.release(conn).await;

        Ok(result?)
    }
}

pub struct SearchUsersByEmailQueryHandler {
    connections: Arc<dyn ConnectionFactory>,
}

impl SearchUsersByEmailQueryHandler {
    pub fn new(connections: Arc<dyn ConnectionFactory>) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl RequestHandler<SearchUsersByEmailQuery> for SearchUsersByEmailQueryHandler {
    async fn handle(&self, request: SearchUsersByEmailQuery) -> Result<Vec<User>, ApiError> {
        let pattern = contains_pattern(&request.email);

        let mut conn = self.connections.create_connection().await?;
        let result = sqlx::query_as::<_, User>(SEARCH_USERS_BY_EMAIL_SQL)
            .bind(&pattern)
            .fetch_all(&mut conn)
            .await;
        self.connections.release(conn).await;

        let users = result?;
        debug!(
            "Email search for '{}' matched {} users",
            mask_email(&request.email),
            users.len()
        );
        Ok(users)
    }
}
