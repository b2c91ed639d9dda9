//! Command handlers. Each runs one statement on its own connection.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};

use crate::commands::{CreateUserCommand, DeleteUserCommand, UpdateUserCommand};
use crate::database::ConnectionFactory;
use crate::dispatcher::RequestHandler;
use crate::errors::ApiError;

const INSERT_USER_SQL: &str = r#"
INSERT INTO Users (FirstName, LastName, Email, Phone, CreatedDate, IsActive)
VALUES (?, ?, ?, ?, ?, 1)
"#;

const UPDATE_USER_SQL: &str = r#"
UPDATE Users
SET FirstName = ?,
    LastName = ?,
    Email = ?,
    Phone = ?,
    UpdatedDate = ?
WHERE Id = ? AND IsActive = 1
"#;

const SOFT_DELETE_USER_SQL: &str =
    "UPDATE Users SET IsActive = 0, UpdatedDate = ? WHERE Id = ? AND IsActive = 1";

pub struct CreateUserCommandHandler {
    connections: Arc<dyn ConnectionFactory>,
}

impl CreateUserCommandHandler {
    pub fn new(connections: Arc<dyn ConnectionFactory>) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl RequestHandler<CreateUserCommand> for CreateUserCommandHandler {
    async fn handle(&self, request: CreateUserCommand) -> Result<i64, ApiError> {
        let CreateUserCommand(user) = request;
        let mut conn = self.connections.create_connection().await?;
        let result = sqlx::query(INSERT_USER_SQL)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(Utc::now())
            .execute(&mut conn)
            .await;
        self.connections.release(conn).await;

        let id = result?.last_insert_rowid();
        info!("Inserted user row {}", id);
        Ok(id)
    }
}

pub struct UpdateUserCommandHandler {
    connections: Arc<dyn ConnectionFactory>,
}

impl UpdateUserCommandHandler {
    pub fn new(connections: Arc<dyn ConnectionFactory>) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl RequestHandler<UpdateUserCommand> for UpdateUserCommandHandler {
    async fn handle(&self, request: UpdateUserCommand) -> Result<bool, ApiError> {
        let UpdateUserCommand(user) = request;
        let mut conn = self.connections.create_connection().await?;
        let result = sqlx::query(UPDATE_USER_SQL)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(Utc::now())
            .bind(user.id)
            .execute(&mut conn)
            .await;
        self.connections.release(conn).await;

        let rows = result?.rows_affected();
        debug!("Update of user {} matched {} row(s)", user.id, rows);
        Ok(rows == 1)
    }
}

pub struct DeleteUserCommandHandler {
    connections: Arc<dyn ConnectionFactory>,
}

impl DeleteUserCommandHandler {
    pub fn new(connections: Arc<dyn ConnectionFactory>) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl RequestHandler<DeleteUserCommand> for DeleteUserCommandHandler {
    async fn handle(&self, request: DeleteUserCommand) -> Result<bool, ApiError> {
        let DeleteUserCommand { id } = request;
        let mut conn = self.connections.create_connection().await?;
        let result = sqlx::query(SOFT_DELETE_USER_SQL)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut conn)
            .await;
        self.connections.release(conn).await;

        let rows = result?.rows_affected();
        debug!("Soft delete of user {} affected {} row(s)", id, rows);
        Ok(rows == 1)
    }
}
