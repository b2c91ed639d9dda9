//! Boot-time database bootstrap.
//!
//! Creates the database file, the `Users` table and its indexes when they are
//! missing, and seeds sample rows into an empty table. Running it again is a
//! no-op.

use chrono::Utc;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;

use crate::constants::SAMPLE_USERS;
use crate::errors::ApiError;

const CREATE_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS Users (
    Id          INTEGER PRIMARY KEY AUTOINCREMENT,
    FirstName   TEXT     NOT NULL CHECK (length(FirstName) BETWEEN 1 AND 50),
    LastName    TEXT     NOT NULL CHECK (length(LastName) BETWEEN 1 AND 50),
    Email       TEXT     NOT NULL CHECK (length(Email) BETWEEN 1 AND 100),
    Phone       TEXT     NOT NULL CHECK (length(Phone) BETWEEN 1 AND 20),
    CreatedDate DATETIME NOT NULL,
    UpdatedDate DATETIME NULL,
    IsActive    BOOLEAN  NOT NULL DEFAULT 1
);
CREATE INDEX IF NOT EXISTS IX_Users_Email ON Users(Email);
CREATE INDEX IF NOT EXISTS IX_Users_IsActive ON Users(IsActive);
CREATE INDEX IF NOT EXISTS IX_Users_CreatedDate ON Users(CreatedDate);
"#;

const COUNT_USERS_SQL: &str = "SELECT COUNT(*) FROM Users";

const INSERT_SAMPLE_SQL: &str = r#"
INSERT INTO Users (FirstName, LastName, Email, Phone, CreatedDate, IsActive)
VALUES (?, ?, ?, ?, ?, 1)
"#;

pub struct DatabaseInitializer {
    options: SqliteConnectOptions,
    seed_sample_data: bool,
}

impl DatabaseInitializer {
    pub fn new(options: SqliteConnectOptions, seed_sample_data: bool) -> Self {
        Self {
            options,
            seed_sample_data,
        }
    }

    pub async fn initialize(&self) -> Result<(), ApiError> {
        let options = self.options.clone().create_if_missing(true);
        let mut conn = SqliteConnection::connect_with(&options).await?;
        info!("Database created or already exists");

        sqlx::raw_sql(CREATE_SCHEMA_SQL).execute(&mut conn).await?;
        info!("Users table created or already exists");

        if self.seed_sample_data {
            self.seed(&mut conn).await?;
        }

        conn.close().await?;
        Ok(())
    }

    async fn seed(&self, conn: &mut SqliteConnection) -> Result<(), ApiError> {
        let existing: i64 = sqlx::query_scalar(COUNT_USERS_SQL)
            .fetch_one(&mut *conn)
            .await?;
        if existing > 0 {
            info!("Users table already has {} rows, skipping sample data", existing);
            return Ok(());
        }

        let now = Utc::now();
        let mut tx = conn.begin().await?;
        for (first_name, last_name, email, phone) in SAMPLE_USERS {
            sqlx::query(INSERT_SAMPLE_SQL)
                .bind(first_name)
                .bind(last_name)
                .bind(email)
                .bind(phone)
                .bind(now)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        info!("Inserted {} sample users", SAMPLE_USERS.len());
        Ok(())
    }
}
