//! Throwaway SQLite databases for tests.

use std::sync::Arc;

use sqlx::sqlite::SqliteConnectOptions;
use tempfile::TempDir;

use crate::database::{DatabaseInitializer, SqliteConnectionFactory};

/// A schema-initialized, unseeded database file that lives as long as the
/// value does.
pub struct TestDb {
    pub factory: Arc<SqliteConnectionFactory>,
    _dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let options = SqliteConnectOptions::new()
            .filename(dir.path().join("users.db"))
            .create_if_missing(true);
        let factory = Arc::new(SqliteConnectionFactory::new(options));
        DatabaseInitializer::new(factory.options().clone(), false)
            .initialize()
            .await
            .unwrap();
        Self { factory, _dir: dir }
    }
}

impl TestDb {
    /// Read a row regardless of its active flag.
    pub async fn fetch_raw(&self, id: i64) -> Option<crate::models::User> {
        use crate::database::ConnectionFactory;

        let mut conn = self.factory.create_connection().await.unwrap();
        let user = sqlx::query_as::<_, crate::models::User>("SELECT * FROM Users WHERE Id = ?")
            .bind(id)
            .fetch_optional(&mut conn)
            .await
            .unwrap();
        self.factory.release(conn).await;
        user
    }
}
