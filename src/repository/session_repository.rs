use anyhow::Result;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// The three session keys. Only these are ever written; `clear` wipes
/// the whole table regardless.
pub const KEY_CURRENT_FILE: &str = "current_file";
pub const KEY_EDA_DATA: &str = "eda_data";
pub const KEY_REQUIREMENTS_DATA: &str = "requirements_data";

/// String-valued key-value store over the `session` table.
#[derive(Clone)]
pub struct SessionRepository {
    pool: Arc<SqlitePool>,
}

impl SessionRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM session WHERE key = ?")
            .bind(key)
            .fetch_optional(&*self.pool)
            .await?;

        Ok(row.map(|r| r.get("value")))
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO session (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&*self.pool)
        .await?;

        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM session WHERE key = ?")
            .bind(key)
            .execute(&*self.pool)
            .await?;

        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM session")
            .execute(&*self.pool)
            .await?;

        Ok(())
    }

    pub async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::database::init_test_database;

    async fn repo() -> SessionRepository {
        let pool = init_test_database().await.unwrap();
        SessionRepository::new(Arc::new(pool))
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let repo = repo().await;
        assert_eq!(repo.get(KEY_CURRENT_FILE).await.unwrap(), None);

        repo.set(KEY_CURRENT_FILE, "data:text/csv;base64,QQ==")
            .await
            .unwrap();
        assert_eq!(
            repo.get(KEY_CURRENT_FILE).await.unwrap().as_deref(),
            Some("data:text/csv;base64,QQ==")
        );

        // Overwrite rather than duplicate
        repo.set(KEY_CURRENT_FILE, "data:text/csv;base64,Qg==")
            .await
            .unwrap();
        assert_eq!(
            repo.get(KEY_CURRENT_FILE).await.unwrap().as_deref(),
            Some("data:text/csv;base64,Qg==")
        );
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let repo = repo().await;
        repo.set(KEY_EDA_DATA, "{}").await.unwrap();
        repo.set(KEY_REQUIREMENTS_DATA, "{}").await.unwrap();

        repo.remove(KEY_EDA_DATA).await.unwrap();
        assert!(!repo.contains(KEY_EDA_DATA).await.unwrap());
        assert!(repo.contains(KEY_REQUIREMENTS_DATA).await.unwrap());

        repo.clear().await.unwrap();
        assert!(!repo.contains(KEY_REQUIREMENTS_DATA).await.unwrap());
    }
}
