use std::collections::HashMap;

use async_trait::async_trait;
use quiz_core::model::StatisticsSnapshot;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{rows_from_snapshot, snapshot_from_rows};
use crate::repository::{StatisticsRepository, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl StatisticsRepository for SqliteRepository {
    async fn load_statistics(&self) -> Result<StatisticsSnapshot, StorageError> {
        let rows = sqlx::query("SELECT key, value FROM statistics")
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        let mut values = HashMap::with_capacity(rows.len());
        for row in rows {
            let key: String = row.try_get("key").map_err(ser)?;
            let value: String = row.try_get("value").map_err(ser)?;
            values.insert(key, value);
        }

        snapshot_from_rows(&values)
    }

    async fn save_statistics(&self, stats: &StatisticsSnapshot) -> Result<(), StorageError> {
        let rows = rows_from_snapshot(stats)?;

        let mut tx = self.pool.begin().await.map_err(conn)?;
        for (key, value) in rows {
            sqlx::query(
                r"
                    INSERT INTO statistics (key, value)
                    VALUES (?1, ?2)
                    ON CONFLICT(key) DO UPDATE SET value = excluded.value
                ",
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }
        tx.commit().await.map_err(conn)?;

        tracing::debug!(
            games_played = stats.games_played(),
            best_correct = stats.best_game().correct(),
            "statistics saved"
        );
        Ok(())
    }
}
