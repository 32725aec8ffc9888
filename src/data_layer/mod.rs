pub mod entities;
pub mod memory;
#[cfg(test)]
pub mod failing;

use std::collections::HashMap;

use axum::async_trait;
use derive_more::Constructor;
use sqlx::SqlitePool;

use crate::{data_layer_error::Result, services::roll_service::models::RollOutcome};

use self::entities::{BatchEntity, BatchRow, OutcomeItemEntity};

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS batches (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        dice_no INTEGER NOT NULL,
        sides_no INTEGER NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS batches_configuration ON batches (dice_no, sides_no)",
    "CREATE TABLE IF NOT EXISTS batch_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        batch_id INTEGER NOT NULL REFERENCES batches (id),
        roll_sum INTEGER NOT NULL,
        amount INTEGER NOT NULL,
        UNIQUE (batch_id, roll_sum)
    )",
];

///
/// Store for simulation batches. Batches are written once and never
/// updated or deleted.
///
#[async_trait]
pub trait BatchDataLayer: Send + Sync {
    ///
    /// Persists a new batch for the given configuration with the given
    /// `outcomes`, and returns it with its assigned ids. Either the whole
    /// batch is stored, or nothing is.
    ///
    async fn save_batch(&self, dice_no: i32, sides_no: i32, outcomes: &[RollOutcome]) -> Result<BatchEntity>;
    ///
    /// Retrieves every stored batch with its items, oldest first
    ///
    async fn find_all_batches(&self) -> Result<Vec<BatchEntity>>;
    ///
    /// Sum of the counts of every item in every batch.
    /// Returns `None` if no items have been stored.
    ///
    async fn sum_all_outcome_counts(&self) -> Result<Option<i64>>;
    ///
    /// Retrieves all items belonging to batches rolled with `dice_no` dice
    /// of `sides_no` sides
    ///
    async fn find_items_by_configuration(&self, dice_no: i32, sides_no: i32) -> Result<Vec<OutcomeItemEntity>>;
}

///
/// SQLite implementation of `BatchDataLayer`
///
#[derive(Constructor)]
pub struct DbBatchDataLayer {
    db: SqlitePool,
}

impl DbBatchDataLayer {
    ///
    /// Creates the batch tables, if they do not already exist
    ///
    pub async fn create_schema(&self) -> Result<()> {
        for stmt in SCHEMA {
            sqlx::query(stmt).execute(&self.db).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BatchDataLayer for DbBatchDataLayer {
    async fn save_batch(&self, dice_no: i32, sides_no: i32, outcomes: &[RollOutcome]) -> Result<BatchEntity> {
        let mut tx = self.db.begin().await?;

        let batch_id = sqlx::query("INSERT INTO batches (dice_no, sides_no) VALUES (?, ?)")
            .bind(dice_no)
            .bind(sides_no)
            .execute(&mut *tx).await?
            .last_insert_rowid();

        let mut items = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            let id = sqlx::query("INSERT INTO batch_items (batch_id, roll_sum, amount) VALUES (?, ?, ?)")
                .bind(batch_id)
                .bind(outcome.sum)
                .bind(outcome.count)
                .execute(&mut *tx).await?
                .last_insert_rowid();
            items.push(OutcomeItemEntity { id, batch_id, sum: outcome.sum, count: outcome.count });
        }

        // Dropping the transaction before this point rolls every insert back
        tx.commit().await?;

        Ok(BatchEntity { id: batch_id, dice_no, sides_no, items })
    }

    async fn find_all_batches(&self) -> Result<Vec<BatchEntity>> {
        // Read batches and items from the same snapshot
        let mut tx = self.db.begin().await?;

        let batches = sqlx::query_as::<_, BatchRow>("SELECT id, dice_no, sides_no FROM batches ORDER BY id")
            .fetch_all(&mut *tx).await?;
        let items = sqlx::query_as::<_, OutcomeItemEntity>(
            "SELECT id, batch_id, roll_sum, amount FROM batch_items ORDER BY id"
        ).fetch_all(&mut *tx).await?;

        tx.commit().await?;

        let mut items_by_batch: HashMap<i64, Vec<OutcomeItemEntity>> = HashMap::new();
        for item in items {
            items_by_batch.entry(item.batch_id).or_default().push(item);
        }

        Ok(
            batches.into_iter()
                .map(|row| BatchEntity {
                    items: items_by_batch.remove(&row.id).unwrap_or_default(),
                    id: row.id,
                    dice_no: row.dice_no,
                    sides_no: row.sides_no,
                })
                .collect()
        )
    }

    async fn sum_all_outcome_counts(&self) -> Result<Option<i64>> {
        Ok(
            sqlx::query_scalar::<_, Option<i64>>("SELECT SUM(amount) FROM batch_items")
                .fetch_one(&self.db).await?
        )
    }

    async fn find_items_by_configuration(&self, dice_no: i32, sides_no: i32) -> Result<Vec<OutcomeItemEntity>> {
        Ok(
            sqlx::query_as::<_, OutcomeItemEntity>("
                SELECT i.id, i.batch_id, i.roll_sum, i.amount
                FROM batch_items i JOIN batches b ON i.batch_id = b.id
                WHERE b.dice_no = ? AND b.sides_no = ?
                ORDER BY i.id
                ")
                .bind(dice_no)
                .bind(sides_no)
                .fetch_all(&self.db).await?
        )
    }
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn memory_db() -> DbBatchDataLayer {
        // A single, never-recycled connection keeps the in-memory database alive
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:").await
            .unwrap();
        let data_layer = DbBatchDataLayer::new(db);
        data_layer.create_schema().await.unwrap();
        data_layer
    }

    #[tokio::test]
    async fn test_empty_database() {
        let data_layer = memory_db().await;

        assert!(data_layer.find_all_batches().await.unwrap().is_empty());
        assert_eq!(data_layer.sum_all_outcome_counts().await.unwrap(), None);
        assert!(data_layer.find_items_by_configuration(1, 4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_find_batches() {
        let data_layer = memory_db().await;

        let saved = data_layer.save_batch(2, 6, &[RollOutcome::new(7, 5), RollOutcome::new(3, 2)]).await.unwrap();
        data_layer.save_batch(1, 4, &[RollOutcome::new(2, 4)]).await.unwrap();
        data_layer.save_batch(2, 6, &[RollOutcome::new(7, 1)]).await.unwrap();

        let batches = data_layer.find_all_batches().await.unwrap();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0], saved);
        assert_eq!(batches[0].total_rolls(), 7);
        assert_eq!((batches[1].dice_no, batches[1].sides_no), (1, 4));

        assert_eq!(data_layer.sum_all_outcome_counts().await.unwrap(), Some(12));

        let items = data_layer.find_items_by_configuration(2, 6).await.unwrap();
        assert_eq!(
            items.iter().map(|i| (i.sum, i.count)).collect::<Vec<_>>(),
            vec![(7, 5), (3, 2), (7, 1)]
        );
        assert!(items.iter().all(|i| i.batch_id != batches[1].id));
    }

    #[tokio::test]
    async fn test_failed_save_leaves_nothing() {
        let data_layer = memory_db().await;

        // Duplicate sums violate the per-batch uniqueness constraint
        let res = data_layer.save_batch(2, 6, &[RollOutcome::new(7, 5), RollOutcome::new(7, 2)]).await;
        assert!(res.is_err());

        assert!(data_layer.find_all_batches().await.unwrap().is_empty());
        assert_eq!(data_layer.sum_all_outcome_counts().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_batch_is_kept() {
        let data_layer = memory_db().await;
        data_layer.save_batch(1, 5, &[]).await.unwrap();

        let batches = data_layer.find_all_batches().await.unwrap();
        assert_eq!(batches.len(), 1);
        assert!(batches[0].items.is_empty());
        assert_eq!(data_layer.sum_all_outcome_counts().await.unwrap(), None);
    }
}
