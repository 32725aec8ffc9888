use std::collections::HashMap;

use axum::async_trait;
use parking_lot::RwLock;

use crate::{data_layer_error::Result, services::roll_service::models::RollOutcome};

use super::{BatchDataLayer, entities::{BatchEntity, OutcomeItemEntity}};

///
/// Process-local batch store. Batches live in insertion order, with a
/// secondary index from configuration to batch positions.
///
#[derive(Default)]
pub struct MemoryBatchDataLayer {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    batches: Vec<BatchEntity>,
    by_configuration: HashMap<(i32, i32), Vec<usize>>,
    item_count: i64,
}

#[async_trait]
impl BatchDataLayer for MemoryBatchDataLayer {
    async fn save_batch(&self, dice_no: i32, sides_no: i32, outcomes: &[RollOutcome]) -> Result<BatchEntity> {
        let mut state = self.state.write();

        let idx = state.batches.len();
        let batch_id = idx as i64 + 1;
        let first_item_id = state.item_count + 1;

        let items = outcomes.iter().zip(first_item_id..)
            .map(|(outcome, id)| OutcomeItemEntity { id, batch_id, sum: outcome.sum, count: outcome.count })
            .collect::<Vec<_>>();

        let batch = BatchEntity { id: batch_id, dice_no, sides_no, items };

        state.item_count += outcomes.len() as i64;
        state.by_configuration.entry((dice_no, sides_no)).or_default().push(idx);
        state.batches.push(batch.clone());

        Ok(batch)
    }

    async fn find_all_batches(&self) -> Result<Vec<BatchEntity>> {
        Ok(self.state.read().batches.clone())
    }

    async fn sum_all_outcome_counts(&self) -> Result<Option<i64>> {
        let state = self.state.read();
        if state.item_count == 0 {
            return Ok(None);
        }
        Ok(Some(state.batches.iter().map(BatchEntity::total_rolls).sum()))
    }

    async fn find_items_by_configuration(&self, dice_no: i32, sides_no: i32) -> Result<Vec<OutcomeItemEntity>> {
        let state = self.state.read();
        let items: Vec<OutcomeItemEntity> = state.by_configuration.get(&(dice_no, sides_no))
            .map(|idxs| idxs.iter()
                .flat_map(|&idx| state.batches[idx].items.iter().cloned())
                .collect())
            .unwrap_or_default();
        Ok(items)
    }
}
