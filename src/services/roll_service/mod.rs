pub mod error;
pub mod models;

use std::sync::Arc;

use axum::async_trait;
use derive_more::Constructor;
use indexmap::IndexMap;
use log::info;
use tokio::task;

use crate::{data_layer::BatchDataLayer, dice::{self, Die, MIN_SIDES}};

use self::{error::{Result, RollServiceError}, models::RollOutcome};

///
/// Service which simulates rolling several dice many times,
/// and records every simulation as a batch of outcomes.
///
#[async_trait]
pub trait RollService: Send + Sync {
    ///
    /// Rolls `dice_no` dice with `sides_no` sides each, `rolls_no` times.
    /// Returns how often each sum appeared, in the order each sum was first
    /// rolled. The outcomes are persisted as one new batch before returning.
    /// Returns `RollServiceError::InvalidInput` when `dice_no` or `rolls_no`
    /// are not positive, or `sides_no` is below 4.
    ///
    async fn roll_multiple_dice(&self, dice_no: i32, sides_no: i32, rolls_no: i32) -> Result<Vec<RollOutcome>>;
}

#[derive(Constructor)]
pub struct CoreRollService {
    data_layer: Arc<dyn BatchDataLayer>,
    die: Arc<dyn Die>,
}

#[async_trait]
impl RollService for CoreRollService {
    async fn roll_multiple_dice(&self, dice_no: i32, sides_no: i32, rolls_no: i32) -> Result<Vec<RollOutcome>> {
        if rolls_no <= 0 || dice_no <= 0 || sides_no < MIN_SIDES {
            return Err(RollServiceError::InvalidInput { dice_no, sides_no, rolls_no });
        }

        // Rolling is CPU-bound and unbounded in size, keep it off the async workers
        let die = self.die.clone();
        let counts = task::spawn_blocking(move || tally(die.as_ref(), dice_no, sides_no, rolls_no)).await??;

        let outcomes: Vec<RollOutcome> = counts.into_iter()
            .map(|(sum, count)| RollOutcome::new(sum, count))
            .collect();

        let batch = self.data_layer.save_batch(dice_no, sides_no, &outcomes).await?;
        info!(
            "Saved batch {}: {}d{} rolled {} times, {} distinct sums",
            batch.id, dice_no, sides_no, rolls_no, outcomes.len()
        );

        Ok(outcomes)
    }
}

///
/// Rolls all dice `rolls_no` times, counting each sum in the order
/// it first appears
///
fn tally(die: &dyn Die, dice_no: i32, sides_no: i32, rolls_no: i32) -> dice::Result<IndexMap<i64, i64>> {
    let mut counts: IndexMap<i64, i64> = IndexMap::new();
    for _ in 0..rolls_no {
        *counts.entry(die.roll_sum(dice_no, sides_no)?).or_insert(0) += 1;
    }
    Ok(counts)
}
