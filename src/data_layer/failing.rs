use axum::async_trait;

use crate::{
    data_layer_error::{DataLayerError, Result},
    services::roll_service::models::RollOutcome,
};

use super::{BatchDataLayer, entities::{BatchEntity, OutcomeItemEntity}};

///
/// Store whose every call fails, for exercising error paths
///
pub struct FailingDataLayer;

fn unavailable<T>() -> Result<T> {
    Err(DataLayerError::Unavailable("disk full".to_string()))
}

#[async_trait]
impl BatchDataLayer for FailingDataLayer {
    async fn save_batch(&self, _dice_no: i32, _sides_no: i32, _outcomes: &[RollOutcome]) -> Result<BatchEntity> {
        unavailable()
    }
    async fn find_all_batches(&self) -> Result<Vec<BatchEntity>> {
        unavailable()
    }
    async fn sum_all_outcome_counts(&self) -> Result<Option<i64>> {
        unavailable()
    }
    async fn find_items_by_configuration(&self, _dice_no: i32, _sides_no: i32) -> Result<Vec<OutcomeItemEntity>> {
        unavailable()
    }
}
