pub mod error;
pub mod models;

use std::{collections::BTreeMap, sync::Arc};

use axum::async_trait;
use derive_more::Constructor;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::data_layer::BatchDataLayer;

use self::{error::{Result, StatisticsServiceError}, models::{ConfigurationTotal, DistributionEntry}};

/// Decimal places kept in distribution percentages
const PERCENTAGE_DP: u32 = 2;

///
/// Service answering aggregate queries over every stored batch
///
#[async_trait]
pub trait StatisticsService: Send + Sync {
    ///
    /// Totals per dice/sides configuration: how many batches were rolled, and
    /// how many rolls they hold. Ordered by dice, then sides.
    ///
    async fn total_simulations(&self) -> Result<Vec<ConfigurationTotal>>;
    ///
    /// Distribution of sums rolled with `dice_no` dice of `sides_no` sides,
    /// relative to the number of rolls recorded across *all* configurations.
    /// Ordered by sum. Returns `StatisticsServiceError::NoSimulations` if
    /// nothing has been rolled yet.
    ///
    async fn relative_distribution(&self, dice_no: i32, sides_no: i32) -> Result<Vec<DistributionEntry>>;
}

#[derive(Constructor)]
pub struct CoreStatisticsService {
    data_layer: Arc<dyn BatchDataLayer>,
}

#[async_trait]
impl StatisticsService for CoreStatisticsService {
    async fn total_simulations(&self) -> Result<Vec<ConfigurationTotal>> {
        let batches = self.data_layer.find_all_batches().await?;

        // (dice, sides) => (simulations, rolls)
        let mut totals: BTreeMap<(i32, i32), (i64, i64)> = BTreeMap::new();
        for batch in &batches {
            let entry = totals.entry((batch.dice_no, batch.sides_no)).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += batch.total_rolls();
        }

        Ok(
            totals.into_iter()
                .map(|((dice_no, sides_no), (total_simulations, total_rolls))| ConfigurationTotal {
                    dice_no,
                    sides_no,
                    total_simulations,
                    total_rolls,
                })
                .collect()
        )
    }

    async fn relative_distribution(&self, dice_no: i32, sides_no: i32) -> Result<Vec<DistributionEntry>> {
        let grand_total = match self.data_layer.sum_all_outcome_counts().await? {
            Some(total) if total > 0 => total,
            _ => return Err(StatisticsServiceError::NoSimulations),
        };

        let items = self.data_layer.find_items_by_configuration(dice_no, sides_no).await?;

        let mut counts: BTreeMap<i64, i64> = BTreeMap::new();
        for item in items {
            *counts.entry(item.sum).or_insert(0) += item.count;
        }

        Ok(
            counts.into_iter()
                .map(|(sum, count)| DistributionEntry { sum, percentage: percentage(count, grand_total) })
                .collect()
        )
    }
}

///
/// `count` as a percentage of `total`, rounded half-to-even to two places
///
fn percentage(count: i64, total: i64) -> Decimal {
    let mut pct = (Decimal::from(count) * Decimal::from(100) / Decimal::from(total))
        .round_dp_with_strategy(PERCENTAGE_DP, RoundingStrategy::MidpointNearestEven);
    pct.rescale(PERCENTAGE_DP);
    pct
}
