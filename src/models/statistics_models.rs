use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::services::statistics_service::models::{ConfigurationTotal, DistributionEntry};

///
/// Distribution is only computed when both `dice` and `sides` are given
///
#[derive(Debug, Default, Deserialize)]
pub struct StatisticsParamsModel {
    pub dice: Option<i32>,
    pub sides: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalSimulationsModel {
    pub dice_no: i32,
    pub sides_no: i32,
    pub total_simulations: i64,
    pub total_rolls: i64,
}

impl From<ConfigurationTotal> for TotalSimulationsModel {
    fn from(total: ConfigurationTotal) -> Self {
        Self {
            dice_no: total.dice_no,
            sides_no: total.sides_no,
            total_simulations: total.total_simulations,
            total_rolls: total.total_rolls,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DistributionModel {
    pub sum: i64,
    /// Written as a JSON number keeping both decimal places, e.g. `5.00`
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub percentage: Decimal,
}

impl From<DistributionEntry> for DistributionModel {
    fn from(entry: DistributionEntry) -> Self {
        Self { sum: entry.sum, percentage: entry.percentage }
    }
}

#[derive(Debug, Serialize)]
pub struct StatisticsModel {
    pub total: Vec<TotalSimulationsModel>,
    /// Left out of the payload entirely when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Vec<DistributionModel>>,
}
