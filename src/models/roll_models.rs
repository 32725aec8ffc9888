use serde::{Deserialize, Serialize};

use crate::services::roll_service::models::RollOutcome;

#[derive(Debug, Deserialize)]
pub struct RollParamsModel {
    pub dice: i32,
    pub sides: i32,
    pub rolls: i32,
}

///
/// A rolled sum, and how many times it was rolled
///
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct RollResultModel {
    pub result: i64,
    pub amount: i64,
}

impl From<RollOutcome> for RollResultModel {
    fn from(outcome: RollOutcome) -> Self {
        Self { result: outcome.sum, amount: outcome.count }
    }
}
