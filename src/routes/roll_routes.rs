use std::sync::Arc;

use axum::{Router, routing::post, extract::{Query, State, FromRef}, Json};

use crate::{
    services::roll_service::{RollService, error::Result},
    models::roll_models::{RollParamsModel, RollResultModel},
};

#[derive(Clone, FromRef)]
pub struct RollRoutesState {
    roll_service: Arc<dyn RollService>,
}

pub fn routes(roll_service: Arc<dyn RollService>) -> Router {
    Router::new()
        // Routes
        .route("/roll", post(roll_dice))
        // State
        .with_state(RollRoutesState { roll_service })
}

async fn roll_dice(
    State(roll_service): State<Arc<dyn RollService>>,
    Query(params): Query<RollParamsModel>,
) -> Result<Json<Vec<RollResultModel>>> {
    let outcomes = roll_service.roll_multiple_dice(params.dice, params.sides, params.rolls).await?;
    Ok(Json(outcomes.into_iter().map(RollResultModel::from).collect()))
}
