use std::sync::Arc;

use axum::{Router, routing::get, extract::{Query, State, FromRef}, Json};

use crate::{
    services::statistics_service::{StatisticsService, error::Result},
    models::statistics_models::{DistributionModel, StatisticsModel, StatisticsParamsModel, TotalSimulationsModel},
};

#[derive(Clone, FromRef)]
pub struct StatisticsRoutesState {
    statistics_service: Arc<dyn StatisticsService>,
}

pub fn routes(statistics_service: Arc<dyn StatisticsService>) -> Router {
    Router::new()
        // Routes
        .route("/statistics", get(statistics))
        // State
        .with_state(StatisticsRoutesState { statistics_service })
}

async fn statistics(
    State(statistics_service): State<Arc<dyn StatisticsService>>,
    Query(params): Query<StatisticsParamsModel>,
) -> Result<Json<StatisticsModel>> {
    let total = statistics_service.total_simulations().await?
        .into_iter()
        .map(TotalSimulationsModel::from)
        .collect();

    let distribution = match (params.dice, params.sides) {
        (Some(dice), Some(sides)) => Some(
            statistics_service.relative_distribution(dice, sides).await?
                .into_iter()
                .map(DistributionModel::from)
                .collect::<Vec<_>>()
        ),
        _ => None,
    };

    Ok(Json(StatisticsModel {
        total,
        // An empty distribution is omitted, the same as one never requested
        distribution: distribution.filter(|d| !d.is_empty()),
    }))
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::{
        data_layer::{BatchDataLayer, failing::FailingDataLayer, memory::MemoryBatchDataLayer},
        services::{roll_service::models::RollOutcome, statistics_service::CoreStatisticsService},
    };

    use super::*;

    async fn seeded_service() -> Arc<dyn StatisticsService> {
        let data_layer = Arc::new(MemoryBatchDataLayer::default());
        data_layer.save_batch(2, 6, &[RollOutcome::new(7, 3), RollOutcome::new(5, 1)]).await.unwrap();
        data_layer.save_batch(1, 4, &[RollOutcome::new(2, 4)]).await.unwrap();
        Arc::new(CoreStatisticsService::new(data_layer))
    }

    fn params(dice: Option<i32>, sides: Option<i32>) -> Query<StatisticsParamsModel> {
        Query(StatisticsParamsModel { dice, sides })
    }

    #[tokio::test]
    async fn test_statistics_empty() {
        let svc: Arc<dyn StatisticsService> = Arc::new(CoreStatisticsService::new(Arc::new(MemoryBatchDataLayer::default())));
        let Json(model) = statistics(State(svc), params(None, None)).await.unwrap();

        assert_eq!(serde_json::to_value(&model).unwrap(), json!({ "total": [] }));
    }

    #[tokio::test]
    async fn test_statistics_without_distribution() {
        let svc = seeded_service().await;

        // A single parameter is not enough to compute the distribution
        for (dice, sides) in [(None, None), (Some(2), None), (None, Some(6))] {
            let Json(model) = statistics(State(svc.clone()), params(dice, sides)).await.unwrap();
            assert_eq!(
                serde_json::to_value(&model).unwrap(),
                json!({
                    "total": [
                        { "diceNo": 1, "sidesNo": 4, "totalSimulations": 1, "totalRolls": 4 },
                        { "diceNo": 2, "sidesNo": 6, "totalSimulations": 1, "totalRolls": 4 },
                    ]
                })
            );
        }
    }

    #[tokio::test]
    async fn test_statistics_with_distribution() {
        let svc = seeded_service().await;
        let Json(model) = statistics(State(svc), params(Some(2), Some(6))).await.unwrap();

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["total"].as_array().unwrap().len(), 2);

        // Percentages keep both decimal places in the payload
        let body = serde_json::to_string(&model.distribution).unwrap();
        assert_eq!(body, r#"[{"sum":5,"percentage":12.50},{"sum":7,"percentage":37.50}]"#);
    }

    #[test]
    fn test_whole_percentage_keeps_scale() {
        let model = DistributionModel { sum: 1, percentage: Decimal::new(500, 2) };
        assert_eq!(serde_json::to_string(&model).unwrap(), r#"{"sum":1,"percentage":5.00}"#);
    }

    #[tokio::test]
    async fn test_statistics_unknown_configuration_omits_distribution() {
        let svc = seeded_service().await;
        let Json(model) = statistics(State(svc), params(Some(9), Some(9))).await.unwrap();

        assert!(model.distribution.is_none());
        assert!(serde_json::to_value(&model).unwrap().get("distribution").is_none());
    }

    #[tokio::test]
    async fn test_statistics_precondition_failed() {
        let svc: Arc<dyn StatisticsService> = Arc::new(CoreStatisticsService::new(Arc::new(MemoryBatchDataLayer::default())));
        let res = statistics(State(svc), params(Some(2), Some(6))).await;

        let status = res.map(|_| ()).unwrap_err().into_response().status();
        assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    }

    #[tokio::test]
    async fn test_statistics_store_failure() {
        let svc: Arc<dyn StatisticsService> = Arc::new(CoreStatisticsService::new(Arc::new(FailingDataLayer)));
        let res = statistics(State(svc), params(None, None)).await;

        let status = res.map(|_| ()).unwrap_err().into_response().status();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
