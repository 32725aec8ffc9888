use axum::{response::{IntoResponse, Response}, http::StatusCode};
use log::error;
use thiserror::Error;

use crate::data_layer_error::DataLayerError;

pub type Result<T> = std::result::Result<T, StatisticsServiceError>;

#[derive(Debug, Error)]
pub enum StatisticsServiceError {
    #[error("No simulations have been run yet")]
    NoSimulations,
    #[error("Internal server error")]
    DataLayerError(#[from] DataLayerError),
}

impl IntoResponse for StatisticsServiceError {
    fn into_response(self) -> Response {
        match self {
            StatisticsServiceError::DataLayerError(e) => {
                error!("{:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal server error occured").into_response()
            },
            // Not malformed input: the request can succeed once rolls exist
            StatisticsServiceError::NoSimulations => {
                (StatusCode::PRECONDITION_FAILED, self.to_string()).into_response()
            }
        }
    }
}
