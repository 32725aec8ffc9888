use axum::{response::{IntoResponse, Response}, http::StatusCode};
use log::error;
use thiserror::Error;
use tokio::task::JoinError;

use crate::{data_layer_error::DataLayerError, dice::DieError};

pub type Result<T> = std::result::Result<T, RollServiceError>;

#[derive(Debug, Error)]
pub enum RollServiceError {
    #[error("Invalid roll request: {dice_no} dice, {sides_no} sides, {rolls_no} rolls. Dice and rolls must be positive, sides at least 4")]
    InvalidInput { dice_no: i32, sides_no: i32, rolls_no: i32 },
    #[error(transparent)]
    DieError(#[from] DieError),
    #[error("Internal server error")]
    DataLayerError(#[from] DataLayerError),
    #[error("Internal server error")]
    SimulationAborted(#[from] JoinError),
}

impl IntoResponse for RollServiceError {
    fn into_response(self) -> Response {
        match self {
            RollServiceError::DataLayerError(e) => {
                error!("{:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal server error occured").into_response()
            },
            RollServiceError::SimulationAborted(e) => {
                error!("{:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal server error occured").into_response()
            },
            _ => (StatusCode::BAD_REQUEST, self.to_string()).into_response()
        }
    }
}
