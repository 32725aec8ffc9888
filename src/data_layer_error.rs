use thiserror::Error;

///
/// Result type for `BatchDataLayer`s. Every store implementation
/// returns this type.
///
pub type Result<T> = std::result::Result<T, DataLayerError>;

///
/// Failure reading or writing batches. Always fatal to the request
/// that hit it.
///
#[derive(Debug, Error)]
pub enum DataLayerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Batch store unavailable: {0}")]
    Unavailable(String),
}
