//! Error taxonomy for the prediction pipeline.

use thiserror::Error;

/// Failures surfaced by data loading, model loading, and prediction.
///
/// `DataUnavailable` is recoverable inside the temperature resolution chain
/// (the resolver falls through to the next tier); the other variants are
/// terminal for the current request only and never corrupt shared state.
#[derive(Debug, Error)]
pub enum PredictError {
    /// A dataset is missing, unreadable, or empty.
    #[error("dataset unavailable: {0}")]
    DataUnavailable(String),

    /// A required model artifact could not be loaded.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// The feature vector's names disagree with what the artifact expects.
    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A request parameter is outside its valid range.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
