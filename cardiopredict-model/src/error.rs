use thiserror::Error;

/// Errors produced by the model layer
#[derive(Debug, Error)]
pub enum ModelError {
    /// Model has not been fitted yet
    #[error("Model has not been fitted yet")]
    NotFitted,

    /// Feature vector length does not match the fitted model
    #[error("Dimension mismatch: expected {expected} features, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// No usable samples after cleaning
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Artifact or dataset I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Training CSV parse error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
