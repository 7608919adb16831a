//! Error types for delan-training crate.

use thiserror::Error;

/// Errors that can occur during training or evaluation.
#[derive(Debug, Error)]
pub enum TrainingError {
    /// Invalid training configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Dataset error.
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Model error.
    #[error("model error: {0}")]
    Model(String),

    /// Plot rendering error.
    #[error("plot error: {0}")]
    Plot(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),
}

impl TrainingError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates a dataset error.
    #[must_use]
    pub fn dataset(reason: impl Into<String>) -> Self {
        Self::Dataset(reason.into())
    }

    /// Creates a model error.
    #[must_use]
    pub fn model(reason: impl Into<String>) -> Self {
        Self::Model(reason.into())
    }

    /// Creates a plot error.
    #[must_use]
    pub fn plot(reason: impl Into<String>) -> Self {
        Self::Plot(reason.into())
    }
}

impl From<std::io::Error> for TrainingError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<delan_dataset::DatasetError> for TrainingError {
    fn from(err: delan_dataset::DatasetError) -> Self {
        Self::Dataset(err.to_string())
    }
}

impl From<delan_models::ModelError> for TrainingError {
    fn from(err: delan_models::ModelError) -> Self {
        Self::Model(err.to_string())
    }
}

/// Result type for training operations.
pub type Result<T> = std::result::Result<T, TrainingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_config() {
        let err = TrainingError::invalid_config("epochs must be > 0");
        assert!(err.to_string().contains("invalid configuration"));
    }

    #[test]
    fn error_from_dataset() {
        let err: TrainingError = delan_dataset::DatasetError::EmptyArchive.into();
        assert!(matches!(err, TrainingError::Dataset(_)));
    }

    #[test]
    fn error_from_model() {
        let err: TrainingError = delan_models::ModelError::invalid_config("dof").into();
        assert!(matches!(err, TrainingError::Model(_)));
    }
}
