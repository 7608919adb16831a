//! Error types for delan-dataset crate.

use thiserror::Error;

/// Errors that can occur in delan-dataset operations.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Archive contains no trajectories.
    #[error("archive is empty")]
    EmptyArchive,

    /// Trajectory contains no samples.
    #[error("trajectory '{0}' is empty")]
    EmptyTrajectory(char),

    /// Malformed trajectory data.
    #[error("malformed trajectory data: {0}")]
    Malformed(String),

    /// Invalid split configuration.
    #[error("invalid split configuration: {0}")]
    InvalidSplit(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<delan_types::DelanTypesError> for DatasetError {
    fn from(err: delan_types::DelanTypesError) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert!(DatasetError::EmptyArchive.to_string().contains("empty"));
        assert!(DatasetError::EmptyTrajectory('a').to_string().contains('a'));
        assert!(DatasetError::InvalidSplit("zero characters".into())
            .to_string()
            .contains("split"));
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DatasetError = io_err.into();
        assert!(matches!(err, DatasetError::Io(_)));
    }

    #[test]
    fn error_from_types() {
        let types_err = delan_types::DelanTypesError::EmptyState;
        let err: DatasetError = types_err.into();
        assert!(matches!(err, DatasetError::Malformed(_)));
    }
}
