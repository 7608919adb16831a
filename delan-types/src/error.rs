//! Error types for delan-types crate.

use thiserror::Error;

/// Errors that can occur in delan-types operations.
#[derive(Debug, Error)]
pub enum DelanTypesError {
    /// Joint vectors within one state have different widths.
    #[error("joint vector width mismatch: expected {expected}, got {actual}")]
    JointWidthMismatch {
        /// Expected width (degrees of freedom).
        expected: usize,
        /// Actual width.
        actual: usize,
    },

    /// A flat state vector is not three equal joint-space blocks.
    #[error("state width {width} is not divisible by 3")]
    StateWidthNotDivisible {
        /// The offending flat width.
        width: usize,
    },

    /// A state with zero degrees of freedom.
    #[error("state has zero degrees of freedom")]
    EmptyState,

    /// Mass matrix does not have `dof * dof` entries.
    #[error("mass matrix size mismatch: expected {expected} entries, got {actual}")]
    MassMatrixSize {
        /// Expected entry count (`dof * dof`).
        expected: usize,
        /// Actual entry count.
        actual: usize,
    },

    /// Dynamics terms disagree with the state's degrees of freedom.
    #[error("dynamics term width mismatch for {term}: expected {expected}, got {actual}")]
    TermWidthMismatch {
        /// Name of the offending term.
        term: &'static str,
        /// Expected width (degrees of freedom).
        expected: usize,
        /// Actual width.
        actual: usize,
    },

    /// A sample pushed into a trajectory has a different dof than the rest.
    #[error("trajectory dof mismatch: trajectory has {expected}, sample has {actual}")]
    TrajectoryDofMismatch {
        /// Degrees of freedom of the trajectory.
        expected: usize,
        /// Degrees of freedom of the rejected sample.
        actual: usize,
    },
}

/// Result type for delan-types operations.
pub type Result<T> = std::result::Result<T, DelanTypesError>;
