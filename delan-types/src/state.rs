//! Joint-space state of the arm at one instant.

use serde::{Deserialize, Serialize};

use crate::error::{DelanTypesError, Result};

/// Joint positions, velocities, and accelerations for one sample.
///
/// The three vectors always have equal width `d` (the number of joints).
/// Formulas downstream stay parametric in `d`; the reacher arm has `d = 2`.
///
/// # Example
///
/// ```
/// use delan_types::JointState;
///
/// let state = JointState::new(
///     vec![0.1, -0.2],
///     vec![0.5, 0.0],
///     vec![0.0, 1.0],
/// ).unwrap();
///
/// assert_eq!(state.dof(), 2);
/// assert_eq!(state.to_flat(), vec![0.1, -0.2, 0.5, 0.0, 0.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointState {
    /// Joint positions `q`.
    pub positions: Vec<f32>,

    /// Joint velocities `q̇`.
    pub velocities: Vec<f32>,

    /// Joint accelerations `q̈`.
    pub accelerations: Vec<f32>,
}

impl JointState {
    /// Creates a new joint state.
    ///
    /// # Errors
    ///
    /// Returns `DelanTypesError::EmptyState` if `positions` is empty, or
    /// `DelanTypesError::JointWidthMismatch` if the vectors disagree in width.
    pub fn new(positions: Vec<f32>, velocities: Vec<f32>, accelerations: Vec<f32>) -> Result<Self> {
        if positions.is_empty() {
            return Err(DelanTypesError::EmptyState);
        }
        for actual in [velocities.len(), accelerations.len()] {
            if actual != positions.len() {
                return Err(DelanTypesError::JointWidthMismatch {
                    expected: positions.len(),
                    actual,
                });
            }
        }
        Ok(Self {
            positions,
            velocities,
            accelerations,
        })
    }

    /// Creates a state at rest (zero velocity and acceleration).
    ///
    /// # Errors
    ///
    /// Returns `DelanTypesError::EmptyState` if `positions` is empty.
    pub fn at_rest(positions: Vec<f32>) -> Result<Self> {
        let d = positions.len();
        Self::new(positions, vec![0.0; d], vec![0.0; d])
    }

    /// Returns the number of joints.
    #[must_use]
    pub fn dof(&self) -> usize {
        self.positions.len()
    }

    /// Flattens into the network input layout `[q, q̇, q̈]`, width `3d`.
    #[must_use]
    pub fn to_flat(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(3 * self.dof());
        flat.extend_from_slice(&self.positions);
        flat.extend_from_slice(&self.velocities);
        flat.extend_from_slice(&self.accelerations);
        flat
    }

    /// Parses a flat `[q, q̇, q̈]` vector back into a state.
    ///
    /// # Errors
    ///
    /// Returns `DelanTypesError::StateWidthNotDivisible` if the width is not
    /// a multiple of 3, or `DelanTypesError::EmptyState` for width 0. This is
    /// the fatal-precondition seam: malformed widths fail loudly, never get
    /// coerced.
    pub fn from_flat(flat: &[f32]) -> Result<Self> {
        if flat.is_empty() {
            return Err(DelanTypesError::EmptyState);
        }
        if flat.len() % 3 != 0 {
            return Err(DelanTypesError::StateWidthNotDivisible { width: flat.len() });
        }
        let d = flat.len() / 3;
        Self::new(
            flat[..d].to_vec(),
            flat[d..2 * d].to_vec(),
            flat[2 * d..].to_vec(),
        )
    }
}
