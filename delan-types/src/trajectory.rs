//! Recorded arm motions: time-ordered samples tagged with a character label.

use serde::{Deserialize, Serialize};

use crate::error::{DelanTypesError, Result};
use crate::state::JointState;
use crate::terms::DynamicsTerms;

/// One time step of a recorded motion: state plus ground-truth dynamics.
///
/// # Example
///
/// ```
/// use delan_types::{DynamicsTerms, JointState, TrajectorySample};
///
/// let state = JointState::at_rest(vec![0.0, 0.0]).unwrap();
/// let terms = DynamicsTerms::new(
///     vec![0.5, 0.5],
///     vec![0.5, 0.5],
///     vec![0.0, 0.0],
///     vec![1.0, 0.0, 0.0, 1.0],
/// ).unwrap();
///
/// let sample = TrajectorySample::new(state, terms).unwrap();
/// assert_eq!(sample.dof(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    /// Joint-space state at this step.
    pub state: JointState,

    /// Ground-truth dynamics decomposition at this step.
    pub terms: DynamicsTerms,
}

impl TrajectorySample {
    /// Creates a new sample.
    ///
    /// # Errors
    ///
    /// Returns `DelanTypesError::TrajectoryDofMismatch` if state and terms
    /// disagree on the number of joints.
    pub fn new(state: JointState, terms: DynamicsTerms) -> Result<Self> {
        if state.dof() != terms.dof() {
            return Err(DelanTypesError::TrajectoryDofMismatch {
                expected: state.dof(),
                actual: terms.dof(),
            });
        }
        Ok(Self { state, terms })
    }

    /// Returns the number of joints.
    #[must_use]
    pub fn dof(&self) -> usize {
        self.state.dof()
    }
}

/// A time-ordered sequence of samples for one recorded motion.
///
/// The source dataset tags each motion with the character it traces; the
/// label is what the train/test split partitions on.
///
/// # Example
///
/// ```
/// use delan_types::Trajectory;
///
/// let traj = Trajectory::new('a');
/// assert_eq!(traj.label, 'a');
/// assert!(traj.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Character label of the traced motion.
    pub label: char,

    /// Time-ordered samples.
    pub samples: Vec<TrajectorySample>,
}

impl Trajectory {
    /// Creates an empty trajectory with the given label.
    #[must_use]
    pub const fn new(label: char) -> Self {
        Self {
            label,
            samples: Vec::new(),
        }
    }

    /// Appends a sample, enforcing a consistent dof across the trajectory.
    ///
    /// # Errors
    ///
    /// Returns `DelanTypesError::TrajectoryDofMismatch` if the sample's dof
    /// differs from the trajectory's.
    pub fn push(&mut self, sample: TrajectorySample) -> Result<()> {
        if let Some(dof) = self.dof() {
            if sample.dof() != dof {
                return Err(DelanTypesError::TrajectoryDofMismatch {
                    expected: dof,
                    actual: sample.dof(),
                });
            }
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the trajectory has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the number of joints, or `None` for an empty trajectory.
    #[must_use]
    pub fn dof(&self) -> Option<usize> {
        self.samples.first().map(TrajectorySample::dof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(dof: usize) -> TrajectorySample {
        let state = JointState::at_rest(vec![0.0; dof]).unwrap();
        let terms = DynamicsTerms::new(
            vec![0.0; dof],
            vec![0.0; dof],
            vec![0.0; dof],
            vec![0.0; dof * dof],
        )
        .unwrap();
        TrajectorySample::new(state, terms).unwrap()
    }

    #[test]
    fn sample_dof_mismatch() {
        let state = JointState::at_rest(vec![0.0, 0.0]).unwrap();
        let terms =
            DynamicsTerms::new(vec![0.0; 3], vec![0.0; 3], vec![0.0; 3], vec![0.0; 9]).unwrap();
        let err = TrajectorySample::new(state, terms);
        assert!(matches!(
            err,
            Err(DelanTypesError::TrajectoryDofMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn trajectory_push() {
        let mut traj = Trajectory::new('a');
        traj.push(sample(2)).unwrap();
        traj.push(sample(2)).unwrap();

        assert_eq!(traj.len(), 2);
        assert_eq!(traj.dof(), Some(2));
        assert!(!traj.is_empty());
    }

    #[test]
    fn trajectory_push_dof_mismatch() {
        let mut traj = Trajectory::new('b');
        traj.push(sample(2)).unwrap();

        let err = traj.push(sample(3));
        assert!(matches!(
            err,
            Err(DelanTypesError::TrajectoryDofMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn trajectory_empty_dof() {
        let traj = Trajectory::new('c');
        assert_eq!(traj.dof(), None);
    }

    #[test]
    fn trajectory_serialization() {
        let mut traj = Trajectory::new('d');
        traj.push(sample(2)).unwrap();

        let json = serde_json::to_string(&traj);
        assert!(json.is_ok());

        let parsed: std::result::Result<Trajectory, _> =
            serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap(), traj);
    }
}
