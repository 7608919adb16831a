//! Flattening trajectories into the row-major matrices the trainer feeds
//! to tensors.

use delan_types::Trajectory;

use crate::error::{DatasetError, Result};

/// One trajectory flattened into row-major matrices.
///
/// Each trajectory is one batch, matching how the source recordings are
/// consumed: `states` has `len * 3 * dof` entries, the target matrices
/// `len * dof` each. `inertia` is the ground-truth `H·q̈` product,
/// precomputed so per-term evaluation needs no mass matrices downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryBatch {
    /// Character label of the source trajectory.
    pub label: char,

    /// Number of samples `n`.
    pub len: usize,

    /// Number of joints `d`.
    pub dof: usize,

    /// Flat `[q, q̇, q̈]` rows, `n * 3d` entries.
    pub states: Vec<f32>,

    /// Ground-truth torque rows, `n * d` entries.
    pub torques: Vec<f32>,

    /// Ground-truth gravity rows, `n * d` entries.
    pub gravity: Vec<f32>,

    /// Ground-truth Coriolis rows, `n * d` entries.
    pub coriolis: Vec<f32>,

    /// Ground-truth inertial torque `H·q̈` rows, `n * d` entries.
    pub inertia: Vec<f32>,
}

/// Flattens a trajectory into a batch.
///
/// # Errors
///
/// Returns `DatasetError::EmptyTrajectory` if the trajectory has no
/// samples.
pub fn batch_trajectory(trajectory: &Trajectory) -> Result<TrajectoryBatch> {
    let Some(dof) = trajectory.dof() else {
        return Err(DatasetError::EmptyTrajectory(trajectory.label));
    };
    let len = trajectory.len();

    let mut batch = TrajectoryBatch {
        label: trajectory.label,
        len,
        dof,
        states: Vec::with_capacity(len * 3 * dof),
        torques: Vec::with_capacity(len * dof),
        gravity: Vec::with_capacity(len * dof),
        coriolis: Vec::with_capacity(len * dof),
        inertia: Vec::with_capacity(len * dof),
    };

    for sample in &trajectory.samples {
        batch.states.extend(sample.state.to_flat());
        batch.torques.extend_from_slice(&sample.terms.torque);
        batch.gravity.extend_from_slice(&sample.terms.gravity);
        batch.coriolis.extend_from_slice(&sample.terms.coriolis);
        batch
            .inertia
            .extend(sample.terms.inertial_torque(&sample.state.accelerations));
    }

    Ok(batch)
}
