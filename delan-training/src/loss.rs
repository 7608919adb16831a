//! Loss and evaluation reductions.

use burn::prelude::Backend;
use burn::tensor::Tensor;
use serde::{Deserialize, Serialize};

/// Mean squared error over a `(prediction, target)` pair of matching shape.
///
/// This is the training signal: the loss compares only the composed torque
/// against ground truth. The individual dynamics terms are evaluation-only.
pub fn mse_loss<B: Backend>(prediction: Tensor<B, 2>, target: Tensor<B, 2>) -> Tensor<B, 1> {
    (prediction - target).powf_scalar(2.0).mean()
}

/// Per-term evaluation of a structured model against known dynamics.
///
/// Only `torque_mse` reflects the training objective; the other terms
/// measure whether the learned decomposition matches the true physics.
///
/// # Example
///
/// ```
/// use delan_training::DynamicsEvaluation;
///
/// let eval = DynamicsEvaluation {
///     torque_mse: 0.01,
///     inertia_mse: 0.05,
///     coriolis_mse: 0.02,
///     gravity_mse: 0.03,
/// };
/// assert!(eval.summary().contains("torque"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DynamicsEvaluation {
    /// MSE of the composed torque `τ`.
    pub torque_mse: f32,

    /// MSE of the inertial term `H·q̈`.
    pub inertia_mse: f32,

    /// MSE of the Coriolis term `c`.
    pub coriolis_mse: f32,

    /// MSE of the gravity term `g`.
    pub gravity_mse: f32,
}

impl DynamicsEvaluation {
    /// Returns a human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "torque MSE {:.6} | inertia MSE {:.6} | coriolis MSE {:.6} | gravity MSE {:.6}",
            self.torque_mse, self.inertia_mse, self.coriolis_mse, self.gravity_mse
        )
    }
}
