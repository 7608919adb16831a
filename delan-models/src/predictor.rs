//! The model-agnostic torque prediction interface.

use burn::prelude::Backend;
use burn::tensor::Tensor;

/// A model that predicts joint torques from flat `[q, q̇, q̈]` states.
///
/// This is the seam the training loop works against: learnable parameters
/// live behind Burn's `Module`/`AutodiffModule` machinery, forward
/// evaluation behind this trait. Both the structured network and the
/// feed-forward baseline implement it, so one loop trains either.
pub trait TorquePredictor<B: Backend> {
    /// Returns the number of joints the model was built for.
    fn dof(&self) -> usize;

    /// Predicts torques `[n, d]` from a state batch `[n, 3d]`.
    fn predict_torque(&self, states: Tensor<B, 2>) -> Tensor<B, 2>;
}
