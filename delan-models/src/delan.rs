//! The Deep Lagrangian Network: a structured torque model whose mass matrix
//! is symmetric positive-definite by construction.

use burn::module::Module;
use burn::nn;
use burn::prelude::Backend;
use burn::tensor::Tensor;
use burn::tensor::activation::{relu, softplus};
use serde::{Deserialize, Serialize};

use crate::factor::{assemble_lower, assemble_lower_dq, off_diagonal_width, LowerFactor};
use crate::jacobian::{layer_jacobian, rectifier_mask, softplus_mask};
use crate::lagrangian::{compose, DynamicsPrediction};
use crate::predictor::TorquePredictor;

/// Configuration for the Deep Lagrangian Network.
///
/// # Example
///
/// ```
/// use delan_models::DelanConfig;
///
/// let config = DelanConfig::default();
/// assert_eq!(config.dof, 2);
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelanConfig {
    /// Number of joints `d`.
    pub dof: usize,

    /// Width of the first trunk layer.
    pub hidden1: usize,

    /// Width of the second trunk layer.
    pub hidden2: usize,

    /// Positive-definiteness shift `ε` added to `L·Lᵀ`.
    pub epsilon: f32,
}

impl Default for DelanConfig {
    fn default() -> Self {
        Self {
            dof: 2,
            hidden1: 64,
            hidden2: 64,
            epsilon: 1e-5,
        }
    }
}

impl DelanConfig {
    /// Creates a configuration for the given number of joints.
    #[must_use]
    pub const fn new(dof: usize) -> Self {
        Self {
            dof,
            hidden1: 64,
            hidden2: 64,
            epsilon: 1e-5,
        }
    }

    /// Sets the trunk layer widths.
    #[must_use]
    pub const fn with_hidden(mut self, hidden1: usize, hidden2: usize) -> Self {
        self.hidden1 = hidden1;
        self.hidden2 = hidden2;
        self
    }

    /// Sets the positive-definiteness shift.
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Validates the configuration.
    ///
    /// The factor parameterization needs at least two joints for the
    /// off-diagonal head to have any outputs.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.dof >= 2 && self.hidden1 > 0 && self.hidden2 > 0 && self.epsilon > 0.0
    }
}

/// Deep Lagrangian Network over `d` joints.
///
/// The trunk maps joint positions through two rectified layers to hidden
/// activations `h1`, `h2`; three heads read `h2`:
///
/// - gravity `g` (linear, width `d`),
/// - factor diagonal `ld` (softplus, width `d`, strictly positive),
/// - factor off-diagonal `lo` (linear, width `d(d-1)/2`).
///
/// The hidden activations are retained and consumed twice: once for the
/// head outputs and once to chain the heads' local Jacobians back through
/// `h2 -> h1 -> q`, which yields `dld/dq` and `dlo/dq` and, contracted with
/// `q̇`, the time-derivative streams. Those feed the triangular assembler
/// and the dynamics composer for the final `τ = H·q̈ + c + g`.
///
/// # Example
///
/// ```ignore
/// use delan_models::{DelanConfig, DelanNetwork};
///
/// let config = DelanConfig::new(2).with_hidden(32, 32);
/// let device = Default::default();
/// let model = DelanNetwork::<MyBackend>::new(config, &device);
///
/// let states = Tensor::zeros([1, 6], &device);
/// let prediction = model.forward(states);
/// ```
#[derive(Debug, Module)]
pub struct DelanNetwork<B: Backend> {
    fc1: nn::Linear<B>,
    fc2: nn::Linear<B>,
    gravity_head: nn::Linear<B>,
    diagonal_head: nn::Linear<B>,
    off_diagonal_head: nn::Linear<B>,
    #[module(skip)]
    dof: usize,
    #[module(skip)]
    epsilon: f32,
}

impl<B: Backend> DelanNetwork<B> {
    /// Creates a new network.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid (see [`DelanConfig::is_valid`]).
    #[must_use]
    pub fn new(config: DelanConfig, device: &B::Device) -> Self {
        assert!(config.is_valid(), "invalid DeLaN configuration: {config:?}");
        let d = config.dof;

        let fc1 = nn::LinearConfig::new(d, config.hidden1).init(device);
        let fc2 = nn::LinearConfig::new(config.hidden1, config.hidden2).init(device);
        let gravity_head = nn::LinearConfig::new(config.hidden2, d).init(device);
        let diagonal_head = nn::LinearConfig::new(config.hidden2, d).init(device);
        let off_diagonal_head =
            nn::LinearConfig::new(config.hidden2, off_diagonal_width(d)).init(device);

        Self {
            fc1,
            fc2,
            gravity_head,
            diagonal_head,
            off_diagonal_head,
            dof: config.dof,
            epsilon: config.epsilon,
        }
    }

    /// Returns the number of joints.
    #[must_use]
    pub const fn dof(&self) -> usize {
        self.dof
    }

    /// Runs the full forward pass.
    ///
    /// # Arguments
    ///
    /// - `states`: Batch of flat `[q, q̇, q̈]` states, `[n, 3d]`
    ///
    /// # Returns
    ///
    /// The predicted dynamics bundle `(τ, H·q̈, c, g, H)`.
    ///
    /// # Panics
    ///
    /// Panics if the state width is not `3 * dof`.
    pub fn forward(&self, states: Tensor<B, 2>) -> DynamicsPrediction<B> {
        let d = self.dof;
        let [n, width] = states.dims();
        assert_eq!(width, 3 * d, "state width {width} must be 3 * dof = {}", 3 * d);

        let positions = states.clone().slice([0..n, 0..d]);
        let velocities = states.clone().slice([0..n, d..2 * d]);
        let accelerations = states.slice([0..n, 2 * d..3 * d]);

        let (gravity, factor) = self.factor_parts(positions, velocities.clone());
        compose(&factor, gravity, velocities, accelerations, self.epsilon)
    }

    /// Evaluates the lower-triangular factor `L(q)` alone.
    ///
    /// Diagnostic surface: this is what finite-difference checks of the
    /// analytic derivative tensors perturb.
    ///
    /// # Panics
    ///
    /// Panics if `positions` does not have width `dof`.
    pub fn triangular_factor(&self, positions: Tensor<B, 2>) -> Tensor<B, 3> {
        let [n, _] = positions.dims();
        let device = positions.device();
        let zero_velocity = Tensor::zeros([n, self.dof], &device);
        let (_, factor) = self.factor_parts(positions, zero_velocity);
        factor.l
    }

    /// Evaluates the factor together with its analytic derivative tensors.
    ///
    /// # Panics
    ///
    /// Panics if `positions` or `velocities` does not have width `dof`.
    pub fn factor_with_derivatives(
        &self,
        positions: Tensor<B, 2>,
        velocities: Tensor<B, 2>,
    ) -> LowerFactor<B> {
        let (_, factor) = self.factor_parts(positions, velocities);
        factor
    }

    /// Trunk, heads, hand-chained Jacobians, and factor assembly.
    fn factor_parts(
        &self,
        positions: Tensor<B, 2>,
        velocities: Tensor<B, 2>,
    ) -> (Tensor<B, 2>, LowerFactor<B>) {
        let d = self.dof;
        let [n, width] = positions.dims();
        assert_eq!(width, d, "position width {width} must equal dof = {d}");

        let z1 = self.fc1.forward(positions);
        let mask1 = rectifier_mask(z1.clone());
        let h1 = relu(z1);

        let z2 = self.fc2.forward(h1);
        let mask2 = rectifier_mask(z2.clone());
        let h2 = relu(z2);

        let gravity = self.gravity_head.forward(h2.clone());

        let z_diag = self.diagonal_head.forward(h2.clone());
        let diagonal = softplus(z_diag.clone(), 1.0);
        let mask_diag = softplus_mask(z_diag);

        let off_diagonal = self.off_diagonal_head.forward(h2);

        // Chain rule back through the trunk: dh2/dq, then the heads.
        let dh1_dq = layer_jacobian(mask1, self.fc1.weight.val());
        let dh2_dh1 = layer_jacobian(mask2, self.fc2.weight.val());
        let dh2_dq = dh2_dh1.matmul(dh1_dq);

        let diagonal_dq =
            layer_jacobian(mask_diag, self.diagonal_head.weight.val()).matmul(dh2_dq.clone());

        let w_off = self.off_diagonal_head.weight.val();
        let [h2_width, off_width] = w_off.dims();
        let off_diagonal_dq = w_off
            .transpose()
            .unsqueeze::<3>()
            .expand([n, off_width, h2_width])
            .matmul(dh2_dq);

        // d/dt f(q) = (df/dq)·q̇ along the trajectory.
        let velocity_col = velocities.reshape([n, d, 1]);
        let diagonal_dt = diagonal_dq
            .clone()
            .matmul(velocity_col.clone())
            .reshape([n, d]);
        let off_diagonal_dt = off_diagonal_dq
            .clone()
            .matmul(velocity_col)
            .reshape([n, off_width]);

        let factor = LowerFactor {
            l: assemble_lower(diagonal, off_diagonal),
            dl_dt: assemble_lower(diagonal_dt, off_diagonal_dt),
            dl_dq: assemble_lower_dq(diagonal_dq, off_diagonal_dq),
        };
        (gravity, factor)
    }
}

impl<B: Backend> TorquePredictor<B> for DelanNetwork<B> {
    fn dof(&self) -> usize {
        self.dof
    }

    fn predict_torque(&self, states: Tensor<B, 2>) -> Tensor<B, 2> {
        self.forward(states).torque
    }
}
