//! Composition of the rigid-body dynamics terms from the triangular factor.
//!
//! `H = L·Lᵀ + εI` is symmetric positive-definite whenever the diagonal of
//! `L` is positive and `ε > 0`; nothing here projects or repairs it. The
//! Coriolis term follows the Christoffel identity
//! `c = dH/dt·q̇ − ½·∂(q̇ᵀHq̇)/∂q`: the sign and the ½ come out of the
//! product rule on the kinetic-energy quadratic form and are not tunable.

use burn::prelude::Backend;
use burn::tensor::Tensor;

use crate::factor::LowerFactor;
use crate::jacobian::identity;

/// One forward pass worth of predicted dynamics.
///
/// `torque` is the training signal; the individual terms are exposed for
/// diagnostic evaluation against separately-known ground truth.
#[derive(Debug, Clone)]
pub struct DynamicsPrediction<B: Backend> {
    /// Generalized torque `τ = H·q̈ + c + g`, `[n, d]`.
    pub torque: Tensor<B, 2>,

    /// Inertial torque `H·q̈`, `[n, d]`.
    pub inertia: Tensor<B, 2>,

    /// Coriolis/centripetal torque `c`, `[n, d]`.
    pub coriolis: Tensor<B, 2>,

    /// Gravity torque `g`, `[n, d]`.
    pub gravity: Tensor<B, 2>,

    /// Mass matrix `H`, `[n, d, d]`.
    pub mass_matrix: Tensor<B, 3>,
}

/// Builds the mass matrix `H = L·Lᵀ + εI`, `[n, d, d]`.
pub fn mass_matrix<B: Backend>(l: Tensor<B, 3>, epsilon: f32) -> Tensor<B, 3> {
    let [n, d, _] = l.dims();
    let device = l.device();
    let eye = identity::<B>(d, &device).unsqueeze::<3>().expand([n, d, d]);
    l.clone().matmul(l.transpose()) + eye * epsilon
}

/// Time derivative of the mass matrix via the product rule:
/// `dH/dt = L·(dL/dt)ᵀ + (dL/dt)·Lᵀ`.
pub fn mass_matrix_dt<B: Backend>(l: Tensor<B, 3>, dl_dt: Tensor<B, 3>) -> Tensor<B, 3> {
    l.clone().matmul(dl_dt.clone().transpose()) + dl_dt.matmul(l.transpose())
}

/// Coriolis/centripetal torque `c = dH/dt·q̇ − ½·∂(q̇ᵀHq̇)/∂q`, `[n, d]`.
///
/// The quadratic term stacks, per configuration dimension `k`, the scalar
/// `q̇ᵀ·(dL/dq_k·Lᵀ + L·(dL/dq_k)ᵀ)·q̇`.
pub fn coriolis_term<B: Backend>(factor: &LowerFactor<B>, velocities: Tensor<B, 2>) -> Tensor<B, 2> {
    let [n, d, _] = factor.l.dims();

    let dh_dt = mass_matrix_dt(factor.l.clone(), factor.dl_dt.clone());
    let flow = dh_dt
        .matmul(velocities.clone().reshape([n, d, 1]))
        .reshape([n, d]);

    // [n, row, col, k] -> [n, k, row, col] so each q_k slice is a matrix.
    let dl_dqk = factor.dl_dq.clone().permute([0, 3, 1, 2]);
    let l4 = factor
        .l
        .clone()
        .unsqueeze_dim::<4>(1)
        .expand([n, d, d, d]);
    let dh_dqk = dl_dqk.clone().matmul(l4.clone().transpose()) + l4.matmul(dl_dqk.transpose());

    let qd_row = velocities
        .clone()
        .reshape([n, 1, 1, d])
        .expand([n, d, 1, d]);
    let qd_col = velocities.reshape([n, 1, d, 1]).expand([n, d, d, 1]);
    let quadratic = qd_row.matmul(dh_dqk).matmul(qd_col).reshape([n, d]);

    flow - quadratic * 0.5
}

/// Composes the full prediction `τ = H·q̈ + c + g` from the factor, the
/// gravity head output, and the observed motion.
pub fn compose<B: Backend>(
    factor: &LowerFactor<B>,
    gravity: Tensor<B, 2>,
    velocities: Tensor<B, 2>,
    accelerations: Tensor<B, 2>,
    epsilon: f32,
) -> DynamicsPrediction<B> {
    let [n, d, _] = factor.l.dims();

    let h = mass_matrix(factor.l.clone(), epsilon);
    let coriolis = coriolis_term(factor, velocities);
    let inertia = h
        .clone()
        .matmul(accelerations.reshape([n, d, 1]))
        .reshape([n, d]);
    let torque = inertia.clone() + coriolis.clone() + gravity.clone();

    DynamicsPrediction {
        torque,
        inertia,
        coriolis,
        gravity,
        mass_matrix: h,
    }
}
