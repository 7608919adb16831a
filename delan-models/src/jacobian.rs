//! Activation derivative masks and batched layer Jacobians.
//!
//! The physics terms need `dL/dq` and `dL/dt` as first-class tensors, so the
//! hidden-layer Jacobians are composed by hand from closed-form activation
//! derivatives instead of differentiating the assembly control flow. These
//! forward-mode tensors coexist with the reverse-mode gradients Burn computes
//! for the learning step; the two mechanisms are never conflated.

use burn::prelude::Backend;
use burn::tensor::{Tensor, TensorData};
use burn::tensor::activation::sigmoid;

/// Elementwise derivative mask of the rectifier: 1 where `z > 0`, else 0.
///
/// The one-sided derivative at `z = 0` is fixed to 0.
pub fn rectifier_mask<B: Backend>(z: Tensor<B, 2>) -> Tensor<B, 2> {
    z.greater_elem(0.0).float()
}

/// Elementwise derivative mask of the softplus positivity map: `σ(z)`.
pub fn softplus_mask<B: Backend>(z: Tensor<B, 2>) -> Tensor<B, 2> {
    sigmoid(z)
}

/// The `k x k` identity matrix on the given device.
pub fn identity<B: Backend>(k: usize, device: &B::Device) -> Tensor<B, 2> {
    let mut entries = vec![0.0_f32; k * k];
    for i in 0..k {
        entries[i * k + i] = 1.0;
    }
    Tensor::from_data(TensorData::new(entries, [k, k]), device)
}

/// Expands per-sample mask vectors `[n, k]` into per-sample diagonal
/// matrices `[n, k, k]` with exact zeros off the diagonal.
pub fn diag_embed<B: Backend>(values: Tensor<B, 2>) -> Tensor<B, 3> {
    let [n, k] = values.dims();
    let device = values.device();
    let eye = identity::<B>(k, &device).unsqueeze::<3>().expand([n, k, k]);
    values.unsqueeze_dim::<3>(2).expand([n, k, k]).mul(eye)
}

/// Batched Jacobian of one linear-plus-activation layer.
///
/// For `h = φ(x·W + b)` with `W` in Burn's `[k_in, k_out]` layout and `mask`
/// the elementwise `φ'` at the pre-activation, the Jacobian `∂h/∂x` is
/// `diag(mask) · Wᵀ`, one `[k_out, k_in]` matrix per sample.
///
/// # Arguments
///
/// - `mask`: Activation derivative mask `[n, k_out]`
/// - `weight`: Layer weight `[k_in, k_out]`
///
/// # Returns
///
/// Jacobian tensor `[n, k_out, k_in]`.
pub fn layer_jacobian<B: Backend>(mask: Tensor<B, 2>, weight: Tensor<B, 2>) -> Tensor<B, 3> {
    let [n, k_out] = mask.dims();
    let [k_in, _] = weight.dims();
    let weight_t = weight.transpose().unsqueeze::<3>().expand([n, k_out, k_in]);
    diag_embed(mask).matmul(weight_t)
}
