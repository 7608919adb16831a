//! Unstructured feed-forward baseline for torque regression.

use burn::module::Module;
use burn::nn;
use burn::prelude::Backend;
use burn::tensor::Tensor;
use burn::tensor::activation::relu;
use serde::{Deserialize, Serialize};

use crate::predictor::TorquePredictor;

/// Configuration for the feed-forward baseline.
///
/// # Example
///
/// ```
/// use delan_models::FeedForwardConfig;
///
/// let config = FeedForwardConfig::default();
/// assert_eq!(config.dof, 2);
/// assert_eq!(config.hidden1, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedForwardConfig {
    /// Number of joints `d`.
    pub dof: usize,

    /// Width of the first hidden layer.
    pub hidden1: usize,

    /// Width of the second hidden layer.
    pub hidden2: usize,
}

impl Default for FeedForwardConfig {
    fn default() -> Self {
        Self {
            dof: 2,
            hidden1: 64,
            hidden2: 64,
        }
    }
}

impl FeedForwardConfig {
    /// Creates a configuration for the given number of joints.
    #[must_use]
    pub const fn new(dof: usize) -> Self {
        Self {
            dof,
            hidden1: 64,
            hidden2: 64,
        }
    }

    /// Sets the hidden layer widths.
    #[must_use]
    pub const fn with_hidden(mut self, hidden1: usize, hidden2: usize) -> Self {
        self.hidden1 = hidden1;
        self.hidden2 = hidden2;
        self
    }

    /// Validates the configuration.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.dof > 0 && self.hidden1 > 0 && self.hidden2 > 0
    }
}

/// Direct torque regressor: `[q, q̇, q̈] -> τ` through two rectified layers.
///
/// No structural constraint and no physical interpretability; this exists
/// purely as the accuracy baseline the structured network is compared
/// against.
#[derive(Debug, Module)]
pub struct FeedForwardNetwork<B: Backend> {
    fc1: nn::Linear<B>,
    fc2: nn::Linear<B>,
    output: nn::Linear<B>,
    #[module(skip)]
    dof: usize,
}

impl<B: Backend> FeedForwardNetwork<B> {
    /// Creates a new baseline network.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    #[must_use]
    pub fn new(config: FeedForwardConfig, device: &B::Device) -> Self {
        assert!(
            config.is_valid(),
            "invalid feed-forward configuration: {config:?}"
        );
        let input_width = 3 * config.dof;

        Self {
            fc1: nn::LinearConfig::new(input_width, config.hidden1).init(device),
            fc2: nn::LinearConfig::new(config.hidden1, config.hidden2).init(device),
            output: nn::LinearConfig::new(config.hidden2, config.dof).init(device),
            dof: config.dof,
        }
    }

    /// Returns the number of joints.
    #[must_use]
    pub const fn dof(&self) -> usize {
        self.dof
    }

    /// Runs the forward pass.
    ///
    /// # Panics
    ///
    /// Panics if the state width is not `3 * dof`.
    pub fn forward(&self, states: Tensor<B, 2>) -> Tensor<B, 2> {
        let [_, width] = states.dims();
        assert_eq!(
            width,
            3 * self.dof,
            "state width {width} must be 3 * dof = {}",
            3 * self.dof
        );

        let x = relu(self.fc1.forward(states));
        let x = relu(self.fc2.forward(x));
        self.output.forward(x)
    }
}

impl<B: Backend> TorquePredictor<B> for FeedForwardNetwork<B> {
    fn dof(&self) -> usize {
        self.dof
    }

    fn predict_torque(&self, states: Tensor<B, 2>) -> Tensor<B, 2> {
        self.forward(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn config_default() {
        let config = FeedForwardConfig::default();
        assert_eq!(config.dof, 2);
        assert!(config.is_valid());
    }

    #[test]
    fn config_builder() {
        let config = FeedForwardConfig::new(3).with_hidden(32, 16);
        assert_eq!(config.hidden1, 32);
        assert_eq!(config.hidden2, 16);
    }

    #[test]
    fn config_serialization() {
        let config = FeedForwardConfig::default();
        let json = serde_json::to_string(&config);
        assert!(json.is_ok());

        let parsed: Result<FeedForwardConfig, _> = serde_json::from_str(&json.unwrap_or_default());
        assert_eq!(parsed.unwrap_or_default(), config);
    }

    #[test]
    fn forward_shapes() {
        let device = <TestBackend as Backend>::Device::default();
        let model = FeedForwardNetwork::<TestBackend>::new(FeedForwardConfig::default(), &device);

        let states = Tensor::zeros([4, 6], &device);
        let torque = model.forward(states);
        assert_eq!(torque.dims(), [4, 2]);
    }

    #[test]
    #[should_panic(expected = "state width")]
    fn forward_rejects_bad_width() {
        let device = <TestBackend as Backend>::Device::default();
        let model = FeedForwardNetwork::<TestBackend>::new(FeedForwardConfig::default(), &device);
        let _ = model.forward(Tensor::zeros([1, 7], &device));
    }
}
