//! Training and evaluation harness for reacher dynamics models.
//!
//! # Training
//!
//! - [`TrainingConfig`] / [`OptimizerConfig`] / [`LearningRateSchedule`] -
//!   run configuration; gradients are clipped to a fixed norm ceiling and
//!   the schedule steps once per epoch
//! - [`train_model`] - the epoch/batch loop, one trajectory per batch;
//!   works for any [`delan_models::TorquePredictor`]
//! - [`EpochMetrics`] / [`TrainingMetrics`] - per-run bookkeeping
//!
//! # Evaluation
//!
//! - [`mse_loss`] - the training reduction
//! - [`evaluate_model`] - mean torque MSE across trajectories
//! - [`evaluate_dynamics`] / [`DynamicsEvaluation`] - per-term diagnostics
//!   for the structured model (`τ`, `H·q̈`, `c`, `g`)
//! - [`plot_torque_comparison`] - predicted vs. ground-truth torque traces
//!
//! # Example
//!
//! ```ignore
//! use delan_models::{DelanConfig, DelanNetwork};
//! use delan_training::{train_model, evaluate_model, TrainingConfig};
//!
//! let config = TrainingConfig::new(50).with_seed(42);
//! let model = DelanNetwork::<MyAutodiffBackend>::new(DelanConfig::new(2), &device);
//!
//! let (model, metrics) = train_model(model, &train_trajectories, &config, &device)?;
//! let test_mse = evaluate_model(&model, &test_trajectories, &device)?;
//! println!("{}", metrics.summary());
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod error;
mod loss;
mod metrics;
mod plot;
mod trainer;

// Re-export configuration
pub use config::{LearningRateSchedule, OptimizerConfig, TrainingConfig};

// Re-export loss and evaluation types
pub use loss::{mse_loss, DynamicsEvaluation};

// Re-export metrics
pub use metrics::{EpochMetrics, TrainingMetrics};

// Re-export the training and evaluation entry points
pub use trainer::{evaluate_dynamics, evaluate_model, train_model};

// Re-export plotting
pub use plot::plot_torque_comparison;

// Re-export error types
pub use error::{Result, TrainingError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        evaluate_dynamics, evaluate_model, mse_loss, plot_torque_comparison, train_model,
        DynamicsEvaluation, EpochMetrics, LearningRateSchedule, OptimizerConfig, TrainingConfig,
        TrainingError, TrainingMetrics,
    };
}
