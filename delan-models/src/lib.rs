//! Torque models for reacher dynamics learning, built with the Burn
//! framework.
//!
//! # The Structured Model
//!
//! [`DelanNetwork`] is a Deep Lagrangian Network: it parameterizes the
//! rigid-body dynamics `τ = H(q)·q̈ + c(q, q̇) + g(q)` with a mass matrix
//! `H = L·Lᵀ + εI` that is symmetric positive-definite by construction.
//! The Coriolis term is derived analytically from hand-chained Jacobians of
//! the network's hidden layers rather than learned directly. Its building
//! blocks are public:
//!
//! - [`rectifier_mask`] / [`softplus_mask`] / [`layer_jacobian`] - closed-form
//!   activation derivatives and batched layer Jacobians
//! - [`assemble_lower`] / [`assemble_lower_dq`] - per-row triangular factor
//!   assembly with exact above-diagonal zeros
//! - [`mass_matrix`] / [`mass_matrix_dt`] / [`coriolis_term`] / [`compose`] -
//!   the dynamics composer
//!
//! # The Baseline
//!
//! [`FeedForwardNetwork`] regresses torques directly with no structure; it
//! exists as the comparison target.
//!
//! # Shared Surface
//!
//! - [`TorquePredictor`] - the forward-evaluation seam the trainer uses
//! - [`save_checkpoint`] / [`load_checkpoint`] - weight persistence
//! - [`BackendType`] - explicit backend selection, no process globals
//!
//! # Example
//!
//! ```ignore
//! use delan_models::{DelanConfig, DelanNetwork};
//!
//! let config = DelanConfig::new(2).with_hidden(64, 64);
//! let device = Default::default();
//! let model = DelanNetwork::<MyBackend>::new(config, &device);
//!
//! let prediction = model.forward(states);
//! // prediction.torque, prediction.inertia, prediction.coriolis,
//! // prediction.gravity, prediction.mass_matrix
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

mod backend;
mod checkpoint;
mod delan;
mod error;
mod factor;
mod feedforward;
mod jacobian;
mod lagrangian;
mod predictor;

// Re-export models
pub use delan::{DelanConfig, DelanNetwork};
pub use feedforward::{FeedForwardConfig, FeedForwardNetwork};
pub use predictor::TorquePredictor;

// Re-export the dynamics building blocks
pub use factor::{assemble_lower, assemble_lower_dq, off_diagonal_width, LowerFactor};
pub use jacobian::{diag_embed, identity, layer_jacobian, rectifier_mask, softplus_mask};
pub use lagrangian::{compose, coriolis_term, mass_matrix, mass_matrix_dt, DynamicsPrediction};

// Re-export persistence and backend selection
pub use backend::BackendType;
pub use checkpoint::{load_checkpoint, save_checkpoint, CheckpointFormat};

// Re-export error types
pub use error::{ModelError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        BackendType, CheckpointFormat, DelanConfig, DelanNetwork, DynamicsPrediction,
        FeedForwardConfig, FeedForwardNetwork, LowerFactor, ModelError, TorquePredictor,
        load_checkpoint, save_checkpoint,
    };
}
