//! Joint-space data model for reacher dynamics learning.
//!
//! This crate provides the framework-free types shared across the workspace:
//!
//! # State Types
//!
//! - [`JointState`] - Joint positions, velocities, accelerations for one step
//! - [`DynamicsTerms`] - Ground-truth `τ = H·q̈ + c + g` decomposition
//!
//! # Trajectory Types
//!
//! - [`TrajectorySample`] - One time step: state plus dynamics terms
//! - [`Trajectory`] - A recorded motion with its character label
//!
//! # Design Philosophy
//!
//! These are **plain data types with loud validation**. Tensor math lives in
//! `delan-models`; persistence and splitting live in `delan-dataset`. Shape
//! violations (a flat state whose width is not divisible by 3, a mass matrix
//! that is not `d * d`) are fatal precondition failures surfaced as typed
//! errors at construction, never silently coerced.
//!
//! # Example
//!
//! ```
//! use delan_types::{JointState, Trajectory};
//!
//! let state = JointState::new(
//!     vec![0.1, -0.3],
//!     vec![0.0, 0.2],
//!     vec![0.5, 0.0],
//! ).unwrap();
//!
//! assert_eq!(state.dof(), 2);
//! assert_eq!(state.to_flat().len(), 6);
//!
//! let traj = Trajectory::new('a');
//! assert!(traj.is_empty());
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

mod error;
mod state;
mod terms;
mod trajectory;

// Re-export state types
pub use state::JointState;
pub use terms::DynamicsTerms;

// Re-export trajectory types
pub use trajectory::{Trajectory, TrajectorySample};

// Re-export error types
pub use error::{DelanTypesError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        DelanTypesError, DynamicsTerms, JointState, Trajectory, TrajectorySample,
    };
}
