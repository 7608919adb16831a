//! Dataset lifecycle for reacher dynamics learning.
//!
//! This crate owns everything between raw trajectory recordings and the
//! tensors the trainer builds:
//!
//! # Archives
//!
//! - [`TrajectoryArchive`] - JSON-persisted collection of labeled
//!   trajectories
//!
//! # Splitting
//!
//! - [`CharacterSplit`] / [`split_by_character`] - character-holdout
//!   train/test partitioning, reproducible under a seed
//!
//! # Batching
//!
//! - [`TrajectoryBatch`] / [`batch_trajectory`] - one trajectory flattened
//!   into row-major state and target matrices
//!
//! # Synthetic Data
//!
//! - [`TwoLinkArm`] / [`generate_archive`] - closed-form planar arm
//!   dynamics for datasets with exactly known ground truth
//!
//! # Example
//!
//! ```
//! use delan_dataset::{
//!     generate_archive, split_by_character, CharacterSplit, TwoLinkArm,
//! };
//!
//! let arm = TwoLinkArm::default();
//! let archive = generate_archive(&arm, &['a', 'b', 'c'], 2, 20, 0.01, 42);
//!
//! let split = CharacterSplit::new(1).with_seed(42);
//! let indices = split_by_character(&archive, &split).unwrap();
//! assert!(!indices.train.is_empty());
//! assert!(!indices.test.is_empty());
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

mod archive;
mod batch;
mod error;
mod splits;
mod synthetic;

// Re-export archive types
pub use archive::TrajectoryArchive;

// Re-export batching
pub use batch::{batch_trajectory, TrajectoryBatch};

// Re-export split utilities
pub use splits::{split_by_character, CharacterSplit, SplitIndices};

// Re-export synthetic data generation
pub use synthetic::{generate_archive, generate_trajectory, MotionProfile, TwoLinkArm};

// Re-export error types
pub use error::{DatasetError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        batch_trajectory, generate_archive, split_by_character, CharacterSplit, DatasetError,
        MotionProfile, SplitIndices, TrajectoryArchive, TrajectoryBatch, TwoLinkArm,
    };
}
