//! Backend selection for model construction and training.

use serde::{Deserialize, Serialize};

/// Which Burn backend runs the tensor math.
///
/// Device and backend choice is explicit configuration handed to whoever
/// constructs the model, never process-wide global state.
///
/// # Example
///
/// ```
/// use delan_models::BackendType;
///
/// let backend = BackendType::default();
/// assert_eq!(backend, BackendType::NdArray);
/// assert!(backend.is_cpu());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BackendType {
    /// CPU backend using ndarray. Always available; the test backend.
    #[default]
    NdArray,

    /// GPU backend using WGPU. Requires compatible hardware.
    Wgpu,

    /// `LibTorch` backend. Requires a libtorch installation.
    LibTorch,
}

impl BackendType {
    /// Returns `true` if this backend runs on the CPU.
    #[must_use]
    pub const fn is_cpu(&self) -> bool {
        matches!(self, Self::NdArray)
    }

    /// Returns the backend name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NdArray => "ndarray",
            Self::Wgpu => "wgpu",
            Self::LibTorch => "libtorch",
        }
    }
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
