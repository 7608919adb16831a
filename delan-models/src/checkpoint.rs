//! Checkpoint persistence for model weights.

use std::path::Path;

use burn::module::Module;
use burn::prelude::Backend;
use burn::record::{BinFileRecorder, FullPrecisionSettings, PrettyJsonFileRecorder, Recorder};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Supported checkpoint file formats.
///
/// # Example
///
/// ```
/// use delan_models::CheckpointFormat;
///
/// assert_eq!(CheckpointFormat::from_extension("bin"), Some(CheckpointFormat::Binary));
/// assert_eq!(CheckpointFormat::from_extension("json"), Some(CheckpointFormat::Json));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckpointFormat {
    /// Binary format - compact and fast, the training default.
    #[default]
    Binary,

    /// JSON format - human-readable, for inspecting learned weights.
    Json,
}

impl CheckpointFormat {
    /// Determines format from a file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "bin" => Some(Self::Binary),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Determines format from a file path.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the default file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Binary => "bin",
            Self::Json => "json",
        }
    }
}

/// Saves a model's weights to a checkpoint file.
///
/// # Arguments
///
/// - `model`: The model to save (DeLaN or baseline)
/// - `path`: Output path without extension
/// - `format`: Checkpoint format
///
/// # Returns
///
/// The full path of the written checkpoint.
///
/// # Errors
///
/// Returns `ModelError::SaveCheckpoint` if the recorder fails.
pub fn save_checkpoint<B, M>(model: &M, path: &str, format: CheckpointFormat) -> Result<String>
where
    B: Backend,
    M: Module<B>,
{
    let full_path = format!("{}.{}", path, format.extension());
    let record = model.clone().into_record();

    match format {
        CheckpointFormat::Binary => {
            let recorder = BinFileRecorder::<FullPrecisionSettings>::new();
            recorder
                .record(record, full_path.clone().into())
                .map_err(|e| ModelError::save_checkpoint(&full_path, e.to_string()))?;
        }
        CheckpointFormat::Json => {
            let recorder = PrettyJsonFileRecorder::<FullPrecisionSettings>::new();
            recorder
                .record(record, full_path.clone().into())
                .map_err(|e| ModelError::save_checkpoint(&full_path, e.to_string()))?;
        }
    }

    Ok(full_path)
}

/// Loads weights from a checkpoint file into a freshly constructed model.
///
/// The format is resolved from the path's extension.
///
/// # Errors
///
/// Returns `ModelError::UnsupportedFormat` for an unrecognized extension,
/// or `ModelError::LoadCheckpoint` if the recorder fails.
pub fn load_checkpoint<B, M>(model: M, path: &str, device: &B::Device) -> Result<M>
where
    B: Backend,
    M: Module<B>,
{
    let format = CheckpointFormat::from_path(Path::new(path))
        .ok_or_else(|| ModelError::UnsupportedFormat(path.to_string()))?;

    let record = match format {
        CheckpointFormat::Binary => BinFileRecorder::<FullPrecisionSettings>::new()
            .load(path.into(), device)
            .map_err(|e| ModelError::load_checkpoint(path, e.to_string()))?,
        CheckpointFormat::Json => PrettyJsonFileRecorder::<FullPrecisionSettings>::new()
            .load(path.into(), device)
            .map_err(|e| ModelError::load_checkpoint(path, e.to_string()))?,
    };

    Ok(model.load_record(record))
}
