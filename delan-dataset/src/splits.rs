//! Character-holdout train/test splitting.
//!
//! Generalization is measured across characters: a handful of characters
//! (all of their sampled trajectories) form the training set, and every
//! remaining character goes to the test set. Splitting on the label rather
//! than the trajectory keeps test motions entirely unseen shapes.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::archive::TrajectoryArchive;
use crate::error::{DatasetError, Result};

/// Configuration for a character-holdout split.
///
/// # Example
///
/// ```
/// use delan_dataset::CharacterSplit;
///
/// let split = CharacterSplit::default();
/// assert_eq!(split.train_characters, 2);
/// assert_eq!(split.samples_per_character, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSplit {
    /// How many characters go to the training set.
    pub train_characters: usize,

    /// Cap on trajectories taken per character (train and test alike).
    pub samples_per_character: usize,

    /// Random seed for reproducible character selection.
    pub seed: Option<u64>,
}

impl Default for CharacterSplit {
    fn default() -> Self {
        Self {
            train_characters: 2,
            samples_per_character: 2,
            seed: None,
        }
    }
}

impl CharacterSplit {
    /// Creates a split taking `train_characters` characters for training.
    #[must_use]
    pub const fn new(train_characters: usize) -> Self {
        Self {
            train_characters,
            samples_per_character: 2,
            seed: None,
        }
    }

    /// Sets the per-character trajectory cap.
    #[must_use]
    pub const fn with_samples_per_character(mut self, cap: usize) -> Self {
        self.samples_per_character = cap;
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.train_characters > 0 && self.samples_per_character > 0
    }
}

/// Trajectory indices selected for training and testing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitIndices {
    /// Indices into the archive for training.
    pub train: Vec<usize>,

    /// Indices into the archive for testing.
    pub test: Vec<usize>,
}

/// Splits an archive by character label.
///
/// The archive's characters are shuffled (seeded when the split carries a
/// seed); the first `train_characters` become training characters, every
/// other character tests. Each character contributes at most
/// `samples_per_character` trajectories.
///
/// # Errors
///
/// Returns `DatasetError::EmptyArchive` for an empty archive, or
/// `DatasetError::InvalidSplit` if the configuration is invalid or asks for
/// at least as many training characters as the archive has characters
/// (which would leave nothing to test on).
pub fn split_by_character(
    archive: &TrajectoryArchive,
    split: &CharacterSplit,
) -> Result<SplitIndices> {
    if archive.is_empty() {
        return Err(DatasetError::EmptyArchive);
    }
    if !split.is_valid() {
        return Err(DatasetError::InvalidSplit(
            "train_characters and samples_per_character must be positive".into(),
        ));
    }

    let mut characters = archive.characters();
    if split.train_characters >= characters.len() {
        return Err(DatasetError::InvalidSplit(format!(
            "cannot hold out {} of {} characters for training",
            split.train_characters,
            characters.len()
        )));
    }

    let mut rng = split
        .seed
        .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    characters.shuffle(&mut rng);

    let mut indices = SplitIndices::default();
    for (position, &label) in characters.iter().enumerate() {
        let mut per_char = archive.indices_for(label);
        per_char.truncate(split.samples_per_character);

        if position < split.train_characters {
            indices.train.extend(per_char);
        } else {
            indices.test.extend(per_char);
        }
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use delan_types::Trajectory;

    fn archive(labels: &[char]) -> TrajectoryArchive {
        let mut archive = TrajectoryArchive::new();
        for &label in labels {
            archive.push(Trajectory::new(label));
        }
        archive
    }

    #[test]
    fn split_config_builder() {
        let split = CharacterSplit::new(3)
            .with_samples_per_character(5)
            .with_seed(42);
        assert_eq!(split.train_characters, 3);
        assert_eq!(split.samples_per_character, 5);
        assert_eq!(split.seed, Some(42));
        assert!(split.is_valid());
    }

    #[test]
    fn split_config_invalid() {
        assert!(!CharacterSplit::new(0).is_valid());
        assert!(!CharacterSplit::new(1).with_samples_per_character(0).is_valid());
    }

    #[test]
    fn split_partitions_by_character() {
        let archive = archive(&['a', 'b', 'c', 'a', 'b', 'c']);
        let split = CharacterSplit::new(1).with_seed(42);

        let indices = split_by_character(&archive, &split).unwrap();

        // One training character with 2 trajectories; two test characters.
        assert_eq!(indices.train.len(), 2);
        assert_eq!(indices.test.len(), 4);

        // No index in both sets.
        for idx in &indices.train {
            assert!(!indices.test.contains(idx));
        }

        // Train indices all share one label.
        let train_label = archive.trajectories[indices.train[0]].label;
        for &idx in &indices.train {
            assert_eq!(archive.trajectories[idx].label, train_label);
        }
    }

    #[test]
    fn split_caps_samples_per_character() {
        let archive = archive(&['a', 'a', 'a', 'a', 'b']);
        let split = CharacterSplit::new(1)
            .with_samples_per_character(2)
            .with_seed(0);

        let indices = split_by_character(&archive, &split).unwrap();
        assert!(indices.train.len() <= 2);
        assert!(indices.test.len() <= 2);
    }

    #[test]
    fn split_reproducible_with_seed() {
        let archive = archive(&['a', 'b', 'c', 'd', 'e']);
        let split = CharacterSplit::new(2).with_seed(7);

        let first = split_by_character(&archive, &split).unwrap();
        let second = split_by_character(&archive, &split).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn split_rejects_empty_archive() {
        let result = split_by_character(&TrajectoryArchive::new(), &CharacterSplit::new(1));
        assert!(matches!(result, Err(DatasetError::EmptyArchive)));
    }

    #[test]
    fn split_rejects_no_test_characters() {
        let archive = archive(&['a', 'b']);
        let result = split_by_character(&archive, &CharacterSplit::new(2));
        assert!(matches!(result, Err(DatasetError::InvalidSplit(_))));
    }
}
