//! Trajectory archive persistence.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use delan_types::Trajectory;

use crate::error::{DatasetError, Result};

/// A collection of recorded trajectories, the unit of dataset persistence.
///
/// Stored as JSON on disk.
///
/// # Example
///
/// ```
/// use delan_dataset::TrajectoryArchive;
/// use delan_types::Trajectory;
///
/// let mut archive = TrajectoryArchive::new();
/// archive.push(Trajectory::new('a'));
/// archive.push(Trajectory::new('b'));
/// archive.push(Trajectory::new('a'));
///
/// assert_eq!(archive.len(), 3);
/// assert_eq!(archive.characters(), vec!['a', 'b']);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryArchive {
    /// The stored trajectories.
    pub trajectories: Vec<Trajectory>,
}

impl TrajectoryArchive {
    /// Creates an empty archive.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            trajectories: Vec::new(),
        }
    }

    /// Appends a trajectory.
    pub fn push(&mut self, trajectory: Trajectory) {
        self.trajectories.push(trajectory);
    }

    /// Returns the number of trajectories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    /// Returns `true` if the archive holds no trajectories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    /// Returns the distinct character labels in first-seen order.
    #[must_use]
    pub fn characters(&self) -> Vec<char> {
        let mut seen = Vec::new();
        for traj in &self.trajectories {
            if !seen.contains(&traj.label) {
                seen.push(traj.label);
            }
        }
        seen
    }

    /// Returns indices of all trajectories with the given label.
    #[must_use]
    pub fn indices_for(&self, label: char) -> Vec<usize> {
        self.trajectories
            .iter()
            .enumerate()
            .filter(|(_, t)| t.label == label)
            .map(|(i, _)| i)
            .collect()
    }

    /// Loads an archive from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Io` if the file cannot be read,
    /// `DatasetError::Serialization` if the JSON is malformed, or
    /// `DatasetError::EmptyArchive` if it parses but holds no trajectories.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let archive: Self = serde_json::from_reader(BufReader::new(file))?;
        if archive.is_empty() {
            return Err(DatasetError::EmptyArchive);
        }
        Ok(archive)
    }

    /// Saves the archive to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Io` if the file cannot be written, or
    /// `DatasetError::Serialization` if encoding fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delan_types::{DynamicsTerms, JointState, TrajectorySample};

    fn trajectory(label: char) -> Trajectory {
        let mut traj = Trajectory::new(label);
        let state = JointState::at_rest(vec![0.1, 0.2]).unwrap();
        let terms = DynamicsTerms::new(
            vec![1.0, 2.0],
            vec![1.0, 2.0],
            vec![0.0, 0.0],
            vec![1.0, 0.0, 0.0, 1.0],
        )
        .unwrap();
        traj.push(TrajectorySample::new(state, terms).unwrap()).unwrap();
        traj
    }

    #[test]
    fn archive_characters_first_seen_order() {
        let mut archive = TrajectoryArchive::new();
        archive.push(trajectory('b'));
        archive.push(trajectory('a'));
        archive.push(trajectory('b'));

        assert_eq!(archive.characters(), vec!['b', 'a']);
    }

    #[test]
    fn archive_indices_for() {
        let mut archive = TrajectoryArchive::new();
        archive.push(trajectory('a'));
        archive.push(trajectory('b'));
        archive.push(trajectory('a'));

        assert_eq!(archive.indices_for('a'), vec![0, 2]);
        assert_eq!(archive.indices_for('z'), Vec::<usize>::new());
    }

    #[test]
    fn archive_save_load_round_trip() {
        let mut archive = TrajectoryArchive::new();
        archive.push(trajectory('a'));
        archive.push(trajectory('b'));

        let dir = std::env::temp_dir().join("delan-archive-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("archive.json");

        archive.save(&path).unwrap();
        let loaded = TrajectoryArchive::load(&path).unwrap();
        assert_eq!(loaded, archive);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn archive_load_missing_file() {
        let result = TrajectoryArchive::load("/nonexistent/archive.json");
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }

    #[test]
    fn archive_load_rejects_empty() {
        let dir = std::env::temp_dir().join("delan-archive-empty-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("empty.json");

        TrajectoryArchive::new().save(&path).unwrap();
        let result = TrajectoryArchive::load(&path);
        assert!(matches!(result, Err(DatasetError::EmptyArchive)));

        let _ = std::fs::remove_dir_all(dir);
    }
}
