//! Training metrics.

use serde::{Deserialize, Serialize};

/// Metrics for a single training epoch.
///
/// # Example
///
/// ```
/// use delan_training::EpochMetrics;
///
/// let metrics = EpochMetrics::new(0, 0.5).with_learning_rate(5e-2);
/// assert_eq!(metrics.epoch, 0);
/// assert!((metrics.train_loss - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// Epoch number (0-indexed).
    pub epoch: usize,

    /// Mean training loss across the epoch's batches.
    pub train_loss: f32,

    /// Learning rate used this epoch.
    pub learning_rate: f32,

    /// Wall-clock training time in seconds.
    pub train_time_secs: f32,

    /// Number of samples processed.
    pub train_samples: usize,
}

impl EpochMetrics {
    /// Creates new epoch metrics.
    #[must_use]
    pub const fn new(epoch: usize, train_loss: f32) -> Self {
        Self {
            epoch,
            train_loss,
            learning_rate: 0.0,
            train_time_secs: 0.0,
            train_samples: 0,
        }
    }

    /// Sets the learning rate.
    #[must_use]
    pub const fn with_learning_rate(mut self, lr: f32) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Sets the training time.
    #[must_use]
    pub const fn with_train_time(mut self, secs: f32) -> Self {
        self.train_time_secs = secs;
        self
    }

    /// Sets the sample count.
    #[must_use]
    pub const fn with_samples(mut self, samples: usize) -> Self {
        self.train_samples = samples;
        self
    }
}

/// Aggregate metrics for a training run.
///
/// # Example
///
/// ```
/// use delan_training::{EpochMetrics, TrainingMetrics};
///
/// let mut metrics = TrainingMetrics::new();
/// metrics.add_epoch(EpochMetrics::new(0, 1.0));
/// metrics.add_epoch(EpochMetrics::new(1, 0.25));
///
/// assert_eq!(metrics.epochs_completed(), 2);
/// assert!((metrics.loss_improvement() - 0.75).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    /// Metrics per epoch, in order.
    pub epoch_metrics: Vec<EpochMetrics>,

    /// Total wall-clock time in seconds.
    pub total_time_secs: f32,
}

impl TrainingMetrics {
    /// Creates empty training metrics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds metrics for a completed epoch.
    pub fn add_epoch(&mut self, metrics: EpochMetrics) {
        self.total_time_secs += metrics.train_time_secs;
        self.epoch_metrics.push(metrics);
    }

    /// Returns the number of completed epochs.
    #[must_use]
    pub fn epochs_completed(&self) -> usize {
        self.epoch_metrics.len()
    }

    /// Returns the first epoch's training loss.
    #[must_use]
    pub fn initial_loss(&self) -> f32 {
        self.epoch_metrics
            .first()
            .map_or(f32::NAN, |m| m.train_loss)
    }

    /// Returns the last epoch's training loss.
    #[must_use]
    pub fn final_loss(&self) -> f32 {
        self.epoch_metrics.last().map_or(f32::NAN, |m| m.train_loss)
    }

    /// Returns the relative loss improvement over the run.
    #[must_use]
    pub fn loss_improvement(&self) -> f32 {
        let initial = self.initial_loss();
        let final_loss = self.final_loss();
        if initial > 0.0 && initial.is_finite() && final_loss.is_finite() {
            1.0 - (final_loss / initial)
        } else {
            0.0
        }
    }

    /// Returns per-epoch training losses.
    #[must_use]
    pub fn train_losses(&self) -> Vec<f32> {
        self.epoch_metrics.iter().map(|m| m.train_loss).collect()
    }

    /// Returns a human-readable summary.
    #[must_use]
    #[allow(clippy::let_underscore_must_use)] // String::write_fmt is infallible
    pub fn summary(&self) -> String {
        use std::fmt::Write;

        let mut s = String::new();
        let _ = writeln!(s, "Training Summary");
        let _ = writeln!(s, "================");
        let _ = writeln!(s, "Epochs completed: {}", self.epochs_completed());
        let _ = writeln!(s, "Total time: {:.1}s", self.total_time_secs);
        let _ = writeln!(
            s,
            "Initial loss: {:.6} -> Final loss: {:.6}",
            self.initial_loss(),
            self.final_loss()
        );
        let _ = writeln!(s, "Improvement: {:.1}%", self.loss_improvement() * 100.0);
        s
    }
}
