//! Training configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a training run.
///
/// Defaults follow the reference setup for the reacher recordings: 50
/// epochs of Adam at `5e-2` with `1e-4` weight decay, gradients clipped to
/// norm 10.
///
/// # Example
///
/// ```
/// use delan_training::TrainingConfig;
///
/// let config = TrainingConfig::default();
/// assert_eq!(config.epochs, 50);
/// assert!((config.gradient_clip - 10.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training epochs.
    pub epochs: usize,

    /// Optimizer configuration.
    pub optimizer: OptimizerConfig,

    /// Learning rate schedule, stepped once per epoch.
    pub lr_schedule: LearningRateSchedule,

    /// Whether to shuffle trajectory order each epoch.
    pub shuffle: bool,

    /// Gradient norm clipping ceiling (0.0 = disabled).
    pub gradient_clip: f32,

    /// Random seed for backend init and shuffling.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::new(50)
    }
}

impl TrainingConfig {
    /// Creates a config with the given epoch count and reference defaults.
    #[must_use]
    pub const fn new(epochs: usize) -> Self {
        Self {
            epochs,
            optimizer: OptimizerConfig::adam(5e-2),
            lr_schedule: LearningRateSchedule::Constant,
            shuffle: true,
            gradient_clip: 10.0,
            seed: None,
        }
    }

    /// Sets the optimizer.
    #[must_use]
    pub const fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Sets the learning rate schedule.
    #[must_use]
    pub const fn with_lr_schedule(mut self, schedule: LearningRateSchedule) -> Self {
        self.lr_schedule = schedule;
        self
    }

    /// Sets the gradient clipping ceiling.
    #[must_use]
    pub const fn with_gradient_clip(mut self, ceiling: f32) -> Self {
        self.gradient_clip = ceiling;
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Disables trajectory shuffling.
    #[must_use]
    pub const fn without_shuffle(mut self) -> Self {
        self.shuffle = false;
        self
    }

    /// Validates the configuration.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.epochs > 0 && self.gradient_clip >= 0.0 && self.optimizer.is_valid()
    }
}

/// Adam optimizer configuration.
///
/// # Example
///
/// ```
/// use delan_training::OptimizerConfig;
///
/// let adam = OptimizerConfig::adam(1e-3);
/// assert!((adam.learning_rate - 1e-3).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Base learning rate.
    pub learning_rate: f32,

    /// Weight decay (L2 regularization).
    pub weight_decay: f32,

    /// First-moment decay.
    pub beta1: f32,

    /// Second-moment decay.
    pub beta2: f32,

    /// Epsilon for numerical stability.
    pub epsilon: f32,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::adam(5e-2)
    }
}

impl OptimizerConfig {
    /// Creates an Adam config with the reference weight decay.
    #[must_use]
    pub const fn adam(learning_rate: f32) -> Self {
        Self {
            learning_rate,
            weight_decay: 1e-4,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
        }
    }

    /// Sets the weight decay.
    #[must_use]
    pub const fn with_weight_decay(mut self, weight_decay: f32) -> Self {
        self.weight_decay = weight_decay;
        self
    }

    /// Validates the configuration.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.learning_rate > 0.0
            && self.weight_decay >= 0.0
            && self.beta1 >= 0.0
            && self.beta1 < 1.0
            && self.beta2 >= 0.0
            && self.beta2 < 1.0
            && self.epsilon > 0.0
    }
}

/// Learning rate schedule, evaluated once per epoch.
///
/// # Example
///
/// ```
/// use delan_training::LearningRateSchedule;
///
/// let schedule = LearningRateSchedule::step(0.5, 10);
/// assert!((schedule.compute_lr(1.0, 0, 50) - 1.0).abs() < 1e-6);
/// assert!((schedule.compute_lr(1.0, 10, 50) - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum LearningRateSchedule {
    /// Constant learning rate.
    #[default]
    Constant,

    /// Step decay: multiply by `factor` every `step_size` epochs.
    Step {
        /// Decay factor.
        factor: f32,
        /// Epochs between decays.
        step_size: usize,
    },

    /// Exponential decay: `lr * gamma^epoch`.
    Exponential {
        /// Decay rate per epoch.
        gamma: f32,
    },

    /// Cosine annealing to a minimum.
    Cosine {
        /// Minimum learning rate.
        min_lr: f32,
    },
}

impl LearningRateSchedule {
    /// Creates a step decay schedule.
    #[must_use]
    pub const fn step(factor: f32, step_size: usize) -> Self {
        Self::Step { factor, step_size }
    }

    /// Creates an exponential decay schedule.
    #[must_use]
    pub const fn exponential(gamma: f32) -> Self {
        Self::Exponential { gamma }
    }

    /// Creates a cosine annealing schedule.
    #[must_use]
    pub const fn cosine(min_lr: f32) -> Self {
        Self::Cosine { min_lr }
    }

    /// Computes the learning rate for a given epoch.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap
    )]
    pub fn compute_lr(&self, base_lr: f32, epoch: usize, total_epochs: usize) -> f32 {
        match self {
            Self::Constant => base_lr,

            Self::Step { factor, step_size } => {
                let decays = epoch / step_size;
                base_lr * factor.powi(decays as i32)
            }

            Self::Exponential { gamma } => base_lr * gamma.powi(epoch as i32),

            Self::Cosine { min_lr } => {
                let progress = epoch as f32 / total_epochs.max(1) as f32;
                let cosine = (std::f32::consts::PI * progress).cos();
                min_lr + (base_lr - min_lr) * (1.0 + cosine) / 2.0
            }
        }
    }
}
