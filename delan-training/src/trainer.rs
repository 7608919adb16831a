//! The epoch/batch training loop and evaluation passes.
//!
//! Each trajectory is one batch, matching how the recordings are consumed.
//! Per batch: forward, MSE on the composed torque, backward, optimizer step
//! (with gradient-norm clipping applied through the optimizer); the learning
//! rate schedule advances once per epoch. Reverse-mode gradients for the
//! learning step come from Burn's autodiff and never touch the models'
//! analytic forward-mode derivative tensors.

use std::time::Instant;

use burn::grad_clipping::GradientClippingConfig;
use burn::module::AutodiffModule;
use burn::optim::decay::WeightDecayConfig;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::prelude::Backend;
use burn::tensor::backend::AutodiffBackend;
use burn::tensor::{ElementConversion, Tensor, TensorData};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use delan_dataset::{batch_trajectory, TrajectoryBatch};
use delan_models::{DelanNetwork, TorquePredictor};
use delan_types::Trajectory;

use crate::config::TrainingConfig;
use crate::error::{Result, TrainingError};
use crate::loss::{mse_loss, DynamicsEvaluation};
use crate::metrics::{EpochMetrics, TrainingMetrics};

fn state_tensor<B: Backend>(batch: &TrajectoryBatch, device: &B::Device) -> Tensor<B, 2> {
    Tensor::from_data(
        TensorData::new(batch.states.clone(), [batch.len, 3 * batch.dof]),
        device,
    )
}

fn target_tensor<B: Backend>(
    values: &[f32],
    len: usize,
    dof: usize,
    device: &B::Device,
) -> Tensor<B, 2> {
    Tensor::from_data(TensorData::new(values.to_vec(), [len, dof]), device)
}

fn prepare_batches(
    trajectories: &[Trajectory],
    model_dof: usize,
) -> Result<Vec<TrajectoryBatch>> {
    if trajectories.is_empty() {
        return Err(TrainingError::dataset("no trajectories provided"));
    }
    let batches = trajectories
        .iter()
        .map(batch_trajectory)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    for batch in &batches {
        if batch.dof != model_dof {
            return Err(TrainingError::model(format!(
                "trajectory '{}' has dof {}, model expects {}",
                batch.label, batch.dof, model_dof
            )));
        }
    }
    Ok(batches)
}

/// Trains a torque model on the given trajectories.
///
/// Consumes and returns the model (Burn optimizers move modules through
/// each step). The same loop trains the structured network and the
/// feed-forward baseline; only the [`TorquePredictor`] seam is used.
///
/// # Errors
///
/// Returns `TrainingError::InvalidConfig` for an invalid configuration,
/// `TrainingError::Dataset` for empty or malformed trajectories, or
/// `TrainingError::Model` on a dof mismatch.
pub fn train_model<B, M>(
    mut model: M,
    trajectories: &[Trajectory],
    config: &TrainingConfig,
    device: &B::Device,
) -> Result<(M, TrainingMetrics)>
where
    B: AutodiffBackend,
    M: AutodiffModule<B> + TorquePredictor<B>,
{
    if !config.is_valid() {
        return Err(TrainingError::invalid_config(format!("{config:?}")));
    }
    let batches = prepare_batches(trajectories, model.dof())?;

    if let Some(seed) = config.seed {
        B::seed(seed);
    }

    let mut optimizer = AdamConfig::new()
        .with_beta_1(config.optimizer.beta1)
        .with_beta_2(config.optimizer.beta2)
        .with_epsilon(config.optimizer.epsilon)
        .with_weight_decay(Some(WeightDecayConfig::new(config.optimizer.weight_decay)))
        .with_grad_clipping(
            (config.gradient_clip > 0.0).then_some(GradientClippingConfig::Norm(config.gradient_clip)),
        )
        .init();

    let mut rng = config
        .seed
        .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    let mut order: Vec<usize> = (0..batches.len()).collect();
    let mut metrics = TrainingMetrics::new();

    for epoch in 0..config.epochs {
        let started = Instant::now();
        if config.shuffle {
            order.shuffle(&mut rng);
        }
        let lr = config
            .lr_schedule
            .compute_lr(config.optimizer.learning_rate, epoch, config.epochs);

        let mut epoch_loss = 0.0_f32;
        let mut samples = 0;
        for &index in &order {
            let batch = &batches[index];
            let states = state_tensor::<B>(batch, device);
            let targets = target_tensor::<B>(&batch.torques, batch.len, batch.dof, device);

            let prediction = model.predict_torque(states);
            let loss = mse_loss(prediction, targets);
            let batch_loss: f32 = loss.clone().into_scalar().elem();

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optimizer.step(f64::from(lr), model, grads);

            epoch_loss += batch_loss;
            samples += batch.len;
            debug!(epoch, batch = index, loss = batch_loss, "batch step");
        }

        #[allow(clippy::cast_precision_loss)]
        let mean_loss = epoch_loss / batches.len() as f32;
        info!(epoch, loss = mean_loss, lr, "epoch complete");

        metrics.add_epoch(
            EpochMetrics::new(epoch, mean_loss)
                .with_learning_rate(lr)
                .with_train_time(started.elapsed().as_secs_f32())
                .with_samples(samples),
        );
    }

    Ok((model, metrics))
}

/// Evaluates a torque model: mean of per-trajectory torque MSEs.
///
/// Forward passes only; parameters are untouched.
///
/// # Errors
///
/// Returns `TrainingError::Dataset` for empty or malformed trajectories, or
/// `TrainingError::Model` on a dof mismatch.
pub fn evaluate_model<B, M>(
    model: &M,
    trajectories: &[Trajectory],
    device: &B::Device,
) -> Result<f32>
where
    B: Backend,
    M: TorquePredictor<B>,
{
    let batches = prepare_batches(trajectories, model.dof())?;

    let mut total = 0.0_f32;
    for batch in &batches {
        let states = state_tensor::<B>(batch, device);
        let targets = target_tensor::<B>(&batch.torques, batch.len, batch.dof, device);
        let loss: f32 = mse_loss(model.predict_torque(states), targets)
            .into_scalar()
            .elem();
        total += loss;
    }
    #[allow(clippy::cast_precision_loss)]
    Ok(total / batches.len() as f32)
}

/// Evaluates the structured model term by term against known dynamics.
///
/// Diagnostic only: compares the predicted `τ`, `H·q̈`, `c`, and `g`
/// against the recorded ground truth for each, averaged across
/// trajectories.
///
/// # Errors
///
/// Returns `TrainingError::Dataset` for empty or malformed trajectories, or
/// `TrainingError::Model` on a dof mismatch.
pub fn evaluate_dynamics<B: Backend>(
    model: &DelanNetwork<B>,
    trajectories: &[Trajectory],
    device: &B::Device,
) -> Result<DynamicsEvaluation> {
    let batches = prepare_batches(trajectories, model.dof())?;

    let mut eval = DynamicsEvaluation::default();
    for batch in &batches {
        let states = state_tensor::<B>(batch, device);
        let prediction = model.forward(states);

        let pairs = [
            (&prediction.torque, &batch.torques, &mut eval.torque_mse),
            (&prediction.inertia, &batch.inertia, &mut eval.inertia_mse),
            (&prediction.coriolis, &batch.coriolis, &mut eval.coriolis_mse),
            (&prediction.gravity, &batch.gravity, &mut eval.gravity_mse),
        ];
        for (predicted, truth, accumulator) in pairs {
            let target = target_tensor::<B>(truth, batch.len, batch.dof, device);
            let mse: f32 = mse_loss(predicted.clone(), target).into_scalar().elem();
            *accumulator += mse;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let count = batches.len() as f32;
    eval.torque_mse /= count;
    eval.inertia_mse /= count;
    eval.coriolis_mse /= count;
    eval.gravity_mse /= count;
    Ok(eval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptimizerConfig;
    use burn::backend::Autodiff;
    use burn_ndarray::NdArray;
    use delan_dataset::{generate_archive, TwoLinkArm};
    use delan_models::{DelanConfig, DelanNetwork, FeedForwardConfig, FeedForwardNetwork};

    type TestBackend = Autodiff<NdArray<f32>>;

    fn device() -> <TestBackend as Backend>::Device {
        <TestBackend as Backend>::Device::default()
    }

    /// 3 characters, 2 trajectories each, known closed-form ground truth.
    fn synthetic_trajectories() -> Vec<Trajectory> {
        let arm = TwoLinkArm::default();
        generate_archive(&arm, &['a', 'b', 'c'], 2, 40, 0.02, 42).trajectories
    }

    fn quick_config(epochs: usize) -> TrainingConfig {
        TrainingConfig::new(epochs)
            .with_optimizer(OptimizerConfig::adam(1e-2))
            .with_seed(0)
    }

    #[test]
    fn train_rejects_invalid_config() {
        let model = DelanNetwork::<TestBackend>::new(DelanConfig::new(2), &device());
        let result = train_model::<TestBackend, _>(
            model,
            &synthetic_trajectories(),
            &quick_config(0),
            &device(),
        );
        assert!(matches!(result, Err(TrainingError::InvalidConfig(_))));
    }

    #[test]
    fn train_rejects_empty_dataset() {
        let model = DelanNetwork::<TestBackend>::new(DelanConfig::new(2), &device());
        let result = train_model::<TestBackend, _>(model, &[], &quick_config(1), &device());
        assert!(matches!(result, Err(TrainingError::Dataset(_))));
    }

    #[test]
    fn train_rejects_dof_mismatch() {
        let model = DelanNetwork::<TestBackend>::new(DelanConfig::new(3), &device());
        let result = train_model::<TestBackend, _>(
            model,
            &synthetic_trajectories(),
            &quick_config(1),
            &device(),
        );
        assert!(matches!(result, Err(TrainingError::Model(_))));
    }

    #[test]
    fn train_reduces_loss_on_synthetic_dynamics() {
        <TestBackend as Backend>::seed(1);
        let model = DelanNetwork::<TestBackend>::new(
            DelanConfig::new(2).with_hidden(16, 16),
            &device(),
        );

        let trajectories = synthetic_trajectories();
        let (_, metrics) = train_model::<TestBackend, _>(
            model,
            &trajectories[..4],
            &quick_config(15),
            &device(),
        )
        .unwrap();

        assert_eq!(metrics.epochs_completed(), 15);
        assert!(metrics.final_loss().is_finite());
        assert!(
            metrics.final_loss() < metrics.initial_loss(),
            "training loss should decrease: {} -> {}",
            metrics.initial_loss(),
            metrics.final_loss()
        );
    }

    #[test]
    fn structured_model_not_worse_than_baseline() {
        // When the data really is rigid-body dynamics, the structured model
        // must not lose badly to the unstructured regressor on unseen
        // characters.
        let trajectories = synthetic_trajectories();
        let (train_set, test_set) = trajectories.split_at(4);
        let config = quick_config(25);

        <TestBackend as Backend>::seed(1);
        let delan = DelanNetwork::<TestBackend>::new(
            DelanConfig::new(2).with_hidden(16, 16),
            &device(),
        );
        let (delan, _) =
            train_model::<TestBackend, _>(delan, train_set, &config, &device()).unwrap();
        let delan_mse = evaluate_model::<TestBackend, _>(&delan, test_set, &device()).unwrap();

        <TestBackend as Backend>::seed(1);
        let baseline = FeedForwardNetwork::<TestBackend>::new(
            FeedForwardConfig::new(2).with_hidden(16, 16),
            &device(),
        );
        let (baseline, _) =
            train_model::<TestBackend, _>(baseline, train_set, &config, &device()).unwrap();
        let baseline_mse =
            evaluate_model::<TestBackend, _>(&baseline, test_set, &device()).unwrap();

        assert!(delan_mse.is_finite());
        assert!(baseline_mse.is_finite());
        assert!(
            delan_mse <= baseline_mse * 2.0,
            "structured model lost badly to baseline: {delan_mse} vs {baseline_mse}"
        );
    }

    #[test]
    fn evaluate_dynamics_reports_all_terms() {
        <TestBackend as Backend>::seed(3);
        let model = DelanNetwork::<TestBackend>::new(
            DelanConfig::new(2).with_hidden(8, 8),
            &device(),
        );

        let trajectories = synthetic_trajectories();
        let eval =
            evaluate_dynamics::<TestBackend>(&model, &trajectories[..2], &device()).unwrap();

        assert!(eval.torque_mse.is_finite());
        assert!(eval.inertia_mse.is_finite());
        assert!(eval.coriolis_mse.is_finite());
        assert!(eval.gravity_mse.is_finite());
        assert!(!eval.summary().is_empty());
    }

    #[test]
    fn evaluate_is_idempotent() {
        <TestBackend as Backend>::seed(5);
        let model = DelanNetwork::<TestBackend>::new(
            DelanConfig::new(2).with_hidden(8, 8),
            &device(),
        );
        let trajectories = synthetic_trajectories();

        let first = evaluate_model::<TestBackend, _>(&model, &trajectories, &device()).unwrap();
        let second = evaluate_model::<TestBackend, _>(&model, &trajectories, &device()).unwrap();
        assert_eq!(first, second);
    }
}
