//! Comparison plots of predicted vs. ground-truth torque traces.

use std::path::Path;

use plotters::prelude::*;

use crate::error::{Result, TrainingError};

/// Renders one trajectory's predicted and ground-truth torques, one panel
/// per joint, to a PNG file.
///
/// Both slices are row-major `[n, dof]`, the layout
/// `delan_dataset::TrajectoryBatch` produces.
///
/// # Errors
///
/// Returns `TrainingError::InvalidConfig` if the slices are empty, disagree
/// in length, or are not a multiple of `dof`; `TrainingError::Plot` if
/// rendering fails.
#[allow(clippy::cast_possible_truncation)]
pub fn plot_torque_comparison(
    path: impl AsRef<Path>,
    title: &str,
    predicted: &[f32],
    actual: &[f32],
    dof: usize,
) -> Result<()> {
    if dof == 0 || actual.is_empty() || actual.len() % dof != 0 {
        return Err(TrainingError::invalid_config(format!(
            "torque trace of {} values does not factor into dof {dof}",
            actual.len()
        )));
    }
    if predicted.len() != actual.len() {
        return Err(TrainingError::invalid_config(format!(
            "predicted trace has {} values, actual has {}",
            predicted.len(),
            actual.len()
        )));
    }
    let steps = actual.len() / dof;

    let root = BitMapBackend::new(path.as_ref(), (1600, 420 * dof as u32)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| TrainingError::plot(e.to_string()))?;
    let panels = root.split_evenly((dof, 1));

    for (joint, panel) in panels.iter().enumerate() {
        let joint_values = |trace: &[f32]| -> Vec<f32> {
            (0..steps).map(|i| trace[i * dof + joint]).collect()
        };
        let actual_joint = joint_values(actual);
        let predicted_joint = joint_values(predicted);

        let y_min = actual_joint
            .iter()
            .chain(&predicted_joint)
            .copied()
            .fold(f32::INFINITY, f32::min);
        let y_max = actual_joint
            .iter()
            .chain(&predicted_joint)
            .copied()
            .fold(f32::NEG_INFINITY, f32::max);
        let pad = (y_max - y_min).max(0.01) * 0.05;

        let mut chart = ChartBuilder::on(panel)
            .caption(format!("{title} - joint {joint}"), ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0..steps, (y_min - pad)..(y_max + pad))
            .map_err(|e| TrainingError::plot(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc("Time Step")
            .y_desc(format!("Torque {joint} (N-m)"))
            .draw()
            .map_err(|e| TrainingError::plot(e.to_string()))?;

        chart
            .draw_series(LineSeries::new(
                actual_joint.into_iter().enumerate(),
                &BLUE,
            ))
            .map_err(|e| TrainingError::plot(e.to_string()))?
            .label("Calculated")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

        chart
            .draw_series(LineSeries::new(
                predicted_joint.into_iter().enumerate(),
                &RED,
            ))
            .map_err(|e| TrainingError::plot(e.to_string()))?
            .label("Predicted")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| TrainingError::plot(e.to_string()))?;
    }

    root.present()
        .map_err(|e| TrainingError::plot(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_rejects_mismatched_traces() {
        let result = plot_torque_comparison("unused.png", "t", &[1.0, 2.0], &[1.0], 1);
        assert!(matches!(result, Err(TrainingError::InvalidConfig(_))));
    }

    #[test]
    fn plot_rejects_bad_dof() {
        let result = plot_torque_comparison("unused.png", "t", &[1.0; 3], &[1.0; 3], 2);
        assert!(matches!(result, Err(TrainingError::InvalidConfig(_))));

        let result = plot_torque_comparison("unused.png", "t", &[], &[], 0);
        assert!(matches!(result, Err(TrainingError::InvalidConfig(_))));
    }

    #[test]
    fn plot_writes_png() {
        let dir = std::env::temp_dir().join("delan-plot-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("torque.png");

        let actual: Vec<f32> = (0..40)
            .flat_map(|i| {
                let t = i as f32 * 0.1;
                [t.sin(), t.cos()]
            })
            .collect();
        let predicted: Vec<f32> = actual.iter().map(|v| v * 0.9).collect();

        plot_torque_comparison(&path, "Reacher DeLaN", &predicted, &actual, 2).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);

        let _ = std::fs::remove_dir_all(dir);
    }
}
