//! Ground-truth rigid-body dynamics terms for one sample.

use serde::{Deserialize, Serialize};

use crate::error::{DelanTypesError, Result};

/// The decomposed dynamics of one sample: `τ = H·q̈ + c + g`.
///
/// All vectors have width `d`; the mass matrix is stored row-major with
/// `d * d` entries.
///
/// # Example
///
/// ```
/// use delan_types::DynamicsTerms;
///
/// let terms = DynamicsTerms::new(
///     vec![1.0, 2.0],                 // τ
///     vec![0.5, 0.5],                 // g
///     vec![0.0, 0.0],                 // c
///     vec![1.0, 0.0, 0.0, 1.0],       // H, row-major
/// ).unwrap();
///
/// assert_eq!(terms.dof(), 2);
/// assert!((terms.mass_entry(1, 1) - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicsTerms {
    /// Generalized torque `τ`.
    pub torque: Vec<f32>,

    /// Gravity torque `g(q)`.
    pub gravity: Vec<f32>,

    /// Coriolis/centripetal torque `c(q, q̇)`.
    pub coriolis: Vec<f32>,

    /// Mass matrix `H(q)`, row-major, `d * d` entries.
    pub mass_matrix: Vec<f32>,
}

impl DynamicsTerms {
    /// Creates new dynamics terms.
    ///
    /// # Errors
    ///
    /// Returns `DelanTypesError::EmptyState` for an empty torque vector,
    /// `DelanTypesError::TermWidthMismatch` if gravity or Coriolis widths
    /// disagree with the torque width, or `DelanTypesError::MassMatrixSize`
    /// if the mass matrix is not `d * d`.
    pub fn new(
        torque: Vec<f32>,
        gravity: Vec<f32>,
        coriolis: Vec<f32>,
        mass_matrix: Vec<f32>,
    ) -> Result<Self> {
        let d = torque.len();
        if d == 0 {
            return Err(DelanTypesError::EmptyState);
        }
        for (term, actual) in [("gravity", gravity.len()), ("coriolis", coriolis.len())] {
            if actual != d {
                return Err(DelanTypesError::TermWidthMismatch {
                    term,
                    expected: d,
                    actual,
                });
            }
        }
        if mass_matrix.len() != d * d {
            return Err(DelanTypesError::MassMatrixSize {
                expected: d * d,
                actual: mass_matrix.len(),
            });
        }
        Ok(Self {
            torque,
            gravity,
            coriolis,
            mass_matrix,
        })
    }

    /// Returns the number of joints.
    #[must_use]
    pub fn dof(&self) -> usize {
        self.torque.len()
    }

    /// Returns the mass matrix entry `H[row, col]`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of range.
    #[must_use]
    pub fn mass_entry(&self, row: usize, col: usize) -> f32 {
        let d = self.dof();
        assert!(row < d && col < d, "mass matrix index out of range");
        self.mass_matrix[row * d + col]
    }

    /// Computes the inertial torque `H·q̈` against a given acceleration.
    ///
    /// # Panics
    ///
    /// Panics if `accelerations` does not have width `d`.
    #[must_use]
    pub fn inertial_torque(&self, accelerations: &[f32]) -> Vec<f32> {
        let d = self.dof();
        assert_eq!(accelerations.len(), d, "acceleration width mismatch");
        (0..d)
            .map(|row| {
                (0..d)
                    .map(|col| self.mass_entry(row, col) * accelerations[col])
                    .sum()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_terms() -> DynamicsTerms {
        DynamicsTerms::new(
            vec![1.0, 2.0],
            vec![0.5, 0.5],
            vec![0.1, -0.1],
            vec![2.0, 0.5, 0.5, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn terms_new() {
        let terms = sample_terms();
        assert_eq!(terms.dof(), 2);
    }

    #[test]
    fn terms_width_mismatch() {
        let err = DynamicsTerms::new(vec![1.0, 2.0], vec![0.5], vec![0.0, 0.0], vec![0.0; 4]);
        assert!(matches!(
            err,
            Err(DelanTypesError::TermWidthMismatch {
                term: "gravity",
                ..
            })
        ));
    }

    #[test]
    fn terms_mass_size_mismatch() {
        let err = DynamicsTerms::new(vec![1.0, 2.0], vec![0.0; 2], vec![0.0; 2], vec![0.0; 3]);
        assert!(matches!(
            err,
            Err(DelanTypesError::MassMatrixSize {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn terms_mass_entry() {
        let terms = sample_terms();
        assert!((terms.mass_entry(0, 0) - 2.0).abs() < 1e-6);
        assert!((terms.mass_entry(0, 1) - 0.5).abs() < 1e-6);
        assert!((terms.mass_entry(1, 0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn terms_inertial_torque() {
        let terms = sample_terms();
        let inertial = terms.inertial_torque(&[1.0, 2.0]);
        // [2.0*1 + 0.5*2, 0.5*1 + 1.0*2]
        assert!((inertial[0] - 3.0).abs() < 1e-6);
        assert!((inertial[1] - 2.5).abs() < 1e-6);
    }

    #[test]
    fn terms_serialization() {
        let terms = sample_terms();
        let json = serde_json::to_string(&terms);
        assert!(json.is_ok());

        let parsed: std::result::Result<DynamicsTerms, _> =
            serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap(), terms);
    }
}
