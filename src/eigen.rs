use nalgebra::{Matrix4, SymmetricEigen, Vector4};

use crate::traits::SymmetricEigenSolver;

#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EigenSolverParams {
    /// Off-diagonal magnitude below which the iteration counts as converged.
    pub epsilon: f64,
    /// Iteration cap. Zero means unbounded.
    pub max_iterations: usize,
}

impl Default for EigenSolverParams {
    fn default() -> Self {
        Self {
            epsilon: f64::EPSILON,
            max_iterations: 1000,
        }
    }
}

/// Solver backed by [`nalgebra::SymmetricEigen`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct NalgebraEigenSolver {
    params: EigenSolverParams,
}

impl NalgebraEigenSolver {
    pub fn new(params: EigenSolverParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &EigenSolverParams {
        &self.params
    }
}

impl SymmetricEigenSolver for NalgebraEigenSolver {
    fn decompose(&self, matrix: &Matrix4<f64>) -> Option<(Vector4<f64>, Matrix4<f64>)> {
        let eigen =
            SymmetricEigen::try_new(*matrix, self.params.epsilon, self.params.max_iterations)?;
        Some((eigen.eigenvalues, eigen.eigenvectors))
    }
}

/// Column of `eigenvectors` belonging to the largest eigenvalue.
///
/// The scan uses a strict comparison, so among equal maxima the lowest index
/// wins. A NaN eigenvalue never compares greater and is skipped.
#[must_use]
pub fn dominant_eigenvector(eigenvalues: &Vector4<f64>, eigenvectors: &Matrix4<f64>) -> Vector4<f64> {
    let mut index = 0;
    let mut max = eigenvalues[0];
    for (i, &value) in eigenvalues.iter().enumerate().skip(1) {
        if value > max {
            max = value;
            index = i;
        }
    }
    eigenvectors.column(index).into_owned()
}
