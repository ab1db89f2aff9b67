use nalgebra::{Matrix4, Vector4};

/// Eigendecomposition of a real symmetric 4x4 matrix.
///
/// Implementations return the eigenvalues and a matrix whose `i`-th column is
/// the eigenvector of the `i`-th eigenvalue, or `None` if the decomposition
/// failed.
pub trait SymmetricEigenSolver {
    fn decompose(&self, matrix: &Matrix4<f64>) -> Option<(Vector4<f64>, Matrix4<f64>)>;
}
