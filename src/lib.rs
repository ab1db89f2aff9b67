#![no_std]
#![allow(clippy::needless_doctest_main)]
#![doc = include_str!("../README.md")]

mod averager;
mod eigen;
mod error;
mod traits;

pub use averager::{QuaternionAverager, SmoothingParams};
pub use eigen::{dominant_eigenvector, EigenSolverParams, NalgebraEigenSolver};
pub use error::SmoothingError;
pub use traits::SymmetricEigenSolver;
