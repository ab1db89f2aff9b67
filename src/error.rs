use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SmoothingError {
    #[error("symmetric eigendecomposition of the accumulator did not converge")]
    EigenDecomposition,

    #[error("smoothing parameter `{name}` must lie in (0, 1), got {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}
