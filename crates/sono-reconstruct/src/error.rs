/// An error type for the reconstruction module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ReconstructError {
    /// Error when no frames or no poses were supplied.
    #[error("No tracked frames to reconstruct")]
    NoFrames,

    /// Error when the interpolation search radius is out of range.
    #[error("Interpolation steps must be in 1..=10, got {0}")]
    InvalidInterpolationSteps(usize),

    /// The reconstruction was cancelled by the caller.
    #[error("Reconstruction cancelled")]
    Cancelled,
}
