#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// cooperative cancellation of long-running reconstructions.
pub mod cancel;

/// Error types for the reconstruction module.
pub mod error;

/// acquisition extent computation from tracked frames.
pub mod extent;

/// hole-filling interpolation of binned volumes.
pub mod hole_fill;

/// pixel-nearest-neighbour binning.
pub mod pnn;

pub use crate::cancel::CancelToken;
pub use crate::error::ReconstructError;
pub use crate::extent::acquisition_extent;
pub use crate::hole_fill::{fill_holes, DEFAULT_INTERPOLATION_STEPS, MAX_INTERPOLATION_STEPS};
pub use crate::pnn::{splat_frames, PnnReconstruction};
