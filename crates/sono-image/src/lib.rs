#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image representation for ultrasound frames.
pub mod image;

/// beam sector validity masks.
pub mod mask;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize, PixelType};
pub use crate::mask::FrameMask;
