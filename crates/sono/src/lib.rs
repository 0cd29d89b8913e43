//! Freehand 3D ultrasound reconstruction in Rust.
//!
//! This top-level crate re-exports the workspace members: image and mask
//! containers, tracked-pose records, output-volume sizing, the
//! pixel-nearest-neighbour reconstruction pipeline, and temporal
//! calibration of the image and tracker clocks.

#[doc(inline)]
pub use sono_image as image;

#[doc(inline)]
pub use sono_track as track;

#[doc(inline)]
pub use sono_volume as volume;

#[doc(inline)]
pub use sono_reconstruct as reconstruct;

#[doc(inline)]
pub use sono_calibrate as calibrate;
