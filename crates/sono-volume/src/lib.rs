#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// axis-aligned bounding boxes in world space.
pub mod bbox;

/// output volume sizing calculator.
pub mod params;

/// dense voxel volume buffers.
pub mod volume;

/// Error types for the volume module.
pub mod error;

pub use crate::bbox::BoundingBox3;
pub use crate::error::VolumeError;
pub use crate::params::{VolumeParams, DEFAULT_MAX_VOLUME_SIZE};
pub use crate::volume::Volume;
