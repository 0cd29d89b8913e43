#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// rigid tracked poses.
pub mod pose;

/// timestamped frame and position records.
pub mod timed;

pub use crate::pose::Pose;
pub use crate::timed::{TimedFrame, TimedPosition};
