#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the calibration module.
pub mod error;

/// motion signal extraction and resampling.
pub mod signal;

/// the temporal calibration algorithm.
pub mod temporal;

/// plain-text debug trace output.
pub mod trace;

pub use crate::error::CalibrateError;
pub use crate::temporal::{
    CalibrationInput, CalibrationResult, ShiftMethod, TemporalCalibration,
};
pub use crate::trace::TraceData;
