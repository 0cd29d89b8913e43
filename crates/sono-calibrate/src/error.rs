/// An error type for the calibration module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CalibrateError {
    /// Error when no image frames were supplied.
    #[error("No ultrasound frames to calibrate against")]
    NoFrames,

    /// Error when no tracker positions were supplied.
    #[error("No tracker positions to calibrate against")]
    NoTrackerPositions,

    /// Error when the frame motion signal fails the quality check.
    ///
    /// More than 20% exactly-zero samples is treated as a proxy for
    /// tracking failure or empty images; the operator must re-acquire.
    #[error("Frame motion signal is flat: {zero_fraction:.0}% of samples are zero", zero_fraction = .0 * 100.0)]
    FlatMotionSignal(f64),

    /// Error when the image and tracker series never overlap within the
    /// configured shift search range.
    #[error("Image and tracker series do not overlap within the shift search range")]
    NoOverlap,
}
