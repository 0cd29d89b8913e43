/// An error type for the volume module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum VolumeError {
    /// Error when an acquisition bounding box has a zero or negative range.
    #[error("Degenerate acquisition extent: range is ({0}, {1}, {2}) mm")]
    DegenerateExtent(f64, f64, f64),

    /// Error when an input spacing is zero or negative.
    #[error("Input spacing must be positive, got {0} mm")]
    InvalidSpacing(f64),
}
