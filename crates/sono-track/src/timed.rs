use sono_image::Image;

use crate::pose::Pose;

/// A timestamped tracker sample: the probe pose at acquisition time.
///
/// Used both for per-frame poses handed to reconstruction and for raw
/// tracker samples handed to temporal calibration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedPosition {
    /// Acquisition timestamp in milliseconds.
    pub time_ms: f64,
    /// Rigid transform into reference space at acquisition time.
    pub pose: Pose,
}

impl TimedPosition {
    /// Create a timed position.
    pub fn new(time_ms: f64, pose: Pose) -> Self {
        Self { time_ms, pose }
    }
}

/// A timestamped 2D ultrasound frame.
///
/// Frames and their poses arrive as two parallel, index-aligned sequences
/// since the frame grabber and the tracker are separate devices; the
/// reconstruction entry points pair them by index.
#[derive(Clone, Debug)]
pub struct TimedFrame {
    /// Acquisition timestamp in milliseconds (image clock).
    pub time_ms: f64,
    /// Single-channel pixel data.
    pub image: Image<u8, 1>,
}

impl TimedFrame {
    /// Create a timed frame.
    pub fn new(time_ms: f64, image: Image<u8, 1>) -> Self {
        Self { time_ms, image }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sono_image::ImageSize;

    #[test]
    fn timed_records_hold_their_data() {
        let pos = TimedPosition::new(12.5, Pose::identity());
        assert_eq!(pos.time_ms, 12.5);

        let image = Image::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            1u8,
        )
        .unwrap();
        let frame = TimedFrame::new(40.0, image);
        assert_eq!(frame.time_ms, 40.0);
        assert_eq!(frame.image.numel(), 4);
    }
}
