use sono_track::{TimedFrame, TimedPosition};
use sono_volume::BoundingBox3;

use crate::error::ReconstructError;

/// Compute the world-space bounding box of an acquisition.
///
/// Projects the four pixel-corner points of every frame through its pose
/// and takes the axis-aligned min/max box. This derives the acquisition
/// extent directly from the tracked frames when no external metadata is
/// available to size the output volume.
///
/// # Arguments
///
/// * `frames` - The acquired frames, index-aligned with `poses`.
/// * `poses` - The per-frame tracked poses.
/// * `pixel_spacing` - The native frame pixel spacing `[sx, sy]` in mm/pixel.
///
/// # Errors
///
/// Returns [`ReconstructError::NoFrames`] if either sequence is empty.
pub fn acquisition_extent(
    frames: &[TimedFrame],
    poses: &[TimedPosition],
    pixel_spacing: [f64; 2],
) -> Result<BoundingBox3, ReconstructError> {
    if frames.is_empty() || poses.is_empty() {
        return Err(ReconstructError::NoFrames);
    }

    let [sx, sy] = pixel_spacing;
    let corners = frames.iter().zip(poses.iter()).flat_map(|(frame, pos)| {
        let right = (frame.image.cols().saturating_sub(1)) as f64 * sx;
        let bottom = (frame.image.rows().saturating_sub(1)) as f64 * sy;
        [
            [0.0, 0.0, 0.0],
            [right, 0.0, 0.0],
            [0.0, bottom, 0.0],
            [right, bottom, 0.0],
        ]
        .map(|corner| pos.pose.transform_point(corner))
    });

    BoundingBox3::from_points(corners).ok_or(ReconstructError::NoFrames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sono_image::{Image, ImageSize};
    use sono_track::Pose;

    fn frame(w: usize, h: usize) -> TimedFrame {
        TimedFrame::new(
            0.0,
            Image::from_size_val(
                ImageSize {
                    width: w,
                    height: h,
                },
                0u8,
            )
            .unwrap(),
        )
    }

    #[test]
    fn extent_identity_pose_is_frame_rectangle() -> Result<(), ReconstructError> {
        let frames = vec![frame(11, 6)];
        let poses = vec![TimedPosition::new(0.0, Pose::identity())];

        let bbox = acquisition_extent(&frames, &poses, [0.5, 1.0])?;
        assert_eq!(bbox.min, [0.0, 0.0, 0.0]);
        assert_relative_eq!(bbox.max[0], 5.0);
        assert_relative_eq!(bbox.max[1], 5.0);
        assert_relative_eq!(bbox.max[2], 0.0);
        Ok(())
    }

    #[test]
    fn extent_translated_frames_span_both() -> Result<(), ReconstructError> {
        let frames = vec![frame(2, 2), frame(2, 2)];
        let poses = vec![
            TimedPosition::new(0.0, Pose::identity()),
            TimedPosition::new(1.0, Pose::new(*Pose::identity().rotation(), [0.0, 0.0, 3.0])),
        ];

        let bbox = acquisition_extent(&frames, &poses, [1.0, 1.0])?;
        assert_eq!(bbox.min, [0.0, 0.0, 0.0]);
        assert_eq!(bbox.max, [1.0, 1.0, 3.0]);
        Ok(())
    }

    #[test]
    fn extent_empty_input() {
        let res = acquisition_extent(&[], &[], [1.0, 1.0]);
        assert_eq!(res.err(), Some(ReconstructError::NoFrames));
    }
}
