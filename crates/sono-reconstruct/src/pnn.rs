use sono_image::FrameMask;
use sono_track::{TimedFrame, TimedPosition};
use sono_volume::{Volume, VolumeParams};

use crate::cancel::CancelToken;
use crate::error::ReconstructError;
use crate::hole_fill::{fill_holes, DEFAULT_INTERPOLATION_STEPS};

/// Project every valid input pixel into the output volume and write it to
/// the nearest voxel (pixel-nearest-neighbour splatting).
///
/// Frames are processed in sequence order, beam (column) outer, sample
/// (row) inner; when two pixels land in the same voxel the last writer in
/// that traversal order wins. Written intensities are floor-clamped to 1
/// so a measured zero stays distinguishable from an unvisited voxel.
/// Voxels receiving no pixel remain 0 and are resolved later by
/// [`fill_holes`].
///
/// Poses are expected to map frame-local mm coordinates directly into the
/// output volume's space (origin at voxel (0, 0, 0)).
///
/// # Arguments
///
/// * `frames` - The acquired frames, index-aligned with `poses`. A count
///   mismatch is logged as a warning and the overlapping prefix is used.
/// * `poses` - The per-frame tracked poses.
/// * `mask` - The shared beam sector mask; pixels outside it are skipped.
/// * `params` - The output volume sizing.
/// * `pixel_spacing` - The native frame pixel spacing `[sx, sy]` in mm/pixel.
/// * `token` - Cancellation flag, checked between frames.
///
/// # Errors
///
/// Returns [`ReconstructError::NoFrames`] when either sequence is empty
/// and [`ReconstructError::Cancelled`] on cancellation.
pub fn splat_frames(
    frames: &[TimedFrame],
    poses: &[TimedPosition],
    mask: &FrameMask,
    params: &VolumeParams,
    pixel_spacing: [f64; 2],
    token: &CancelToken,
) -> Result<Volume, ReconstructError> {
    if frames.is_empty() || poses.is_empty() {
        return Err(ReconstructError::NoFrames);
    }
    if frames.len() != poses.len() {
        log::warn!(
            "frame count ({}) does not match pose count ({}); using the first {}",
            frames.len(),
            poses.len(),
            frames.len().min(poses.len())
        );
    }
    if let Some(frame) = frames.first() {
        if frame.image.size() != mask.size() {
            log::warn!(
                "mask size {} does not match frame size {}; out-of-mask pixels are skipped",
                mask.size(),
                frame.image.size()
            );
        }
    }

    let mut volume = Volume::from_params(params);
    let [sx, sy] = pixel_spacing;
    let out_spacing = volume.spacing();

    for (frame, pos) in frames.iter().zip(poses.iter()) {
        if token.is_cancelled() {
            return Err(ReconstructError::Cancelled);
        }

        let m = pos.pose.to_affine();
        let image = &frame.image;
        for beam in 0..image.cols() {
            for sample in 0..image.rows() {
                if !mask.is_valid(beam, sample) {
                    continue;
                }
                // SAFETY: beam/sample are bounded by the image size above
                let intensity = unsafe { *image.get_unchecked(sample, beam, 0) };

                let (lx, ly) = (beam as f64 * sx, sample as f64 * sy);
                let px = m[0] * lx + m[1] * ly + m[3];
                let py = m[4] * lx + m[5] * ly + m[7];
                let pz = m[8] * lx + m[9] * ly + m[11];

                // nearest voxel: add 0.5 and truncate toward zero
                let xi = (px / out_spacing + 0.5) as i64;
                let yi = (py / out_spacing + 0.5) as i64;
                let zi = (pz / out_spacing + 0.5) as i64;

                if volume.contains_index(xi, yi, zi) {
                    volume.set(xi as usize, yi as usize, zi as usize, intensity.max(1));
                }
            }
        }
    }

    Ok(volume)
}

/// The pixel-nearest-neighbour reconstruction pipeline: binning followed
/// by hole-filling interpolation.
#[derive(Clone, Copy, Debug)]
pub struct PnnReconstruction {
    /// Maximum cubic search radius (voxels) for hole filling, in 1..=10.
    pub interpolation_steps: usize,
}

impl Default for PnnReconstruction {
    fn default() -> Self {
        Self {
            interpolation_steps: DEFAULT_INTERPOLATION_STEPS,
        }
    }
}

impl PnnReconstruction {
    /// Run the full pipeline: splat every frame, then fill holes.
    ///
    /// See [`splat_frames`] and [`fill_holes`] for the per-pass contracts.
    pub fn reconstruct(
        &self,
        frames: &[TimedFrame],
        poses: &[TimedPosition],
        mask: &FrameMask,
        params: &VolumeParams,
        pixel_spacing: [f64; 2],
        token: &CancelToken,
    ) -> Result<Volume, ReconstructError> {
        let binned = splat_frames(frames, poses, mask, params, pixel_spacing, token)?;
        fill_holes(&binned, self.interpolation_steps, token)
    }
}
