//! Extraction of 1D axial motion signals from images and tracker samples,
//! and their resampling onto a regular time grid.

use sono_image::{FrameMask, Image};
use sono_track::{TimedFrame, TimedPosition};

/// The probe's long axis in frame-local coordinates: image depth (rows).
const PROBE_AXIS: [f64; 3] = [0.0, 1.0, 0.0];

/// A motion signal: ordered (time ms, axial displacement mm) samples.
pub type MotionSignal = Vec<(f64, f64)>;

/// Extract the masked pixel column at `col` as f64 values.
///
/// Rows outside the mask contribute 0.0, so invalid pixels never correlate.
fn masked_column(image: &Image<u8, 1>, mask: &FrameMask, col: usize) -> Vec<f64> {
    (0..image.rows())
        .map(|row| {
            if mask.is_valid(col, row) {
                image.get_f64(row, col)
            } else {
                0.0
            }
        })
        .collect()
}

/// The lag maximizing the cross-correlation of `reference` against `current`.
///
/// Correlation at lag `k` is the mean of `reference[j] * current[j + k]`
/// over the overlapping samples; lags with no overlap are skipped. Ties
/// keep the lag closest to the center of the search window, which is the
/// previous frame's best fit.
fn best_lag(reference: &[f64], current: &[f64], lo: i64, hi: i64) -> i64 {
    let len = reference.len().min(current.len()) as i64;
    let center = (lo + hi) / 2;
    let mut best = center;
    let mut best_score = f64::NEG_INFINITY;

    for k in lo..=hi {
        let j_lo = 0.max(-k);
        let j_hi = len.min(len - k);
        if j_lo >= j_hi {
            continue;
        }
        let mut sum = 0.0;
        for j in j_lo..j_hi {
            sum += reference[j as usize] * current[(j + k) as usize];
        }
        let score = sum / (j_hi - j_lo) as f64;
        let better = score > best_score
            || (score == best_score && (k - center).abs() < (best - center).abs());
        if better {
            best_score = score;
            best = k;
        }
    }
    best
}

/// Derive the axial motion signal from image content.
///
/// For each frame, the pixel column at `beam_column` is cross-correlated
/// against the same column of the reference (first) frame over a bounded
/// lag window. The window is centered on the previous frame's best-fit
/// lag so the search stays local and tracks continuous probe motion
/// instead of jumping between unrelated correlation peaks.
///
/// # Arguments
///
/// * `frames` - The acquired frames in time order.
/// * `mask` - The shared beam sector mask.
/// * `pixel_spacing` - Native frame pixel spacing `[sx, sy]` in mm/pixel.
/// * `beam_column` - The column to correlate (the probe origin column).
/// * `search_range_mm` - Half-width of the lag window in mm.
///
/// # Panics
///
/// Panics if `frames` is empty; callers check this up front.
pub fn frame_motion(
    frames: &[TimedFrame],
    mask: &FrameMask,
    pixel_spacing: [f64; 2],
    beam_column: usize,
    search_range_mm: f64,
) -> MotionSignal {
    let sy = pixel_spacing[1];
    let range_px = ((search_range_mm / sy).ceil() as i64).max(1);

    let reference = masked_column(&frames[0].image, mask, beam_column);
    let mut prev_lag = 0i64;

    frames
        .iter()
        .map(|frame| {
            let column = masked_column(&frame.image, mask, beam_column);
            let lag = best_lag(&reference, &column, prev_lag - range_px, prev_lag + range_px);
            prev_lag = lag;
            (frame.time_ms, lag as f64 * sy)
        })
        .collect()
}

/// Derive the axial motion signal from tracker samples.
///
/// Each sample's translation is projected onto the probe's long axis,
/// transformed into reference space with the first sample's orientation;
/// the first sample's projection is subtracted so the series starts at 0.
///
/// # Panics
///
/// Panics if `positions` is empty; callers check this up front.
pub fn tracker_motion(positions: &[TimedPosition]) -> MotionSignal {
    let axis = positions[0].pose.rotate_vector(PROBE_AXIS);
    let project = |t: [f64; 3]| t[0] * axis[0] + t[1] * axis[1] + t[2] * axis[2];
    let base = project(positions[0].pose.translation());

    positions
        .iter()
        .map(|p| (p.time_ms, project(p.pose.translation()) - base))
        .collect()
}

/// Resample an irregularly-spaced signal onto a regular grid.
///
/// The grid starts at the signal's first timestamp and steps by
/// `resolution_ms` over the signal's own time range, with piecewise-linear
/// interpolation between samples.
///
/// # Returns
///
/// The grid start time and the resampled values.
pub fn resample(signal: &[(f64, f64)], resolution_ms: f64) -> (f64, Vec<f64>) {
    let Some(&(start, _)) = signal.first() else {
        return (0.0, Vec::new());
    };
    let end = signal[signal.len() - 1].0;
    let count = ((end - start) / resolution_ms).floor() as usize + 1;

    let mut values = Vec::with_capacity(count);
    let mut seg = 0usize;
    for i in 0..count {
        let t = start + i as f64 * resolution_ms;
        while seg + 2 < signal.len() && signal[seg + 1].0 < t {
            seg += 1;
        }
        let (t0, v0) = signal[seg];
        let (t1, v1) = signal[(seg + 1).min(signal.len() - 1)];
        let value = if t1 > t0 {
            v0 + (v1 - v0) * ((t - t0) / (t1 - t0)).clamp(0.0, 1.0)
        } else {
            v0
        };
        values.push(value);
    }
    (start, values)
}
