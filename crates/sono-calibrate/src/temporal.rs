use rayon::prelude::*;

use sono_image::FrameMask;
use sono_track::{TimedFrame, TimedPosition};

use crate::error::CalibrateError;
use crate::signal;
use crate::trace::TraceData;

/// Default resample grid step in milliseconds.
pub const DEFAULT_RESOLUTION_MS: f64 = 5.0;

/// Default half range of the time-shift search in milliseconds.
pub const DEFAULT_MAX_SHIFT_MS: f64 = 1000.0;

/// Default half-width of the axial correlation window in millimetres.
pub const DEFAULT_SEARCH_RANGE_MM: f64 = 5.0;

/// Fraction of exactly-zero frame motion samples above which the
/// calibration is rejected.
const MAX_ZERO_FRACTION: f64 = 0.2;

/// How candidate shifts are scored against the overlapping series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShiftMethod {
    /// Minimize the RMS error between the series (the production path).
    #[default]
    LeastSquares,
    /// Maximize the direct cross-correlation (alternative path).
    Correlation,
}

/// Input data for one temporal calibration run.
///
/// All data is pre-loaded by the acquisition collaborators; the algorithm
/// performs no device or file I/O of its own.
#[derive(Clone, Copy, Debug)]
pub struct CalibrationInput<'a> {
    /// The acquired frames in time order (image clock).
    pub frames: &'a [TimedFrame],
    /// Raw tracker samples in time order (tracker clock).
    pub positions: &'a [TimedPosition],
    /// The shared beam sector mask.
    pub mask: &'a FrameMask,
    /// Native frame pixel spacing `[sx, sy]` in mm/pixel.
    pub pixel_spacing: [f64; 2],
}

/// The estimated clock offset.
///
/// Convention: `frame_time = tracker_time + shift_ms`.
#[derive(Clone, Debug)]
pub struct CalibrationResult {
    /// The total time offset in milliseconds.
    pub shift_ms: f64,
    /// The full debug trace, when collection was requested.
    pub trace: Option<TraceData>,
}

/// Estimates the fixed time offset between the ultrasound scanner's image
/// clock and the tracking system's clock by correlating a motion signal
/// derived from the images against one derived from tracking.
#[derive(Clone, Copy, Debug)]
pub struct TemporalCalibration {
    /// Resample grid step in milliseconds.
    pub resolution_ms: f64,
    /// Half range of the shift search in milliseconds.
    pub max_shift_ms: f64,
    /// Half-width of the per-frame axial correlation window in mm.
    pub search_range_mm: f64,
    /// Shift scoring method.
    pub method: ShiftMethod,
    /// The image column to correlate (the probe origin column). `None`
    /// defaults to the midpoint of the mask's valid column bounds.
    pub beam_column: Option<usize>,
    /// Whether to collect the full debug trace alongside the result.
    pub collect_trace: bool,
}

impl Default for TemporalCalibration {
    fn default() -> Self {
        Self {
            resolution_ms: DEFAULT_RESOLUTION_MS,
            max_shift_ms: DEFAULT_MAX_SHIFT_MS,
            search_range_mm: DEFAULT_SEARCH_RANGE_MM,
            method: ShiftMethod::default(),
            beam_column: None,
            collect_trace: false,
        }
    }
}

impl TemporalCalibration {
    /// Run the calibration.
    ///
    /// # Errors
    ///
    /// * [`CalibrateError::NoFrames`] / [`CalibrateError::NoTrackerPositions`]
    ///   when the corresponding input is empty.
    /// * [`CalibrateError::FlatMotionSignal`] when more than 20% of the
    ///   frame motion samples are exactly zero.
    /// * [`CalibrateError::NoOverlap`] when no candidate shift brings the
    ///   two series into overlap.
    pub fn calibrate(&self, input: &CalibrationInput) -> Result<CalibrationResult, CalibrateError> {
        if input.frames.is_empty() {
            return Err(CalibrateError::NoFrames);
        }
        if input.positions.is_empty() {
            return Err(CalibrateError::NoTrackerPositions);
        }

        let beam_column = self.beam_column.unwrap_or_else(|| {
            match input.mask.valid_column_bounds() {
                Some((lo, hi)) => (lo + hi) / 2,
                None => input.mask.size().width / 2,
            }
        });

        let frame_signal = signal::frame_motion(
            input.frames,
            input.mask,
            input.pixel_spacing,
            beam_column,
            self.search_range_mm,
        );

        let zeros = frame_signal.iter().filter(|&&(_, mm)| mm == 0.0).count();
        let zero_fraction = zeros as f64 / frame_signal.len() as f64;
        if zero_fraction > MAX_ZERO_FRACTION {
            return Err(CalibrateError::FlatMotionSignal(zero_fraction));
        }

        let tracker_signal = signal::tracker_motion(input.positions);

        let (frame_start, frame_grid) = signal::resample(&frame_signal, self.resolution_ms);
        let (tracker_start, tracker_grid) = signal::resample(&tracker_signal, self.resolution_ms);

        let max_shift = (self.max_shift_ms / self.resolution_ms).round() as i64;
        let shift_table: Vec<(i64, f64)> = (-max_shift..=max_shift)
            .into_par_iter()
            .map(|s| {
                let score = match self.method {
                    ShiftMethod::LeastSquares => rms_error(&frame_grid, &tracker_grid, s),
                    ShiftMethod::Correlation => {
                        // negate so both methods minimize
                        -correlation(&frame_grid, &tracker_grid, s)
                    }
                };
                (s, score)
            })
            .collect();

        let best_shift = shift_table
            .iter()
            .filter(|(_, score)| score.is_finite())
            .min_by(|a, b| {
                a.1.total_cmp(&b.1).then(a.0.abs().cmp(&b.0.abs()))
            })
            .map(|&(s, _)| s)
            .ok_or(CalibrateError::NoOverlap)?;

        let shift_ms = (frame_start - tracker_start) + best_shift as f64 * self.resolution_ms;

        let trace = self.collect_trace.then(|| TraceData {
            frame_signal,
            tracker_signal,
            frame_grid_start_ms: frame_start,
            tracker_grid_start_ms: tracker_start,
            resolution_ms: self.resolution_ms,
            frame_grid,
            tracker_grid,
            shift_table,
            best_shift,
            shift_ms,
        });

        Ok(CalibrationResult { shift_ms, trace })
    }
}

/// RMS error between `frame[i]` and `tracker[i - s]` over their overlap.
///
/// Returns infinity when the shifted series do not overlap.
fn rms_error(frame: &[f64], tracker: &[f64], s: i64) -> f64 {
    let lo = 0.max(s);
    let hi = (frame.len() as i64).min(tracker.len() as i64 + s);
    if lo >= hi {
        return f64::INFINITY;
    }
    let sum: f64 = (lo..hi)
        .map(|i| {
            let diff = frame[i as usize] - tracker[(i - s) as usize];
            diff * diff
        })
        .sum();
    (sum / (hi - lo) as f64).sqrt()
}

/// Mean cross-correlation of `frame[i]` with `tracker[i - s]` over the overlap.
///
/// Returns negative infinity when the shifted series do not overlap.
fn correlation(frame: &[f64], tracker: &[f64], s: i64) -> f64 {
    let lo = 0.max(s);
    let hi = (frame.len() as i64).min(tracker.len() as i64 + s);
    if lo >= hi {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = (lo..hi)
        .map(|i| frame[i as usize] * tracker[(i - s) as usize])
        .sum();
    sum / (hi - lo) as f64
}
