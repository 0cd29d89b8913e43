use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The full debug trace of one calibration run: raw and resampled series
/// plus the per-shift error table, for post-hoc inspection.
#[derive(Clone, Debug)]
pub struct TraceData {
    /// Raw frame motion samples (time ms, axial mm).
    pub frame_signal: Vec<(f64, f64)>,
    /// Raw tracker motion samples (time ms, axial mm).
    pub tracker_signal: Vec<(f64, f64)>,
    /// Start time of the resampled frame grid.
    pub frame_grid_start_ms: f64,
    /// Start time of the resampled tracker grid.
    pub tracker_grid_start_ms: f64,
    /// Resample grid step in milliseconds.
    pub resolution_ms: f64,
    /// Resampled frame series.
    pub frame_grid: Vec<f64>,
    /// Resampled tracker series.
    pub tracker_grid: Vec<f64>,
    /// Scored candidate shifts (grid samples, score).
    pub shift_table: Vec<(i64, f64)>,
    /// The winning shift in grid samples.
    pub best_shift: i64,
    /// The total time offset in milliseconds.
    pub shift_ms: f64,
}

impl TraceData {
    /// Write the trace as plain text, logging a warning on failure.
    ///
    /// A failed write never fails the calibration that produced the trace.
    pub fn write(&self, path: &Path) {
        if let Err(err) = self.try_write(path) {
            log::warn!(
                "failed to write calibration trace to {}: {}",
                path.display(),
                err
            );
        }
    }

    /// Write the trace as plain text.
    pub fn try_write(&self, path: &Path) -> std::io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);

        writeln!(out, "# temporal calibration trace")?;
        writeln!(out, "shift_ms = {}", self.shift_ms)?;
        writeln!(
            out,
            "best_shift = {} samples ({} ms resolution)",
            self.best_shift, self.resolution_ms
        )?;
        writeln!(out, "frame_grid_start_ms = {}", self.frame_grid_start_ms)?;
        writeln!(out, "tracker_grid_start_ms = {}", self.tracker_grid_start_ms)?;

        writeln!(out, "\n# frame motion signal (time_ms, mm)")?;
        for (t, mm) in &self.frame_signal {
            writeln!(out, "{t}\t{mm}")?;
        }

        writeln!(out, "\n# tracker motion signal (time_ms, mm)")?;
        for (t, mm) in &self.tracker_signal {
            writeln!(out, "{t}\t{mm}")?;
        }

        writeln!(out, "\n# resampled frame series")?;
        for v in &self.frame_grid {
            writeln!(out, "{v}")?;
        }

        writeln!(out, "\n# resampled tracker series")?;
        for v in &self.tracker_grid {
            writeln!(out, "{v}")?;
        }

        writeln!(out, "\n# shift table (samples, score)")?;
        for (s, score) in &self.shift_table {
            writeln!(out, "{s}\t{score}")?;
        }

        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trace() -> TraceData {
        TraceData {
            frame_signal: vec![(0.0, 0.0), (20.0, 1.0)],
            tracker_signal: vec![(0.0, 0.0), (15.0, 0.75)],
            frame_grid_start_ms: 0.0,
            tracker_grid_start_ms: 0.0,
            resolution_ms: 5.0,
            frame_grid: vec![0.0, 0.25],
            tracker_grid: vec![0.0, 0.25],
            shift_table: vec![(-1, 0.3), (0, 0.0), (1, 0.3)],
            best_shift: 0,
            shift_ms: 42.0,
        }
    }

    #[test]
    fn trace_round_trip() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("calibration.txt");

        sample_trace().try_write(&path)?;

        let text = std::fs::read_to_string(&path)?;
        assert!(text.contains("shift_ms = 42"));
        assert!(text.contains("# shift table"));
        assert!(text.contains("0\t0"));
        Ok(())
    }

    #[test]
    fn trace_write_swallows_io_errors() {
        // a directory that does not exist: write must not panic
        sample_trace().write(Path::new("/nonexistent/calibration.txt"));
    }
}
