use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::loaders::FrameLog;

/// Milliseconds per second, the numerator of the framerate conversion
pub const MS_PER_SECOND: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FramerateError {
    /// A frame reported a frametime of exactly zero
    ZeroFrametime { index: usize },
}

impl fmt::Display for FramerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramerateError::ZeroFrametime { index } => {
                write!(f, "division by zero: frame {} has a frametime of 0 ms", index)
            }
        }
    }
}

impl std::error::Error for FramerateError {}

/// Converts frametimes in milliseconds to frames per second
pub fn framerate(frametime: &[f64]) -> Result<Vec<f64>, FramerateError> {
    frametime
        .iter()
        .enumerate()
        .map(|(index, &ms)| {
            if ms == 0.0 {
                Err(FramerateError::ZeroFrametime { index })
            } else {
                Ok(MS_PER_SECOND / ms)
            }
        })
        .collect()
}

/// Aggregate numbers for a whole log, printed by `--no-ui`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSummary {
    pub frames: usize,
    pub duration_s: f64,
    pub frametime_min_ms: f64,
    pub frametime_mean_ms: f64,
    pub frametime_max_ms: f64,
    pub mean_fps: f64,
    pub surfaces_mean: f64,
    pub surfaces_max: i64,
}

impl FrameSummary {
    /// Returns None for a log without frames
    pub fn from_log(log: &FrameLog) -> Option<Self> {
        let time = log.time();
        let frametime = log.frametime();
        let surfaces = log.surface_count();

        let (first, last) = (*time.first()?, *time.last()?);
        let frames = frametime.len();

        let total_ms: f64 = frametime.iter().sum();
        let frametime_min_ms = frametime.iter().copied().fold(f64::INFINITY, f64::min);
        let frametime_max_ms = frametime.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // average over the whole run, not the mean of per-frame rates
        let mean_fps = if total_ms > 0.0 {
            frames as f64 * MS_PER_SECOND / total_ms
        } else {
            0.0
        };

        Some(Self {
            frames,
            duration_s: last - first,
            frametime_min_ms,
            frametime_mean_ms: total_ms / frames as f64,
            frametime_max_ms,
            mean_fps,
            surfaces_mean: surfaces.iter().sum::<i64>() as f64 / frames as f64,
            surfaces_max: surfaces.iter().copied().max().unwrap_or(0),
        })
    }
}

impl fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frames:     {}", self.frames)?;
        writeln!(f, "Duration:   {:.2} s", self.duration_s)?;
        writeln!(
            f,
            "Frametime:  {:.2} / {:.2} / {:.2} ms (min/mean/max)",
            self.frametime_min_ms, self.frametime_mean_ms, self.frametime_max_ms
        )?;
        writeln!(f, "Framerate:  {:.1} FPS", self.mean_fps)?;
        write!(
            f,
            "Surfaces:   {:.1} mean, {} max",
            self.surfaces_mean, self.surfaces_max
        )
    }
}

/// Renders the `--no-ui` report for `log`, as pretty JSON when `json` is set.
///
/// `source` only appears in the message for an empty log.
pub fn summary_report(log: &FrameLog, source: &Path, json: bool) -> Result<String> {
    match FrameSummary::from_log(log) {
        Some(summary) if json => {
            serde_json::to_string_pretty(&summary).context("Failed to serialize frame summary")
        }
        Some(summary) => Ok(summary.to_string()),
        None => Ok(format!("No frames in {}", source.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn log_from(input: &str) -> FrameLog {
        FrameLog::from_reader(Cursor::new(input), 1).unwrap()
    }

    #[test]
    fn test_framerate_values() {
        assert_eq!(framerate(&[10.0, 20.0]).unwrap(), vec![100.0, 50.0]);
    }

    #[test]
    fn test_framerate_empty() {
        assert!(framerate(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_framerate_zero_reports_index() {
        let err = framerate(&[16.0, 0.0, 8.0]).unwrap_err();
        assert_eq!(err, FramerateError::ZeroFrametime { index: 1 });
        assert!(err.to_string().contains("division by zero"));
    }

    #[test]
    fn test_summary_empty_log() {
        assert!(FrameSummary::from_log(&FrameLog::default()).is_none());
    }

    #[test]
    fn test_summary_values() {
        let log = log_from("h\n0 10000 1\n1000000 20000 3\n3000000 30000 8\n");
        let summary = FrameSummary::from_log(&log).unwrap();

        assert_eq!(summary.frames, 3);
        assert_eq!(summary.duration_s, 3.0);
        assert_eq!(summary.frametime_min_ms, 10.0);
        assert_eq!(summary.frametime_max_ms, 30.0);
        assert!((summary.frametime_mean_ms - 20.0).abs() < 1e-9);
        assert!((summary.mean_fps - 50.0).abs() < 1e-9);
        assert!((summary.surfaces_mean - 4.0).abs() < 1e-9);
        assert_eq!(summary.surfaces_max, 8);
    }

    #[test]
    fn test_summary_serializes_field_names() {
        let log = log_from("h\n0 10000 1\n");
        let summary = FrameSummary::from_log(&log).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["frames"], 1);
        assert_eq!(json["surfaces_max"], 1);
        assert_eq!(json["mean_fps"], 100.0);
    }

    #[test]
    fn test_summary_display() {
        let log = log_from("h\n0 10000 1\n");
        let text = FrameSummary::from_log(&log).unwrap().to_string();
        assert!(text.contains("Frames:     1"));
        assert!(text.contains("100.0 FPS"));
    }

    #[test]
    fn test_report_text_matches_display() {
        let log = log_from("h\n0 10000 1\n1000000 20000 2\n");
        let report = summary_report(&log, Path::new("run.txt"), false).unwrap();
        assert_eq!(report, FrameSummary::from_log(&log).unwrap().to_string());
    }

    #[test]
    fn test_report_json_round_trips_fields() {
        let log = log_from("h\n0 10000 1\n1000000 20000 2\n");
        let report = summary_report(&log, Path::new("run.txt"), true).unwrap();

        let json: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(json["frames"], 2);
        assert_eq!(json["duration_s"], 1.0);
        assert_eq!(json["surfaces_max"], 2);
        assert!(report.contains('\n'), "expected pretty output: {}", report);
    }

    #[test]
    fn test_report_empty_log_names_source() {
        let report = summary_report(&FrameLog::default(), Path::new("empty.txt"), true).unwrap();
        assert_eq!(report, "No frames in empty.txt");
    }
}
