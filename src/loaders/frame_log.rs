use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::parse::{parse_line_ints, split_lines};

/// Leading lines of a frame-stats log that carry the recorder header
pub const DEFAULT_SKIP: usize = 1;

/// Raw field 0 is divided by this to get seconds
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Raw field 1 is divided by this to get milliseconds
pub const FRAMETIME_DIVISOR: f64 = 1_000.0;

const REQUIRED_FIELDS: usize = 3;

/// Per-frame samples loaded from a frame-stats log.
///
/// The three sequences are parallel: index `i` describes the `i`-th data line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameLog {
    time: Vec<f64>,
    frametime: Vec<f64>,
    surface_count: Vec<i64>,
}

impl FrameLog {
    /// Read a log from any buffered reader, discarding the first `skip` lines.
    ///
    /// Lines may end in `\n`, `\r\n` or a lone `\r`.
    pub fn from_reader<R: BufRead>(mut reader: R, skip: usize) -> Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Failed to read frame log contents")?;

        let mut log = FrameLog::default();

        for (index, line) in split_lines(&content).enumerate() {
            let line_number = index + 1;

            if index < skip {
                debug!("Skipping line {}: {:?}", line_number, line);
                continue;
            }

            let fields = parse_line_ints(line)
                .with_context(|| format!("Invalid integer on line {}: {:?}", line_number, line))?;

            if fields.len() < REQUIRED_FIELDS {
                bail!(
                    "Line {} has {} field(s), expected at least {}",
                    line_number,
                    fields.len(),
                    REQUIRED_FIELDS
                );
            }

            log.time.push(fields[0] as f64 / MICROS_PER_SECOND);
            log.frametime.push(fields[1] as f64 / FRAMETIME_DIVISOR);
            log.surface_count.push(fields[2]);
        }

        Ok(log)
    }

    /// Elapsed playback time of each frame, in seconds
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Duration of each frame, in milliseconds
    pub fn frametime(&self) -> &[f64] {
        &self.frametime
    }

    /// World surfaces rendered in each frame
    pub fn surface_count(&self) -> &[i64] {
        &self.surface_count
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Loads a frame-stats log from disk
pub fn load_frame_log(path: impl AsRef<Path>, skip: usize) -> Result<FrameLog> {
    let path = path.as_ref();
    info!("Loading frame log: {:?}", path);

    let file = File::open(path).context(format!("Failed to open frame log: {:?}", path))?;
    let log = FrameLog::from_reader(BufReader::new(file), skip)
        .context(format!("Failed to parse frame log: {:?}", path))?;

    info!("Loaded {} frames from {:?}", log.len(), path);
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load_str(input: &str) -> Result<FrameLog> {
        FrameLog::from_reader(Cursor::new(input), DEFAULT_SKIP)
    }

    #[test]
    fn test_single_line_scaling() {
        let log = load_str("header\n1000000 16000 42\n").unwrap();
        assert_eq!(log.time(), &[1.0]);
        assert_eq!(log.frametime(), &[16.0]);
        assert_eq!(log.surface_count(), &[42]);
    }

    #[test]
    fn test_header_is_not_parsed() {
        // the header would fail integer parsing if it were read
        let log = load_str("frame stats v2 ~~\n0 1000 3\n").unwrap();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let log = load_str("").unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_header_only() {
        let log = load_str("header\n").unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_skip_zero_parses_first_line() {
        let log = FrameLog::from_reader(Cursor::new("5 6000 7\n"), 0).unwrap();
        assert_eq!(log.time(), &[0.000005]);
        assert_eq!(log.frametime(), &[6.0]);
    }

    #[test]
    fn test_skip_several_lines() {
        let log = FrameLog::from_reader(Cursor::new("a\nb\nc\n0 1000 1\n"), 3).unwrap();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_carriage_return_only_endings() {
        let log = load_str("header\r0 10000 1\r1000000 20000 2\r").unwrap();
        assert_eq!(log.time(), &[0.0, 1.0]);
        assert_eq!(log.surface_count(), &[1, 2]);
    }

    #[test]
    fn test_short_line_reports_line_number() {
        let err = load_str("header\n0 1000 1\n1 2\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Line 3"), "unexpected message: {}", message);
        assert!(message.contains("2 field(s)"), "unexpected message: {}", message);
    }

    #[test]
    fn test_blank_data_line_fails() {
        let err = load_str("header\n\n").unwrap_err();
        assert!(err.to_string().contains("0 field(s)"));
    }

    #[test]
    fn test_bad_integer_keeps_source() {
        let err = load_str("header\n0 abc 1\n").unwrap_err();
        assert!(err.downcast_ref::<std::num::ParseIntError>().is_some());
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_frame_log("/definitely/not/a/frame/log.txt", DEFAULT_SKIP).unwrap_err();
        let io = err.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }
}
