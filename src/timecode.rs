use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::Config;
use crate::errors::TimecodeFormatError;
use crate::transcript::TranscriptRow;

// @module: Timecode parsing, normalization, arithmetic and formatting

// @const: Matches every character that is not a decimal digit
static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());

/// Transcript placeholder inserted when the synthetic start row follows a shift
const SHIFT_NOTE: &str = "(Start time adjusted by user)";

/// Timecode engine for a fixed frame rate.
///
/// Two parsing contracts live here and are intentionally kept apart:
/// [`TimecodeEngine::normalize_time_input`] validates user-entered offsets and
/// fails hard on out-of-range components, while [`TimecodeEngine::parse_timecode`]
/// is a best-effort reader for timecodes already present in the source data and
/// resolves anything unreadable to zero seconds.
pub struct TimecodeEngine {
    // @field: Frames per second
    frame_rate: u32,

    // @field: Absolute tolerance when comparing against zero
    zero_tolerance: f64,
}

impl TimecodeEngine {
    /// Create an engine from the converter configuration
    pub fn new(config: &Config) -> Self {
        TimecodeEngine {
            frame_rate: config.frame_rate,
            zero_tolerance: config.zero_tolerance,
        }
    }

    /// Normalize a user-entered time to `HH:MM:SS:FF`.
    ///
    /// Every non-digit character is discarded, so `01:30:45:12`,
    /// `01.30.45.12` and `01304512` are all equivalent. The digit residue is
    /// left-padded with zeros to eight digits, or truncated to the first
    /// eight (never rounded), then sliced into components. Returns `Ok(None)`
    /// for empty or whitespace-only input, meaning no adjustment.
    pub fn normalize_time_input(
        &self,
        raw: &str,
    ) -> Result<Option<String>, TimecodeFormatError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let mut digits = NON_DIGIT.replace_all(raw.trim(), "").to_string();
        if digits.len() < 8 {
            digits = format!("{:0>8}", digits);
        } else if digits.len() > 8 {
            digits.truncate(8);
        }

        let hours = &digits[0..2];
        let minutes = &digits[2..4];
        let seconds = &digits[4..6];
        let frames = &digits[6..8];

        // All-digit slices of length two always parse
        let minutes_value: u32 = minutes
            .parse()
            .map_err(|e: std::num::ParseIntError| TimecodeFormatError::Invalid(e.to_string()))?;
        let seconds_value: u32 = seconds
            .parse()
            .map_err(|e: std::num::ParseIntError| TimecodeFormatError::Invalid(e.to_string()))?;
        let frames_value: u32 = frames
            .parse()
            .map_err(|e: std::num::ParseIntError| TimecodeFormatError::Invalid(e.to_string()))?;

        if minutes_value >= 60 || seconds_value >= 60 || frames_value >= self.frame_rate {
            return Err(TimecodeFormatError::OutOfRange {
                frame_rate: self.frame_rate,
            });
        }

        Ok(Some(format!("{hours}:{minutes}:{seconds}:{frames}")))
    }

    /// Parse a source timecode string to seconds, leniently.
    ///
    /// Accepts `HH:MM:SS:FF`, `HH:MM:SS.FF` (the period is treated exactly
    /// like a colon, so the fourth group is always frames), `HH:MM:SS` and
    /// `MM:SS`. Anything unreadable yields `0.0` rather than an error so a
    /// malformed row degrades to the start of the recording instead of
    /// aborting the whole conversion.
    pub fn parse_timecode(&self, text: &str) -> f64 {
        self.try_parse_timecode(text).unwrap_or(0.0)
    }

    fn try_parse_timecode(&self, text: &str) -> Option<f64> {
        let cleaned = text.trim().replace('.', ":");
        if cleaned.is_empty() {
            return None;
        }

        let parts: Vec<&str> = cleaned.split(':').collect();
        match parts.len() {
            4 => {
                let hours: u64 = parts[0].parse().ok()?;
                let minutes: u64 = parts[1].parse().ok()?;
                let seconds: u64 = parts[2].parse().ok()?;
                let frames: u64 = parts[3].parse().ok()?;
                Some(
                    (hours * 3600 + minutes * 60 + seconds) as f64
                        + frames as f64 / self.frame_rate as f64,
                )
            }
            3 => {
                let hours: u64 = parts[0].parse().ok()?;
                let minutes: u64 = parts[1].parse().ok()?;
                let seconds: u64 = parts[2].parse().ok()?;
                Some((hours * 3600 + minutes * 60 + seconds) as f64)
            }
            2 => {
                let minutes: u64 = parts[0].parse().ok()?;
                let seconds: u64 = parts[1].parse().ok()?;
                Some((minutes * 60 + seconds) as f64)
            }
            _ => None,
        }
    }

    /// Format seconds as a bracketed timecode `[HH:MM:SS.FF]`.
    ///
    /// Every component is truncated, never rounded, including the
    /// fractional-second to frame conversion. Hours are not wrapped at 24.
    pub fn seconds_to_timecode(&self, seconds: f64) -> String {
        let hours = (seconds / 3600.0).floor() as u64;
        let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
        let secs = (seconds % 60.0).floor() as u64;
        let frames = ((seconds % 1.0) * self.frame_rate as f64).floor() as u64;
        format!("[{:02}:{:02}:{:02}.{:02}]", hours, minutes, secs, frames)
    }

    /// Format seconds as a timecode without the enclosing brackets
    pub fn seconds_to_plain_timecode(&self, seconds: f64) -> String {
        let bracketed = self.seconds_to_timecode(seconds);
        bracketed
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string()
    }

    /// Add a user-entered offset to every row's start time.
    ///
    /// The offset is validated through [`TimecodeEngine::normalize_time_input`]
    /// and any failure is reported as a [`TimecodeFormatError`] carrying the
    /// original message. Returns whether a shift was applied; an empty offset
    /// is a no-op.
    pub fn shift_all(
        &self,
        rows: &mut [TranscriptRow],
        offset_text: &str,
    ) -> Result<bool, TimecodeFormatError> {
        let normalized = self
            .normalize_time_input(offset_text)
            .map_err(|e| TimecodeFormatError::Invalid(e.to_string()))?;

        let Some(normalized) = normalized else {
            return Ok(false);
        };

        let offset_seconds = self.parse_timecode(&normalized);
        debug!(
            "Shifting {} rows by {} ({:.3}s)",
            rows.len(),
            normalized,
            offset_seconds
        );

        for row in rows.iter_mut() {
            let current_seconds = self.parse_timecode(&row.start_time);
            row.start_time = self.seconds_to_plain_timecode(current_seconds + offset_seconds);
        }

        Ok(true)
    }

    /// Insert a synthetic `00:00:00.00` row when the transcript does not
    /// already start at zero.
    ///
    /// The comparison uses the configured absolute tolerance; direct float
    /// equality would misfire on frame fractions like 1/30. The synthetic
    /// row carries an explanatory transcript only when a shift was applied,
    /// so a plain conversion stays visually untouched.
    pub fn ensure_leading_zero(&self, rows: &mut Vec<TranscriptRow>, was_shifted: bool) {
        let Some(first) = rows.first() else {
            return;
        };

        let first_seconds = self.parse_timecode(&first.start_time);
        if first_seconds.abs() <= self.zero_tolerance {
            return;
        }

        let transcript = if was_shifted { SHIFT_NOTE } else { "" };
        rows.insert(
            0,
            TranscriptRow::new("00:00:00.00", "", transcript),
        );
    }
}
