use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the converter configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Timecode frame rate in frames per second
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Absolute tolerance in seconds when comparing a timecode against zero
    #[serde(default = "default_zero_tolerance")]
    pub zero_tolerance: f64,

    /// Source-file text encodings tried, in order, until one decodes
    #[serde(default = "default_encodings")]
    pub encodings: Vec<SourceEncoding>,

    /// InqScribe output settings
    #[serde(default)]
    pub inqscribe: InqScribeConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            zero_tolerance: default_zero_tolerance(),
            encodings: default_encodings(),
            inqscribe: InqScribeConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.frame_rate == 0 {
            return Err(anyhow!("frame_rate must be greater than zero"));
        }

        if self.zero_tolerance <= 0.0 {
            return Err(anyhow!("zero_tolerance must be greater than zero"));
        }

        if self.encodings.is_empty() {
            return Err(anyhow!("at least one source encoding is required"));
        }

        if self.inqscribe.font_size == 0 {
            return Err(anyhow!("inqscribe.font_size must be greater than zero"));
        }

        Ok(())
    }
}

/// Supported source-file text encodings
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SourceEncoding {
    // @encoding: UTF-8 with a byte-order-mark stripped when present
    Utf8Bom,
    // @encoding: Plain UTF-8
    Utf8,
    // @encoding: ISO-8859-1, a 1:1 byte to code point mapping
    Latin1,
    // @encoding: Windows code page 1252
    Windows1252,
}

impl SourceEncoding {
    // @returns: Human readable encoding name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Utf8Bom => "UTF-8 (BOM)",
            Self::Utf8 => "UTF-8",
            Self::Latin1 => "Latin-1",
            Self::Windows1252 => "Windows-1252",
        }
    }
}

impl std::fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Settings written into the InqScribe script header block
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InqScribeConfig {
    /// Font name declared in the script header
    #[serde(default = "default_font_name")]
    pub font_name: String,

    /// Font size declared in the script header
    #[serde(default = "default_font_size")]
    pub font_size: u32,
}

impl Default for InqScribeConfig {
    fn default() -> Self {
        Self {
            font_name: default_font_name(),
            font_size: default_font_size(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_frame_rate() -> u32 {
    30
}

fn default_zero_tolerance() -> f64 {
    0.01
}

fn default_encodings() -> Vec<SourceEncoding> {
    vec![
        SourceEncoding::Utf8Bom,
        SourceEncoding::Utf8,
        SourceEncoding::Latin1,
        SourceEncoding::Windows1252,
    ]
}

fn default_font_name() -> String {
    "Tahoma".to_string()
}

fn default_font_size() -> u32 {
    12
}
