/*!
 * Error types for the limescribe application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * The taxonomy deliberately separates user-recoverable failure families:
 * structural problems in the source table, bad user-entered timecodes,
 * file/encoding trouble, and output-format generation failures. Per-row
 * timecode parse failures inside the source data are NOT part of this
 * taxonomy; they resolve to zero seconds in [`crate::timecode`].
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised when the source table fails structural validation
#[derive(Error, Debug)]
pub enum CsvValidationError {
    /// The table decoded but contained no data rows
    #[error("CSV file is empty")]
    EmptyTable,

    /// One or more required columns could not be matched
    #[error("Missing required columns: {missing:?}. Found columns: {found:?}")]
    MissingColumns {
        /// Required column names that were not found
        missing: Vec<String>,
        /// The full header set actually present in the file
        found: Vec<String>,
    },
}

/// Errors raised for an out-of-range or unparseable user-supplied offset.
///
/// This is the strict half of the lenient/strict split: only user input
/// travels through this type, never timecodes already present in the source.
#[derive(Error, Debug)]
pub enum TimecodeFormatError {
    /// A component exceeded its range after normalization
    #[error("Invalid time values: minutes/seconds must be < 60, frames must be < {frame_rate}")]
    OutOfRange {
        /// Frame rate the frames component was checked against
        frame_rate: u32,
    },

    /// Any other normalization failure, carrying the original message
    #[error("Invalid time format: {0}")]
    Invalid(String),
}

/// Errors raised when reading or writing files fails
#[derive(Error, Debug)]
pub enum FileProcessingError {
    /// Every encoding in the configured trial order failed to decode the input
    #[error("Could not decode CSV file with any supported encoding")]
    UndecodableInput,

    /// Error reading the source file
    #[error("Failed to read file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing an output file
    #[error("Failed to write file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The decoded text could not be parsed as a CSV table
    #[error("Failed to parse CSV data: {message}")]
    CsvParse {
        /// Parser error message
        message: String,
    },
}

/// Errors raised while generating an output document
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The binary was compiled without the `docx` feature
    #[error("Word output is not available in this build (compiled without the `docx` feature)")]
    DocxUnavailable,

    /// Any failure while assembling or writing the document package
    #[error("Failed to generate document: {0}")]
    Generation(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Structural problem in the source table
    #[error("CSV validation error: {0}")]
    CsvValidation(#[from] CsvValidationError),

    /// Bad user-supplied offset timecode
    #[error("Timecode error: {0}")]
    TimecodeFormat(#[from] TimecodeFormatError),

    /// File read/write or encoding failure
    #[error("File error: {0}")]
    FileProcessing(#[from] FileProcessingError),

    /// Output document generation failure
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
