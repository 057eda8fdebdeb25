/*!
 * # limescribe - Limecraft transcription converter
 *
 * A Rust library for converting Limecraft transcription CSV exports into
 * downstream document formats.
 *
 * ## Features
 *
 * - Decode CSV exports across several text encodings (UTF-8 with BOM,
 *   UTF-8, Latin-1, Windows-1252)
 * - Normalize both standard multi-column tables and the combined
 *   single-field export format
 * - Frame-accurate timecode parsing, normalization and offset arithmetic
 * - Emit Word documents (.docx) and InqScribe scripts (.inqscr)
 * - Batch conversion of whole directories
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `transcript`: Table decoding, format detection and row normalization
 * - `timecode`: Timecode parsing, arithmetic and formatting
 * - `document`: Output document emitters:
 *   - `document::model`: Shared intermediate line model
 *   - `document::word`: Word document emitter (behind the `docx` feature)
 *   - `document::inqscribe`: InqScribe script emitter
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod timecode;
pub mod transcript;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, ConversionRequest, ConversionSummary, OutputTarget};
pub use errors::{
    AppError, ConversionError, CsvValidationError, FileProcessingError, TimecodeFormatError,
};
pub use timecode::TimecodeEngine;
pub use transcript::{TranscriptCollection, TranscriptRow};
