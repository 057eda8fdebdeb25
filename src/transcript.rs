use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use log::{debug, warn};

use crate::app_config::{Config, SourceEncoding};
use crate::errors::{AppError, CsvValidationError, FileProcessingError};

// @module: Transcript table decoding and row normalization

// @const: Source columns that must be present in a standard table
const REQUIRED_COLUMNS: [&str; 3] = ["Media Start", "Transcript", "Speakers"];

// @struct: Single normalized transcript row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRow {
    // @field: Start timecode text, canonical HH:MM:SS.FF once normalized
    pub start_time: String,

    // @field: Speaker label, possibly empty
    pub speaker: String,

    // @field: Transcript text, possibly empty
    pub transcript: String,
}

impl TranscriptRow {
    /// Create a new transcript row
    pub fn new(start_time: &str, speaker: &str, transcript: &str) -> Self {
        TranscriptRow {
            start_time: start_time.to_string(),
            speaker: speaker.to_string(),
            transcript: transcript.to_string(),
        }
    }
}

/// How the source table stores its fields, decided once per load.
///
/// The decision inspects only the first data row: a value containing both a
/// colon and a comma marks the Limecraft combined export, where the whole
/// record was serialized into a single delimited field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Separate Media Start / Transcript / Speakers columns
    StandardTable,
    /// Whole record exported into one delimited field
    CombinedField,
}

/// Index mapping from required columns to positions in the actual header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    /// Position of the Media Start column
    pub media_start: usize,
    /// Position of the Transcript column
    pub transcript: usize,
    /// Position of the Speakers column
    pub speakers: usize,
}

/// Collection of transcript rows with metadata
#[derive(Debug)]
pub struct TranscriptCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// Normalized rows in source order
    pub rows: Vec<TranscriptRow>,

    /// Table format the source was classified as
    pub format: TableFormat,
}

impl TranscriptCollection {
    /// Load and normalize a transcription export.
    ///
    /// Decodes the file through the configured encoding fallback chain,
    /// parses the CSV table, classifies it as standard or combined, and
    /// produces canonical rows holding only the three required fields.
    pub fn load<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self, AppError> {
        let path = path.as_ref();
        let text = decode_source(path, &config.encodings)?;
        let (headers, records) = read_raw_table(&text)?;

        if records.is_empty() {
            return Err(CsvValidationError::EmptyTable.into());
        }

        let format = detect_table_format(&records[0]);
        debug!("Classified {} as {:?}", path.display(), format);

        let rows = match format {
            TableFormat::CombinedField => normalize_combined_records(&records),
            TableFormat::StandardTable => {
                let map = validate_standard_columns(&headers)?;
                normalize_standard_records(&records, map)
            }
        };

        Ok(TranscriptCollection {
            source_file: path.to_path_buf(),
            rows,
            format,
        })
    }
}

impl fmt::Display for TranscriptCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Transcript Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Format: {:?}", self.format)?;
        writeln!(f, "Rows: {}", self.rows.len())?;
        Ok(())
    }
}

/// Read a source file through the encoding fallback chain.
///
/// A failure of one encoding is not reported, only exhaustion of the whole
/// list is.
fn decode_source(
    path: &Path,
    encodings: &[SourceEncoding],
) -> Result<String, FileProcessingError> {
    let bytes = fs::read(path).map_err(|e| FileProcessingError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    for encoding in encodings {
        if let Some(text) = try_decode(&bytes, *encoding) {
            debug!("Decoded {} as {}", path.display(), encoding);
            return Ok(text);
        }
    }

    Err(FileProcessingError::UndecodableInput)
}

fn try_decode(bytes: &[u8], encoding: SourceEncoding) -> Option<String> {
    match encoding {
        SourceEncoding::Utf8Bom => {
            let text = std::str::from_utf8(bytes).ok()?;
            Some(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
        }
        SourceEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(ToString::to_string),
        // Latin-1 maps every byte 1:1 onto the first 256 code points
        SourceEncoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
        SourceEncoding::Windows1252 => {
            let (text, _, had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
            if had_errors {
                None
            } else {
                Some(text.into_owned())
            }
        }
    }
}

/// Parse decoded text into cleaned headers and raw string records
fn read_raw_table(text: &str) -> Result<(Vec<String>, Vec<Vec<String>>), FileProcessingError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| FileProcessingError::CsvParse {
            message: e.to_string(),
        })?
        .iter()
        .map(clean_column_name)
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| FileProcessingError::CsvParse {
            message: e.to_string(),
        })?;
        records.push(record.iter().map(|v| v.to_string()).collect());
    }

    Ok((headers, records))
}

/// Strip a byte-order-mark artifact and surrounding whitespace from a header
fn clean_column_name(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('\u{feff}')
        .trim()
        .to_string()
}

/// Classify the table from its first data row
fn detect_table_format(first_record: &[String]) -> TableFormat {
    let combined = first_record
        .iter()
        .any(|value| value.contains(':') && value.contains(','));
    if combined {
        TableFormat::CombinedField
    } else {
        TableFormat::StandardTable
    }
}

/// Case-insensitive, whitespace-tolerant match of the required columns.
///
/// All non-required columns are deliberately discarded downstream, so only
/// the three positions are returned.
pub fn validate_standard_columns(headers: &[String]) -> Result<ColumnMap, CsvValidationError> {
    let mut missing = Vec::new();
    let mut positions = [0usize; 3];

    for (slot, required) in REQUIRED_COLUMNS.iter().enumerate() {
        let found = headers
            .iter()
            .position(|actual| actual.trim().eq_ignore_ascii_case(required));
        match found {
            Some(index) => positions[slot] = index,
            None => missing.push((*required).to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(CsvValidationError::MissingColumns {
            missing,
            found: headers.to_vec(),
        });
    }

    Ok(ColumnMap {
        media_start: positions[0],
        transcript: positions[1],
        speakers: positions[2],
    })
}

fn normalize_standard_records(records: &[Vec<String>], map: ColumnMap) -> Vec<TranscriptRow> {
    records
        .iter()
        .map(|record| {
            let field = |index: usize| record.get(index).map(String::as_str).unwrap_or("");
            TranscriptRow::new(
                field(map.media_start),
                field(map.speakers),
                field(map.transcript),
            )
        })
        .collect()
}

fn normalize_combined_records(records: &[Vec<String>]) -> Vec<TranscriptRow> {
    let mut rows = Vec::new();
    for record in records {
        // The combined export serializes the whole record into one field;
        // anything else in the row is padding
        let Some(combined) = record
            .iter()
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
        else {
            warn!("Skipping combined record with no content");
            continue;
        };

        let (start_time, speaker, transcript) = split_combined_field(combined);
        rows.push(TranscriptRow::new(&start_time, &speaker, &transcript));
    }
    rows
}

/// Quote-aware splitter for a combined `timecode,speaker,transcript` field.
///
/// Commas inside single- or double-quoted spans do not split; a doubled
/// quote character inside a span is an escaped literal. Quote characters are
/// carried through the scan, then a single fully-enclosing pair is stripped
/// from each field, so interior quotes survive intact. Always yields exactly
/// three fields, padding missing trailing ones with empty strings; doubled
/// double-quotes left in the transcript collapse to one literal quote.
pub fn split_combined_field(value: &str) -> (String, String, String) {
    let mut parts: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut quote_char: Option<char> = None;

    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match quote_char {
            Some(q) if ch == q => {
                if chars.peek() == Some(&q) {
                    // Escaped quote: keep one, stay inside the span
                    current.push(ch);
                    chars.next();
                } else {
                    quote_char = None;
                    current.push(ch);
                }
            }
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote_char = Some(ch);
                current.push(ch);
            }
            None if ch == ',' => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            None => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }

    parts.resize(3, String::new());

    let start_time = strip_enclosing_quotes(&parts[0]);
    let speaker = strip_enclosing_quotes(&parts[1]);
    let transcript = strip_enclosing_quotes(&parts[2]).replace("\"\"", "\"");

    (start_time, speaker, transcript)
}

/// Strip one matched pair of enclosing quote characters
fn strip_enclosing_quotes(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() >= 2 {
        let first = chars[0];
        let last = chars[chars.len() - 1];
        if first == last && (first == '"' || first == '\'') {
            return chars[1..chars.len() - 1].iter().collect();
        }
    }
    value.to_string()
}
