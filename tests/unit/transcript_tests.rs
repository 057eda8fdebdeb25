/*!
 * Tests for table decoding, format detection and row normalization
 */

use std::fs;

use limescribe::app_config::{Config, SourceEncoding};
use limescribe::errors::{AppError, CsvValidationError, FileProcessingError};
use limescribe::transcript::{
    split_combined_field, validate_standard_columns, TableFormat, TranscriptCollection,
};

use crate::common;

/// Test loading a standard multi-column export
#[test]
fn test_load_withStandardTable_shouldNormalizeRows() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_standard_csv(&temp_dir.path().to_path_buf(), "export.csv").unwrap();

    let collection = TranscriptCollection::load(&path, &Config::default()).unwrap();

    assert_eq!(collection.format, TableFormat::StandardTable);
    assert_eq!(collection.rows.len(), 3);
    assert_eq!(collection.rows[0].start_time, "00:00:05:00");
    assert_eq!(collection.rows[0].speaker, "Anna");
    assert_eq!(collection.rows[0].transcript, "Hello there");
    // Quoted comma survives the CSV layer
    assert_eq!(collection.rows[1].transcript, "Yes, I agree");
    // Trailing empty speaker column
    assert_eq!(collection.rows[2].speaker, "");
}

/// Test case-insensitive header matching and extra-column discarding
#[test]
fn test_load_withMixedCaseHeaders_shouldMatchAndDiscardExtras() {
    let temp_dir = common::create_temp_dir().unwrap();
    let content = "\
media start, Transcript ,SPEAKERS,Media Duration
00:00:01:00,Hello,Anna,00:00:05:00
";
    let path =
        common::create_test_file(&temp_dir.path().to_path_buf(), "mixed.csv", content).unwrap();

    let collection = TranscriptCollection::load(&path, &Config::default()).unwrap();

    assert_eq!(collection.rows.len(), 1);
    assert_eq!(collection.rows[0].start_time, "00:00:01:00");
    assert_eq!(collection.rows[0].speaker, "Anna");
    assert_eq!(collection.rows[0].transcript, "Hello");
}

/// Test the missing-column failure lists exactly the absent names
#[test]
fn test_load_withMissingSpeakersColumn_shouldFailValidation() {
    let temp_dir = common::create_temp_dir().unwrap();
    let content = "\
Media Start,Transcript
00:00:01:00,Hello
";
    let path =
        common::create_test_file(&temp_dir.path().to_path_buf(), "missing.csv", content).unwrap();

    let result = TranscriptCollection::load(&path, &Config::default());

    match result {
        Err(AppError::CsvValidation(CsvValidationError::MissingColumns { missing, found })) => {
            assert_eq!(missing, vec!["Speakers".to_string()]);
            assert!(found.contains(&"Media Start".to_string()));
        }
        other => panic!("expected missing-column error, got {other:?}"),
    }
}

/// Test that a table with no data rows is rejected
#[test]
fn test_load_withHeaderOnly_shouldFailAsEmpty() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "empty.csv",
        "Media Start,Transcript,Speakers\n",
    )
    .unwrap();

    let result = TranscriptCollection::load(&path, &Config::default());

    assert!(matches!(
        result,
        Err(AppError::CsvValidation(CsvValidationError::EmptyTable))
    ));
}

/// Test loading the combined single-field export
#[test]
fn test_load_withCombinedFormat_shouldSplitRecords() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_combined_csv(&temp_dir.path().to_path_buf(), "combined.csv").unwrap();

    let collection = TranscriptCollection::load(&path, &Config::default()).unwrap();

    assert_eq!(collection.format, TableFormat::CombinedField);
    assert_eq!(collection.rows.len(), 3);
    assert_eq!(collection.rows[0].start_time, "00:00:03:08");
    assert_eq!(collection.rows[0].speaker, "John");
    assert_eq!(collection.rows[0].transcript, "Hello there");
    // Doubled quotes collapse to a literal quote
    assert_eq!(collection.rows[1].transcript, "\"Quoted\" text");
    // Empty speaker in the middle field
    assert_eq!(collection.rows[2].speaker, "");
    assert_eq!(collection.rows[2].transcript, "Room tone");
}

/// Test a UTF-8 export carrying a byte-order mark
#[test]
fn test_load_withUtf8Bom_shouldCleanHeaders() {
    let temp_dir = common::create_temp_dir().unwrap();
    let content = "\u{feff}Media Start,Transcript,Speakers\n00:00:01:00,Hello,Anna\n";
    let path =
        common::create_test_file(&temp_dir.path().to_path_buf(), "bom.csv", content).unwrap();

    let collection = TranscriptCollection::load(&path, &Config::default()).unwrap();

    assert_eq!(collection.rows.len(), 1);
    assert_eq!(collection.rows[0].start_time, "00:00:01:00");
}

/// Test the encoding fallback on bytes that are invalid UTF-8
#[test]
fn test_load_withLatin1Bytes_shouldFallBack() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("latin1.csv");
    // 0xE9 is é in Latin-1 and invalid as a standalone UTF-8 byte
    let bytes = b"Media Start,Transcript,Speakers\n00:00:01:00,Caf\xe9 noise,Ren\xe9e\n";
    fs::write(&path, bytes).unwrap();

    let collection = TranscriptCollection::load(&path, &Config::default()).unwrap();

    assert_eq!(collection.rows[0].transcript, "Café noise");
    assert_eq!(collection.rows[0].speaker, "Renée");
}

/// Test that exhausting the encoding list is reported as undecodable
#[test]
fn test_load_withRestrictedEncodings_shouldReportExhaustion() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("invalid.csv");
    let bytes = b"Media Start,Transcript,Speakers\n00:00:01:00,Caf\xe9,Anna\n";
    fs::write(&path, bytes).unwrap();

    let config = Config {
        encodings: vec![SourceEncoding::Utf8Bom, SourceEncoding::Utf8],
        ..Config::default()
    };

    let result = TranscriptCollection::load(&path, &config);

    assert!(matches!(
        result,
        Err(AppError::FileProcessing(
            FileProcessingError::UndecodableInput
        ))
    ));
}

/// Test that a missing input file surfaces as a read error
#[test]
fn test_load_withMissingFile_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("does_not_exist.csv");

    let result = TranscriptCollection::load(&path, &Config::default());

    assert!(matches!(
        result,
        Err(AppError::FileProcessing(FileProcessingError::Read { .. }))
    ));
}

/// Test the quote-aware splitter keeps commas inside quoted spans
#[test]
fn test_splitCombinedField_withQuotedCommas_shouldNotSplitInsideQuotes() {
    let (timecode, speaker, transcript) =
        split_combined_field("\"01:00:00,00\",\"Anna\",\"Hello, world\"");

    assert_eq!(timecode, "01:00:00,00");
    assert_eq!(speaker, "Anna");
    assert_eq!(transcript, "Hello, world");
}

/// Test the splitter on a plain unquoted record
#[test]
fn test_splitCombinedField_withPlainRecord_shouldSplitOnCommas() {
    let (timecode, speaker, transcript) = split_combined_field("00:00:03:08,John,Hello there");

    assert_eq!(timecode, "00:00:03:08");
    assert_eq!(speaker, "John");
    assert_eq!(transcript, "Hello there");
}

/// Test padding of missing trailing fields
#[test]
fn test_splitCombinedField_withMissingFields_shouldPadWithEmpty() {
    let (timecode, speaker, transcript) = split_combined_field("00:00:05:00");

    assert_eq!(timecode, "00:00:05:00");
    assert_eq!(speaker, "");
    assert_eq!(transcript, "");
}

/// Test doubled double-quotes become one literal quote in the transcript
#[test]
fn test_splitCombinedField_withDoubledQuotes_shouldUnescape() {
    let (_, _, transcript) = split_combined_field("00:00:01:00,Anna,\"\"Quoted\"\" text");

    assert_eq!(transcript, "\"Quoted\" text");
}

/// Test single-quoted spans protect commas too
#[test]
fn test_splitCombinedField_withSingleQuotedSpan_shouldProtectCommas() {
    let (_, speaker, transcript) = split_combined_field("00:00:01:00,'Smith, John',Hello");

    assert_eq!(speaker, "Smith, John");
    assert_eq!(transcript, "Hello");
}

/// Test direct column validation and its mapping
#[test]
fn test_validateStandardColumns_withReorderedHeaders_shouldMapPositions() {
    let headers: Vec<String> = ["Speakers", "Transcript", "Media Start"]
        .iter()
        .map(ToString::to_string)
        .collect();

    let map = validate_standard_columns(&headers).unwrap();

    assert_eq!(map.media_start, 2);
    assert_eq!(map.transcript, 1);
    assert_eq!(map.speakers, 0);
}

/// Test that every absent column is listed
#[test]
fn test_validateStandardColumns_withAllMissing_shouldListAll() {
    let headers: Vec<String> = vec!["Something".to_string()];

    let result = validate_standard_columns(&headers);

    match result {
        Err(CsvValidationError::MissingColumns { missing, .. }) => {
            assert_eq!(
                missing,
                vec![
                    "Media Start".to_string(),
                    "Transcript".to_string(),
                    "Speakers".to_string()
                ]
            );
        }
        other => panic!("expected missing-column error, got {other:?}"),
    }
}
