/*!
 * Tests for application configuration
 */

use limescribe::app_config::{Config, LogLevel, SourceEncoding};

/// Test the default configuration values
#[test]
fn test_defaultConfig_shouldMatchDocumentedDefaults() {
    let config = Config::default();

    assert_eq!(config.frame_rate, 30);
    assert!((config.zero_tolerance - 0.01).abs() < f64::EPSILON);
    assert_eq!(
        config.encodings,
        vec![
            SourceEncoding::Utf8Bom,
            SourceEncoding::Utf8,
            SourceEncoding::Latin1,
            SourceEncoding::Windows1252,
        ]
    );
    assert_eq!(config.inqscribe.font_name, "Tahoma");
    assert_eq!(config.inqscribe.font_size, 12);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test JSON round-tripping of the configuration
#[test]
fn test_config_serdeRoundTrip_shouldPreserveFields() {
    let mut config = Config::default();
    config.frame_rate = 25;
    config.inqscribe.font_name = "Consolas".to_string();
    config.log_level = LogLevel::Debug;

    let json = serde_json::to_string_pretty(&config).unwrap();
    let restored: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.frame_rate, 25);
    assert_eq!(restored.inqscribe.font_name, "Consolas");
    assert_eq!(restored.log_level, LogLevel::Debug);
    assert_eq!(restored.encodings, config.encodings);
}

/// Test that an empty JSON object yields the full default configuration
#[test]
fn test_config_fromEmptyJson_shouldApplyDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();

    assert_eq!(config.frame_rate, 30);
    assert_eq!(config.encodings.len(), 4);
    assert_eq!(config.inqscribe.font_size, 12);
}

/// Test validation rejects degenerate values
#[test]
fn test_validate_withDegenerateValues_shouldFail() {
    let mut config = Config::default();
    config.frame_rate = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.zero_tolerance = 0.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.encodings.clear();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.inqscribe.font_size = 0;
    assert!(config.validate().is_err());
}

/// Test validation accepts the defaults
#[test]
fn test_validate_withDefaults_shouldPass() {
    assert!(Config::default().validate().is_ok());
}

/// Test encoding display names
#[test]
fn test_sourceEncoding_displayName_shouldBeHumanReadable() {
    assert_eq!(SourceEncoding::Utf8Bom.display_name(), "UTF-8 (BOM)");
    assert_eq!(SourceEncoding::Windows1252.to_string(), "Windows-1252");
}
