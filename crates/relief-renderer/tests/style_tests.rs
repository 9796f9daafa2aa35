//! Tests for JSON ramp styles.

use relief_renderer::style::{hex_to_rgb, RampConfig};
use relief_renderer::{ColorRamp, ReliefError, ELEVATION_RAMP};
use std::io::Write;

const ELEVATION_JSON: &str = r##"{
    "version": "1",
    "ramps": {
        "elevation": {
            "name": "Elevation",
            "description": "Blue lowlands to red summits",
            "default": true,
            "colors": [
                "#004080", "#008080", "#00A040", "#00B040", "#00C040", "#40C040", "#80C040",
                "#A0C020", "#C0C020", "#E0A000", "#FF8000", "#FF4000", "#FF2000", "#FF0000"
            ]
        },
        "grayscale": {
            "name": "Grayscale",
            "colors": ["#000000", "#FFFFFF"]
        }
    }
}"##;

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_ramp_document() {
    let config = RampConfig::from_json(ELEVATION_JSON).unwrap();
    assert_eq!(config.version, "1");
    assert_eq!(config.ramps.len(), 2);

    let gray = config.get_ramp("grayscale").unwrap();
    assert_eq!(gray.name, "Grayscale");
    assert!(gray.description.is_none());
    assert!(!gray.default);
}

#[test]
fn test_json_ramp_matches_builtin() {
    let config = RampConfig::from_json(ELEVATION_JSON).unwrap();
    let ramp = config.build_ramp("elevation").unwrap();
    assert_eq!(ramp.colors(), &ELEVATION_RAMP[..]);
    assert_eq!(ramp, ColorRamp::elevation());
}

#[test]
fn test_default_ramp_prefers_flagged_entry() {
    let config = RampConfig::from_json(ELEVATION_JSON).unwrap();
    assert_eq!(config.default_ramp().unwrap().len(), 14);
}

#[test]
fn test_single_ramp_is_default() {
    let json = r##"{"version": "1", "ramps": {"g": {"name": "G", "colors": ["#000000", "#ffffff"]}}}"##;
    let ramp = RampConfig::from_json(json).unwrap().default_ramp().unwrap();
    assert_eq!(ramp.colors(), &[[0, 0, 0], [255, 255, 255]][..]);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ELEVATION_JSON.as_bytes()).unwrap();

    let text = std::fs::read_to_string(file.path()).unwrap();
    let config = RampConfig::from_json(&text).unwrap();
    assert!(config.get_ramp("elevation").is_some());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_ramp() {
    let config = RampConfig::from_json(ELEVATION_JSON).unwrap();
    assert_eq!(
        config.build_ramp("bathymetry"),
        Err(ReliefError::StyleNotFound("bathymetry".to_string()))
    );
}

#[test]
fn test_ambiguous_default() {
    let json = r##"{"version": "1", "ramps": {
        "a": {"name": "A", "colors": ["#000000"]},
        "b": {"name": "B", "colors": ["#FFFFFF"]}
    }}"##;
    let config = RampConfig::from_json(json).unwrap();
    assert!(matches!(config.default_ramp(), Err(ReliefError::Config(_))));
}

#[test]
fn test_multiple_defaults_rejected() {
    let json = r##"{"version": "1", "ramps": {
        "a": {"name": "A", "default": true, "colors": ["#000000"]},
        "b": {"name": "B", "default": true, "colors": ["#FFFFFF"]},
        "c": {"name": "C", "default": true, "colors": ["#FF0000"]},
        "d": {"name": "D", "colors": ["#00FF00"]}
    }}"##;
    // Every parse must give the same answer regardless of map order.
    for _ in 0..20 {
        let config = RampConfig::from_json(json).unwrap();
        assert!(matches!(config.default_ramp(), Err(ReliefError::Config(_))));
    }
}

#[test]
fn test_single_flag_among_many_is_default() {
    let json = r##"{"version": "1", "ramps": {
        "a": {"name": "A", "colors": ["#000000"]},
        "b": {"name": "B", "default": true, "colors": ["#FFFFFF"]},
        "c": {"name": "C", "colors": ["#FF0000"]}
    }}"##;
    let ramp = RampConfig::from_json(json).unwrap().default_ramp().unwrap();
    assert_eq!(ramp.colors(), &[[255, 255, 255]][..]);
}

#[test]
fn test_no_ramps() {
    let config = RampConfig::from_json(r#"{"version": "1", "ramps": {}}"#).unwrap();
    assert!(matches!(config.default_ramp(), Err(ReliefError::StyleNotFound(_))));
}

#[test]
fn test_bad_color_rejected() {
    let json = r##"{"version": "1", "ramps": {"x": {"name": "X", "colors": ["#000000", "teal"]}}}"##;
    let config = RampConfig::from_json(json).unwrap();
    assert!(matches!(config.build_ramp("x"), Err(ReliefError::InvalidRamp(_))));
}

#[test]
fn test_empty_color_list_rejected() {
    let json = r#"{"version": "1", "ramps": {"x": {"name": "X", "colors": []}}}"#;
    let config = RampConfig::from_json(json).unwrap();
    assert!(matches!(config.build_ramp("x"), Err(ReliefError::InvalidRamp(_))));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        RampConfig::from_json("{ not json"),
        Err(ReliefError::Config(_))
    ));
}

#[test]
fn test_hex_lowercase_and_bare() {
    assert_eq!(hex_to_rgb("#a0c020"), Some((160, 192, 32)));
    assert_eq!(hex_to_rgb("FF8000"), Some((255, 128, 0)));
    assert_eq!(hex_to_rgb(""), None);
    assert_eq!(hex_to_rgb("#+F+F+F"), None);
}

#[test]
fn test_signed_hex_color_rejected() {
    let json = r##"{"version": "1", "ramps": {"x": {"name": "X", "colors": ["#+F+F+F"]}}}"##;
    let config = RampConfig::from_json(json).unwrap();
    assert!(matches!(config.build_ramp("x"), Err(ReliefError::InvalidRamp(_))));
}
