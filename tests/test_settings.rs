// Tests for INI configuration loading
use octadist::settings::{init_logging, ConfigError, LoggingSettings, SettingsManager};
use octadist::{calc_all_with, OctahedralComplex};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("octadist_config.cfg");
    fs::write(
        &path,
        "[tolerance]\nplane = 1e-6\n\n[output]\npretty_json = false\n",
    )
    .unwrap();

    let manager = SettingsManager::from_file(&path).unwrap();
    let tolerances = manager.tolerances();
    assert_eq!(tolerances.plane, 1e-6);
    assert_eq!(tolerances.vector, 1e-10);
    assert!(!manager.output().pretty_json);
    assert_eq!(manager.output().precision, 6);
    assert_eq!(manager.logging().level, "info");
    assert!(manager.config_source().ends_with("octadist_config.cfg"));
}

#[test]
fn test_invalid_values_are_reported() {
    let dir = TempDir::new().unwrap();
    let cases = [
        ("[tolerance]\nvector = tiny\n", "vector"),
        ("[output]\nprecision = -2\n", "precision"),
        ("[output]\npretty_json = maybe\n", "pretty_json"),
        ("[logging]\nlevel = loud\n", "level"),
    ];
    for (content, what) in cases {
        let path = dir.path().join(format!("{}.cfg", what));
        fs::write(&path, content).unwrap();
        let result = SettingsManager::from_file(&path);
        assert!(
            matches!(result, Err(ConfigError::InvalidValue(_))),
            "{} should be rejected, got {:?}",
            what,
            result
        );
    }
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = SettingsManager::from_file(&dir.path().join("absent.cfg"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_template_can_be_edited_and_reloaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("octadist_config.cfg");
    SettingsManager::create_template(&path).unwrap();

    let edited = fs::read_to_string(&path)
        .unwrap()
        .replace("level = info", "level = debug");
    fs::write(&path, edited).unwrap();

    let manager = SettingsManager::from_file(&path).unwrap();
    assert_eq!(manager.logging().level, "debug");
    assert_eq!(manager.output().precision, 6);
}

#[test]
fn test_loaded_tolerances_drive_engine() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("strict.cfg");
    // A ligand 1e-6 Angstrom from the metal passes the default threshold
    // but not this one
    fs::write(&path, "[tolerance]\nvector = 1e-3\n").unwrap();
    let manager = SettingsManager::from_file(&path).unwrap();

    let complex = OctahedralComplex::from_coords(&[
        [0.0, 0.0, 0.0],
        [1e-6, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [-1.0, 0.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, -1.0],
    ])
    .unwrap();
    assert!(calc_all_with(&complex, &manager.tolerances()).is_err());
}

#[test]
fn test_logging_init_is_repeatable() {
    let logging = LoggingSettings {
        level: "warn".to_string(),
    };
    init_logging(&logging);
    init_logging(&logging);
}
