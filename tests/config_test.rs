//! Integration tests for Settings loading from config files

use std::fs;

use tempfile::TempDir;

use shexplain::config::Settings;

#[test]
fn given_config_file_when_loaded_then_overrides_named_fields_only() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("shexplain.toml");
    fs::write(&path, "width = 100\n").unwrap();

    // Act
    let settings = Settings::load_from(&path).expect("load settings");

    // Assert
    assert_eq!(settings.width, 100);
    assert_eq!(settings.pens, Settings::default().pens);
    assert_eq!(settings.kb_dir, Settings::default().kb_dir);
}

#[test]
fn given_config_with_kb_dir_when_loaded_then_tilde_expands() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("shexplain.toml");
    fs::write(&path, "kb_dir = \"~/my-kb\"\n").unwrap();

    let settings = Settings::load_from(&path).expect("load settings");

    let home = std::env::var("HOME").expect("HOME should be set");
    assert!(
        settings.kb_dir.starts_with(&home),
        "kb_dir should expand to home: {}",
        settings.kb_dir.display()
    );
}

#[test]
fn given_malformed_config_when_loaded_then_error_names_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("shexplain.toml");
    fs::write(&path, "width = \"plenty\"\n").unwrap();

    let err = Settings::load_from(&path).unwrap_err();

    assert!(err.to_string().contains("shexplain.toml"));
}

#[test]
fn given_missing_config_when_loaded_then_error() {
    let temp = TempDir::new().unwrap();
    assert!(Settings::load_from(&temp.path().join("absent.toml")).is_err());
}

#[test]
fn given_effective_settings_when_dumped_then_roundtrips_via_toml() {
    let settings = Settings {
        width: 72,
        pens: true,
        kb_dir: "/tmp/kb".into(),
    };

    let dumped = settings.to_toml().expect("serialize");
    let parsed: Settings = toml::from_str(&dumped).expect("reparse");

    assert_eq!(parsed, settings);
}
