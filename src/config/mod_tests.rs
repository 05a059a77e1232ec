use super::*;
use tempfile::TempDir;

#[test]
fn default_config_is_windowed_with_no_skin() {
    let config = AppConfig::default();

    assert!(!config.logger.full_screen_logs);
    assert!(config.skin.is_none());
    assert_eq!(config.get_verbosity(), VerbosityLevel::Normal);
}

#[test]
fn empty_file_parses_to_defaults() {
    let config: AppConfig = toml::from_str("").unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn full_screen_logs_is_read_from_logger_table() {
    let config: AppConfig = toml::from_str(
        r#"
        skin = "light"

        [logger]
        full_screen_logs = true
        "#,
    )
    .unwrap();

    assert!(config.logger.full_screen_logs);
    assert_eq!(config.skin.as_deref(), Some("light"));
}

#[test]
fn verbosity_strings_map_to_levels() {
    let mut config = AppConfig::default();
    for (value, level) in [
        ("quiet", VerbosityLevel::Quiet),
        ("verbose", VerbosityLevel::Verbose),
        ("debug", VerbosityLevel::Debug),
        ("shouty", VerbosityLevel::Normal),
    ] {
        config.verbosity = Some(value.to_string());
        assert_eq!(config.get_verbosity(), level, "verbosity {value}");
    }
}

#[test]
fn save_then_load_preserves_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.logger.full_screen_logs = true;
    config.verbosity = Some("debug".to_string());
    config.save_to(&path).unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn load_from_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");

    let err = AppConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { path: ref p } if *p == path));
}

#[test]
fn load_from_invalid_toml_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "logger = ").unwrap();

    assert!(matches!(
        AppConfig::load_from(&path),
        Err(ConfigError::InvalidToml(_))
    ));
}
