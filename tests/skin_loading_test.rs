use logdeck::config::error::ConfigError;
use logdeck::{AppConfig, LogIndicator, StyleRegistry, Styles};
use ratatui::style::Color;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_skin_file_drives_indicator_colors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("skin.toml");
    fs::write(
        &path,
        r##"
        [views.log.indicator]
        fg_color = "#ffaf00"
        bg_color = "darkgray"
        "##,
    )
    .unwrap();

    let styles = Styles::resolve(path.to_str().unwrap()).unwrap();
    let registry = StyleRegistry::new(styles);
    let indicator = LogIndicator::new(&AppConfig::default(), &registry);

    let surface = indicator.surface();
    assert_eq!(surface.text_color(), Color::Rgb(0xff, 0xaf, 0x00));
    assert_eq!(surface.background_color(), Color::DarkGray);
}

#[test]
fn test_invalid_skin_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("skin.toml");
    fs::write(&path, "[views.log.indicator]\nfg_color = \"glitter\"\n").unwrap();

    let err = Styles::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
    assert!(err.to_string().contains("glitter"));
}

#[test]
fn test_config_file_sets_full_screen_and_skin() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "skin = \"mono\"\n\n[logger]\nfull_screen_logs = true\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    let styles = Styles::resolve(config.skin.as_deref().unwrap()).unwrap();
    let indicator = LogIndicator::new(&config, &StyleRegistry::new(styles));

    assert!(indicator.is_full_screen());
    assert!(indicator.surface().text().contains("FullScreen: On"));
}
