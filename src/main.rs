use anyhow::{Context, Result};
use clap::Parser;
use logdeck::{
    cli::Cli,
    config::AppConfig,
    console::{console, init_console},
    tui::{self, styles::StyleRegistry, styles::Styles},
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, load_error) = match &cli.config {
        Some(path) => (
            AppConfig::load_from(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None,
        ),
        None => match AppConfig::load() {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        },
    };

    // CLI takes precedence over config
    let effective_verbosity = cli.get_effective_verbosity(config.get_verbosity());
    init_console(effective_verbosity);

    if let Some(e) = load_error {
        console().warning(&format!("Using default config: {:#}", e));
    }

    if cli.full_screen {
        config.logger.full_screen_logs = true;
    }

    let skin = cli.skin.clone().or_else(|| config.skin.clone());
    let styles = match skin.as_deref() {
        Some(skin) => {
            console().verbose(&format!("Using skin {}", skin));
            Styles::resolve(skin).with_context(|| format!("Failed to load skin {}", skin))?
        }
        None => Styles::default(),
    };
    console().verbose(&format!(
        "Full-screen logs: {}",
        config.logger.full_screen_logs
    ));

    if let Err(e) = tui::app::run(config, Arc::new(StyleRegistry::new(styles))).await {
        console().error(&format!("{:#}", e));
        std::process::exit(1);
    }
    console().goodbye();

    Ok(())
}
