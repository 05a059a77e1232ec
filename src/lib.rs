pub mod cli;
pub mod config;
pub mod console;
pub mod tui;

pub use config::{AppConfig, LoggerConfig};
pub use console::{Console, VerbosityLevel, console, init_console};
pub use tui::components::log_indicator::{AutoScroll, LogIndicator};
pub use tui::styles::{StyleRegistry, Styles, StylesListener};
pub use tui::surface::{TextSurface, TextView};
