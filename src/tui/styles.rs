use crate::config::error::{ConfigError, ConfigResult};
use crate::console::console;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use std::{fmt, fs};

/// Names of the skins bundled with the binary.
pub const BUILTIN_SKINS: [&str; 3] = ["default", "light", "mono"];

/// A color as written in a skin file: a named color, `#rrggbb`, or `default`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SkinColor(String);

impl SkinColor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves to a terminal color. Unknown names fall back to the terminal default.
    pub fn color(&self) -> Color {
        self.try_color().unwrap_or(Color::Reset)
    }

    fn try_color(&self) -> Option<Color> {
        match self.0.trim() {
            "" | "default" => Some(Color::Reset),
            value => Color::from_str(value).ok(),
        }
    }
}

impl fmt::Display for SkinColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IndicatorStyles {
    #[serde(default = "default_indicator_fg")]
    pub fg_color: SkinColor,
    #[serde(default = "default_indicator_bg")]
    pub bg_color: SkinColor,
}

fn default_indicator_fg() -> SkinColor {
    SkinColor::new("#1e90ff")
}

fn default_indicator_bg() -> SkinColor {
    SkinColor::new("black")
}

impl Default for IndicatorStyles {
    fn default() -> Self {
        Self {
            fg_color: default_indicator_fg(),
            bg_color: default_indicator_bg(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogStyles {
    #[serde(default)]
    pub indicator: IndicatorStyles,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ViewStyles {
    #[serde(default)]
    pub log: LogStyles,
}

/// The active color palette shared by every widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Styles {
    #[serde(default)]
    pub views: ViewStyles,
}

impl Styles {
    pub fn indicator(&self) -> &IndicatorStyles {
        &self.views.log.indicator
    }

    /// Loads a skin from a TOML file and checks that every color resolves.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let styles: Styles = toml::from_str(content)?;
        styles.validate()?;
        Ok(styles)
    }

    pub fn builtin(name: &str) -> Option<Self> {
        let indicator = match name {
            "default" => IndicatorStyles::default(),
            "light" => IndicatorStyles {
                fg_color: SkinColor::new("#005f87"),
                bg_color: SkinColor::new("#e4e4e4"),
            },
            "mono" => IndicatorStyles {
                fg_color: SkinColor::new("white"),
                bg_color: SkinColor::new("default"),
            },
            _ => return None,
        };

        Some(Self {
            views: ViewStyles {
                log: LogStyles { indicator },
            },
        })
    }

    /// Resolves a bundled skin name, or else loads `skin` as a file path.
    pub fn resolve(skin: &str) -> ConfigResult<Self> {
        match Self::builtin(skin) {
            Some(styles) => Ok(styles),
            None => Self::load(Path::new(skin)),
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        let indicator = self.indicator();
        for (field, color) in [
            ("views.log.indicator.fg_color", &indicator.fg_color),
            ("views.log.indicator.bg_color", &indicator.bg_color),
        ] {
            if color.try_color().is_none() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: color.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Receives palette updates from a [`StyleRegistry`].
pub trait StylesListener: Send + Sync {
    fn styles_changed(&self, styles: &Styles);
}

/// Holds the current palette and broadcasts changes to registered widgets.
///
/// Listeners are held weakly: a widget that has been dropped is skipped and
/// forgotten on the next broadcast instead of being kept alive by the registry.
pub struct StyleRegistry {
    current: RwLock<Arc<Styles>>,
    listeners: Mutex<Vec<Weak<dyn StylesListener>>>,
}

impl StyleRegistry {
    pub fn new(styles: Styles) -> Self {
        Self {
            current: RwLock::new(Arc::new(styles)),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn current(&self) -> Arc<Styles> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn add_listener<L: StylesListener + 'static>(&self, listener: &Arc<L>) {
        let listener: Arc<dyn StylesListener> = listener.clone();
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::downgrade(&listener));
    }

    /// Replaces the palette and notifies every live listener.
    pub fn update(&self, styles: Styles) {
        let styles = Arc::new(styles);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&styles);

        let live: Vec<Arc<dyn StylesListener>> = {
            let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
            let before = listeners.len();
            listeners.retain(|listener| listener.strong_count() > 0);
            let pruned = before - listeners.len();
            if pruned > 0 {
                console().debug(&format!("Dropped {} stale style listener(s)", pruned));
            }
            listeners.iter().filter_map(Weak::upgrade).collect()
        };

        // Listeners run without the lock held.
        for listener in live {
            listener.styles_changed(&styles);
        }
    }

    /// Number of registered listeners that are still alive.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|listener| listener.strong_count() > 0)
            .count()
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new(Styles::default())
    }
}
