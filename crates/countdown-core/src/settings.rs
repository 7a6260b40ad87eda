//! Widget settings and the flat `key=value` file they are loaded from.
//!
//! The file is line oriented:
//!
//! ```text
//! EventName=Launch
//! TargetTime=1767225600
//! WindowSize=medium
//! FontSize=16
//! TextColor=#FFFFFF
//! WindowContent={EventName}: {Days}d {Hours}h {Mins}m {Seconds}s
//! WindowPosition=40,40
//! ```
//!
//! Validation is deliberately uneven. `TargetTime`, `FontSize` and
//! `TextColor` fail the whole load on a bad value, while `WindowSize` and
//! `WindowPosition` quietly fall back to their defaults. Existing config
//! files rely on that behaviour, so it is kept as is.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::color::TextColor;
use crate::error::{ConfigError, ConfigResult};

/// File name looked up next to the executable.
pub const CONFIG_FILE_NAME: &str = "countdown.conf";

/// Environment variable overriding the settings file location.
pub const CONFIG_PATH_ENV: &str = "DESKTOP_COUNTDOWN_CONFIG";

/// Font size used when the file does not set one.
pub const DEFAULT_FONT_SIZE: u32 = 16;

/// Width and height in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Screen coordinates of the window's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Parses `x,y`. Anything but exactly two integers yields `None`.
    fn parse(value: &str) -> Option<Self> {
        let parts: Vec<&str> = value.split(',').collect();
        let [x, y] = parts.as_slice() else {
            return None;
        };
        Some(Self::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
    }
}

/// Preset window dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl WindowSize {
    /// Case-insensitive lookup; unknown names map to `Medium`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "small" => Self::Small,
            "large" => Self::Large,
            "medium" => Self::Medium,
            other => {
                debug!(value = other, "unrecognised window size, using medium");
                Self::Medium
            }
        }
    }

    pub fn dimensions(self) -> Size {
        match self {
            Self::Small => Size::new(200, 100),
            Self::Medium => Size::new(300, 150),
            Self::Large => Size::new(400, 200),
        }
    }
}

/// Everything the widget needs to draw itself.
///
/// A value is always complete: fields missing from the file keep their
/// defaults. Reloading builds a fresh value rather than patching this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub event_name: String,
    pub target_time: DateTime<Local>,
    pub window_size: WindowSize,
    pub font_size: u32,
    pub text_color: TextColor,
    pub window_content: String,
    pub window_position: Position,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            event_name: String::new(),
            target_time: DateTime::<Utc>::UNIX_EPOCH.with_timezone(&Local),
            window_size: WindowSize::default(),
            font_size: DEFAULT_FONT_SIZE,
            text_color: TextColor::BLACK,
            window_content: String::new(),
            window_position: Position::default(),
        }
    }
}

impl Settings {
    /// Reads and parses the settings file at `path`.
    ///
    /// Bytes that are not valid UTF-8 (a file saved in a legacy code page)
    /// decode to U+FFFD instead of failing the load.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let bytes = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::parse(&String::from_utf8_lossy(&bytes))
    }

    /// Parses settings from file content.
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut settings = Self::default();

        for line in content.lines() {
            let parts: Vec<&str> = line.split('=').collect();
            let [key, value] = parts.as_slice() else {
                continue;
            };
            settings.apply(key.trim(), value.trim())?;
        }

        Ok(settings)
    }

    fn apply(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        match key {
            "EventName" => self.event_name = value.to_string(),
            "TargetTime" => {
                self.target_time = value
                    .parse::<i64>()
                    .ok()
                    .and_then(|secs| Local.timestamp_opt(secs, 0).single())
                    .ok_or_else(|| ConfigError::invalid_value(key, value))?;
            }
            "WindowSize" => self.window_size = WindowSize::parse_lenient(value),
            "FontSize" => {
                self.font_size = value
                    .parse::<u32>()
                    .ok()
                    .filter(|size| *size > 0)
                    .ok_or_else(|| ConfigError::invalid_value(key, value))?;
            }
            "TextColor" => {
                self.text_color = value
                    .parse()
                    .map_err(|_| ConfigError::invalid_value(key, value))?;
            }
            "WindowContent" => self.window_content = value.to_string(),
            "WindowPosition" => match Position::parse(value) {
                Some(position) => self.window_position = position,
                None => debug!(value, "malformed window position, keeping default"),
            },
            _ => debug!(key, "ignoring unknown settings key"),
        }
        Ok(())
    }
}

/// Locates and loads the settings file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `$DESKTOP_COUNTDOWN_CONFIG` when set, otherwise
    /// `countdown.conf` beside the executable.
    pub fn locate() -> Self {
        Self::new(resolve_path(std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> ConfigResult<Settings> {
        let settings = Settings::load(&self.path)?;
        info!(
            path = %self.path.display(),
            event = %settings.event_name,
            target = %settings.target_time,
            "settings loaded"
        );
        Ok(settings)
    }
}

fn resolve_path(override_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = override_path {
        return path;
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}
