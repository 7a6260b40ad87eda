//! Core types: settings file, countdown rendering, command dispatch

pub mod color;
pub mod error;
pub mod remaining;
pub mod render;
pub mod settings;
pub mod shell;
pub mod tracing;

pub use color::TextColor;
pub use error::{ConfigError, ConfigResult, ShellError, ShellResult, SurfaceError};
pub use remaining::RemainingTime;
pub use render::{FONT_FAMILY, Label, label, render};
pub use settings::{ConfigStore, Position, Settings, Size, WindowSize};
pub use shell::{AppShell, Command, Flow, Surface, WorkArea};
pub use self::tracing::{LogFormat, TracingConfig, TracingError, init_tracing};
