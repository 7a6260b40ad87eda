//! The widget's single owner of state and its command dispatcher.
//!
//! Hosts (a GUI toolkit, or a test double) implement [`Surface`] and feed
//! every tray click and timer tick through [`AppShell::handle`].

use std::path::Path;

use chrono::{DateTime, TimeZone};
use tracing::{debug, info};

use crate::error::{ShellResult, SurfaceError};
use crate::render::{Label, label};
use crate::settings::{ConfigStore, Position, Settings, Size};

/// Everything the widget can be asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ShowWindow,
    HideWindow,
    MoveTopLeft,
    MoveTopRight,
    MoveBottomLeft,
    MoveBottomRight,
    OpenConfig,
    ReloadConfig,
    Exit,
    Tick,
}

impl Command {
    /// Tray menu entries, in display order.
    pub const TRAY_ITEMS: [Command; 9] = [
        Command::ShowWindow,
        Command::HideWindow,
        Command::MoveTopLeft,
        Command::MoveTopRight,
        Command::MoveBottomLeft,
        Command::MoveBottomRight,
        Command::OpenConfig,
        Command::ReloadConfig,
        Command::Exit,
    ];

    /// Stable menu identifier. `Tick` never appears in a menu.
    pub fn menu_id(self) -> &'static str {
        match self {
            Self::ShowWindow => "show-window",
            Self::HideWindow => "hide-window",
            Self::MoveTopLeft => "move-top-left",
            Self::MoveTopRight => "move-top-right",
            Self::MoveBottomLeft => "move-bottom-left",
            Self::MoveBottomRight => "move-bottom-right",
            Self::OpenConfig => "open-config",
            Self::ReloadConfig => "reload-config",
            Self::Exit => "exit",
            Self::Tick => "tick",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ShowWindow => "Show",
            Self::HideWindow => "Hide",
            Self::MoveTopLeft => "Window position - top left",
            Self::MoveTopRight => "Window position - top right",
            Self::MoveBottomLeft => "Window position - bottom left",
            Self::MoveBottomRight => "Window position - bottom right",
            Self::OpenConfig => "Open config file",
            Self::ReloadConfig => "Reload config",
            Self::Exit => "Exit",
            Self::Tick => "Tick",
        }
    }

    pub fn from_menu_id(id: &str) -> Option<Self> {
        Self::TRAY_ITEMS
            .into_iter()
            .find(|command| command.menu_id() == id)
    }
}

/// What the host should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Window, label and desktop capabilities the shell drives.
pub trait Surface {
    fn show(&mut self) -> Result<(), SurfaceError>;

    fn hide(&mut self) -> Result<(), SurfaceError>;

    fn resize(&mut self, size: Size) -> Result<(), SurfaceError>;

    fn move_to(&mut self, position: Position) -> Result<(), SurfaceError>;

    /// Usable area of the primary screen, excluding task bars and docks.
    fn work_area(&self) -> Result<WorkArea, SurfaceError>;

    fn paint(&mut self, label: &Label) -> Result<(), SurfaceError>;

    /// Opens a file with the user's external editor.
    fn open_in_editor(&mut self, path: &Path) -> Result<(), SurfaceError>;
}

/// A screen rectangle in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkArea {
    pub origin: Position,
    pub size: Size,
}

impl WorkArea {
    pub const fn new(origin: Position, size: Size) -> Self {
        Self { origin, size }
    }
}

#[derive(Debug, Clone, Copy)]
enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    fn position(self, area: WorkArea, window: Size) -> Position {
        let left = area.origin.x;
        let top = area.origin.y;
        let right = left + area.size.width as i32 - window.width as i32;
        let bottom = top + area.size.height as i32 - window.height as i32;
        match self {
            Self::TopLeft => Position::new(left, top),
            Self::TopRight => Position::new(right, top),
            Self::BottomLeft => Position::new(left, bottom),
            Self::BottomRight => Position::new(right, bottom),
        }
    }
}

/// Owns the current settings, where they come from, and the surface.
#[derive(Debug)]
pub struct AppShell<S> {
    store: ConfigStore,
    settings: Settings,
    surface: S,
    /// Size last applied to the window. Reload does not resize, so this can
    /// differ from `settings.window_size`.
    window_size: Size,
}

impl<S: Surface> AppShell<S> {
    /// Loads settings from `store`. A load error is fatal for the caller.
    pub fn new(store: ConfigStore, surface: S) -> ShellResult<Self> {
        let settings = store.load()?;
        Ok(Self::with_settings(store, settings, surface))
    }

    pub fn with_settings(store: ConfigStore, settings: Settings, surface: S) -> Self {
        let window_size = settings.window_size.dimensions();
        Self {
            store,
            settings,
            surface,
            window_size,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Applies the configured size and position, paints once, then shows
    /// the window.
    pub fn start<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> ShellResult<()> {
        let size = self.settings.window_size.dimensions();
        self.surface.resize(size)?;
        self.window_size = size;
        self.surface.move_to(self.settings.window_position)?;
        self.repaint(now)?;
        self.surface.show()?;
        Ok(())
    }

    /// Dispatches one command.
    pub fn handle<Tz: TimeZone>(
        &mut self,
        command: Command,
        now: &DateTime<Tz>,
    ) -> ShellResult<Flow> {
        if command != Command::Tick {
            debug!(?command, "handling command");
        }

        match command {
            Command::ShowWindow => self.surface.show()?,
            Command::HideWindow => self.surface.hide()?,
            Command::MoveTopLeft => self.move_to_corner(Corner::TopLeft)?,
            Command::MoveTopRight => self.move_to_corner(Corner::TopRight)?,
            Command::MoveBottomLeft => self.move_to_corner(Corner::BottomLeft)?,
            Command::MoveBottomRight => self.move_to_corner(Corner::BottomRight)?,
            Command::OpenConfig => self.surface.open_in_editor(self.store.path())?,
            Command::ReloadConfig => self.reload(now)?,
            Command::Tick => self.repaint(now)?,
            Command::Exit => {
                info!("exit requested");
                return Ok(Flow::Exit);
            }
        }

        Ok(Flow::Continue)
    }

    fn reload<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> ShellResult<()> {
        self.settings = self.store.load()?;
        self.repaint(now)
    }

    fn repaint<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> ShellResult<()> {
        self.surface.paint(&label(&self.settings, now))?;
        Ok(())
    }

    fn move_to_corner(&mut self, corner: Corner) -> ShellResult<()> {
        let area = self.surface.work_area()?;
        let position = corner.position(area, self.window_size);
        debug!(?corner, x = position.x, y = position.y, "moving window");
        self.surface.move_to(position)?;
        Ok(())
    }
}
