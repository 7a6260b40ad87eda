use std::path::Path;

use countdown_core::{Label, Position, Size, Surface, SurfaceError, WorkArea};
use tauri::{Emitter, PhysicalPosition, PhysicalSize, WebviewWindow};
use tracing::info;

/// Event the webview listens to for label updates.
pub const PAINT_EVENT: &str = "countdown://paint";

/// Event the webview emits once its paint listener is registered.
pub const READY_EVENT: &str = "countdown://ready";

/// The countdown window as seen by the shell.
pub struct WidgetSurface {
    window: WebviewWindow,
}

impl WidgetSurface {
    pub fn new(window: WebviewWindow) -> Self {
        Self { window }
    }
}

fn failed(operation: &'static str) -> impl FnOnce(tauri::Error) -> SurfaceError {
    move |err| SurfaceError::new(operation, err.to_string())
}

impl Surface for WidgetSurface {
    fn show(&mut self) -> Result<(), SurfaceError> {
        self.window.show().map_err(failed("show"))
    }

    fn hide(&mut self) -> Result<(), SurfaceError> {
        self.window.hide().map_err(failed("hide"))
    }

    fn resize(&mut self, size: Size) -> Result<(), SurfaceError> {
        self.window
            .set_size(PhysicalSize::new(size.width, size.height))
            .map_err(failed("resize"))
    }

    fn move_to(&mut self, position: Position) -> Result<(), SurfaceError> {
        self.window
            .set_position(PhysicalPosition::new(position.x, position.y))
            .map_err(failed("move"))
    }

    fn work_area(&self) -> Result<WorkArea, SurfaceError> {
        let monitor = self
            .window
            .primary_monitor()
            .map_err(failed("work area"))?
            .ok_or_else(|| SurfaceError::new("work area", "no primary monitor"))?;
        let area = monitor.work_area();
        Ok(WorkArea::new(
            Position::new(area.position.x, area.position.y),
            Size::new(area.size.width, area.size.height),
        ))
    }

    fn paint(&mut self, label: &Label) -> Result<(), SurfaceError> {
        self.window
            .emit(PAINT_EVENT, label.clone())
            .map_err(failed("paint"))
    }

    fn open_in_editor(&mut self, path: &Path) -> Result<(), SurfaceError> {
        info!(path = %path.display(), "opening config file");
        open::that(path).map_err(|err| SurfaceError::new("open config", err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = include_str!("../ui/index.html");

    #[test]
    fn page_listens_for_paint_and_reports_ready() {
        assert!(PAGE.contains(&format!("listen(\"{PAINT_EVENT}\"")));
        assert!(PAGE.contains(&format!("emit(\"{READY_EVENT}\")")));
    }
}
