use countdown_core::Command;
use tauri::menu::{IsMenuItem, Menu, MenuItem};
use tracing::debug;

const TRAY_ID: &str = "desktop-countdown-tray";
const TRAY_TOOLTIP: &str = "Desktop Countdown";

/// Installs the tray icon whose menu maps one-to-one onto shell commands.
pub fn install(app: &tauri::App) -> tauri::Result<()> {
    let items = Command::TRAY_ITEMS
        .into_iter()
        .map(|command| {
            MenuItem::with_id(app, command.menu_id(), command.label(), true, None::<&str>)
        })
        .collect::<tauri::Result<Vec<_>>>()?;
    let entries: Vec<&dyn IsMenuItem<tauri::Wry>> = items
        .iter()
        .map(|item| item as &dyn IsMenuItem<tauri::Wry>)
        .collect();
    let menu = Menu::with_items(app, &entries)?;

    let mut tray_builder = tauri::tray::TrayIconBuilder::with_id(TRAY_ID)
        .menu(&menu)
        .tooltip(TRAY_TOOLTIP)
        .on_menu_event(|app, event| match Command::from_menu_id(event.id().as_ref()) {
            Some(command) => crate::dispatch(app, command),
            None => debug!(id = ?event.id(), "ignoring unknown menu event"),
        });

    if let Some(icon) = app.default_window_icon().cloned() {
        tray_builder = tray_builder.icon(icon);
    }

    let _tray = tray_builder.build(app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_labels_are_unique() {
        let mut labels: Vec<&str> = Command::TRAY_ITEMS.iter().map(|c| c.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Command::TRAY_ITEMS.len());
    }
}
