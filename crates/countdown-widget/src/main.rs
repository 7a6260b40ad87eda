//! Desktop countdown widget entry point.

mod surface;
mod tray;

use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Local;
use countdown_core::{
    AppShell, Command, ConfigStore, Flow, Settings, ShellError, TracingConfig, init_tracing,
};
use notify_rust::Notification;
use tauri::{Listener, Manager, WebviewUrl, WebviewWindowBuilder};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::surface::{READY_EVENT, WidgetSurface};

const APP_NAME: &str = "Desktop Countdown";
const MAIN_WINDOW: &str = "main";
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Shell state shared with tray and timer callbacks. Only ever locked on
/// the main thread.
struct WidgetState(Mutex<AppShell<WidgetSurface>>);

fn main() -> ExitCode {
    let tracing_config = if cfg!(debug_assertions) {
        TracingConfig::debug()
    } else {
        TracingConfig::widget()
    };
    if let Err(err) = init_tracing(tracing_config) {
        eprintln!("failed to initialize tracing: {err}");
    }

    let store = ConfigStore::locate();
    let settings = match store.load() {
        Ok(settings) => settings,
        Err(err) => {
            report_fatal(&err.into());
            return ExitCode::FAILURE;
        }
    };

    let result = tauri::Builder::default()
        .setup(move |app| {
            setup(app, store, settings)?;
            Ok(())
        })
        .run(tauri::generate_context!());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "widget failed");
            ExitCode::FAILURE
        }
    }
}

fn setup(
    app: &mut tauri::App,
    store: ConfigStore,
    settings: Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    // The page asks for a repaint once its paint listener is registered.
    let handle = app.handle().clone();
    app.listen(READY_EVENT, move |_event| {
        if let Err(err) = dispatch_on_main(&handle, Command::Tick) {
            warn!(error = %err, "failed to schedule first paint");
        }
    });

    let builder = WebviewWindowBuilder::new(app, MAIN_WINDOW, WebviewUrl::App("index.html".into()))
        .title(APP_NAME)
        .decorations(false)
        .always_on_top(true)
        .skip_taskbar(true)
        .resizable(false)
        .visible(false);

    #[cfg(not(target_os = "macos"))]
    let builder = builder.transparent(true);

    let window = builder.build()?;

    let mut shell = AppShell::with_settings(store, settings, WidgetSurface::new(window));
    shell.start(&Local::now())?;
    app.manage(WidgetState(Mutex::new(shell)));

    tray::install(app)?;
    spawn_ticker(app.handle().clone());

    info!("countdown widget started");
    Ok(())
}

/// Sends `Command::Tick` to the main thread once per interval.
fn spawn_ticker(app: tauri::AppHandle) {
    tauri::async_runtime::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if let Err(err) = dispatch_on_main(&app, Command::Tick) {
                warn!(error = %err, "event loop unavailable, stopping ticker");
                break;
            }
        }
    });
}

fn dispatch_on_main(app: &tauri::AppHandle, command: Command) -> tauri::Result<()> {
    let handle = app.clone();
    app.run_on_main_thread(move || dispatch(&handle, command))
}

/// Runs one command against the shell. Must be called on the main thread.
pub(crate) fn dispatch(app: &tauri::AppHandle, command: Command) {
    let Some(state) = app.try_state::<WidgetState>() else {
        return;
    };
    let result = {
        let mut shell = state.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        shell.handle(command, &Local::now())
    };

    match result {
        Ok(Flow::Continue) => {}
        Ok(Flow::Exit) => app.exit(0),
        Err(err) if err.is_fatal() => {
            report_fatal(&err);
            app.exit(1);
        }
        Err(err) => warn!(error = %err, ?command, "command failed"),
    }
}

/// Logs a fatal error and tells the user through a desktop notification.
fn report_fatal(err: &ShellError) {
    error!(error = %err, "fatal configuration error");

    let mut notification = Notification::new();
    notification
        .appname(APP_NAME)
        .summary(APP_NAME)
        .body(&err.to_string());

    if let Err(notify_err) = notification.show() {
        warn!(error = %notify_err, "failed to show error notification");
    }
}
