use flashread::app::{App, AppEvent};
use flashread::engine::{
    DeadlineTimer, JsonSettingsStore, MemorySettingsStore, Session, SettingsStore,
};
use flashread::ui::TuiManager;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

/// Logs go to a file; stdout belongs to the TUI.
fn init_logging() {
    let Some(dir) = dirs::data_local_dir().map(|d| d.join("flashread")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("flashread.log"))
    else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flashread=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
}

fn settings_store() -> Box<dyn SettingsStore> {
    match JsonSettingsStore::default_location() {
        Ok(store) => {
            info!(path = %store.path().display(), "using settings file");
            Box::new(store)
        }
        Err(err) => {
            warn!(error = %err, "settings will not persist");
            Box::new(MemorySettingsStore::new())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let session = Session::with_store(settings_store(), DeadlineTimer::new());
    let mut app = App::new(session);

    if let Some(path) = std::env::args().nth(1) {
        app.handle_event(AppEvent::LoadFile(path));
    }

    let mut tui = TuiManager::new()?;
    tui.run_event_loop(&mut app)?;

    info!("exiting");
    Ok(())
}
