pub mod actions;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod popup;
pub mod positioning;
pub mod selection;
pub mod session;
pub mod state;
pub mod ui;
pub mod viewport;

use std::path::Path;
use std::time::Duration;

pub use error::{AppError, AppResult};
pub use session::{LookupRequest, SessionOutcome};

use clipboard::SystemClipboard;
use config::Settings;
use popup::SystemBrowser;

/// Settings from an explicit file, else from the host config directory.
pub fn load_settings(path: Option<&Path>) -> AppResult<Settings> {
    match path {
        Some(path) => Ok(config::load_settings_override(path)?),
        None => Ok(config::load_host_settings()),
    }
}

/// Entrypoint used by the CLI: runs one request against the desktop clipboard
/// and browser. Copied text is served for at most `clipboard_handoff` before
/// the process may exit.
pub fn run(
    settings: Settings,
    request: &LookupRequest,
    clipboard_handoff: Duration,
) -> AppResult<SessionOutcome> {
    tracing::info!("starting selection-lookup");
    let clipboard = SystemClipboard::with_handoff(clipboard_handoff);
    let outcome = session::run_session(settings, request, clipboard, SystemBrowser::new())?;
    tracing::info!(?outcome, "session complete");
    Ok(outcome)
}
