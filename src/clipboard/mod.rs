use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
#[cfg(target_os = "linux")]
use std::time::Instant;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("failed to access system clipboard: {source}")]
    Unavailable {
        #[source]
        source: arboard::Error,
    },
    #[error("failed to set clipboard text: {source}")]
    SetText {
        #[source]
        source: arboard::Error,
    },
    #[error("clipboard write was rejected: {reason}")]
    Rejected { reason: String },
}

pub type ClipboardResult<T> = std::result::Result<T, ClipboardError>;

pub trait ClipboardWriter {
    fn write_text(&self, text: &str) -> ClipboardResult<()>;
}

/// Desktop clipboard through `arboard`.
///
/// The `arboard::Clipboard` is created on first write and kept for the
/// lifetime of this value: on X11 and Wayland the copied text is served by
/// its owner and disappears when the owner is dropped.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: RefCell<Option<arboard::Clipboard>>,
    handoff: Option<Duration>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// For processes that exit right after copying. On Linux each write keeps
    /// serving the text until another program takes the clipboard over (a
    /// clipboard manager usually does at once) or `handoff` elapses.
    pub fn with_handoff(handoff: Duration) -> Self {
        Self {
            clipboard: RefCell::new(None),
            handoff: Some(handoff),
        }
    }

    pub fn handoff(&self) -> Option<Duration> {
        self.handoff
    }
}

impl fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.clipboard.borrow().is_some())
            .field("handoff", &self.handoff)
            .finish()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> ClipboardResult<()> {
        let mut slot = self.clipboard.borrow_mut();
        let clipboard = match slot.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|source| ClipboardError::Unavailable { source })?,
        };
        let clipboard = slot.insert(clipboard);
        set_text(clipboard, text, self.handoff).map_err(|source| ClipboardError::SetText { source })
    }
}

#[cfg(target_os = "linux")]
fn set_text(
    clipboard: &mut arboard::Clipboard,
    text: &str,
    handoff: Option<Duration>,
) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    match handoff {
        Some(handoff) => clipboard
            .set()
            .wait_until(Instant::now() + handoff)
            .text(text.to_owned()),
        None => clipboard.set_text(text.to_owned()),
    }
}

#[cfg(not(target_os = "linux"))]
fn set_text(
    clipboard: &mut arboard::Clipboard,
    text: &str,
    _handoff: Option<Duration>,
) -> Result<(), arboard::Error> {
    clipboard.set_text(text.to_owned())
}

impl<C: ClipboardWriter + ?Sized> ClipboardWriter for Rc<C> {
    fn write_text(&self, text: &str) -> ClipboardResult<()> {
        (**self).write_text(text)
    }
}
