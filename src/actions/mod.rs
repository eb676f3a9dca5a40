//! Selected-text bookkeeping and the effects a user can trigger on it.

mod print;

use std::rc::Rc;

use crate::clipboard::ClipboardWriter;
use crate::config::{OptionEntry, OptionKind, Settings, UtilityAction};
use crate::popup::PopupOpener;

pub use print::print_document;

pub const LOOKUP_SEARCH_URL: &str = "https://www.perplexity.ai/search";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionInfo {
    pub char_count: usize,
    /// Strictly greater than the configured limit.
    pub over_limit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    LookupOpened { url: String },
    LookupFailed { url: String },
    Copied,
    CopyFailed,
    PrintOpened,
    PrintFailed,
}

/// Search URL for `text`, trimmed and percent-encoded into the `q` parameter.
pub fn lookup_url(text: &str) -> String {
    format!("{LOOKUP_SEARCH_URL}?q={}", urlencoding::encode(text.trim()))
}

pub struct SelectionActions<C, P> {
    settings: Rc<Settings>,
    clipboard: C,
    popups: P,
    selected_text: String,
}

impl<C: ClipboardWriter, P: PopupOpener> SelectionActions<C, P> {
    pub fn new(settings: Rc<Settings>, clipboard: C, popups: P) -> Self {
        Self {
            settings,
            clipboard,
            popups,
            selected_text: String::new(),
        }
    }

    pub fn set_selected_text(&mut self, text: impl Into<String>) {
        self.selected_text = text.into();
    }

    pub fn selected_text(&self) -> &str {
        &self.selected_text
    }

    pub fn selection_info(&self) -> SelectionInfo {
        let char_count = self.selected_text.chars().count();
        SelectionInfo {
            char_count,
            over_limit: char_count > self.settings.max_character_limit,
        }
    }

    pub fn open_lookup(&self, text: &str) -> ActionOutcome {
        let url = lookup_url(text);
        match self.popups.open_url(&url) {
            Ok(()) => {
                tracing::debug!(%url, "opened lookup");
                ActionOutcome::LookupOpened { url }
            }
            Err(err) => {
                tracing::error!(%err, %url, "failed to open lookup");
                ActionOutcome::LookupFailed { url }
            }
        }
    }

    /// Runs `option` against the stored selection, then calls `hide` whatever
    /// the result.
    pub fn handle_option_click(&self, option: &OptionEntry, hide: impl FnOnce()) -> ActionOutcome {
        let outcome = match &option.kind {
            OptionKind::Query { prefix } => {
                self.open_lookup(&format!("{prefix}{}", self.selected_text))
            }
            OptionKind::Utility {
                action: UtilityAction::Copy,
            } => self.copy_to_clipboard(&self.selected_text),
            OptionKind::Utility {
                action: UtilityAction::Print,
            } => self.print_selection(),
        };
        hide();
        outcome
    }

    pub fn copy_to_clipboard(&self, text: &str) -> ActionOutcome {
        match self.clipboard.write_text(text) {
            Ok(()) => {
                tracing::debug!(chars = text.chars().count(), "text copied to clipboard");
                ActionOutcome::Copied
            }
            Err(err) => {
                tracing::error!(%err, "failed to copy text");
                ActionOutcome::CopyFailed
            }
        }
    }

    pub fn print_selection(&self) -> ActionOutcome {
        match self
            .popups
            .open_document(&print_document(&self.selected_text))
        {
            Ok(()) => ActionOutcome::PrintOpened,
            Err(err) => {
                tracing::error!(%err, "failed to open print view");
                ActionOutcome::PrintFailed
            }
        }
    }
}
