//! Headless run of the widget: one selection, one click.

use std::rc::Rc;
use std::time::Instant;

use crate::actions::ActionOutcome;
use crate::clipboard::ClipboardWriter;
use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::events::{ElementRef, EventCoordinator, WidgetEvent};
use crate::geometry::Rect;
use crate::popup::PopupOpener;
use crate::selection::{Selection, SelectionRange, StaticSelection};
use crate::state::ContainerState;
use crate::viewport::FixedViewport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub text: String,
    /// Display-order index of a menu option; the main lookup when absent.
    pub option: Option<usize>,
}

impl LookupRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            option: None,
        }
    }

    pub fn with_option(mut self, index: usize) -> Self {
        self.option = Some(index);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The coordinator refused to listen on this device.
    Inactive,
    /// The selection did not bring the widget up.
    Hidden,
    Action(ActionOutcome),
}

fn headless_line(text: &str) -> Rect {
    let width = (text.chars().count().min(80) as f64) * 8.0;
    Rect::new(16.0, 16.0, width, 18.0)
}

pub fn run_session<C, P>(
    settings: Settings,
    request: &LookupRequest,
    clipboard: C,
    popups: P,
) -> AppResult<SessionOutcome>
where
    C: ClipboardWriter,
    P: PopupOpener,
{
    let selection = Rc::new(StaticSelection::new(Some(Selection::single(
        SelectionRange::new(request.text.clone(), headless_line(&request.text)),
    ))));
    let mut coordinator = EventCoordinator::new(
        settings,
        Rc::clone(&selection),
        FixedViewport::default(),
        clipboard,
        popups,
    );

    if !coordinator.init() {
        return Ok(SessionOutcome::Inactive);
    }

    coordinator.dispatch(WidgetEvent::SelectionChange);
    if coordinator.ui().state() != ContainerState::Visible {
        tracing::info!(
            min_text_length = coordinator.settings().min_text_length,
            "selection did not show the widget"
        );
        coordinator.dispose();
        return Ok(SessionOutcome::Hidden);
    }

    let target = match request.option {
        None => ElementRef::Button,
        Some(index) => {
            let available = coordinator
                .ui()
                .container()
                .map_or(0, |container| container.options_panel.buttons.len());
            if index >= available {
                coordinator.dispose();
                return Err(AppError::UnknownOption { index, available });
            }
            coordinator.dispatch(WidgetEvent::PointerEnter {
                target: ElementRef::Button,
            });
            ElementRef::OptionButton(index)
        }
    };

    let outcome = coordinator.dispatch(WidgetEvent::Click {
        target,
        at: Instant::now(),
    });
    coordinator.dispose();
    Ok(outcome.map_or(SessionOutcome::Hidden, SessionOutcome::Action))
}
