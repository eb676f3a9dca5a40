//! Wires host events to the selection handler, the positioner and the widget.

mod event;

use std::rc::Rc;
use std::time::Instant;

use crate::actions::{ActionOutcome, SelectionActions};
use crate::clipboard::ClipboardWriter;
use crate::config::Settings;
use crate::geometry::Size;
use crate::input::{resolve_shortcut, ShortcutAction, ShortcutKey, ShortcutModifiers};
use crate::popup::PopupOpener;
use crate::positioning::{ExternalPositioner, Positioner};
use crate::selection::{Selection, SelectionSource};
use crate::ui::WidgetController;
use crate::viewport::ViewportInfo;

pub use event::{ElementRef, WidgetEvent};

pub struct EventCoordinator<S, V, C, P> {
    settings: Rc<Settings>,
    ui: WidgetController,
    positioner: Positioner,
    actions: SelectionActions<C, P>,
    selection: S,
    viewport: V,
    listening: bool,
}

impl<S, V, C, P> EventCoordinator<S, V, C, P>
where
    S: SelectionSource,
    V: ViewportInfo,
    C: ClipboardWriter,
    P: PopupOpener,
{
    pub fn new(settings: Settings, selection: S, viewport: V, clipboard: C, popups: P) -> Self {
        let settings = Rc::new(settings);
        Self {
            ui: WidgetController::new(Rc::clone(&settings)),
            positioner: Positioner::new(Rc::clone(&settings)),
            actions: SelectionActions::new(Rc::clone(&settings), clipboard, popups),
            settings,
            selection,
            viewport,
            listening: false,
        }
    }

    /// Hands container placement to the host.
    pub fn with_external_positioning(mut self, external: Rc<dyn ExternalPositioner>) -> Self {
        self.positioner = self.positioner.clone().with_external(external);
        self
    }

    /// Starts accepting events. Stays inert on mobile devices unless the
    /// settings enable it; returns whether events are accepted.
    pub fn init(&mut self) -> bool {
        if self.listening {
            return true;
        }
        if self.viewport.is_mobile_device() && !self.settings.enable_on_mobile {
            tracing::info!("mobile device detected and mobile support disabled; not listening");
            return false;
        }
        self.listening = true;
        tracing::debug!(
            min_text_length = self.settings.min_text_length,
            options = self.settings.raw_options().len(),
            "event coordinator listening"
        );
        true
    }

    /// Stops accepting events and drops the widget tree.
    pub fn dispose(&mut self) {
        self.listening = false;
        self.ui.dispose();
        tracing::debug!("event coordinator disposed");
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ui(&self) -> &WidgetController {
        &self.ui
    }

    pub fn actions(&self) -> &SelectionActions<C, P> {
        &self.actions
    }

    /// Host callback once the container has been laid out.
    pub fn report_rendered_size(&mut self, size: Size) {
        self.ui.set_rendered_size(size);
    }

    /// Routes one host event. Returns the outcome when the event ran an action.
    pub fn dispatch(&mut self, event: WidgetEvent) -> Option<ActionOutcome> {
        if !self.listening {
            return None;
        }

        match event {
            WidgetEvent::SelectionChange | WidgetEvent::TouchEnd => {
                self.handle_text_selection();
                None
            }
            WidgetEvent::PointerDown { target } => {
                if self.ui.is_built() && !target.is_within_container() {
                    self.ui.hide_container();
                }
                None
            }
            WidgetEvent::PointerEnter { target } => {
                self.handle_pointer_enter(target);
                None
            }
            WidgetEvent::PointerLeave { target, related } => {
                self.handle_pointer_leave(target, related);
                None
            }
            WidgetEvent::KeyDown { key, modifiers } => {
                self.handle_key_down(key, modifiers);
                None
            }
            WidgetEvent::Click { target, at } => self.handle_click(target, at),
            WidgetEvent::Tick(now) => {
                self.ui.tick(now);
                None
            }
        }
    }

    fn ensure_elements(&mut self) {
        if !self.ui.is_built() {
            self.ui.create_elements();
            self.ui.create_option_buttons();
        }
    }

    fn handle_text_selection(&mut self) {
        let selection = self.selection.current_selection();
        let text = selection.as_ref().map(Selection::text).unwrap_or_default();
        let trimmed = text.trim();
        let length = trimmed.chars().count();

        tracing::debug!(
            length,
            min_text_length = self.settings.min_text_length,
            ranges = selection.as_ref().map_or(0, Selection::range_count),
            "selection event"
        );

        if length < self.settings.min_text_length {
            self.ui.hide_container();
            return;
        }

        self.actions.set_selected_text(trimmed);
        let info = self.actions.selection_info();
        if info.over_limit {
            tracing::debug!(
                char_count = info.char_count,
                limit = self.settings.max_character_limit,
                "selection exceeds character limit"
            );
        }

        self.ensure_elements();
        self.ui.set_selection_info(info);

        let positioned = self.positioner.position_container(
            self.ui.container_mut(),
            selection.as_ref(),
            &self.viewport,
        );
        if positioned {
            self.ui.show_container();
        }
    }

    fn handle_pointer_enter(&mut self, target: ElementRef) {
        if target == ElementRef::Button || target.is_within_options_panel() {
            self.ui.show_options();
        }
    }

    fn handle_pointer_leave(&mut self, target: ElementRef, related: Option<ElementRef>) {
        if self.ui.persist() {
            return;
        }
        let stays_in_pair = match target {
            ElementRef::Button => related.is_some_and(ElementRef::is_within_options_panel),
            ElementRef::OptionsPanel => related == Some(ElementRef::Button),
            _ => return,
        };
        if !stays_in_pair {
            self.ui.hide_options();
        }
    }

    fn handle_key_down(&mut self, key: ShortcutKey, modifiers: ShortcutModifiers) {
        let Some(ShortcutAction::TogglePersist) = resolve_shortcut(key, modifiers) else {
            return;
        };

        let persisting = self.ui.toggle_persist();
        tracing::info!(
            "persist mode {}",
            if persisting { "enabled" } else { "disabled" }
        );

        if persisting && !self.ui.is_built() {
            self.ensure_elements();
            self.ui.show_container();
        }
        self.ui.set_persist_indicator(persisting);
    }

    fn handle_click(&mut self, target: ElementRef, at: Instant) -> Option<ActionOutcome> {
        match target {
            ElementRef::Button => {
                let outcome = self.actions.open_lookup(self.actions.selected_text());
                self.ui.hide_container();
                Some(outcome)
            }
            ElementRef::OptionButton(index) => {
                let entry = self.ui.option_button(index)?.entry.clone();
                let outcome = self
                    .actions
                    .handle_option_click(&entry, || self.ui.hide_container());
                if outcome == ActionOutcome::Copied {
                    self.ui.flag_copied(index, at);
                }
                Some(outcome)
            }
            _ => None,
        }
    }
}
