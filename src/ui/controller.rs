use std::rc::Rc;
use std::time::Instant;

use crate::actions::SelectionInfo;
use crate::config::{OptionEntry, Settings};
use crate::geometry::Size;
use crate::state::ContainerState;

use super::widgets::{
    lookup_button, option_button, Container, OptionButton, OptionsPanel, PanelState,
    PersistIndicator, Visibility,
};

/// Owns the widget tree and its visibility. Every operation is a no-op while
/// the tree is not built.
#[derive(Debug)]
pub struct WidgetController {
    settings: Rc<Settings>,
    options: Vec<OptionEntry>,
    container: Option<Container>,
    persist: bool,
}

impl WidgetController {
    pub fn new(settings: Rc<Settings>) -> Self {
        let options = settings.options();
        Self {
            settings,
            options,
            container: None,
            persist: false,
        }
    }

    pub fn state(&self) -> ContainerState {
        match &self.container {
            None => ContainerState::NotBuilt,
            Some(container) if container.visibility == Visibility::Visible => {
                ContainerState::Visible
            }
            Some(_) => ContainerState::Hidden,
        }
    }

    pub fn is_built(&self) -> bool {
        self.container.is_some()
    }

    pub fn container(&self) -> Option<&Container> {
        self.container.as_ref()
    }

    pub(crate) fn container_mut(&mut self) -> Option<&mut Container> {
        self.container.as_mut()
    }

    pub fn persist(&self) -> bool {
        self.persist
    }

    pub fn options_expanded(&self) -> bool {
        self.container
            .as_ref()
            .is_some_and(|container| container.options_panel.state == PanelState::Expanded)
    }

    pub fn option_button(&self, index: usize) -> Option<&OptionButton> {
        self.container
            .as_ref()
            .and_then(|container| container.options_panel.buttons.get(index))
    }

    pub fn create_elements(&mut self) {
        if self.container.is_some() {
            return;
        }

        self.container = Some(Container {
            button: lookup_button(&self.settings),
            options_panel: OptionsPanel::default(),
            ..Container::default()
        });
        tracing::debug!(
            tooltip = %self.settings.icon_tooltip,
            logo = !self.settings.logo_url.is_empty(),
            "created widget elements"
        );
    }

    /// Replaces the panel's content with one button per option, in display
    /// order. Clicks are routed back by button index.
    pub fn create_option_buttons(&mut self) {
        let Some(container) = self.container.as_mut() else {
            return;
        };

        container.options_panel.buttons = self
            .options
            .iter()
            .map(|entry| option_button(entry, &self.settings))
            .collect();
        tracing::debug!(
            count = container.options_panel.buttons.len(),
            "rebuilt option buttons"
        );
    }

    pub fn set_selection_info(&mut self, info: SelectionInfo) {
        if let Some(container) = self.container.as_mut() {
            container.selection_info = info;
            container.button.over_limit = info.over_limit;
        }
    }

    pub fn set_rendered_size(&mut self, size: Size) {
        if let Some(container) = self.container.as_mut() {
            container.rendered_size = Some(size);
        }
    }

    pub fn show_container(&mut self) {
        let Some(container) = self.container.as_mut() else {
            return;
        };
        container.visibility = Visibility::Visible;
    }

    pub fn hide_container(&mut self) {
        if self.persist {
            return;
        }
        let Some(container) = self.container.as_mut() else {
            return;
        };
        container.visibility = Visibility::Hidden;
    }

    pub fn show_options(&mut self) {
        if let Some(container) = self.container.as_mut() {
            container.options_panel.state = PanelState::Expanded;
        }
    }

    pub fn hide_options(&mut self) {
        if let Some(container) = self.container.as_mut() {
            container.options_panel.state = PanelState::Collapsed;
        }
    }

    /// Flips persist mode and returns the new value. Entering it forces the
    /// container visible.
    pub fn toggle_persist(&mut self) -> bool {
        self.persist = !self.persist;
        if self.persist {
            self.show_container();
        }
        self.persist
    }

    pub fn set_persist_indicator(&mut self, visible: bool) {
        let Some(container) = self.container.as_mut() else {
            return;
        };
        match (visible, container.persist_indicator.is_some()) {
            (true, false) => container.persist_indicator = Some(PersistIndicator::default()),
            (false, true) => container.persist_indicator = None,
            _ => {}
        }
    }

    pub fn flag_copied(&mut self, index: usize, now: Instant) {
        if let Some(button) = self
            .container
            .as_mut()
            .and_then(|container| container.options_panel.buttons.get_mut(index))
        {
            button.flag_copied(now);
        }
    }

    /// Expires transient feedback whose window has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(container) = self.container.as_mut() {
            for button in &mut container.options_panel.buttons {
                button.expire_copied(now);
            }
        }
    }

    /// Drops the widget tree; persist mode is left as is.
    pub fn dispose(&mut self) {
        if self.container.take().is_some() {
            tracing::debug!("disposed widget elements");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve;
    use serde_json::json;
    use std::time::Duration;

    fn controller() -> WidgetController {
        let settings = resolve(Some(&json!({
            "options": [
                { "prefix": "Explain: ", "text": "Explain", "position": 1 },
                { "action": "copy", "text": "Copy", "position": 2 }
            ]
        })));
        WidgetController::new(Rc::new(settings))
    }

    #[test]
    fn operations_are_no_ops_before_elements_exist() {
        let mut ui = controller();
        ui.show_container();
        ui.hide_container();
        ui.show_options();
        ui.create_option_buttons();
        ui.set_persist_indicator(true);
        ui.flag_copied(0, Instant::now());

        assert!(!ui.is_built());
        assert_eq!(ui.state(), ContainerState::NotBuilt);
    }

    #[test]
    fn create_elements_is_idempotent() {
        let mut ui = controller();
        ui.create_elements();
        ui.create_option_buttons();
        ui.create_elements();

        assert_eq!(ui.state(), ContainerState::Hidden);
        assert_eq!(ui.container().expect("built").options_panel.buttons.len(), 2);
        assert_eq!(
            ui.container().expect("built").visibility,
            Visibility::Hidden
        );
    }

    #[test]
    fn option_buttons_follow_display_order_and_fully_replace() {
        let mut ui = controller();
        ui.create_elements();
        ui.create_option_buttons();
        ui.create_option_buttons();

        let labels: Vec<_> = ui
            .container()
            .expect("built")
            .options_panel
            .buttons
            .iter()
            .map(|button| button.label.clone().unwrap_or_default())
            .collect();
        assert_eq!(labels, ["Copy", "Explain"]);
    }

    #[test]
    fn persist_blocks_hide_until_toggled_off() {
        let mut ui = controller();
        ui.create_elements();

        assert!(ui.toggle_persist());
        assert_eq!(ui.state(), ContainerState::Visible);
        ui.hide_container();
        assert_eq!(ui.state(), ContainerState::Visible);

        assert!(!ui.toggle_persist());
        ui.hide_container();
        assert_eq!(ui.state(), ContainerState::Hidden);
    }

    #[test]
    fn options_panel_toggles_independently_of_container() {
        let mut ui = controller();
        ui.create_elements();
        ui.show_options();
        assert!(ui.options_expanded());
        assert_eq!(ui.state(), ContainerState::Hidden);

        ui.hide_options();
        assert!(!ui.options_expanded());
    }

    #[test]
    fn persist_indicator_is_added_and_removed() {
        let mut ui = controller();
        ui.create_elements();
        ui.set_persist_indicator(true);
        assert!(ui.container().expect("built").persist_indicator.is_some());
        ui.set_persist_indicator(false);
        assert!(ui.container().expect("built").persist_indicator.is_none());
    }

    #[test]
    fn copy_feedback_resets_on_second_copy() {
        let mut ui = controller();
        ui.create_elements();
        ui.create_option_buttons();
        let now = Instant::now();

        ui.flag_copied(0, now);
        ui.flag_copied(0, now + Duration::from_millis(600));
        ui.tick(now + Duration::from_millis(1_200));
        assert!(ui.option_button(0).expect("button").is_copied());

        ui.tick(now + Duration::from_millis(1_600));
        assert!(!ui.option_button(0).expect("button").is_copied());
    }

    #[test]
    fn dispose_returns_to_not_built() {
        let mut ui = controller();
        ui.create_elements();
        ui.show_container();
        ui.dispose();
        assert!(!ui.is_built());
        assert_eq!(ui.state(), ContainerState::NotBuilt);
    }

    #[test]
    fn state_follows_widget_tree_across_repeated_cycles() {
        let mut ui = controller();
        ui.create_elements();
        for _ in 0..1_000 {
            ui.show_container();
            assert_eq!(ui.state(), ContainerState::Visible);
            ui.hide_container();
            assert_eq!(ui.state(), ContainerState::Hidden);
        }

        ui.show_container();
        assert_eq!(
            ui.container().expect("built").visibility,
            Visibility::Visible
        );
        ui.dispose();
        assert_eq!(ui.state(), ContainerState::NotBuilt);
    }

    #[test]
    fn selection_info_marks_button_over_limit() {
        let mut ui = controller();
        ui.create_elements();
        ui.set_selection_info(SelectionInfo {
            char_count: 2001,
            over_limit: true,
        });
        let container = ui.container().expect("built");
        assert!(container.button.over_limit);
        assert_eq!(container.selection_info.char_count, 2001);
    }
}
