//! Retained widget tree rendered by the host.

use std::time::Instant;

use crate::actions::SelectionInfo;
use crate::config::{OptionEntry, OptionKind, Settings};
use crate::geometry::Size;

use super::style::{
    COPIED_CLASS, LOGO_ALT, OPTION_BUTTON_CLASS, PERSIST_INDICATOR_TEXT, WIDGET_TOKENS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

impl Visibility {
    pub const fn opacity(self) -> f64 {
        match self {
            Self::Hidden => 0.0,
            Self::Visible => 1.0,
        }
    }

    /// Whether the element receives pointer events.
    pub const fn interactive(self) -> bool {
        matches!(self, Self::Visible)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Collapsed,
    Expanded,
}

impl PanelState {
    pub const fn opacity(self) -> f64 {
        match self {
            Self::Collapsed => 0.0,
            Self::Expanded => 1.0,
        }
    }

    pub const fn translate_x(self) -> f64 {
        match self {
            Self::Collapsed => WIDGET_TOKENS.options_slide_px,
            Self::Expanded => 0.0,
        }
    }
}

/// Absolute, document-relative placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    pub z_index: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoImage {
    pub src: String,
    pub alt: &'static str,
    pub width: u32,
    pub height: u32,
    pub border_radius: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LookupButton {
    pub tooltip: Option<String>,
    pub logo: Option<LogoImage>,
    pub size: Option<(u32, u32)>,
    pub over_limit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionIcon {
    Logo(LogoImage),
    /// Icon-font class name, e.g. `dashicons-clipboard`.
    Symbol(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionButton {
    pub entry: OptionEntry,
    pub icon: Option<OptionIcon>,
    pub icon_gap_px: u32,
    pub label: Option<String>,
    pub tooltip: Option<String>,
    pub background_color: Option<String>,
    pub accent_color: Option<String>,
    pub font_color: Option<String>,
    pub font_size: u32,
    pub border_radius: u32,
    copied_until: Option<Instant>,
}

impl OptionButton {
    pub fn class_names(&self) -> Vec<&str> {
        let mut classes = vec![OPTION_BUTTON_CLASS];
        if let Some(color_class) = self.entry.colors.color_class.as_deref() {
            classes.push(color_class);
        }
        if self.copied_until.is_some() {
            classes.push(COPIED_CLASS);
        }
        classes
    }

    pub fn is_copied(&self) -> bool {
        self.copied_until.is_some()
    }

    pub(crate) fn flag_copied(&mut self, now: Instant) {
        self.copied_until = Some(now + WIDGET_TOKENS.copy_feedback);
    }

    pub(crate) fn expire_copied(&mut self, now: Instant) {
        if self.copied_until.is_some_and(|deadline| now >= deadline) {
            self.copied_until = None;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionsPanel {
    pub state: PanelState,
    pub buttons: Vec<OptionButton>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistIndicator {
    pub text: &'static str,
    pub z_index: i32,
}

impl Default for PersistIndicator {
    fn default() -> Self {
        Self {
            text: PERSIST_INDICATOR_TEXT,
            z_index: WIDGET_TOKENS.indicator_z_index,
        }
    }
}

/// Root of the widget: options panel first, then the button, as laid out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Container {
    pub visibility: Visibility,
    pub placement: Option<Placement>,
    /// Size measured by the host after layout, when it reports one.
    pub rendered_size: Option<Size>,
    pub options_panel: OptionsPanel,
    pub button: LookupButton,
    pub persist_indicator: Option<PersistIndicator>,
    pub selection_info: SelectionInfo,
}

impl Container {
    /// Rendered size, or the configured icon box before the host measured it.
    pub fn measured_or(&self, fallback: Size) -> Size {
        self.rendered_size.unwrap_or(fallback)
    }
}

fn logo(settings: &Settings, width: u32, height: u32, border_radius: u32) -> Option<LogoImage> {
    if settings.logo_url.is_empty() {
        return None;
    }
    Some(LogoImage {
        src: settings.logo_url.clone(),
        alt: LOGO_ALT,
        width,
        height,
        border_radius,
    })
}

pub fn lookup_button(settings: &Settings) -> LookupButton {
    let logo = logo(
        settings,
        settings.icon_width,
        settings.icon_height,
        settings.icon_border_radius,
    );
    LookupButton {
        tooltip: Some(settings.icon_tooltip.clone()).filter(|tooltip| !tooltip.is_empty()),
        size: logo
            .as_ref()
            .map(|_| (settings.icon_width, settings.icon_height)),
        logo,
        over_limit: false,
    }
}

pub fn option_button(entry: &OptionEntry, settings: &Settings) -> OptionButton {
    let icon = match &entry.kind {
        OptionKind::Query { .. } => logo(
            settings,
            WIDGET_TOKENS.option_icon_size,
            WIDGET_TOKENS.option_icon_size,
            0,
        )
        .map(OptionIcon::Logo),
        OptionKind::Utility { .. } => entry.icon.clone().map(OptionIcon::Symbol),
    };
    let icon_gap_px = match (&icon, &entry.text) {
        (Some(OptionIcon::Logo(_)), Some(_)) => WIDGET_TOKENS.option_icon_gap_px,
        _ => 0,
    };

    OptionButton {
        entry: entry.clone(),
        icon,
        icon_gap_px,
        label: entry.text.clone(),
        tooltip: entry.tooltip.clone(),
        background_color: entry.colors.background_color.clone(),
        accent_color: entry.colors.accent_color.clone(),
        font_color: entry.colors.font_color.clone(),
        font_size: settings.font_size,
        border_radius: settings.menu_border_radius,
        copied_until: None,
    }
}
