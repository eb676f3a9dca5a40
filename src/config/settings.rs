use serde::Deserialize;
use serde_json::Value;

use super::device::ScreenSize;
use super::options::{parse_options, sort_by_position, OptionEntry};
use super::value::{flag, leading_integer, length_threshold, truthy_integer, truthy_string};

pub const DEFAULT_MIN_TEXT_LENGTH: usize = 10;
pub const DEFAULT_MAX_CHARACTER_LIMIT: usize = 2000;
pub const DEFAULT_ICON_SIZE: u32 = 24;
pub const DEFAULT_ICON_TOOLTIP: &str = "Lookup with Perplexity";
pub const DEFAULT_FONT_SIZE: u32 = 14;
pub const DEFAULT_MENU_BORDER_RADIUS: u32 = 4;
pub const DEFAULT_POSITION_OFFSET_X: i32 = 8;
pub const DEFAULT_POSITION_OFFSET_Y: i32 = -8;
const DEFAULT_RESPONSIVE_OFFSET: &str = "0px";

/// Per-breakpoint pixel offsets, kept in the host's `"<n>px"` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsiveOffsets {
    pub mobile: String,
    pub tablet: String,
    pub desktop: String,
    pub widescreen: String,
}

impl Default for ResponsiveOffsets {
    fn default() -> Self {
        Self {
            mobile: DEFAULT_RESPONSIVE_OFFSET.to_string(),
            tablet: DEFAULT_RESPONSIVE_OFFSET.to_string(),
            desktop: DEFAULT_RESPONSIVE_OFFSET.to_string(),
            widescreen: DEFAULT_RESPONSIVE_OFFSET.to_string(),
        }
    }
}

impl ResponsiveOffsets {
    fn from_value(value: Option<&Value>) -> Self {
        let Some(Value::Object(map)) = value else {
            return Self::default();
        };
        let entry = |key: &str| match map.get(key) {
            Some(Value::String(text)) if !text.is_empty() => text.clone(),
            Some(Value::Number(number)) => format!("{number}px"),
            _ => DEFAULT_RESPONSIVE_OFFSET.to_string(),
        };
        Self {
            mobile: entry("mobile"),
            tablet: entry("tablet"),
            desktop: entry("desktop"),
            widescreen: entry("widescreen"),
        }
    }

    pub fn for_size(&self, size: ScreenSize) -> &str {
        match size {
            ScreenSize::Mobile => &self.mobile,
            ScreenSize::Tablet => &self.tablet,
            ScreenSize::Desktop => &self.desktop,
            ScreenSize::Widescreen => &self.widescreen,
        }
    }

    pub fn offset_px(&self, size: ScreenSize) -> i32 {
        leading_integer(self.for_size(size))
            .and_then(|px| i32::try_from(px).ok())
            .unwrap_or(0)
    }
}

/// Resolved widget settings. Built once at startup and read-only afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub min_text_length: usize,
    pub max_character_limit: usize,
    pub logo_url: String,
    pub icon_width: u32,
    pub icon_height: u32,
    pub icon_border_radius: u32,
    pub icon_tooltip: String,
    pub font_size: u32,
    pub menu_border_radius: u32,
    pub debug: bool,
    pub enable_on_mobile: bool,
    pub position_offset_x: i32,
    pub position_offset_y: i32,
    pub responsive_x_offsets: ResponsiveOffsets,
    pub responsive_y_offsets: ResponsiveOffsets,
    pub clamp_to_viewport: bool,
    options: Vec<OptionEntry>,
}

impl Default for Settings {
    fn default() -> Self {
        resolve(None)
    }
}

impl Settings {
    /// Options in display order (descending `position`, stable).
    pub fn options(&self) -> Vec<OptionEntry> {
        sort_by_position(&self.options)
    }

    /// Options in the order the host supplied them.
    pub fn raw_options(&self) -> &[OptionEntry] {
        &self.options
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    /// `Some(Value::Null)` when the host sent an explicit null.
    #[serde(default, deserialize_with = "present")]
    min_text_length: Option<Value>,
    #[serde(default)]
    max_character_limit: Option<Value>,
    #[serde(default)]
    logo_url: Option<Value>,
    #[serde(default)]
    icon_width: Option<Value>,
    #[serde(default)]
    icon_height: Option<Value>,
    #[serde(default)]
    icon_border_radius: Option<Value>,
    #[serde(default)]
    icon_tooltip: Option<Value>,
    #[serde(default)]
    font_size: Option<Value>,
    #[serde(default)]
    menu_border_radius: Option<Value>,
    #[serde(default)]
    debug: Option<Value>,
    #[serde(default)]
    enable_on_mobile: Option<Value>,
    #[serde(default)]
    position_offset_x: Option<Value>,
    #[serde(default)]
    position_offset_y: Option<Value>,
    #[serde(default)]
    responsive_x_offsets: Option<Value>,
    #[serde(default)]
    responsive_y_offsets: Option<Value>,
    #[serde(default)]
    clamp_to_viewport: Option<Value>,
    #[serde(default)]
    options: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn truthy_u32(value: Option<&Value>, default: u32) -> u32 {
    u32::try_from(truthy_integer(value, i64::from(default))).unwrap_or(default)
}

fn truthy_i32(value: Option<&Value>, default: i32) -> i32 {
    i32::try_from(truthy_integer(value, i64::from(default))).unwrap_or(default)
}

fn truthy_usize(value: Option<&Value>, default: usize) -> usize {
    let fallback = i64::try_from(default).unwrap_or(i64::MAX);
    usize::try_from(truthy_integer(value, fallback)).unwrap_or(default)
}

/// Normalizes host-supplied settings. Never fails: an absent or malformed
/// source resolves to the defaults, key by key.
pub fn resolve(raw: Option<&Value>) -> Settings {
    let raw = match raw {
        None | Some(Value::Null) => RawSettings::default(),
        Some(value @ Value::Object(_)) => serde_json::from_value(value.clone())
            .unwrap_or_else(|err| {
                tracing::warn!(%err, "failed to read host settings; using defaults");
                RawSettings::default()
            }),
        Some(_) => {
            tracing::warn!("host settings are not an object; using defaults");
            RawSettings::default()
        }
    };

    // Any present minimum is honored, including zero and null.
    let min_text_length = raw
        .min_text_length
        .as_ref()
        .map_or(DEFAULT_MIN_TEXT_LENGTH, length_threshold);

    Settings {
        min_text_length,
        max_character_limit: truthy_usize(
            raw.max_character_limit.as_ref(),
            DEFAULT_MAX_CHARACTER_LIMIT,
        ),
        logo_url: truthy_string(raw.logo_url.as_ref(), ""),
        icon_width: truthy_u32(raw.icon_width.as_ref(), DEFAULT_ICON_SIZE),
        icon_height: truthy_u32(raw.icon_height.as_ref(), DEFAULT_ICON_SIZE),
        icon_border_radius: truthy_u32(raw.icon_border_radius.as_ref(), 0),
        icon_tooltip: truthy_string(raw.icon_tooltip.as_ref(), DEFAULT_ICON_TOOLTIP),
        font_size: truthy_u32(raw.font_size.as_ref(), DEFAULT_FONT_SIZE),
        menu_border_radius: truthy_u32(
            raw.menu_border_radius.as_ref(),
            DEFAULT_MENU_BORDER_RADIUS,
        ),
        debug: flag(raw.debug.as_ref()),
        enable_on_mobile: flag(raw.enable_on_mobile.as_ref()),
        position_offset_x: truthy_i32(raw.position_offset_x.as_ref(), DEFAULT_POSITION_OFFSET_X),
        position_offset_y: truthy_i32(raw.position_offset_y.as_ref(), DEFAULT_POSITION_OFFSET_Y),
        responsive_x_offsets: ResponsiveOffsets::from_value(raw.responsive_x_offsets.as_ref()),
        responsive_y_offsets: ResponsiveOffsets::from_value(raw.responsive_y_offsets.as_ref()),
        clamp_to_viewport: flag(raw.clamp_to_viewport.as_ref()),
        options: parse_options(raw.options.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_source_resolves_to_defaults() {
        let settings = resolve(None);
        assert_eq!(settings.min_text_length, 10);
        assert_eq!(settings.max_character_limit, 2000);
        assert_eq!(settings.logo_url, "");
        assert_eq!(settings.icon_width, 24);
        assert_eq!(settings.icon_height, 24);
        assert_eq!(settings.icon_border_radius, 0);
        assert_eq!(settings.icon_tooltip, "Lookup with Perplexity");
        assert_eq!(settings.font_size, 14);
        assert_eq!(settings.menu_border_radius, 4);
        assert!(!settings.debug);
        assert!(!settings.enable_on_mobile);
        assert_eq!(settings.position_offset_x, 8);
        assert_eq!(settings.position_offset_y, -8);
        assert_eq!(settings.responsive_x_offsets, ResponsiveOffsets::default());
        assert_eq!(settings.responsive_y_offsets.widescreen, "0px");
        assert!(!settings.clamp_to_viewport);
        assert!(settings.options().is_empty());
    }

    #[test]
    fn empty_object_matches_absent_source() {
        assert_eq!(resolve(Some(&json!({}))), resolve(None));
        assert_eq!(resolve(Some(&json!(null))), Settings::default());
    }

    #[test]
    fn non_object_source_falls_back_to_defaults() {
        assert_eq!(resolve(Some(&json!([1, 2, 3]))), Settings::default());
        assert_eq!(resolve(Some(&json!("settings"))), Settings::default());
    }

    #[test]
    fn host_values_override_defaults_including_stringified_numbers() {
        let settings = resolve(Some(&json!({
            "minTextLength": "3",
            "maxCharacterLimit": 500,
            "logoUrl": "https://example.test/icon.webp",
            "iconWidth": "26",
            "iconHeight": 26,
            "iconBorderRadius": 4,
            "iconTooltip": "Check with Perplexity",
            "fontSize": 12,
            "menuBorderRadius": 5,
            "debug": "1",
            "enableOnMobile": true,
            "positionOffsetX": "12",
            "positionOffsetY": 0,
            "responsiveXOffsets": { "mobile": "4px", "desktop": 10 }
        })));

        assert_eq!(settings.min_text_length, 3);
        assert_eq!(settings.max_character_limit, 500);
        assert_eq!(settings.logo_url, "https://example.test/icon.webp");
        assert_eq!(settings.icon_width, 26);
        assert_eq!(settings.icon_height, 26);
        assert_eq!(settings.icon_border_radius, 4);
        assert_eq!(settings.icon_tooltip, "Check with Perplexity");
        assert_eq!(settings.font_size, 12);
        assert_eq!(settings.menu_border_radius, 5);
        assert!(settings.debug);
        assert!(settings.enable_on_mobile);
        assert_eq!(settings.position_offset_x, 12);
        // zero is falsy and falls back
        assert_eq!(settings.position_offset_y, -8);
        assert_eq!(settings.responsive_x_offsets.mobile, "4px");
        assert_eq!(settings.responsive_x_offsets.tablet, "0px");
        assert_eq!(settings.responsive_x_offsets.desktop, "10px");
    }

    #[test]
    fn zero_min_text_length_is_honored() {
        let settings = resolve(Some(&json!({ "minTextLength": 0 })));
        assert_eq!(settings.min_text_length, 0);
    }

    #[test]
    fn null_or_blank_min_text_length_admits_every_selection() {
        assert_eq!(resolve(Some(&json!({ "minTextLength": null }))).min_text_length, 0);
        assert_eq!(resolve(Some(&json!({ "minTextLength": "" }))).min_text_length, 0);
        assert_eq!(resolve(Some(&json!({}))).min_text_length, 10);
    }

    #[test]
    fn debug_flag_ignores_other_truthy_values() {
        assert!(!resolve(Some(&json!({ "debug": "yes" }))).debug);
        assert!(!resolve(Some(&json!({ "debug": 1 }))).debug);
        assert!(resolve(Some(&json!({ "debug": true }))).debug);
    }

    #[test]
    fn responsive_offsets_parse_pixels_per_breakpoint() {
        let offsets = ResponsiveOffsets::from_value(Some(&json!({
            "mobile": "-6px",
            "widescreen": "bogus"
        })));
        assert_eq!(offsets.offset_px(ScreenSize::Mobile), -6);
        assert_eq!(offsets.offset_px(ScreenSize::Tablet), 0);
        assert_eq!(offsets.offset_px(ScreenSize::Widescreen), 0);
    }

    #[test]
    fn options_are_returned_in_display_order() {
        let settings = resolve(Some(&json!({
            "options": [
                { "prefix": "A ", "position": 1 },
                { "prefix": "B ", "position": 3 },
                { "prefix": "C ", "position": 2 },
                { "action": "copy" }
            ]
        })));

        let prefixes: Vec<String> = settings
            .options()
            .into_iter()
            .map(|option| match option.kind {
                crate::config::OptionKind::Query { prefix } => prefix,
                crate::config::OptionKind::Utility { action } => action.name().to_string(),
            })
            .collect();
        assert_eq!(prefixes, ["B ", "C ", "A ", "copy"]);
        assert_eq!(settings.raw_options().len(), 4);
    }
}
