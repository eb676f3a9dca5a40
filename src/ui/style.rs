use std::time::Duration;

/// Compile-time widget tokens, not host-overridable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleTokens {
    pub container_z_index: i32,
    pub indicator_z_index: i32,
    pub options_slide_px: f64,
    pub option_icon_size: u32,
    pub option_icon_gap_px: u32,
    pub viewport_margin_px: f64,
    pub copy_feedback: Duration,
}

pub const WIDGET_TOKENS: StyleTokens = StyleTokens {
    container_z_index: 10_000,
    indicator_z_index: 10_001,
    options_slide_px: -20.0,
    option_icon_size: 18,
    option_icon_gap_px: 5,
    viewport_margin_px: 8.0,
    copy_feedback: Duration::from_millis(1_000),
};

pub const CONTAINER_ID: &str = "selection-lookup-container";
pub const BUTTON_ID: &str = "selection-lookup-button";
pub const OPTIONS_PANEL_ID: &str = "selection-lookup-options";
pub const PERSIST_INDICATOR_ID: &str = "selection-lookup-persist-indicator";
pub const OPTION_BUTTON_CLASS: &str = "selection-lookup-option";
pub const COPIED_CLASS: &str = "copied";
pub const LOGO_ALT: &str = "Perplexity AI";
pub const PERSIST_INDICATOR_TEXT: &str = "INSPECT MODE - Press Ctrl+Alt+P to disable";

#[cfg(test)]
mod tests {
    use super::WIDGET_TOKENS;
    use std::time::Duration;

    #[test]
    fn widget_tokens_keep_stacking_above_page_content() {
        assert_eq!(WIDGET_TOKENS.container_z_index, 10_000);
        assert!(WIDGET_TOKENS.indicator_z_index > WIDGET_TOKENS.container_z_index);
    }

    #[test]
    fn widget_tokens_match_feedback_and_motion_values() {
        assert_eq!(WIDGET_TOKENS.copy_feedback, Duration::from_millis(1_000));
        assert_eq!(WIDGET_TOKENS.options_slide_px, -20.0);
        assert_eq!(WIDGET_TOKENS.viewport_margin_px, 8.0);
    }
}
