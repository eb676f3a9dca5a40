use std::sync::LazyLock;

use regex::Regex;

const MOBILE_MAX_WIDTH: f64 = 767.0;
const TABLET_MAX_WIDTH: f64 = 1023.0;
const DESKTOP_MAX_WIDTH: f64 = 1499.0;

static APPLE_MOBILE_AGENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("iPad|iPhone|iPod").expect("static pattern"));
static OTHER_MOBILE_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(?i)android|webOS|BlackBerry|IEMobile|Opera Mini").expect("static pattern")
});

/// Viewport width bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenSize {
    Mobile,
    Tablet,
    Desktop,
    Widescreen,
}

impl ScreenSize {
    pub fn for_width(width: f64) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            Self::Mobile
        } else if width <= TABLET_MAX_WIDTH {
            Self::Tablet
        } else if width <= DESKTOP_MAX_WIDTH {
            Self::Desktop
        } else {
            Self::Widescreen
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
            Self::Widescreen => "widescreen",
        }
    }
}

/// Any single positive signal is enough: a phone/tablet user agent, or a
/// touch screen on a mobile-width viewport.
pub fn is_mobile_device(user_agent: &str, has_touch: bool, viewport_width: f64) -> bool {
    if APPLE_MOBILE_AGENT.is_match(user_agent) || OTHER_MOBILE_AGENT.is_match(user_agent) {
        return true;
    }

    has_touch && viewport_width <= MOBILE_MAX_WIDTH
}
