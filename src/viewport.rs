use std::cell::Cell;
use std::rc::Rc;

use crate::config::{is_mobile_device, ScreenSize};

/// Visible viewport, scroll offsets and the device facts used for mobile detection.
pub trait ViewportInfo {
    fn inner_width(&self) -> f64;
    fn inner_height(&self) -> f64;
    fn scroll_x(&self) -> f64;
    fn scroll_y(&self) -> f64;
    fn user_agent(&self) -> String;
    fn has_touch(&self) -> bool;

    fn screen_size(&self) -> ScreenSize {
        ScreenSize::for_width(self.inner_width())
    }

    fn is_mobile_device(&self) -> bool {
        is_mobile_device(&self.user_agent(), self.has_touch(), self.inner_width())
    }
}

#[derive(Debug, Clone)]
pub struct FixedViewport {
    width: f64,
    height: f64,
    scroll_x: Cell<f64>,
    scroll_y: Cell<f64>,
    user_agent: String,
    has_touch: bool,
}

impl FixedViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_x: Cell::new(0.0),
            scroll_y: Cell::new(0.0),
            user_agent: String::new(),
            has_touch: false,
        }
    }

    pub fn with_device(mut self, user_agent: impl Into<String>, has_touch: bool) -> Self {
        self.user_agent = user_agent.into();
        self.has_touch = has_touch;
        self
    }

    pub fn scroll_to(&self, x: f64, y: f64) {
        self.scroll_x.set(x);
        self.scroll_y.set(y);
    }
}

impl Default for FixedViewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

impl ViewportInfo for FixedViewport {
    fn inner_width(&self) -> f64 {
        self.width
    }

    fn inner_height(&self) -> f64 {
        self.height
    }

    fn scroll_x(&self) -> f64 {
        self.scroll_x.get()
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn has_touch(&self) -> bool {
        self.has_touch
    }
}

impl<V: ViewportInfo + ?Sized> ViewportInfo for Rc<V> {
    fn inner_width(&self) -> f64 {
        (**self).inner_width()
    }

    fn inner_height(&self) -> f64 {
        (**self).inner_height()
    }

    fn scroll_x(&self) -> f64 {
        (**self).scroll_x()
    }

    fn scroll_y(&self) -> f64 {
        (**self).scroll_y()
    }

    fn user_agent(&self) -> String {
        (**self).user_agent()
    }

    fn has_touch(&self) -> bool {
        (**self).has_touch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_viewport_reports_screen_size_and_scroll() {
        let viewport = FixedViewport::new(900.0, 600.0);
        viewport.scroll_to(5.0, 40.0);

        assert_eq!(viewport.screen_size(), ScreenSize::Tablet);
        assert_eq!(viewport.scroll_x(), 5.0);
        assert_eq!(viewport.scroll_y(), 40.0);
        assert!(!viewport.is_mobile_device());
    }

    #[test]
    fn touch_on_narrow_viewport_is_mobile() {
        let viewport = FixedViewport::new(390.0, 844.0).with_device("Mozilla/5.0", true);
        assert!(viewport.is_mobile_device());
    }
}
