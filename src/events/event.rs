use std::time::Instant;

use crate::input::{ShortcutKey, ShortcutModifiers};

/// Element a pointer event landed on, as resolved by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRef {
    /// Anything on the page that is not part of the widget.
    Outside,
    Container,
    Button,
    OptionsPanel,
    OptionButton(usize),
    PersistIndicator,
}

impl ElementRef {
    pub const fn is_within_container(self) -> bool {
        !matches!(self, Self::Outside)
    }

    pub const fn is_within_options_panel(self) -> bool {
        matches!(self, Self::OptionsPanel | Self::OptionButton(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    SelectionChange,
    TouchEnd,
    PointerDown {
        target: ElementRef,
    },
    PointerEnter {
        target: ElementRef,
    },
    /// `related` is where the pointer went, when the host knows.
    PointerLeave {
        target: ElementRef,
        related: Option<ElementRef>,
    },
    KeyDown {
        key: ShortcutKey,
        modifiers: ShortcutModifiers,
    },
    Click {
        target: ElementRef,
        at: Instant,
    },
    Tick(Instant),
}
