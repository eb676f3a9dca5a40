/// Printable key from a keydown event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Character(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl ShortcutModifiers {
    pub const fn new(ctrl: bool, alt: bool, shift: bool) -> Self {
        Self { ctrl, alt, shift }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    TogglePersist,
}

/// Ctrl+Alt+P in either case toggles persist mode; Shift is ignored.
pub fn resolve_shortcut(key: ShortcutKey, modifiers: ShortcutModifiers) -> Option<ShortcutAction> {
    match (key, modifiers.ctrl, modifiers.alt) {
        (ShortcutKey::Character('p' | 'P'), true, true) => Some(ShortcutAction::TogglePersist),
        _ => None,
    }
}
