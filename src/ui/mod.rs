mod controller;
pub mod style;
pub mod widgets;

pub use controller::WidgetController;
pub use style::{StyleTokens, WIDGET_TOKENS};
pub use widgets::{
    Container, LogoImage, LookupButton, OptionButton, OptionIcon, OptionsPanel, PanelState,
    PersistIndicator, Placement, Visibility,
};
