/// Lifecycle of the floating container, derived from the widget tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerState {
    #[default]
    NotBuilt,
    Hidden,
    Visible,
}
