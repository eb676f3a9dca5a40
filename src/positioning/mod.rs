//! Places the container at the top-right of the selection's first line.

use std::rc::Rc;

use crate::config::Settings;
use crate::geometry::{Rect, Size};
use crate::selection::{Selection, SelectionRange};
use crate::ui::{Container, Placement, WIDGET_TOKENS};
use crate::viewport::ViewportInfo;

/// Host-provided placement that replaces the built-in anchoring.
pub trait ExternalPositioner {
    fn position_container(&self, container: &mut Container, selection: &Selection);
}

#[derive(Clone)]
pub struct Positioner {
    settings: Rc<Settings>,
    clamp_to_viewport: bool,
    external: Option<Rc<dyn ExternalPositioner>>,
}

impl std::fmt::Debug for Positioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Positioner")
            .field("clamp_to_viewport", &self.clamp_to_viewport)
            .field("external", &self.external.is_some())
            .finish_non_exhaustive()
    }
}

impl Positioner {
    pub fn new(settings: Rc<Settings>) -> Self {
        let clamp_to_viewport = settings.clamp_to_viewport;
        Self {
            settings,
            clamp_to_viewport,
            external: None,
        }
    }

    pub fn with_external(mut self, external: Rc<dyn ExternalPositioner>) -> Self {
        self.external = Some(external);
        self
    }

    pub fn with_viewport_clamp(mut self, enabled: bool) -> Self {
        self.clamp_to_viewport = enabled;
        self
    }

    pub fn clamps_to_viewport(&self) -> bool {
        self.clamp_to_viewport
    }

    /// Returns false, leaving the container untouched, when there is no
    /// container, no selection, or a selection without ranges. An external
    /// positioner, when installed, places the container instead.
    pub fn position_container<V: ViewportInfo + ?Sized>(
        &self,
        container: Option<&mut Container>,
        selection: Option<&Selection>,
        viewport: &V,
    ) -> bool {
        let Some(container) = container else {
            return false;
        };
        let Some(selection) = selection else {
            tracing::warn!("no selection object to position against");
            return false;
        };
        let Some(range) = selection.range_at(0) else {
            tracing::warn!("no selection range available");
            return false;
        };

        if let Some(external) = &self.external {
            external.position_container(container, selection);
            tracing::debug!("container placed by external positioner");
            return true;
        }

        let anchor = anchor_rect(range);
        let mut placement = self.compute_placement(anchor, viewport);
        if self.clamp_to_viewport {
            let fallback = Size::new(
                f64::from(self.settings.icon_width),
                f64::from(self.settings.icon_height),
            );
            placement = clamp_to_viewport(placement, container.measured_or(fallback), viewport);
        }

        tracing::debug!(
            left = placement.left,
            top = placement.top,
            anchor_right = anchor.right(),
            anchor_top = anchor.top,
            scroll_x = viewport.scroll_x(),
            scroll_y = viewport.scroll_y(),
            screen = viewport.screen_size().as_str(),
            "positioned container"
        );
        container.placement = Some(placement);
        true
    }

    pub fn compute_placement<V: ViewportInfo + ?Sized>(&self, anchor: Rect, viewport: &V) -> Placement {
        let (offset_x, offset_y) = self.offsets(viewport);
        Placement {
            left: anchor.right() + viewport.scroll_x() + offset_x,
            top: anchor.top + viewport.scroll_y() + offset_y,
            z_index: WIDGET_TOKENS.container_z_index,
        }
    }

    /// Base offsets plus the current breakpoint's responsive offsets, summed
    /// in `f64` so extreme host values cannot overflow.
    fn offsets<V: ViewportInfo + ?Sized>(&self, viewport: &V) -> (f64, f64) {
        let size = viewport.screen_size();
        let settings = &self.settings;
        let x = f64::from(settings.position_offset_x)
            + f64::from(settings.responsive_x_offsets.offset_px(size));
        let y = f64::from(settings.position_offset_y)
            + f64::from(settings.responsive_y_offsets.offset_px(size));
        (x, y)
    }
}

/// The topmost non-empty line of a multi-line range, else its bounding box.
pub fn anchor_rect(range: &SelectionRange) -> Rect {
    if range.client_rects.len() <= 1 {
        return range.bounding_rect;
    }

    range
        .client_rects
        .iter()
        .filter(|rect| rect.width > 0.0)
        .fold(None::<Rect>, |best, rect| match best {
            Some(best) if best.top <= rect.top => Some(best),
            _ => Some(*rect),
        })
        .unwrap_or(range.bounding_rect)
}

/// Keeps `placement` inside the visible viewport with a fixed margin.
pub fn clamp_to_viewport<V: ViewportInfo + ?Sized>(
    placement: Placement,
    size: Size,
    viewport: &V,
) -> Placement {
    let margin = WIDGET_TOKENS.viewport_margin_px;
    let (scroll_x, scroll_y) = (viewport.scroll_x(), viewport.scroll_y());
    let right_edge = viewport.inner_width() + scroll_x;
    let bottom_edge = viewport.inner_height() + scroll_y;

    let mut left = placement.left;
    if left + size.width > right_edge {
        left = right_edge - size.width - margin;
    }
    if left < scroll_x {
        left = scroll_x + margin;
    }

    let mut top = placement.top;
    if top < scroll_y {
        top = scroll_y + margin;
    }
    if top + size.height > bottom_edge {
        top = bottom_edge - size.height - margin;
    }

    Placement {
        left,
        top,
        ..placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve;
    use crate::viewport::FixedViewport;
    use serde_json::json;

    fn positioner() -> Positioner {
        Positioner::new(Rc::new(Settings::default()))
    }

    fn single_line(left: f64, top: f64, width: f64) -> Selection {
        Selection::single(SelectionRange::new(
            "selected words",
            Rect::new(left, top, width, 18.0),
        ))
    }

    #[test]
    fn anchors_top_right_with_default_offsets_and_scroll() {
        let viewport = FixedViewport::new(1280.0, 800.0);
        viewport.scroll_to(0.0, 300.0);
        let mut container = Container::default();

        let positioned = positioner().position_container(
            Some(&mut container),
            Some(&single_line(100.0, 50.0, 200.0)),
            &viewport,
        );

        assert!(positioned);
        assert_eq!(
            container.placement,
            Some(Placement {
                left: 308.0,
                top: 342.0,
                z_index: 10_000
            })
        );
    }

    #[test]
    fn fails_closed_without_container_selection_or_ranges() {
        let viewport = FixedViewport::default();
        let positioner = positioner();
        let mut container = Container::default();

        assert!(!positioner.position_container(None, Some(&single_line(0.0, 0.0, 10.0)), &viewport));
        assert!(!positioner.position_container(Some(&mut container), None, &viewport));
        assert!(!positioner.position_container(
            Some(&mut container),
            Some(&Selection::empty()),
            &viewport
        ));
        assert_eq!(container, Container::default());
    }

    #[test]
    fn multi_line_selection_anchors_to_topmost_line() {
        let range = SelectionRange::new("two lines", Rect::new(10.0, 100.0, 400.0, 58.0))
            .with_client_rects(vec![
                Rect::new(10.0, 140.0, 120.0, 18.0),
                Rect::new(200.0, 100.0, 210.0, 18.0),
            ]);

        let anchor = anchor_rect(&range);
        assert_eq!(anchor.top, 100.0);
        assert_eq!(anchor.right(), 410.0);
    }

    #[test]
    fn zero_width_line_rects_are_ignored() {
        let range = SelectionRange::new("wrapped", Rect::new(0.0, 80.0, 300.0, 60.0))
            .with_client_rects(vec![
                Rect::new(0.0, 80.0, 0.0, 18.0),
                Rect::new(0.0, 100.0, 150.0, 18.0),
                Rect::new(0.0, 120.0, 90.0, 18.0),
            ]);

        assert_eq!(anchor_rect(&range).top, 100.0);
    }

    #[test]
    fn all_empty_line_rects_fall_back_to_bounding_box() {
        let bounding = Rect::new(5.0, 60.0, 100.0, 30.0);
        let range = SelectionRange::new("x", bounding).with_client_rects(vec![
            Rect::new(5.0, 60.0, 0.0, 15.0),
            Rect::new(5.0, 75.0, 0.0, 15.0),
        ]);

        assert_eq!(anchor_rect(&range), bounding);
    }

    #[test]
    fn configured_and_responsive_offsets_are_applied() {
        let settings = resolve(Some(&json!({
            "positionOffsetX": 20,
            "positionOffsetY": "-30",
            "responsiveXOffsets": { "mobile": "5px" },
            "responsiveYOffsets": { "desktop": "-2px" }
        })));
        let positioner = Positioner::new(Rc::new(settings));
        let anchor = Rect::new(0.0, 100.0, 50.0, 18.0);

        let mobile = positioner.compute_placement(anchor, &FixedViewport::new(400.0, 700.0));
        assert_eq!((mobile.left, mobile.top), (75.0, 70.0));

        let desktop = positioner.compute_placement(anchor, &FixedViewport::new(1200.0, 700.0));
        assert_eq!((desktop.left, desktop.top), (70.0, 68.0));
    }

    #[test]
    fn viewport_clamp_is_off_by_default() {
        assert!(!positioner().clamps_to_viewport());

        let viewport = FixedViewport::new(800.0, 600.0);
        let mut container = Container::default();
        positioner().position_container(
            Some(&mut container),
            Some(&single_line(700.0, 20.0, 150.0)),
            &viewport,
        );
        assert_eq!(container.placement.map(|p| p.left), Some(858.0));
    }

    #[test]
    fn viewport_clamp_keeps_container_on_screen_when_enabled() {
        let viewport = FixedViewport::new(800.0, 600.0);
        let positioner = positioner().with_viewport_clamp(true);
        let mut container = Container {
            rendered_size: Some(Size::new(40.0, 30.0)),
            ..Container::default()
        };

        positioner.position_container(
            Some(&mut container),
            Some(&single_line(700.0, 2.0, 150.0)),
            &viewport,
        );

        let placement = container.placement.expect("positioned");
        assert_eq!(placement.left, 800.0 - 40.0 - 8.0);
        assert_eq!(placement.top, 8.0);
    }

    #[test]
    fn clamp_pulls_bottom_overflow_back_into_view() {
        let viewport = FixedViewport::new(800.0, 600.0);
        viewport.scroll_to(0.0, 1_000.0);
        let placement = Placement {
            left: 100.0,
            top: 1_590.0,
            z_index: 10_000,
        };

        let clamped = clamp_to_viewport(placement, Size::new(40.0, 30.0), &viewport);
        assert_eq!(clamped.top, 1_600.0 - 30.0 - 8.0);
        assert_eq!(clamped.left, 100.0);
    }

    #[test]
    fn extreme_offsets_add_without_overflow() {
        let settings = resolve(Some(&json!({
            "positionOffsetX": 2_147_483_647,
            "positionOffsetY": -2_147_483_648i64,
            "responsiveXOffsets": { "desktop": "1px" },
            "responsiveYOffsets": { "desktop": "-1px" }
        })));
        let positioner = Positioner::new(Rc::new(settings));

        let placement = positioner.compute_placement(
            Rect::new(0.0, 0.0, 10.0, 18.0),
            &FixedViewport::new(1200.0, 700.0),
        );
        assert_eq!(placement.left, 10.0 + 2_147_483_648.0);
        assert_eq!(placement.top, -2_147_483_649.0);
    }

    struct PinnedPositioner;

    impl ExternalPositioner for PinnedPositioner {
        fn position_container(&self, container: &mut Container, _selection: &Selection) {
            container.placement = Some(Placement {
                left: 1.0,
                top: 2.0,
                z_index: 3,
            });
        }
    }

    #[test]
    fn external_positioner_replaces_built_in_anchoring() {
        let positioner = positioner().with_external(Rc::new(PinnedPositioner));
        let mut container = Container::default();

        assert!(positioner.position_container(
            Some(&mut container),
            Some(&single_line(100.0, 50.0, 200.0)),
            &FixedViewport::default(),
        ));
        assert_eq!(
            container.placement,
            Some(Placement {
                left: 1.0,
                top: 2.0,
                z_index: 3
            })
        );

        assert!(!positioner.position_container(
            Some(&mut container),
            Some(&Selection::empty()),
            &FixedViewport::default(),
        ));
    }
}
