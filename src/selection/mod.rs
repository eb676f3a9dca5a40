//! Text selection snapshots and the capability that supplies them.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::Rect;

/// One contiguous range of a selection with its viewport-relative geometry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionRange {
    pub text: String,
    pub bounding_rect: Rect,
    /// One rectangle per visual line the range covers.
    pub client_rects: Vec<Rect>,
}

impl SelectionRange {
    pub fn new(text: impl Into<String>, bounding_rect: Rect) -> Self {
        Self {
            text: text.into(),
            bounding_rect,
            client_rects: vec![bounding_rect],
        }
    }

    pub fn with_client_rects(mut self, client_rects: Vec<Rect>) -> Self {
        self.client_rects = client_rects;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    ranges: Vec<SelectionRange>,
}

impl Selection {
    pub fn new(ranges: Vec<SelectionRange>) -> Self {
        Self { ranges }
    }

    pub fn single(range: SelectionRange) -> Self {
        Self::new(vec![range])
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn range_at(&self, index: usize) -> Option<&SelectionRange> {
        self.ranges.get(index)
    }

    /// Text of every range, in order.
    pub fn text(&self) -> String {
        self.ranges.iter().map(|range| range.text.as_str()).collect()
    }
}

pub trait SelectionSource {
    /// `None` when the host has no selection object to offer.
    fn current_selection(&self) -> Option<Selection>;
}

/// Selection held in memory; headless hosts and tests swap it as the user acts.
#[derive(Debug, Default)]
pub struct StaticSelection {
    selection: RefCell<Option<Selection>>,
}

impl StaticSelection {
    pub fn new(selection: Option<Selection>) -> Self {
        Self {
            selection: RefCell::new(selection),
        }
    }

    pub fn set(&self, selection: Option<Selection>) {
        *self.selection.borrow_mut() = selection;
    }
}

impl SelectionSource for StaticSelection {
    fn current_selection(&self) -> Option<Selection> {
        self.selection.borrow().clone()
    }
}

impl<S: SelectionSource + ?Sized> SelectionSource for Rc<S> {
    fn current_selection(&self) -> Option<Selection> {
        (**self).current_selection()
    }
}
