//! L4 Atomic Layer: The scrollable surface a drag drives
//!
//! A surface is anything with a mutable scroll offset pair and a couple of
//! pointer affordances. It is shared, not owned: the host controls its
//! lifetime, and the tracker and inertia engine each hold an optional handle.

use std::cell::RefCell;
use std::rc::Rc;

/// Shared reference to a surface. Single-threaded by construction.
pub type SurfaceHandle<S> = Rc<RefCell<S>>;

/// Wrap a surface so it can be attached to a tracker
pub fn handle<S: ScrollSurface>(surface: S) -> SurfaceHandle<S> {
    Rc::new(RefCell::new(surface))
}

/// Pointer cursor shown over the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Grab,
    Grabbing,
}

/// Whether content under the pointer may be text-selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSelect {
    #[default]
    Auto,
    None,
}

pub trait ScrollSurface {
    fn scroll_left(&self) -> f64;
    fn scroll_top(&self) -> f64;
    fn set_scroll_left(&mut self, value: f64);
    fn set_scroll_top(&mut self, value: f64);

    fn set_cursor(&mut self, _cursor: Cursor) {}
    fn set_user_select(&mut self, _select: UserSelect) {}

    /// A surface that cannot scroll is rejected as an inertia target
    fn is_scrollable(&self) -> bool {
        true
    }
}

/// Unbounded in-memory surface. Records the affordances it was given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySurface {
    pub left: f64,
    pub top: f64,
    pub cursor: Cursor,
    pub user_select: UserSelect,
    /// Cleared to model a detached or non-scrolling node
    pub scrollable: bool,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self {
            scrollable: true,
            ..Default::default()
        }
    }

    pub fn at(left: f64, top: f64) -> Self {
        Self {
            left,
            top,
            ..Self::new()
        }
    }

    /// A surface that refuses to act as an inertia target
    pub fn inert() -> Self {
        Self::default()
    }
}

impl ScrollSurface for MemorySurface {
    fn scroll_left(&self) -> f64 {
        self.left
    }

    fn scroll_top(&self) -> f64 {
        self.top
    }

    fn set_scroll_left(&mut self, value: f64) {
        self.left = value;
    }

    fn set_scroll_top(&mut self, value: f64) {
        self.top = value;
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn set_user_select(&mut self, select: UserSelect) {
        self.user_select = select;
    }

    fn is_scrollable(&self) -> bool {
        self.scrollable
    }
}
