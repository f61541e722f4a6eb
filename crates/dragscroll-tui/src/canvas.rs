//! Scrollable canvas backing the terminal demo
//!
//! Behaves like a browser scroll container: offsets are clamped to the
//! range where the viewport stays inside the content.

use dragscroll_core::{Cursor, ScrollSurface, UserSelect};

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSurface {
    content_width: u16,
    content_height: u16,
    viewport_width: u16,
    viewport_height: u16,
    left: f64,
    top: f64,
    cursor: Cursor,
    user_select: UserSelect,
}

impl CanvasSurface {
    pub fn new(content_width: u16, content_height: u16) -> Self {
        Self {
            content_width,
            content_height,
            viewport_width: 0,
            viewport_height: 0,
            left: 0.0,
            top: 0.0,
            cursor: Cursor::Grab,
            user_select: UserSelect::Auto,
        }
    }

    pub fn content_size(&self) -> (u16, u16) {
        (self.content_width, self.content_height)
    }

    pub fn viewport_size(&self) -> (u16, u16) {
        (self.viewport_width, self.viewport_height)
    }

    /// Resize the viewport and pull the offsets back into range
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.left = self.left.clamp(0.0, self.max_left());
        self.top = self.top.clamp(0.0, self.max_top());
    }

    pub fn max_left(&self) -> f64 {
        self.content_width.saturating_sub(self.viewport_width) as f64
    }

    pub fn max_top(&self) -> f64 {
        self.content_height.saturating_sub(self.viewport_height) as f64
    }

    /// Whole-cell offsets used for rendering
    pub fn cell_offset(&self) -> (u16, u16) {
        (self.left.round() as u16, self.top.round() as u16)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn user_select(&self) -> UserSelect {
        self.user_select
    }

    pub fn reset(&mut self) {
        self.left = 0.0;
        self.top = 0.0;
    }
}

impl ScrollSurface for CanvasSurface {
    fn scroll_left(&self) -> f64 {
        self.left
    }

    fn scroll_top(&self) -> f64 {
        self.top
    }

    fn set_scroll_left(&mut self, value: f64) {
        self.left = value.clamp(0.0, self.max_left());
    }

    fn set_scroll_top(&mut self, value: f64) {
        self.top = value.clamp(0.0, self.max_top());
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn set_user_select(&mut self, select: UserSelect) {
        self.user_select = select;
    }

    fn is_scrollable(&self) -> bool {
        self.max_left() > 0.0 || self.max_top() > 0.0
    }
}
