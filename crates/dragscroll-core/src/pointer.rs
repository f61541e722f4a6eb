//! L4 Atomic Layer: Pointer events and listener bookkeeping
//!
//! Down listeners live on the tracked element. Move and up listeners live on
//! the document so a drag keeps tracking after the pointer leaves the
//! element's bounds.

/// Input device that produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerInput {
    Mouse,
    Touch,
}

impl PointerInput {
    pub const ALL: [PointerInput; 2] = [PointerInput::Mouse, PointerInput::Touch];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// Where a listener is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Element,
    Document,
}

/// A single pointer event in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub input: PointerInput,
    pub phase: PointerPhase,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            input: PointerInput::Mouse,
            phase,
            x,
            y,
        }
    }

    pub fn touch(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            input: PointerInput::Touch,
            phase,
            x,
            y,
        }
    }

    #[inline]
    pub fn is_touch(&self) -> bool {
        self.input == PointerInput::Touch
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Listener {
    pub scope: Scope,
    pub input: PointerInput,
    pub phase: PointerPhase,
}

/// Set of active listener registrations
///
/// Registering twice is a no-op, as with the DOM when the same callback is
/// added again.
#[derive(Debug, Clone, Default)]
pub struct Listeners {
    active: Vec<Listener>,
}

impl Listeners {
    pub fn add(&mut self, scope: Scope, input: PointerInput, phase: PointerPhase) {
        let listener = Listener {
            scope,
            input,
            phase,
        };
        if !self.active.contains(&listener) {
            self.active.push(listener);
        }
    }

    pub fn remove(&mut self, scope: Scope, input: PointerInput, phase: PointerPhase) {
        self.active
            .retain(|l| !(l.scope == scope && l.input == input && l.phase == phase));
    }

    pub fn contains(&self, scope: Scope, input: PointerInput, phase: PointerPhase) -> bool {
        self.active
            .iter()
            .any(|l| l.scope == scope && l.input == input && l.phase == phase)
    }

    /// Number of registrations in `scope`
    pub fn count(&self, scope: Scope) -> usize {
        self.active.iter().filter(|l| l.scope == scope).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listener> {
        self.active.iter()
    }
}
