//! L3 Molecular Layer: Drag tracking
//!
//! Turns raw pointer events into scroll offsets and, with inertia enabled,
//! into a velocity sample that the inertia engine coasts on after release.
//!
//! States: Idle -> Dragging -> (Idle | Coasting) -> Idle.

use tracing::debug;

use crate::clock::Clock;
use crate::config::DragScrollConfig;
use crate::inertia::{FrameRequest, InertiaEngine, Velocity};
use crate::physics::{clamp_velocity, distance, speed, TimeDelta};
use crate::pointer::{Listeners, PointerEvent, PointerInput, PointerPhase, Scope};
use crate::surface::{Cursor, ScrollSurface, SurfaceHandle, UserSelect};

/// Release this long after the last move sample counts as a pause (no coast)
pub const PAUSE_THRESHOLD_MS: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
    Coasting,
}

/// Where a drag started. Lives from pointer-down to pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    origin_left: f64,
    origin_top: f64,
    origin_x: f64,
    origin_y: f64,
    /// Time of the latest velocity sample
    time: f64,
}

/// Drag-to-scroll controller for one element
#[derive(Debug)]
pub struct DragTracker<S: ScrollSurface, C: Clock> {
    config: DragScrollConfig,
    clock: C,
    element: Option<SurfaceHandle<S>>,
    session: Option<DragSession>,
    inertia: InertiaEngine<S>,
    listeners: Listeners,
}

impl<S: ScrollSurface, C: Clock> DragTracker<S, C> {
    pub fn new(config: DragScrollConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            element: None,
            session: None,
            inertia: InertiaEngine::new(config.inertia_config()),
            listeners: Listeners::default(),
        }
    }

    pub fn config(&self) -> &DragScrollConfig {
        &self.config
    }

    /// Replace the configuration. Applies to the next event or frame.
    pub fn set_config(&mut self, config: DragScrollConfig) {
        self.config = config;
        self.inertia.set_config(config.inertia_config());
    }

    /// Attach a new element, or detach with `None`.
    ///
    /// Detaching an already detached tracker does nothing.
    pub fn attach(&mut self, element: Option<SurfaceHandle<S>>) {
        match element {
            None => {
                if self.element.is_none() {
                    return;
                }
                self.clear_element();
            }
            Some(element) => {
                if self.element.is_some() {
                    self.clear_element();
                }
                self.inertia.attach(Some(element.clone()));
                self.element = Some(element);
                for input in PointerInput::ALL {
                    self.listeners.add(Scope::Element, input, PointerPhase::Down);
                }
            }
        }
    }

    fn clear_element(&mut self) {
        for input in PointerInput::ALL {
            self.listeners.remove(Scope::Element, input, PointerPhase::Down);
        }
        if self.session.take().is_some() {
            self.remove_document_listeners();
        }
        self.element = None;
        self.inertia.attach(None);
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.element.is_some()
    }

    pub fn state(&self) -> DragState {
        if self.session.is_some() {
            DragState::Dragging
        } else if self.inertia.is_coasting() {
            DragState::Coasting
        } else {
            DragState::Idle
        }
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    #[inline]
    pub fn velocity(&self) -> Velocity {
        self.inertia.velocity()
    }

    pub fn set_velocity(&mut self, velocity: Velocity) {
        self.inertia.set_velocity(velocity);
    }

    pub fn inertia(&self) -> &InertiaEngine<S> {
        &self.inertia
    }

    /// Start coasting on the current velocity
    pub fn apply_inertia(&mut self) -> FrameRequest {
        self.inertia.start()
    }

    /// Forward a display frame to the inertia engine
    pub fn on_frame(&mut self, timestamp_ms: f64) -> FrameRequest {
        self.inertia.on_frame(timestamp_ms)
    }

    #[inline]
    pub fn is_coasting(&self) -> bool {
        self.inertia.is_coasting()
    }

    /// Deliver an event received at `scope`.
    ///
    /// Returns false when nothing is listening there for this event.
    pub fn dispatch(&mut self, scope: Scope, event: PointerEvent) -> bool {
        if !self.listeners.contains(scope, event.input, event.phase) {
            return false;
        }

        match event.phase {
            PointerPhase::Down => self.pointer_down(event),
            PointerPhase::Move => self.pointer_move(event),
            PointerPhase::Up => {
                self.pointer_up();
            }
        }
        true
    }

    pub fn pointer_down(&mut self, event: PointerEvent) {
        let Some(element) = self.element.clone() else {
            return;
        };
        let mut element = element.borrow_mut();

        self.session = Some(DragSession {
            origin_left: element.scroll_left(),
            origin_top: element.scroll_top(),
            origin_x: event.x,
            origin_y: event.y,
            time: self.clock.now_ms(),
        });

        // Cancels any coast in flight
        self.inertia.set_velocity(Velocity::ZERO);

        element.set_cursor(Cursor::Grabbing);
        element.set_user_select(UserSelect::None);

        for input in PointerInput::ALL {
            self.listeners.add(Scope::Document, input, PointerPhase::Move);
            self.listeners.add(Scope::Document, input, PointerPhase::Up);
        }

        debug!(x = event.x, y = event.y, input = ?event.input, "Drag started");
    }

    pub fn pointer_move(&mut self, event: PointerEvent) {
        let (Some(session), Some(element)) = (self.session.as_mut(), self.element.as_ref()) else {
            return;
        };

        let dx = distance(session.origin_x, event.x, self.config.scroll_factor);
        let dy = distance(session.origin_y, event.y, self.config.scroll_factor);

        {
            let mut element = element.borrow_mut();
            if !self.config.lock_x {
                element.set_scroll_left(session.origin_left - dx);
            }
            if !self.config.lock_y {
                element.set_scroll_top(session.origin_top - dy);
            }
        }

        if !self.config.inertia {
            return;
        }

        let elapsed = TimeDelta::since(session.time, &self.clock);
        let adjustment = if event.is_touch() {
            self.config.touch_speed
        } else {
            self.config.mouse_speed
        };

        // Same-tick samples carry no timing information
        if elapsed.delta > 0.0 {
            let mut velocity = Velocity::new(
                speed(dx, elapsed.seconds, adjustment),
                speed(dy, elapsed.seconds, adjustment),
            );
            if let Some(max) = self.config.max_speed {
                velocity.x = clamp_velocity(velocity.x, max);
                velocity.y = clamp_velocity(velocity.y, max);
            }
            self.inertia.set_velocity(velocity);
        }

        session.time = elapsed.now;
    }

    /// End the drag. Returns `Schedule` when a coast begins.
    pub fn pointer_up(&mut self) -> FrameRequest {
        if let Some(element) = &self.element {
            let mut element = element.borrow_mut();
            element.set_cursor(Cursor::Grab);
            element.set_user_select(UserSelect::Auto);
        }

        let mut request = FrameRequest::Idle;

        if let Some(session) = self.session.take() {
            // Only coast if the pointer was still moving at release
            if self.config.inertia {
                let elapsed = TimeDelta::since(session.time, &self.clock);
                if elapsed.delta < PAUSE_THRESHOLD_MS {
                    request = self.inertia.start();
                }
            }
            debug!(coasting = request == FrameRequest::Schedule, "Drag ended");
        }

        self.remove_document_listeners();
        request
    }

    fn remove_document_listeners(&mut self) {
        for input in PointerInput::ALL {
            self.listeners.remove(Scope::Document, input, PointerPhase::Move);
            self.listeners.remove(Scope::Document, input, PointerPhase::Up);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::surface::{handle, MemorySurface};

    type Tracker = DragTracker<MemorySurface, ManualClock>;

    fn setup(config: DragScrollConfig) -> (Tracker, SurfaceHandle<MemorySurface>, ManualClock) {
        let clock = ManualClock::new(1_000.0);
        let surface = handle(MemorySurface::new());
        let mut tracker = DragTracker::new(config, clock.clone());
        tracker.attach(Some(surface.clone()));
        (tracker, surface, clock)
    }

    fn inertia_config() -> DragScrollConfig {
        DragScrollConfig {
            inertia: true,
            mouse_speed: 1.0,
            ..Default::default()
        }
    }

    fn down(tracker: &mut Tracker) {
        assert!(tracker.dispatch(
            Scope::Element,
            PointerEvent::mouse(PointerPhase::Down, 100.0, 100.0)
        ));
    }

    fn move_to(tracker: &mut Tracker, x: f64, y: f64) {
        tracker.dispatch(Scope::Document, PointerEvent::mouse(PointerPhase::Move, x, y));
    }

    fn up(tracker: &mut Tracker) {
        tracker.dispatch(Scope::Document, PointerEvent::mouse(PointerPhase::Up, 0.0, 0.0));
    }

    #[test]
    fn test_attach_registers_down_listeners() {
        let (tracker, _surface, _clock) = setup(DragScrollConfig::default());
        let listeners = tracker.listeners();

        assert!(listeners.contains(Scope::Element, PointerInput::Mouse, PointerPhase::Down));
        assert!(listeners.contains(Scope::Element, PointerInput::Touch, PointerPhase::Down));
        assert_eq!(listeners.count(Scope::Document), 0);
    }

    #[test]
    fn test_pointer_down_sets_grabbing() {
        let (mut tracker, surface, _clock) = setup(DragScrollConfig::default());
        down(&mut tracker);

        assert_eq!(surface.borrow().cursor, Cursor::Grabbing);
        assert_eq!(surface.borrow().user_select, UserSelect::None);
        assert_eq!(tracker.state(), DragState::Dragging);
        assert_eq!(tracker.listeners().count(Scope::Document), 4);
    }

    #[test]
    fn test_pointer_up_restores_grab() {
        let (mut tracker, surface, _clock) = setup(DragScrollConfig::default());
        down(&mut tracker);
        up(&mut tracker);

        assert_eq!(surface.borrow().cursor, Cursor::Grab);
        assert_eq!(surface.borrow().user_select, UserSelect::Auto);
        assert_eq!(tracker.state(), DragState::Idle);
        assert_eq!(tracker.listeners().count(Scope::Document), 0);
    }

    #[test]
    fn test_drag_updates_position() {
        let (mut tracker, surface, _clock) = setup(DragScrollConfig::default());
        down(&mut tracker);
        move_to(&mut tracker, 150.0, 150.0);

        assert_eq!(surface.borrow().left, -50.0);
        assert_eq!(surface.borrow().top, -50.0);
    }

    #[test]
    fn test_drag_is_relative_to_origin_scroll() {
        let (mut tracker, surface, _clock) = setup(DragScrollConfig {
            scroll_factor: 2.0,
            ..Default::default()
        });
        surface.borrow_mut().left = 300.0;
        surface.borrow_mut().top = 80.0;

        down(&mut tracker);
        move_to(&mut tracker, 90.0, 120.0);
        move_to(&mut tracker, 80.0, 110.0);

        assert_eq!(surface.borrow().left, 340.0);
        assert_eq!(surface.borrow().top, 60.0);
    }

    #[test]
    fn test_drag_updates_velocity() {
        let (mut tracker, _surface, clock) = setup(inertia_config());
        down(&mut tracker);
        clock.advance(1_000.0);
        move_to(&mut tracker, 150.0, 150.0);

        assert_eq!(tracker.velocity(), Velocity::new(50.0, 50.0));
    }

    #[test]
    fn test_touch_uses_touch_adjustment() {
        let (mut tracker, _surface, clock) = setup(DragScrollConfig {
            inertia: true,
            touch_speed: 0.5,
            mouse_speed: 1.0,
            ..Default::default()
        });
        tracker.dispatch(
            Scope::Element,
            PointerEvent::touch(PointerPhase::Down, 0.0, 0.0),
        );
        clock.advance(500.0);
        tracker.dispatch(
            Scope::Document,
            PointerEvent::touch(PointerPhase::Move, -20.0, 10.0),
        );

        assert_eq!(tracker.velocity(), Velocity::new(-20.0, 10.0));
    }

    #[test]
    fn test_same_tick_move_keeps_velocity() {
        let (mut tracker, _surface, clock) = setup(inertia_config());
        down(&mut tracker);
        clock.advance(1_000.0);
        move_to(&mut tracker, 150.0, 150.0);
        move_to(&mut tracker, 400.0, 400.0);

        assert_eq!(tracker.velocity(), Velocity::new(50.0, 50.0));
    }

    #[test]
    fn test_velocity_not_sampled_without_inertia() {
        let (mut tracker, _surface, clock) = setup(DragScrollConfig {
            mouse_speed: 1.0,
            ..Default::default()
        });
        down(&mut tracker);
        clock.advance(100.0);
        move_to(&mut tracker, 150.0, 150.0);

        assert_eq!(tracker.velocity(), Velocity::ZERO);
        assert_eq!(tracker.pointer_up(), FrameRequest::Idle);
    }

    #[test]
    fn test_max_speed_clamps_sample() {
        let (mut tracker, _surface, clock) = setup(DragScrollConfig {
            max_speed: Some(20.0),
            ..inertia_config()
        });
        down(&mut tracker);
        clock.advance(1_000.0);
        move_to(&mut tracker, 150.0, 90.0);

        assert_eq!(tracker.velocity(), Velocity::new(20.0, -10.0));
    }

    #[test]
    fn test_release_while_moving_applies_inertia() {
        let (mut tracker, _surface, clock) = setup(inertia_config());
        down(&mut tracker);
        clock.advance(1_000.0);
        move_to(&mut tracker, 150.0, 150.0);

        assert_eq!(tracker.pointer_up(), FrameRequest::Schedule);
        assert_eq!(tracker.state(), DragState::Coasting);
    }

    #[test]
    fn test_release_after_pause_does_not_coast() {
        let (mut tracker, _surface, clock) = setup(inertia_config());
        down(&mut tracker);
        clock.advance(1_000.0);
        move_to(&mut tracker, 150.0, 150.0);
        clock.advance(PAUSE_THRESHOLD_MS);

        assert_eq!(tracker.pointer_up(), FrameRequest::Idle);
        assert_eq!(tracker.state(), DragState::Idle);
    }

    #[test]
    fn test_axis_locks_hold_position() {
        let (mut tracker, surface, _clock) = setup(DragScrollConfig {
            lock_x: true,
            lock_y: true,
            ..Default::default()
        });
        down(&mut tracker);
        move_to(&mut tracker, 150.0, 150.0);

        assert_eq!(surface.borrow().left, 0.0);
        assert_eq!(surface.borrow().top, 0.0);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let (mut tracker, surface, _clock) = setup(DragScrollConfig::default());

        assert!(!tracker.dispatch(
            Scope::Document,
            PointerEvent::mouse(PointerPhase::Move, 150.0, 150.0)
        ));
        tracker.pointer_move(PointerEvent::mouse(PointerPhase::Move, 150.0, 150.0));
        assert_eq!(surface.borrow().left, 0.0);
    }

    #[test]
    fn test_new_drag_interrupts_coast() {
        let (mut tracker, surface, clock) = setup(inertia_config());
        down(&mut tracker);
        clock.advance(100.0);
        move_to(&mut tracker, 200.0, 200.0);
        tracker.pointer_up();
        tracker.on_frame(16.0);
        tracker.on_frame(32.0);
        assert!(tracker.is_coasting());

        down(&mut tracker);
        assert_eq!(tracker.velocity(), Velocity::ZERO);

        let before = surface.borrow().left;
        assert_eq!(tracker.on_frame(48.0), FrameRequest::Idle);
        assert_eq!(surface.borrow().left, before);
        assert_eq!(tracker.state(), DragState::Dragging);
    }

    #[test]
    fn test_detach_removes_listeners() {
        let (mut tracker, _surface, _clock) = setup(DragScrollConfig::default());
        tracker.attach(None);

        assert!(!tracker.is_attached());
        assert_eq!(tracker.listeners().count(Scope::Element), 0);
        assert!(!tracker.inertia().has_target());

        // Second detach changes nothing
        tracker.attach(None);
        assert!(!tracker.is_attached());
    }

    #[test]
    fn test_detach_mid_drag_ends_session() {
        let (mut tracker, surface, _clock) = setup(DragScrollConfig::default());
        down(&mut tracker);
        tracker.attach(None);

        tracker.pointer_move(PointerEvent::mouse(PointerPhase::Move, 150.0, 150.0));
        assert_eq!(tracker.pointer_up(), FrameRequest::Idle);
        assert_eq!(surface.borrow().left, 0.0);
        assert_eq!(tracker.listeners().count(Scope::Document), 0);
        assert_eq!(tracker.state(), DragState::Idle);
    }

    #[test]
    fn test_reattach_moves_to_new_element() {
        let (mut tracker, old, _clock) = setup(DragScrollConfig::default());
        let new = handle(MemorySurface::new());
        tracker.attach(Some(new.clone()));

        down(&mut tracker);
        move_to(&mut tracker, 130.0, 100.0);

        assert_eq!(new.borrow().left, -30.0);
        assert_eq!(old.borrow().left, 0.0);
        assert_eq!(tracker.listeners().count(Scope::Element), 2);
    }

    #[test]
    fn test_down_without_element_is_noop() {
        let mut tracker: Tracker = DragTracker::new(DragScrollConfig::default(), ManualClock::new(0.0));
        tracker.pointer_down(PointerEvent::mouse(PointerPhase::Down, 1.0, 1.0));
        assert_eq!(tracker.state(), DragState::Idle);
        assert_eq!(tracker.listeners().count(Scope::Document), 0);
    }
}
