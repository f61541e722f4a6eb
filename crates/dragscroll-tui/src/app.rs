use dragscroll_core::{
    handle, AppConfig, Clock, DragState, DragTracker, FrameRequest, ScrollSurface, SurfaceHandle,
    SystemClock, Velocity,
};
use ratatui::layout::Rect;

use crate::canvas::CanvasSurface;
use crate::event::AppEvent;
use crate::input::{handle_key_event, route_mouse_event, Action};
use crate::theme::Theme;

/// Terminal demo state: one canvas driven by one drag tracker
pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    pub canvas: SurfaceHandle<CanvasSurface>,
    pub tracker: DragTracker<CanvasSurface, SystemClock>,
    /// Area the canvas was last drawn into
    pub viewport: Rect,
    pub should_quit: bool,
    pub status_message: Option<String>,
    clock: SystemClock,
}

impl App {
    pub fn new(config: AppConfig, theme: Theme) -> Self {
        let clock = SystemClock::new();
        let canvas = handle(CanvasSurface::new(
            config.ui.canvas_width,
            config.ui.canvas_height,
        ));
        let tracker = DragTracker::new(config.drag, clock);

        Self {
            config,
            theme,
            canvas,
            tracker,
            viewport: Rect::default(),
            should_quit: false,
            status_message: None,
            clock,
        }
    }

    /// Record the area the canvas occupies.
    ///
    /// The tracker is re-attached whenever the canvas changes between
    /// scrollable and not, so inertia picks up the new state.
    pub fn set_viewport(&mut self, area: Rect) {
        if area == self.viewport && self.tracker.is_attached() {
            return;
        }
        self.viewport = area;

        let (was, now) = {
            let mut canvas = self.canvas.borrow_mut();
            let was = canvas.is_scrollable();
            canvas.set_viewport(area.width, area.height);
            (was, canvas.is_scrollable())
        };

        if !self.tracker.is_attached() || was != now {
            tracing::debug!(
                width = area.width,
                height = area.height,
                scrollable = now,
                "Attaching canvas"
            );
            self.tracker.attach(Some(self.canvas.clone()));
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_action(handle_key_event(key)),
            AppEvent::Mouse(mouse) => {
                if let Some((scope, pointer)) = route_mouse_event(mouse, self.viewport) {
                    self.tracker.dispatch(scope, pointer);
                }
            }
            AppEvent::Resize(_, _) | AppEvent::Tick => {}
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        let mut drag = *self.tracker.config();
        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::ToggleInertia => {
                drag.inertia = !drag.inertia;
                self.status_message = Some(format!("inertia {}", on_off(drag.inertia)));
            }
            Action::ToggleLockX => {
                drag.lock_x = !drag.lock_x;
                self.status_message = Some(format!("x lock {}", on_off(drag.lock_x)));
            }
            Action::ToggleLockY => {
                drag.lock_y = !drag.lock_y;
                self.status_message = Some(format!("y lock {}", on_off(drag.lock_y)));
            }
            Action::ResetScroll => {
                self.tracker.set_velocity(Velocity::ZERO);
                self.canvas.borrow_mut().reset();
                self.status_message = None;
                return;
            }
            Action::None => return,
        }
        tracing::debug!(?drag, "Drag settings changed");
        self.tracker.set_config(drag);
    }

    /// Advance inertia by one frame if a coast is running
    pub fn on_frame(&mut self) -> FrameRequest {
        if !self.tracker.is_coasting() {
            return FrameRequest::Idle;
        }
        self.tracker.on_frame(self.clock.now_ms())
    }

    /// Whether the event loop should poll at frame rate
    pub fn needs_frames(&self) -> bool {
        self.tracker.is_coasting()
    }

    pub fn drag_state(&self) -> DragState {
        self.tracker.state()
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
