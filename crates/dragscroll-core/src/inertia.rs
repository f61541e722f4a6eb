//! L3 Molecular Layer: Post-release coasting
//!
//! The engine owns a velocity vector and advances it one display frame at a
//! time. Each step tells the host whether another frame is wanted, so the same
//! engine runs under a real frame callback, a timer, or a hand-stepped clock.

use serde::Serialize;
use tracing::{debug, error};

use crate::config::InertiaConfig;
use crate::physics::decay;
use crate::surface::{ScrollSurface, SurfaceHandle};
use crate::Error;

/// Speed below which an axis is considered at rest (units per second)
pub const SETTLE_THRESHOLD: f64 = 1.0;

/// Velocity in units per second
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// What the host should do after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    /// Call `on_frame` again on the next display refresh
    Schedule,
    /// Stop delivering frames
    Idle,
}

/// Inertial scroll driver for a single surface
#[derive(Debug)]
pub struct InertiaEngine<S: ScrollSurface> {
    config: InertiaConfig,
    velocity: Velocity,
    target: Option<SurfaceHandle<S>>,
    /// Timestamp of the previous frame; `None` until the first frame of a coast
    last_frame_time: Option<f64>,
    running: bool,
}

impl<S: ScrollSurface> InertiaEngine<S> {
    pub fn new(config: InertiaConfig) -> Self {
        Self {
            config,
            velocity: Velocity::ZERO,
            target: None,
            last_frame_time: None,
            running: false,
        }
    }

    pub fn config(&self) -> &InertiaConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: InertiaConfig) {
        self.config = config;
    }

    /// Set or clear the surface inertia is applied to.
    ///
    /// A surface that cannot scroll is reported and ignored.
    pub fn attach(&mut self, target: Option<SurfaceHandle<S>>) {
        let Some(target) = target else {
            self.target = None;
            return;
        };

        if !target.borrow().is_scrollable() {
            error!("{}", Error::InvalidTarget);
            return;
        }

        self.target = Some(target);
    }

    #[inline]
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    #[inline]
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity;
    }

    pub fn velocity_mut(&mut self) -> &mut Velocity {
        &mut self.velocity
    }

    /// Whether the host should still be delivering frames
    #[inline]
    pub fn is_coasting(&self) -> bool {
        self.running
    }

    /// Arm the frame loop. The next frame only records its timestamp.
    pub fn start(&mut self) -> FrameRequest {
        if self.target.is_none() {
            return FrameRequest::Idle;
        }

        self.last_frame_time = None;
        self.running = true;
        debug!(vx = self.velocity.x, vy = self.velocity.y, "Inertia started");
        FrameRequest::Schedule
    }

    /// Advance one display frame at `timestamp_ms`
    pub fn on_frame(&mut self, timestamp_ms: f64) -> FrameRequest {
        if !self.running {
            return FrameRequest::Idle;
        }

        let Some(target) = self.target.clone() else {
            self.running = false;
            return FrameRequest::Idle;
        };

        // First frame only establishes the time reference
        let Some(last) = self.last_frame_time else {
            self.last_frame_time = Some(timestamp_ms);
            return FrameRequest::Schedule;
        };

        let seconds = (timestamp_ms - last) / 1000.0;
        self.last_frame_time = Some(timestamp_ms);

        self.velocity.x = decay(self.velocity.x, seconds, self.config.friction);
        self.velocity.y = decay(self.velocity.y, seconds, self.config.friction);

        {
            let mut surface = target.borrow_mut();
            if !self.config.lock_x {
                let left = surface.scroll_left();
                surface.set_scroll_left(left - self.velocity.x * seconds);
            }
            if !self.config.lock_y {
                let top = surface.scroll_top();
                surface.set_scroll_top(top - self.velocity.y * seconds);
            }
        }

        // Either axis coming to rest ends the coast for both
        if self.velocity.x.abs() < SETTLE_THRESHOLD || self.velocity.y.abs() < SETTLE_THRESHOLD {
            self.velocity = Velocity::ZERO;
            self.running = false;
            debug!("Inertia settled");
            return FrameRequest::Idle;
        }

        FrameRequest::Schedule
    }
}
