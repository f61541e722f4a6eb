//! L2 Organism Layer: Headless frame driver
//!
//! Runs the inertia engine (optionally behind a scripted drag) on a fixed
//! frame interval against an in-memory surface and records every frame.

use serde::Serialize;

use crate::clock::{Clock, ManualClock};
use crate::config::{DragScrollConfig, InertiaConfig};
use crate::inertia::{FrameRequest, InertiaEngine, Velocity};
use crate::pointer::{PointerEvent, PointerInput, PointerPhase, Scope};
use crate::surface::{handle, MemorySurface, ScrollSurface};
use crate::tracker::DragTracker;

/// State after one display frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameSample {
    pub t_ms: f64,
    pub velocity: Velocity,
    pub scroll_left: f64,
    pub scroll_top: f64,
}

/// Every frame of one coast
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoastTrace {
    /// Velocity at release, before any frame ran
    pub initial_velocity: Velocity,
    pub samples: Vec<FrameSample>,
    /// False when the frame cap was hit before the engine went idle
    pub settled: bool,
}

impl CoastTrace {
    /// Time from the first to the last frame
    pub fn duration_ms(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.t_ms - first.t_ms,
            _ => 0.0,
        }
    }

    pub fn final_sample(&self) -> Option<&FrameSample> {
        self.samples.last()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A straight-line drag played back at an even pace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fling {
    pub input: PointerInput,
    pub dx: f64,
    pub dy: f64,
    pub duration_ms: f64,
    /// Number of move events spread over the duration
    pub steps: u32,
}

impl Default for Fling {
    fn default() -> Self {
        Self {
            input: PointerInput::Mouse,
            dx: -120.0,
            dy: -200.0,
            duration_ms: 100.0,
            steps: 6,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Simulation {
    frame_interval_ms: f64,
    max_frames: usize,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(16.0)
    }
}

impl Simulation {
    /// Default cap on frames per run (a minute at 60fps)
    pub const DEFAULT_MAX_FRAMES: usize = 3_600;

    pub fn new(frame_interval_ms: f64) -> Self {
        Self {
            frame_interval_ms: frame_interval_ms.max(1.0),
            max_frames: Self::DEFAULT_MAX_FRAMES,
        }
    }

    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn frame_interval_ms(&self) -> f64 {
        self.frame_interval_ms
    }

    /// Coast from `velocity` at scroll offset `start`
    pub fn coast(&self, config: InertiaConfig, velocity: Velocity, start: (f64, f64)) -> CoastTrace {
        let surface = handle(MemorySurface::at(start.0, start.1));
        let mut engine = InertiaEngine::new(config);
        engine.attach(Some(surface.clone()));
        engine.set_velocity(velocity);

        let mut trace = CoastTrace {
            initial_velocity: velocity,
            ..Default::default()
        };
        if engine.start() == FrameRequest::Idle {
            trace.settled = true;
            return trace;
        }

        self.run_frames(0.0, &mut trace, |t| {
            let request = engine.on_frame(t);
            let surface = surface.borrow();
            (
                request,
                FrameSample {
                    t_ms: t,
                    velocity: engine.velocity(),
                    scroll_left: surface.scroll_left(),
                    scroll_top: surface.scroll_top(),
                },
            )
        });
        trace
    }

    /// Play `fling` through a drag tracker, then coast on whatever it sampled
    pub fn fling(&self, config: DragScrollConfig, fling: Fling) -> CoastTrace {
        let clock = ManualClock::new(0.0);
        let surface = handle(MemorySurface::new());
        let mut tracker = DragTracker::new(config, clock.clone());
        tracker.attach(Some(surface.clone()));

        let event = |phase, x, y| PointerEvent {
            input: fling.input,
            phase,
            x,
            y,
        };

        tracker.dispatch(Scope::Element, event(PointerPhase::Down, 0.0, 0.0));
        let steps = fling.steps.max(1);
        for step in 1..=steps {
            let progress = step as f64 / steps as f64;
            clock.advance(fling.duration_ms / steps as f64);
            tracker.dispatch(
                Scope::Document,
                event(PointerPhase::Move, fling.dx * progress, fling.dy * progress),
            );
        }

        let mut trace = CoastTrace {
            initial_velocity: tracker.velocity(),
            ..Default::default()
        };

        let request = tracker.pointer_up();
        if request == FrameRequest::Idle {
            trace.settled = true;
            return trace;
        }

        let start = clock.now_ms();
        self.run_frames(start, &mut trace, |t| {
            clock.set(t);
            let request = tracker.on_frame(t);
            let surface = surface.borrow();
            (
                request,
                FrameSample {
                    t_ms: t,
                    velocity: tracker.velocity(),
                    scroll_left: surface.scroll_left(),
                    scroll_top: surface.scroll_top(),
                },
            )
        });
        trace
    }

    fn run_frames<F>(&self, start_ms: f64, trace: &mut CoastTrace, mut step: F)
    where
        F: FnMut(f64) -> (FrameRequest, FrameSample),
    {
        let mut t = start_ms;
        for _ in 0..self.max_frames {
            t += self.frame_interval_ms;
            let (request, sample) = step(t);
            trace.samples.push(sample);
            if request == FrameRequest::Idle {
                trace.settled = true;
                return;
            }
        }
        tracing::warn!(frames = self.max_frames, "Simulation hit frame cap before settling");
    }
}
