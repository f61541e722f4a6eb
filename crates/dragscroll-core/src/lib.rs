//! Drag-to-scroll with optional inertia
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `physics` - speed, distance, decay, time deltas
//! - `clock` - monotonic and hand-driven time sources
//! - `surface` - the scrollable surface contract
//! - `pointer` - pointer events and listener registrations
//!
//! ## L3 Molecular Layer
//! - `inertia` - frame-by-frame coasting
//! - `tracker` - drag session state machine feeding the inertia engine
//!
//! ## L2 Organism Layer
//! - `simulation` - headless frame driver for traces and tests
//!
//! # Usage
//!
//! ```ignore
//! use dragscroll_core::{handle, DragScrollConfig, DragTracker, MemorySurface, SystemClock};
//!
//! let surface = handle(MemorySurface::new());
//! let mut tracker = DragTracker::new(DragScrollConfig::default(), SystemClock::new());
//! tracker.attach(Some(surface.clone()));
//!
//! // Route element-scoped downs and document-scoped moves/ups into the tracker,
//! // then call `on_frame` once per refresh while `is_coasting()` holds.
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod inertia;
pub mod physics;
pub mod pointer;
pub mod simulation;
pub mod surface;
pub mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, DragScrollConfig, InertiaConfig, UiConfig};
pub use error::{Error, Result};
pub use inertia::{FrameRequest, InertiaEngine, Velocity, SETTLE_THRESHOLD};
pub use pointer::{Listener, Listeners, PointerEvent, PointerInput, PointerPhase, Scope};
pub use simulation::{CoastTrace, Fling, FrameSample, Simulation};
pub use surface::{handle, Cursor, MemorySurface, ScrollSurface, SurfaceHandle, UserSelect};
pub use tracker::{DragState, DragTracker, PAUSE_THRESHOLD_MS};
