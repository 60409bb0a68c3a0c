//! `vigil-runtime` – frame-driven animation for the Vigil hero banner.
//!
//! Everything here is advanced explicitly, one frame at a time, by whoever
//! owns the render loop.  Nothing reads the wall clock on its own: time comes
//! in as a `now` argument or from a [`Clock`][clock::Clock].
//!
//! # Modules
//!
//! - [`sweep`] – [`SweepAnimator`][sweep::SweepAnimator]: the detection
//!   sweep.  A field-of-view wedge oscillates over a fixed pool of moving
//!   objects; objects it catches are highlighted, counted once, and replaced
//!   after a dwell period.
//! - [`presets`] – the named scenes (`robot-left`, `robot-right`, `drones`,
//!   `ships`, `boxes`) as [`SweepConfig`][sweep::SweepConfig] values.
//! - [`driver`] – [`SceneDriver`][driver::SceneDriver]: owns one sweep plus
//!   its [`Stage`][vigil_scene::Stage] and clock, runs it on a `tokio`
//!   interval, and tears it down on drop.
//! - [`clock`] – [`SystemClock`][clock::SystemClock] and the hand-driven
//!   [`ManualClock`][clock::ManualClock].
//! - [`scheduler`] – a due-time queue for deferred wake-ups.
//! - [`typewriter`] – the cycling type-and-delete headline.
//! - [`gradient`] – the colour wash behind the hero section.
//! - [`carousel`] – the endlessly scrolling testimonial columns.
//! - [`orbit`] – the pointer-following camera.
//! - [`telemetry`] – [`init_tracing`][telemetry::init_tracing]: global
//!   `tracing` subscriber with optional OTLP export.

pub mod carousel;
pub mod clock;
pub mod driver;
pub mod gradient;
pub mod orbit;
pub mod presets;
pub mod scheduler;
pub mod sweep;
pub mod telemetry;
pub mod typewriter;

pub use carousel::{Carousel, Column, Scroll};
pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::{RunSummary, SceneDriver};
pub use gradient::{GradientField, GradientFrame, Rgb};
pub use orbit::CameraOrbit;
pub use scheduler::Scheduler;
pub use sweep::{DetectionCounter, FrameReport, MovingObject, SpeedRange, SweepAnimator, SweepConfig};
pub use telemetry::{TracerProviderGuard, init_tracing};
pub use typewriter::{Typewriter, TypewriterSet, TypewriterState};
