//! [`SceneDriver`] – owns a sweep scene for its whole lifetime.
//!
//! The driver is built when a scene is entered and dropped when it is left.
//! Each frame it:
//!
//! 1. reads `now` from its [`Clock`];
//! 2. steps the [`SweepAnimator`];
//! 3. writes the counter label to the [`Stage`];
//! 4. asks the stage to render.
//!
//! [`SceneDriver::run`] repeats that on a fixed `tokio` interval until a frame
//! limit is reached or the shared shutdown flag is raised (the CLI raises it
//! on Ctrl-C).  There is exactly one logical thread of execution: frames
//! never overlap and the flag is only checked between them.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::{Arc, atomic::AtomicBool};
//! use std::time::Duration;
//! use vigil_runtime::clock::SystemClock;
//! use vigil_runtime::driver::SceneDriver;
//! use vigil_runtime::{presets, sweep::SweepAnimator};
//! use vigil_scene::sim::{SimDecorationFactory, SimStage};
//!
//! # async fn demo() {
//! let sweep = SweepAnimator::new(
//!     presets::robot_left(),
//!     Box::new(SimDecorationFactory::full_overlay()),
//! ).unwrap();
//! let mut driver = SceneDriver::new(sweep, Box::new(SimStage::new()), Box::new(SystemClock::new()));
//! let shutdown = Arc::new(AtomicBool::new(false));
//! let summary = driver
//!     .run(Some(600), Duration::from_millis(16), shutdown, |_| {})
//!     .await;
//! println!("{} detections", summary.detections);
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{Instrument, info};
use vigil_scene::Stage;

use crate::clock::Clock;
use crate::sweep::{FrameReport, SweepAnimator};
use crate::telemetry;

// ─────────────────────────────────────────────────────────────────────────────
// Run summary
// ─────────────────────────────────────────────────────────────────────────────

/// Totals for one [`SceneDriver::run`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames driven by this call.
    pub frames: u64,
    /// Detections during this call.
    pub detections: u64,
    /// `true` when the run ended because the shutdown flag was raised.
    pub interrupted: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// SceneDriver
// ─────────────────────────────────────────────────────────────────────────────

/// Drives one [`SweepAnimator`] onto one [`Stage`].
pub struct SceneDriver {
    sweep: SweepAnimator,
    stage: Box<dyn Stage>,
    clock: Box<dyn Clock>,
}

impl SceneDriver {
    /// Enter the scene.
    pub fn new(sweep: SweepAnimator, mut stage: Box<dyn Stage>, clock: Box<dyn Clock>) -> Self {
        info!(scene = %sweep.config().name, "scene entered");
        stage.set_counter_label(&sweep.counter_label());
        Self {
            sweep,
            stage,
            clock,
        }
    }

    pub fn sweep(&self) -> &SweepAnimator {
        &self.sweep
    }

    /// Run exactly one frame.
    pub fn tick(&mut self) -> FrameReport {
        let now = self.clock.now();
        let report = self.sweep.step(now);
        self.stage.set_counter_label(&self.sweep.counter_label());
        self.stage.render();
        report
    }

    /// Run frames every `frame_interval` until `max_frames` have been driven
    /// (forever when `None`) or `shutdown` is raised.  `on_frame` sees every
    /// report.
    ///
    /// The whole run is one [`telemetry::scene_span`]; detection events land
    /// inside it and its totals are recorded when the run ends.
    pub async fn run<F>(
        &mut self,
        max_frames: Option<u64>,
        frame_interval: Duration,
        shutdown: Arc<AtomicBool>,
        on_frame: F,
    ) -> RunSummary
    where
        F: FnMut(&FrameReport),
    {
        let config = self.sweep.config();
        let span = telemetry::scene_span(&config.name, config.pool_size, max_frames);
        let summary = self
            .run_frames(max_frames, frame_interval, shutdown, on_frame)
            .instrument(span.clone())
            .await;
        telemetry::record_run(&span, &summary);
        summary
    }

    async fn run_frames<F>(
        &mut self,
        max_frames: Option<u64>,
        frame_interval: Duration,
        shutdown: Arc<AtomicBool>,
        mut on_frame: F,
    ) -> RunSummary
    where
        F: FnMut(&FrameReport),
    {
        let mut interval = tokio::time::interval(frame_interval.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut summary = RunSummary::default();
        loop {
            if max_frames.is_some_and(|max| summary.frames >= max) {
                break;
            }
            interval.tick().await;
            if shutdown.load(Ordering::SeqCst) {
                summary.interrupted = true;
                break;
            }

            let report = self.tick();
            summary.frames += 1;
            summary.detections += report.detections.len() as u64;
            on_frame(&report);
        }
        summary
    }
}

impl Drop for SceneDriver {
    fn drop(&mut self) {
        info!(
            scene = %self.sweep.config().name,
            total_detections = self.sweep.counter().value(),
            "scene exited"
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::sweep::{SpeedRange, SweepConfig};
    use vigil_perception::bounds::Side;
    use vigil_perception::{Axis, ExitBoundary, SpawnBand, Vec3};
    use vigil_scene::sim::{SimDecorationFactory, SimStage};

    fn parked_config() -> SweepConfig {
        SweepConfig {
            sweep_amplitude_deg: 0.0,
            pool_size: 2,
            speed_range: SpeedRange::constant(0.0),
            spawn_band: SpawnBand::new(Vec3::new(-60.0, 0.0, -1.0), Vec3::new(-50.0, 0.0, 1.0)),
            exit_boundary: ExitBoundary::new(Axis::X, -100.0, Side::Below),
            ..SweepConfig::default()
        }
    }

    fn driver_with(stage: SimStage, clock: ManualClock) -> SceneDriver {
        let sweep = SweepAnimator::with_seed(
            parked_config(),
            Box::new(SimDecorationFactory::full_overlay()),
            1,
        )
        .unwrap();
        SceneDriver::new(sweep, Box::new(stage), Box::new(clock))
    }

    #[test]
    fn entering_a_scene_shows_zero_counter() {
        let stage = SimStage::new();
        let _driver = driver_with(stage.clone(), ManualClock::new());
        let log = stage.snapshot();
        assert_eq!(log.counter_label, "DETECTIONS: 0");
        assert_eq!(log.frames_rendered, 0);
    }

    #[test]
    fn tick_updates_label_and_renders() {
        let stage = SimStage::new();
        let mut driver = driver_with(stage.clone(), ManualClock::new());
        driver.sweep.place(0, Vec3::new(10.0, 0.0, 0.0));

        let report = driver.tick();
        assert_eq!(report.detections.len(), 1);
        let log = stage.snapshot();
        assert_eq!(log.counter_label, "DETECTIONS: 1");
        assert_eq!(log.frames_rendered, 1);
    }

    #[test]
    fn tick_uses_clock_time_for_detection() {
        let clock = ManualClock::new();
        let mut driver = driver_with(SimStage::new(), clock.clone());
        driver.sweep.place(1, Vec3::new(12.0, 0.0, 0.0));

        clock.set(Duration::from_millis(1234));
        driver.tick();
        assert_eq!(
            driver.sweep().object(1).unwrap().detection_time(),
            Some(Duration::from_millis(1234))
        );
    }

    #[tokio::test]
    async fn run_stops_at_frame_limit() {
        let stage = SimStage::new();
        let mut driver = driver_with(stage.clone(), ManualClock::new());
        let mut seen = 0;
        let summary = driver
            .run(
                Some(5),
                Duration::from_millis(1),
                Arc::new(AtomicBool::new(false)),
                |_| seen += 1,
            )
            .await;
        assert_eq!(summary.frames, 5);
        assert!(!summary.interrupted);
        assert_eq!(seen, 5);
        assert_eq!(stage.snapshot().frames_rendered, 5);
    }

    #[tokio::test]
    async fn run_honours_shutdown_flag() {
        let mut driver = driver_with(SimStage::new(), ManualClock::new());
        let shutdown = Arc::new(AtomicBool::new(true));
        let summary = driver
            .run(None, Duration::from_millis(1), shutdown, |_| {})
            .await;
        assert_eq!(summary.frames, 0);
        assert!(summary.interrupted);
    }

    #[tokio::test]
    async fn run_counts_detections() {
        let clock = ManualClock::new();
        let mut driver = driver_with(SimStage::new(), clock.clone());
        driver.sweep.place(0, Vec3::new(10.0, 0.0, 0.0));
        driver.sweep.place(1, Vec3::new(15.0, 1.0, 0.0));
        let summary = driver
            .run(
                Some(3),
                Duration::from_millis(1),
                Arc::new(AtomicBool::new(false)),
                |_| clock.advance(Duration::from_millis(16)),
            )
            .await;
        assert_eq!(summary.detections, 2);
        assert_eq!(driver.sweep().counter().value(), 2);
    }
}
