//! [`SweepAnimator`] – the detection sweep.
//!
//! A field-of-view wedge anchored at a fixed "eye" oscillates over a pool of
//! objects travelling along one axis.  Each call to [`SweepAnimator::step`]
//! is one frame:
//!
//! 1. Advance the animation accumulator by the configured `time_step`
//!    (a constant per call, so perceived speed follows the frame rate).
//! 2. Recompute the wedge orientation: `amplitude * sin(time * rate)`.
//! 3. For each slot, in pool order:
//!    - move the object along the travel axis unless it is detected (or
//!      `move_while_detected` is set);
//!    - if it is undetected and past the exit boundary, recycle it: new
//!      spawn-band position, same slot;
//!    - if it is undetected, test it against the wedge and, on a hit, record
//!      the detection time, bump the counter and attach the overlay;
//!    - keep body and overlay on the object;
//!    - once it has been detected for longer than the dwell, drop it with
//!      its visuals and spawn a fresh, undetected replacement in the slot.
//!
//! The pool never changes size, the counter never goes down, and an object
//! is detected exactly when it carries a detection time.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use vigil_perception::Vec3;
//! use vigil_runtime::sweep::{SweepAnimator, SweepConfig};
//! use vigil_scene::sim::SimDecorationFactory;
//!
//! let config = SweepConfig { pool_size: 1, ..SweepConfig::default() };
//! let factory = Box::new(SimDecorationFactory::full_overlay());
//! let mut sweep = SweepAnimator::with_seed(config, factory, 7).unwrap();
//!
//! // Put the object straight ahead of the eye.
//! sweep.place(0, Vec3::new(20.0, 0.0, 0.0));
//! let report = sweep.step(Duration::ZERO);
//! assert_eq!(report.detections.len(), 1);
//! assert_eq!(sweep.counter().value(), 1);
//! ```

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vigil_perception::bounds::Side;
use vigil_perception::{Axis, ExitBoundary, FieldOfView, SpawnBand, Vec3};
use vigil_scene::{Appearance, DecorationFactory, Visual};
use vigil_types::{DetectionEvent, VigilError};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// How long a detected object stays before it is replaced.
pub const DEFAULT_DWELL_MS: u64 = 2000;

/// Text in front of the counter value on the HUD label.
pub const DEFAULT_COUNTER_PREFIX: &str = "DETECTIONS";

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Per-frame displacement range along the travel axis.  Negative speeds move
/// towards the negative end of the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A fixed speed.
    pub fn constant(speed: f32) -> Self {
        Self::new(speed, speed)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min < self.max {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }
}

/// Everything that distinguishes one sweep scene from another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SweepConfig {
    /// Scene name used in logs and detection events.
    pub name: String,
    /// The eye.
    pub anchor: Vec3,
    /// Forward direction before any sweep rotation.
    pub forward: Vec3,
    /// Axis the wedge oscillates around.
    pub sweep_axis: Axis,
    /// Half of the wedge's opening angle (degrees).
    pub half_angle_deg: f32,
    /// Furthest distance at which an object is detected.
    pub max_range: f32,
    /// Peak sweep rotation either side of `forward` (degrees).
    pub sweep_amplitude_deg: f32,
    /// Phase advance of the sweep per unit of animation time.
    pub sweep_rate: f32,
    /// Accumulator increment per frame.
    pub time_step: f32,
    /// Number of objects alive at any time.
    pub pool_size: usize,
    /// Axis objects travel along.
    pub travel_axis: Axis,
    /// Per-object speed, sampled on spawn.
    pub speed_range: SpeedRange,
    /// Detected objects are replaced once this much time has passed.
    pub dwell_ms: u64,
    /// Where objects (re)appear.
    pub spawn_band: SpawnBand,
    /// Where undetected objects leave the scene.
    pub exit_boundary: ExitBoundary,
    /// Keep moving detected objects (their overlay follows them).
    #[serde(default)]
    pub move_while_detected: bool,
    /// HUD label prefix.
    #[serde(default = "default_counter_prefix")]
    pub counter_prefix: String,
}

fn default_counter_prefix() -> String {
    DEFAULT_COUNTER_PREFIX.to_string()
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            name: "sweep".to_string(),
            anchor: Vec3::zero(),
            forward: Axis::X.unit(),
            sweep_axis: Axis::Y,
            half_angle_deg: 15.0,
            max_range: 25.0,
            sweep_amplitude_deg: 30.0,
            sweep_rate: 1.0,
            time_step: 0.01,
            pool_size: 8,
            travel_axis: Axis::X,
            speed_range: SpeedRange::new(-0.08, -0.03),
            dwell_ms: DEFAULT_DWELL_MS,
            spawn_band: SpawnBand::new(Vec3::new(30.0, -1.0, -10.0), Vec3::new(45.0, 1.0, 10.0)),
            exit_boundary: ExitBoundary::new(Axis::X, -10.0, Side::Below),
            move_while_detected: false,
            counter_prefix: default_counter_prefix(),
        }
    }
}

impl SweepConfig {
    /// Reject configurations that cannot animate.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), VigilError> {
        let invalid = |msg: String| Err(VigilError::InvalidConfig(msg));

        if self.pool_size == 0 {
            return invalid("pool_size must be at least 1".to_string());
        }
        if !(self.half_angle_deg > 0.0 && self.half_angle_deg <= 180.0) {
            return invalid(format!(
                "half_angle_deg must be in (0, 180], got {}",
                self.half_angle_deg
            ));
        }
        if !(self.max_range.is_finite() && self.max_range > 0.0) {
            return invalid(format!("max_range must be positive, got {}", self.max_range));
        }
        if !self.sweep_amplitude_deg.is_finite() || !self.sweep_rate.is_finite() {
            return invalid("sweep_amplitude_deg and sweep_rate must be finite".to_string());
        }
        if !(self.time_step.is_finite() && self.time_step >= 0.0) {
            return invalid(format!("time_step must be non-negative, got {}", self.time_step));
        }
        if self.forward.length() == 0.0 || !self.forward.length().is_finite() {
            return invalid("forward must be a non-zero direction".to_string());
        }
        let SpeedRange { min, max } = self.speed_range;
        if !(min.is_finite() && max.is_finite()) || min > max {
            return invalid(format!("speed_range must satisfy min <= max, got {min}..{max}"));
        }
        if self.spawn_band.is_degenerate() {
            return invalid("spawn_band must not collapse to a single point".to_string());
        }
        Ok(())
    }

    /// The wedge described by this configuration.
    pub fn field_of_view(&self) -> FieldOfView {
        FieldOfView::new(
            self.anchor,
            self.forward,
            self.sweep_axis,
            self.half_angle_deg,
            self.max_range,
        )
        .with_sweep(self.sweep_amplitude_deg, self.sweep_rate)
    }

    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pool objects
// ─────────────────────────────────────────────────────────────────────────────

/// One object of the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingObject {
    slot: usize,
    /// Bumped each time the slot receives a replacement.
    generation: u64,
    position: Vec3,
    speed: f32,
    detected_at: Option<Duration>,
}

impl MovingObject {
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_detected(&self) -> bool {
        self.detected_at.is_some()
    }

    /// Frame time at which the object was detected.
    pub fn detection_time(&self) -> Option<Duration> {
        self.detected_at
    }
}

/// A pool slot: the object plus everything drawn for it.
struct Slot {
    object: MovingObject,
    body: Box<dyn Visual>,
    overlay: Vec<Box<dyn Visual>>,
}

impl Slot {
    fn spawn<R: Rng + ?Sized>(
        slot: usize,
        generation: u64,
        config: &SweepConfig,
        rng: &mut R,
        factory: &mut dyn DecorationFactory,
    ) -> Self {
        let position = config.spawn_band.sample(rng);
        let speed = config.speed_range.sample(rng);
        Self {
            object: MovingObject {
                slot,
                generation,
                position,
                speed,
                detected_at: None,
            },
            body: factory.body(slot, position),
            overlay: Vec::new(),
        }
    }

    fn sync_visuals(&mut self) {
        let p = self.object.position;
        self.body.set_position(p);
        for v in &mut self.overlay {
            v.set_position(p);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Counter
// ─────────────────────────────────────────────────────────────────────────────

/// Monotonic detection counter rendered on the HUD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionCounter {
    count: u64,
    prefix: String,
}

impl DetectionCounter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            count: 0,
            prefix: prefix.into(),
        }
    }

    /// Record one detection and return the new total.
    pub fn increment(&mut self) -> u64 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn value(&self) -> u64 {
        self.count
    }

    /// e.g. `"DETECTIONS: 12"`.
    pub fn label(&self) -> String {
        format!("{}: {}", self.prefix, self.count)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Frame report
// ─────────────────────────────────────────────────────────────────────────────

/// What happened during one [`SweepAnimator::step`].
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// 1-based frame number.
    pub frame: u64,
    /// Animation accumulator after this frame.
    pub time: f32,
    /// Wedge orientation used for this frame (radians).
    pub orientation_rad: f32,
    /// New detections, in pool order.
    pub detections: Vec<DetectionEvent>,
    /// Slots whose object left the scene and was recycled in place.
    pub recycled: Vec<usize>,
    /// Slots whose detected object was destroyed and replaced.
    pub replaced: Vec<usize>,
    /// Counter value after this frame.
    pub counter: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// SweepAnimator
// ─────────────────────────────────────────────────────────────────────────────

/// Owns one sweep scene's state: the pool, the wedge, the counter and the
/// animation accumulator.
///
/// Build it on scene entry and drop it on exit; dropping releases every
/// visual the scene created.
pub struct SweepAnimator {
    config: SweepConfig,
    fov: FieldOfView,
    slots: Vec<Slot>,
    counter: DetectionCounter,
    time: f32,
    frame: u64,
    rng: StdRng,
    factory: Box<dyn DecorationFactory>,
}

impl SweepAnimator {
    /// Build a scene with an entropy-seeded spawn generator.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::InvalidConfig`] if `config` fails
    /// [`SweepConfig::validate`].
    pub fn new(config: SweepConfig, factory: Box<dyn DecorationFactory>) -> Result<Self, VigilError> {
        Self::build(config, factory, StdRng::from_entropy())
    }

    /// Build a scene whose spawn positions and speeds are reproducible.
    ///
    /// # Errors
    ///
    /// Same as [`SweepAnimator::new`].
    pub fn with_seed(
        config: SweepConfig,
        factory: Box<dyn DecorationFactory>,
        seed: u64,
    ) -> Result<Self, VigilError> {
        Self::build(config, factory, StdRng::seed_from_u64(seed))
    }

    fn build(
        config: SweepConfig,
        mut factory: Box<dyn DecorationFactory>,
        mut rng: StdRng,
    ) -> Result<Self, VigilError> {
        config.validate()?;
        let fov = config.field_of_view();
        let slots = (0..config.pool_size)
            .map(|slot| Slot::spawn(slot, 0, &config, &mut rng, factory.as_mut()))
            .collect();
        let counter = DetectionCounter::new(config.counter_prefix.clone());
        info!(scene = %config.name, pool_size = config.pool_size, "sweep scene built");
        Ok(Self {
            config,
            fov,
            slots,
            counter,
            time: 0.0,
            frame: 0,
            rng,
            factory,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn pool_size(&self) -> usize {
        self.slots.len()
    }

    pub fn objects(&self) -> impl Iterator<Item = &MovingObject> {
        self.slots.iter().map(|s| &s.object)
    }

    pub fn object(&self, slot: usize) -> Option<&MovingObject> {
        self.slots.get(slot).map(|s| &s.object)
    }

    pub fn counter(&self) -> &DetectionCounter {
        &self.counter
    }

    pub fn counter_label(&self) -> String {
        self.counter.label()
    }

    /// Animation accumulator.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Current forward direction of the wedge.
    pub fn forward(&self) -> Vec3 {
        self.fov.forward_at(self.time)
    }

    /// Position of the body drawn for `slot`.
    pub fn body_position(&self, slot: usize) -> Option<Vec3> {
        self.slots.get(slot).map(|s| s.body.position())
    }

    /// Positions of the overlay pieces drawn for `slot` (empty when the
    /// object is undetected).
    pub fn overlay_positions(&self, slot: usize) -> Vec<Vec3> {
        self.slots
            .get(slot)
            .map(|s| s.overlay.iter().map(|v| v.position()).collect())
            .unwrap_or_default()
    }

    /// Move the object in `slot` to `position`, keeping its visuals on it.
    /// Returns `false` for an unknown slot.
    pub fn place(&mut self, slot: usize, position: Vec3) -> bool {
        match self.slots.get_mut(slot) {
            Some(s) => {
                s.object.position = position;
                s.sync_visuals();
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Frame update
    // -------------------------------------------------------------------------

    /// Advance the scene by one frame at wall time `now`.
    pub fn step(&mut self, now: Duration) -> FrameReport {
        self.time += self.config.time_step;
        self.frame += 1;

        let orientation = self.fov.orientation_at(self.time);
        let forward = self.fov.forward_for(orientation);
        let dwell = self.config.dwell();

        let mut report = FrameReport {
            frame: self.frame,
            time: self.time,
            orientation_rad: orientation,
            ..FrameReport::default()
        };

        let Self {
            config,
            fov,
            slots,
            counter,
            rng,
            factory,
            ..
        } = self;
        let travel = config.travel_axis.unit();

        for slot in slots.iter_mut() {
            let index = slot.object.slot;
            let detected = slot.object.is_detected();

            if !detected || config.move_while_detected {
                slot.object.position = slot.object.position.add(travel.scale(slot.object.speed));
            }

            if !detected {
                if config.exit_boundary.has_exited(slot.object.position) {
                    slot.object.position = config.spawn_band.sample(rng);
                    debug!(scene = %config.name, slot = index, "object left the scene; recycled");
                    report.recycled.push(index);
                }

                let sighting = fov.sight(forward, slot.object.position);
                if sighting.seen {
                    slot.object.detected_at = Some(now);
                    let count = counter.increment();
                    slot.body.set_appearance(Appearance::Detected);
                    slot.overlay = factory.overlay(index, slot.object.position);

                    let angle_deg = sighting.angle_rad.to_degrees();
                    info!(
                        scene = %config.name,
                        slot = index,
                        angle_deg,
                        distance = sighting.distance,
                        count,
                        "object detected"
                    );
                    report.detections.push(DetectionEvent::new(
                        &config.name,
                        index,
                        slot.object.position.to_array(),
                        angle_deg,
                        sighting.distance,
                        count,
                    ));
                }
            }

            slot.sync_visuals();

            if let Some(at) = slot.object.detected_at
                && now.saturating_sub(at) > dwell
            {
                let generation = slot.object.generation + 1;
                *slot = Slot::spawn(index, generation, config, rng, factory.as_mut());
                debug!(scene = %config.name, slot = index, generation, "dwell elapsed; object replaced");
                report.replaced.push(index);
            }
        }

        report.counter = counter.value();
        report
    }
}

impl Drop for SweepAnimator {
    fn drop(&mut self) {
        debug!(
            scene = %self.config.name,
            frames = self.frame,
            detections = self.counter.value(),
            "sweep scene torn down"
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_scene::sim::SimDecorationFactory;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    /// Eye at the origin looking down +X, no sweep, one stationary object.
    fn still_config() -> SweepConfig {
        SweepConfig {
            name: "test".to_string(),
            sweep_amplitude_deg: 0.0,
            pool_size: 1,
            speed_range: SpeedRange::constant(0.0),
            dwell_ms: 3000,
            // Far behind the eye so fresh spawns are never in view.
            spawn_band: SpawnBand::new(Vec3::new(-60.0, 0.0, -1.0), Vec3::new(-50.0, 0.0, 1.0)),
            exit_boundary: ExitBoundary::new(Axis::X, -100.0, Side::Below),
            ..SweepConfig::default()
        }
    }

    fn animator(config: SweepConfig) -> SweepAnimator {
        SweepAnimator::with_seed(config, Box::new(SimDecorationFactory::full_overlay()), 11)
            .expect("valid config")
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    #[test]
    fn default_config_is_valid() {
        SweepConfig::default().validate().expect("default must validate");
    }

    #[test]
    fn validate_rejects_empty_pool() {
        let cfg = SweepConfig { pool_size: 0, ..SweepConfig::default() };
        assert!(matches!(cfg.validate(), Err(VigilError::InvalidConfig(m)) if m.contains("pool_size")));
    }

    #[test]
    fn validate_rejects_bad_half_angle_and_range() {
        let cfg = SweepConfig { half_angle_deg: 0.0, ..SweepConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = SweepConfig { max_range: -1.0, ..SweepConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_speed_range() {
        let cfg = SweepConfig {
            speed_range: SpeedRange::new(0.5, 0.1),
            ..SweepConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(VigilError::InvalidConfig(m)) if m.contains("speed_range")));
    }

    #[test]
    fn validate_rejects_point_spawn_band() {
        let p = Vec3::new(30.0, 0.0, 0.0);
        let cfg = SweepConfig {
            spawn_band: SpawnBand::new(p, p),
            ..SweepConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn invalid_config_fails_construction() {
        let cfg = SweepConfig { pool_size: 0, ..SweepConfig::default() };
        assert!(SweepAnimator::new(cfg, Box::new(SimDecorationFactory::new())).is_err());
    }

    #[test]
    fn config_json_roundtrip_fills_defaults() {
        let cfg = SweepConfig::default();
        let mut value = serde_json::to_value(&cfg).unwrap();
        let obj = value.as_object_mut().unwrap();
        obj.remove("move_while_detected");
        obj.remove("counter_prefix");
        let back: SweepConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, cfg);
    }

    // ── Detection geometry ────────────────────────────────────────────────────

    #[test]
    fn object_dead_ahead_is_detected_and_counted() {
        let mut sweep = animator(still_config());
        assert_eq!(sweep.counter().value(), 0);
        sweep.place(0, Vec3::new(20.0, 0.0, 0.0));

        let report = sweep.step(Duration::ZERO);

        let obj = sweep.object(0).unwrap();
        assert!(obj.is_detected());
        assert_eq!(obj.detection_time(), Some(Duration::ZERO));
        assert_eq!(sweep.counter().value(), 1);
        assert_eq!(report.counter, 1);
        assert_eq!(report.detections.len(), 1);
        assert_eq!(report.detections[0].slot, 0);
        assert!((report.detections[0].distance - 20.0).abs() < 1e-4);
        assert_eq!(sweep.counter_label(), "DETECTIONS: 1");
    }

    #[test]
    fn object_off_axis_is_not_detected() {
        let mut sweep = animator(still_config());
        sweep.place(0, Vec3::new(20.0, 15.0, 0.0));
        let report = sweep.step(Duration::ZERO);
        assert!(!sweep.object(0).unwrap().is_detected());
        assert!(report.detections.is_empty());
        assert_eq!(sweep.counter().value(), 0);
    }

    #[test]
    fn object_beyond_range_is_not_detected() {
        let mut sweep = animator(still_config());
        sweep.place(0, Vec3::new(25.5, 0.0, 0.0));
        sweep.step(Duration::ZERO);
        assert!(!sweep.object(0).unwrap().is_detected());
    }

    #[test]
    fn object_at_exact_range_is_detected() {
        let mut sweep = animator(still_config());
        sweep.place(0, Vec3::new(25.0, 0.0, 0.0));
        sweep.step(Duration::ZERO);
        assert!(sweep.object(0).unwrap().is_detected());
    }

    #[test]
    fn detection_attaches_overlay_at_object() {
        let mut sweep = animator(still_config());
        sweep.place(0, Vec3::new(10.0, 0.0, 0.0));
        assert!(sweep.overlay_positions(0).is_empty());
        sweep.step(Duration::ZERO);
        let overlay = sweep.overlay_positions(0);
        assert_eq!(overlay.len(), 3);
        assert!(overlay.iter().all(|p| *p == Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn detected_object_is_counted_once() {
        let mut sweep = animator(still_config());
        sweep.place(0, Vec3::new(10.0, 0.0, 0.0));
        for i in 0..50 {
            sweep.step(ms(i * 16));
        }
        assert_eq!(sweep.counter().value(), 1);
    }

    // ── Dwell and replacement ─────────────────────────────────────────────────

    #[test]
    fn replacement_happens_after_dwell_not_before() {
        let cfg = SweepConfig {
            move_while_detected: true,
            speed_range: SpeedRange::constant(0.1),
            ..still_config()
        };
        let mut sweep = animator(cfg);
        sweep.place(0, Vec3::new(20.0, 0.0, 0.0));

        sweep.step(ms(0));
        assert!(sweep.object(0).unwrap().is_detected());
        assert_eq!(sweep.object(0).unwrap().generation(), 0);

        let report = sweep.step(ms(2999));
        let obj = sweep.object(0).unwrap();
        assert!(obj.is_detected(), "still present inside the dwell window");
        assert!(report.replaced.is_empty());
        // Overlay tracks the moving object.
        let pos = obj.position();
        assert!((pos.x - 20.2).abs() < 1e-4);
        assert!(sweep.overlay_positions(0).iter().all(|p| *p == pos));
        assert_eq!(sweep.body_position(0), Some(pos));

        let report = sweep.step(ms(3001));
        assert_eq!(report.replaced, vec![0]);
        let obj = sweep.object(0).unwrap();
        assert!(!obj.is_detected());
        assert_eq!(obj.detection_time(), None);
        assert_eq!(obj.generation(), 1);
        assert!(sweep.overlay_positions(0).is_empty());
        assert!(sweep.config().spawn_band.contains(obj.position()));
    }

    #[test]
    fn exactly_dwell_elapsed_is_not_yet_replaced() {
        let mut sweep = animator(still_config());
        sweep.place(0, Vec3::new(20.0, 0.0, 0.0));
        sweep.step(ms(100));
        let report = sweep.step(ms(3100));
        assert!(report.replaced.is_empty());
        assert!(sweep.object(0).unwrap().is_detected());
    }

    #[test]
    fn replacement_releases_overlay_visuals() {
        let factory = SimDecorationFactory::full_overlay();
        let live = factory.live();
        let mut sweep = SweepAnimator::with_seed(still_config(), Box::new(factory), 3).unwrap();
        assert_eq!(live.count(), 1);

        sweep.place(0, Vec3::new(20.0, 0.0, 0.0));
        sweep.step(ms(0));
        assert_eq!(live.count(), 4);

        sweep.step(ms(5000));
        assert_eq!(live.count(), 1, "old body and overlay dropped, new body alive");

        drop(sweep);
        assert_eq!(live.count(), 0);
    }

    #[test]
    fn stationary_detected_object_does_not_move() {
        let cfg = SweepConfig {
            speed_range: SpeedRange::constant(0.5),
            ..still_config()
        };
        let mut sweep = animator(cfg);
        sweep.place(0, Vec3::new(10.0, 0.0, 0.0));
        sweep.step(ms(0));
        // Moved once before the test, then frozen.
        let at_detection = sweep.object(0).unwrap().position();
        sweep.step(ms(16));
        sweep.step(ms(32));
        assert_eq!(sweep.object(0).unwrap().position(), at_detection);
    }

    // ── Exit and recycle ──────────────────────────────────────────────────────

    #[test]
    fn exit_recycles_in_place_before_detection() {
        // The exit plane sits inside the wedge: an object that crosses it is
        // recycled rather than detected.
        let cfg = SweepConfig {
            exit_boundary: ExitBoundary::new(Axis::X, 5.0, Side::Above),
            speed_range: SpeedRange::constant(1.0),
            ..still_config()
        };
        let mut sweep = animator(cfg);
        sweep.place(0, Vec3::new(5.0, 0.0, 0.0));

        let report = sweep.step(ms(0));
        assert_eq!(report.recycled, vec![0]);
        assert!(report.detections.is_empty());
        let obj = sweep.object(0).unwrap();
        assert_eq!(obj.generation(), 0, "recycling keeps the slot identity");
        assert!(sweep.config().spawn_band.contains(obj.position()));
    }

    // ── Whole-scene properties ────────────────────────────────────────────────

    #[test]
    fn long_run_preserves_pool_and_invariants() {
        let cfg = SweepConfig {
            dwell_ms: 500,
            ..SweepConfig::default()
        };
        let mut sweep = SweepAnimator::with_seed(cfg, Box::new(SimDecorationFactory::full_overlay()), 99)
            .unwrap();

        let mut last_count = 0;
        let mut detections = 0;
        for i in 0..5000u64 {
            let now = ms(i * 16);
            let report = sweep.step(now);
            detections += report.detections.len() as u64;

            assert_eq!(sweep.pool_size(), 8);
            assert_eq!(sweep.objects().count(), 8);
            assert!(report.counter >= last_count);
            last_count = report.counter;

            for obj in sweep.objects() {
                assert_eq!(obj.is_detected(), obj.detection_time().is_some());
                if let Some(at) = obj.detection_time() {
                    assert!(now - at <= sweep.config().dwell());
                }
            }
        }
        assert_eq!(detections, last_count);
        assert!(last_count > 0, "a default scene should detect something");
    }

    #[test]
    fn orientation_follows_sine_of_accumulator() {
        let cfg = SweepConfig {
            time_step: 0.5,
            sweep_amplitude_deg: 45.0,
            sweep_rate: 2.0,
            ..still_config()
        };
        let mut sweep = animator(cfg);
        let r1 = sweep.step(ms(0));
        let r2 = sweep.step(ms(16));
        assert!((r1.time - 0.5).abs() < 1e-6);
        assert!((r2.time - 1.0).abs() < 1e-6);
        let expected = 45f32.to_radians() * (2.0f32).sin();
        assert!((r2.orientation_rad - expected).abs() < 1e-5);
    }

    #[test]
    fn place_rejects_unknown_slot() {
        let mut sweep = animator(still_config());
        assert!(!sweep.place(5, Vec3::zero()));
    }

    #[test]
    fn counter_label_uses_prefix() {
        let mut counter = DetectionCounter::new("DRONES");
        assert_eq!(counter.label(), "DRONES: 0");
        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.label(), "DRONES: 1");
    }
}
