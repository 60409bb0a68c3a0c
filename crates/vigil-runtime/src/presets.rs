//! Named sweep scenes.
//!
//! Each hero-banner theme is a [`SweepConfig`] value; the look comes from the
//! [`DecorationFactory`][vigil_scene::DecorationFactory] paired with it.
//!
//! | Name | Eye | Traffic |
//! |---|---|---|
//! | `robot-left`  | left of frame, looking +X  | objects approach along −X |
//! | `robot-right` | right of frame, looking −X | objects approach along +X |
//! | `drones`      | origin, looking +X         | drones cross along +Z, tracked while detected |
//! | `ships`       | mast height, looking +Z    | ships pass along +X on the water plane |
//! | `boxes`       | overhead, looking down     | boxes ride a conveyor along +Z |

use vigil_perception::bounds::Side;
use vigil_perception::{Axis, ExitBoundary, SpawnBand, Vec3};

use crate::sweep::{SpeedRange, SweepConfig};

/// Preset names, in display order.
pub const NAMES: [&str; 5] = ["robot-left", "robot-right", "drones", "ships", "boxes"];

/// Look up a preset by name.
pub fn by_name(name: &str) -> Option<SweepConfig> {
    match name {
        "robot-left" => Some(robot_left()),
        "robot-right" => Some(robot_right()),
        "drones" => Some(drones()),
        "ships" => Some(ships()),
        "boxes" => Some(boxes()),
        _ => None,
    }
}

/// Every preset, in [`NAMES`] order.
pub fn all() -> Vec<SweepConfig> {
    NAMES.iter().filter_map(|n| by_name(n)).collect()
}

pub fn robot_left() -> SweepConfig {
    SweepConfig {
        name: "robot-left".to_string(),
        anchor: Vec3::new(-8.0, 1.5, 0.0),
        forward: Axis::X.unit(),
        max_range: 30.0,
        spawn_band: SpawnBand::new(Vec3::new(30.0, 0.0, -10.0), Vec3::new(45.0, 3.0, 10.0)),
        exit_boundary: ExitBoundary::new(Axis::X, -12.0, Side::Below),
        ..SweepConfig::default()
    }
}

pub fn robot_right() -> SweepConfig {
    SweepConfig {
        name: "robot-right".to_string(),
        anchor: Vec3::new(8.0, 1.5, 0.0),
        forward: Axis::X.unit().scale(-1.0),
        max_range: 30.0,
        speed_range: SpeedRange::new(0.03, 0.08),
        spawn_band: SpawnBand::new(Vec3::new(-45.0, 0.0, -10.0), Vec3::new(-30.0, 3.0, 10.0)),
        exit_boundary: ExitBoundary::new(Axis::X, 12.0, Side::Above),
        ..SweepConfig::default()
    }
}

pub fn drones() -> SweepConfig {
    SweepConfig {
        name: "drones".to_string(),
        half_angle_deg: 12.0,
        max_range: 28.0,
        sweep_amplitude_deg: 45.0,
        sweep_rate: 1.5,
        pool_size: 6,
        travel_axis: Axis::Z,
        speed_range: SpeedRange::new(0.05, 0.12),
        dwell_ms: 1000,
        spawn_band: SpawnBand::new(Vec3::new(10.0, -2.0, -30.0), Vec3::new(22.0, 2.0, -25.0)),
        exit_boundary: ExitBoundary::new(Axis::Z, 25.0, Side::Above),
        move_while_detected: true,
        counter_prefix: "DRONES TRACKED".to_string(),
        ..SweepConfig::default()
    }
}

pub fn ships() -> SweepConfig {
    SweepConfig {
        name: "ships".to_string(),
        anchor: Vec3::new(0.0, 3.0, 0.0),
        forward: Axis::Z.unit(),
        half_angle_deg: 10.0,
        max_range: 60.0,
        sweep_amplitude_deg: 40.0,
        sweep_rate: 0.5,
        pool_size: 5,
        speed_range: SpeedRange::new(0.04, 0.1),
        dwell_ms: 3000,
        spawn_band: SpawnBand::new(Vec3::new(-50.0, 0.0, 20.0), Vec3::new(-45.0, 0.0, 50.0)),
        exit_boundary: ExitBoundary::new(Axis::X, 50.0, Side::Above),
        counter_prefix: "VESSELS".to_string(),
        ..SweepConfig::default()
    }
}

pub fn boxes() -> SweepConfig {
    SweepConfig {
        name: "boxes".to_string(),
        anchor: Vec3::new(0.0, 6.0, 0.0),
        forward: Axis::Y.unit().scale(-1.0),
        sweep_axis: Axis::X,
        half_angle_deg: 20.0,
        max_range: 10.0,
        sweep_amplitude_deg: 25.0,
        sweep_rate: 2.0,
        pool_size: 10,
        travel_axis: Axis::Z,
        speed_range: SpeedRange::new(0.05, 0.05),
        dwell_ms: 1500,
        spawn_band: SpawnBand::new(Vec3::new(-1.0, 0.0, -20.0), Vec3::new(1.0, 0.5, -15.0)),
        exit_boundary: ExitBoundary::new(Axis::Z, 15.0, Side::Above),
        move_while_detected: true,
        counter_prefix: "SCANNED".to_string(),
        ..SweepConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::sweep::SweepAnimator;
    use vigil_scene::sim::SimDecorationFactory;

    #[test]
    fn every_name_resolves_to_matching_preset() {
        for name in NAMES {
            let cfg = by_name(name).expect("preset exists");
            assert_eq!(cfg.name, name);
        }
        assert!(by_name("submarines").is_none());
        assert_eq!(all().len(), NAMES.len());
    }

    #[test]
    fn every_preset_validates() {
        for cfg in all() {
            cfg.validate()
                .unwrap_or_else(|e| panic!("preset {} invalid: {e}", cfg.name));
        }
    }

    #[test]
    fn spawn_bands_start_outside_the_exit() {
        for cfg in all() {
            let centre = cfg.spawn_band.centre();
            assert!(
                !cfg.exit_boundary.has_exited(centre),
                "preset {} spawns past its own exit",
                cfg.name
            );
        }
    }

    #[test]
    fn every_preset_detects_within_a_minute_of_frames() {
        for cfg in all() {
            let name = cfg.name.clone();
            let mut sweep =
                SweepAnimator::with_seed(cfg, Box::new(SimDecorationFactory::full_overlay()), 5)
                    .unwrap();
            for i in 0..3600u64 {
                sweep.step(Duration::from_millis(i * 16));
            }
            assert!(sweep.counter().value() > 0, "preset {name} never detected anything");
        }
    }
}
