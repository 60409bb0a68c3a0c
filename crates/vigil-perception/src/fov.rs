//! Field-of-view wedge.
//!
//! A [`FieldOfView`] is anchored at a fixed "eye" point and looks along a
//! base forward direction.  Its orientation oscillates around a sweep axis as
//! `amplitude * sin(time * rate)`, where `time` is the animation accumulator
//! owned by the caller.  A point is *seen* when the angle between the current
//! forward direction and the anchor→point vector is strictly less than the
//! half-angle **and** the distance is at most the maximum range.
//!
//! # Example
//!
//! ```rust
//! use vigil_perception::fov::FieldOfView;
//! use vigil_perception::transform::{Axis, Vec3};
//!
//! let fov = FieldOfView::new(Vec3::zero(), Axis::X.unit(), Axis::Y, 15.0, 25.0);
//! let forward = fov.forward_at(0.0);
//!
//! assert!(fov.sight(forward, Vec3::new(20.0, 0.0, 0.0)).seen);
//! assert!(!fov.sight(forward, Vec3::new(20.0, 15.0, 0.0)).seen);
//! ```

use crate::transform::{Axis, Quaternion, Vec3};

/// Result of testing one point against the wedge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sighting {
    /// Angle between the forward direction and the anchor→point vector
    /// (radians).
    pub angle_rad: f32,
    /// Distance from the anchor to the point.
    pub distance: f32,
    /// `angle < half_angle && distance <= max_range`.
    pub seen: bool,
}

/// An oscillating angular wedge anchored at a fixed point.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOfView {
    anchor: Vec3,
    base_forward: Vec3,
    sweep_axis: Axis,
    half_angle_rad: f32,
    max_range: f32,
    amplitude_rad: f32,
    sweep_rate: f32,
}

impl FieldOfView {
    /// Create a static wedge (no oscillation).
    ///
    /// `half_angle_deg` is given in degrees for readability; it is stored in
    /// radians.  `base_forward` is normalised.
    pub fn new(
        anchor: Vec3,
        base_forward: Vec3,
        sweep_axis: Axis,
        half_angle_deg: f32,
        max_range: f32,
    ) -> Self {
        Self {
            anchor,
            base_forward: base_forward.normalized(),
            sweep_axis,
            half_angle_rad: half_angle_deg.to_radians(),
            max_range,
            amplitude_rad: 0.0,
            sweep_rate: 1.0,
        }
    }

    /// Make the wedge oscillate `±amplitude_deg` around the sweep axis,
    /// `rate` radians of phase per unit of animation time.
    pub fn with_sweep(mut self, amplitude_deg: f32, rate: f32) -> Self {
        self.amplitude_rad = amplitude_deg.to_radians();
        self.sweep_rate = rate;
        self
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn half_angle_rad(&self) -> f32 {
        self.half_angle_rad
    }

    pub fn max_range(&self) -> f32 {
        self.max_range
    }

    /// Orientation (radians around the sweep axis) at animation time `time`.
    /// Always within `±amplitude`.
    pub fn orientation_at(&self, time: f32) -> f32 {
        self.amplitude_rad * (time * self.sweep_rate).sin()
    }

    /// Forward direction for an explicit orientation.
    pub fn forward_for(&self, orientation_rad: f32) -> Vec3 {
        Quaternion::from_axis_angle(self.sweep_axis.unit(), orientation_rad)
            .rotate(self.base_forward)
    }

    /// Forward direction at animation time `time`.
    pub fn forward_at(&self, time: f32) -> Vec3 {
        self.forward_for(self.orientation_at(time))
    }

    /// Test `point` against the wedge looking along `forward`.
    pub fn sight(&self, forward: Vec3, point: Vec3) -> Sighting {
        let to_point = point.sub(self.anchor);
        let angle_rad = forward.angle_to(to_point);
        let distance = to_point.length();
        Sighting {
            angle_rad,
            distance,
            seen: angle_rad < self.half_angle_rad && distance <= self.max_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wedge() -> FieldOfView {
        FieldOfView::new(Vec3::zero(), Axis::X.unit(), Axis::Y, 15.0, 25.0)
    }

    #[test]
    fn point_on_axis_within_range_is_seen() {
        let fov = wedge();
        let s = fov.sight(fov.forward_at(0.0), Vec3::new(20.0, 0.0, 0.0));
        assert!(s.seen);
        assert!(s.angle_rad.abs() < 1e-6);
        assert!((s.distance - 20.0).abs() < 1e-6);
    }

    #[test]
    fn point_outside_half_angle_is_not_seen() {
        let fov = wedge();
        let s = fov.sight(fov.forward_at(0.0), Vec3::new(20.0, 15.0, 0.0));
        assert!(!s.seen);
        assert!((s.angle_rad.to_degrees() - 36.87).abs() < 0.01);
    }

    #[test]
    fn distance_equal_to_range_is_seen() {
        let fov = wedge();
        assert!(fov.sight(fov.forward_at(0.0), Vec3::new(25.0, 0.0, 0.0)).seen);
    }

    #[test]
    fn distance_beyond_range_is_not_seen() {
        let fov = wedge();
        assert!(!fov.sight(fov.forward_at(0.0), Vec3::new(25.01, 0.0, 0.0)).seen);
    }

    #[test]
    fn orientation_is_bounded_by_amplitude() {
        let fov = wedge().with_sweep(30.0, 1.0);
        let limit = 30f32.to_radians() + 1e-6;
        for i in 0..1000 {
            let o = fov.orientation_at(i as f32 * 0.05);
            assert!(o.abs() <= limit, "orientation {o} exceeds ±30°");
        }
    }

    #[test]
    fn sweep_turns_wedge_towards_side_point() {
        // Rotating +X by +30° around +Y swings the wedge towards -Z.
        let fov = wedge().with_sweep(30.0, 1.0);
        let forward = fov.forward_at(std::f32::consts::FRAC_PI_2);
        let side = Vec3::new(17.32, 0.0, -10.0);
        assert!(fov.sight(forward, side).seen);
        assert!(!fov.sight(fov.forward_at(0.0), side).seen);
    }

    #[test]
    fn anchor_offset_is_respected() {
        let fov = FieldOfView::new(Vec3::new(-5.0, 1.0, 0.0), Axis::X.unit(), Axis::Y, 10.0, 8.0);
        let forward = fov.forward_at(0.0);
        assert!(fov.sight(forward, Vec3::new(2.0, 1.0, 0.0)).seen);
        assert!(!fov.sight(forward, Vec3::new(4.0, 1.0, 0.0)).seen);
    }
}
