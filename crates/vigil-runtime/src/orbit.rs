//! Pointer-following camera for the hero scene.
//!
//! The camera sits on a sphere around a target point.  Moving the pointer
//! sets a target yaw and pitch; [`CameraOrbit::update`] eases toward them a
//! fraction at a time, once per frame.

use serde::{Deserialize, Serialize};
use vigil_perception::Vec3;

/// Fraction of the remaining angle closed per [`CameraOrbit::update`].
pub const EASING: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraOrbit {
    pub target: Vec3,
    pub radius: f32,
    /// Yaw reached with the pointer at either side edge.
    pub max_yaw_rad: f32,
    /// Pitch reached with the pointer at the top or bottom edge.
    pub max_pitch_rad: f32,
    yaw: f32,
    pitch: f32,
    goal_yaw: f32,
    goal_pitch: f32,
}

impl Default for CameraOrbit {
    fn default() -> Self {
        Self::new(Vec3::zero(), 20.0, 15f32.to_radians(), 8f32.to_radians())
    }
}

impl CameraOrbit {
    pub fn new(target: Vec3, radius: f32, max_yaw_rad: f32, max_pitch_rad: f32) -> Self {
        Self {
            target,
            radius,
            max_yaw_rad,
            max_pitch_rad,
            yaw: 0.0,
            pitch: 0.0,
            goal_yaw: 0.0,
            goal_pitch: 0.0,
        }
    }

    /// Aim at the pointer at `(x, y)` pixels in a `viewport` of
    /// `(width, height)`.  Ignored for an empty viewport.
    pub fn follow_pointer(&mut self, x: f32, y: f32, viewport: (f32, f32)) -> bool {
        let (w, h) = viewport;
        if w <= 0.0 || h <= 0.0 {
            return false;
        }
        let ndc_x = ((x / w) * 2.0 - 1.0).clamp(-1.0, 1.0);
        let ndc_y = (1.0 - (y / h) * 2.0).clamp(-1.0, 1.0);
        self.goal_yaw = ndc_x * self.max_yaw_rad;
        self.goal_pitch = ndc_y * self.max_pitch_rad;
        true
    }

    pub fn update(&mut self) {
        self.yaw += (self.goal_yaw - self.yaw) * EASING;
        self.pitch += (self.goal_pitch - self.pitch) * EASING;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Camera location; at rest it sits on +Z looking at the target.
    pub fn position(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target
            .add(Vec3::new(sy * cp, sp, cy * cp).scale(self.radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rests_on_positive_z() {
        let cam = CameraOrbit::default();
        let p = cam.position();
        assert!((p.z - 20.0).abs() < 1e-5);
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5);
    }

    #[test]
    fn centred_pointer_keeps_camera_still() {
        let mut cam = CameraOrbit::default();
        assert!(cam.follow_pointer(400.0, 300.0, (800.0, 600.0)));
        cam.update();
        assert!(cam.yaw().abs() < 1e-6 && cam.pitch().abs() < 1e-6);
    }

    #[test]
    fn eases_five_percent_per_update() {
        let mut cam = CameraOrbit::default();
        cam.follow_pointer(800.0, 0.0, (800.0, 600.0));
        cam.update();
        assert!((cam.yaw() - 0.05 * cam.max_yaw_rad).abs() < 1e-6);
        assert!((cam.pitch() - 0.05 * cam.max_pitch_rad).abs() < 1e-6);
        for _ in 0..500 {
            cam.update();
        }
        assert!((cam.yaw() - cam.max_yaw_rad).abs() < 1e-4);
        assert!(cam.position().x > 0.0 && cam.position().y > 0.0);
    }

    #[test]
    fn stays_on_orbit_sphere() {
        let mut cam = CameraOrbit::new(Vec3::new(1.0, 2.0, 3.0), 10.0, 0.5, 0.3);
        cam.follow_pointer(0.0, 600.0, (800.0, 600.0));
        for _ in 0..50 {
            cam.update();
        }
        let d = cam.position().distance_to(cam.target);
        assert!((d - 10.0).abs() < 1e-4);
    }

    #[test]
    fn empty_viewport_is_ignored() {
        let mut cam = CameraOrbit::default();
        assert!(!cam.follow_pointer(10.0, 10.0, (0.0, 600.0)));
    }
}
