//! Scene bounds: where objects spawn and where they leave.
//!
//! # Key types
//!
//! | Type | Role |
//! |------|------|
//! | [`SpawnBand`]    | Axis-aligned box objects are (re)spawned inside.      |
//! | [`ExitBoundary`] | A plane on one axis; crossing it takes an object out. |
//!
//! # Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use vigil_perception::bounds::{ExitBoundary, Side, SpawnBand};
//! use vigil_perception::transform::{Axis, Vec3};
//!
//! let band = SpawnBand::new(Vec3::new(30.0, -2.0, -5.0), Vec3::new(40.0, 2.0, 5.0));
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let p = band.sample(&mut rng);
//! assert!(band.contains(p));
//!
//! let exit = ExitBoundary::new(Axis::X, -10.0, Side::Below);
//! assert!(!exit.has_exited(p));
//! assert!(exit.has_exited(Vec3::new(-10.5, 0.0, 0.0)));
//! ```

use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::transform::{Axis, Vec3};

// ────────────────────────────────────────────────────────────────────────────
// SpawnBand
// ────────────────────────────────────────────────────────────────────────────

/// An axis-aligned box, defined by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpawnBand {
    pub min: Vec3,
    pub max: Vec3,
}

impl SpawnBand {
    /// Create a band from its two opposite corners.
    ///
    /// The constructor normalises the corners so that `min ≤ max` per axis.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Return the centre point of the band.
    pub fn centre(&self) -> Vec3 {
        self.min.add(self.max).scale(0.5)
    }

    /// Return `true` if `p` lies inside (or on the surface of) the band.
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// `true` when the band has zero extent on every axis.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// A uniformly distributed point inside the band.  Flat axes yield
    /// their single value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        Vec3::new(
            sample_span(rng, self.min.x, self.max.x),
            sample_span(rng, self.min.y, self.max.y),
            sample_span(rng, self.min.z, self.max.z),
        )
    }
}

fn sample_span<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if lo < hi { rng.gen_range(lo..=hi) } else { lo }
}

// ────────────────────────────────────────────────────────────────────────────
// ExitBoundary
// ────────────────────────────────────────────────────────────────────────────

/// Which side of the threshold counts as "outside".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Above,
    Below,
}

/// A plane perpendicular to one axis.  Objects past it have left the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExitBoundary {
    pub axis: Axis,
    pub threshold: f32,
    pub side: Side,
}

impl ExitBoundary {
    pub fn new(axis: Axis, threshold: f32, side: Side) -> Self {
        Self {
            axis,
            threshold,
            side,
        }
    }

    /// Strictly past the threshold; a point on the plane is still inside.
    pub fn has_exited(&self, p: Vec3) -> bool {
        let v = p.component(self.axis);
        match self.side {
            Side::Above => v > self.threshold,
            Side::Below => v < self.threshold,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
