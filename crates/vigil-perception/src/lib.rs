//! `vigil-perception` – geometry behind the detection sweep.
//!
//! # Modules
//!
//! - [`transform`] – [`Vec3`][transform::Vec3],
//!   [`Quaternion`][transform::Quaternion] and [`Axis`][transform::Axis]:
//!   the vector and rotation primitives every other module builds on.
//! - [`fov`] – [`FieldOfView`][fov::FieldOfView]: an angular wedge anchored
//!   at an "eye" point that oscillates sinusoidally and answers whether a
//!   point is seen.
//! - [`bounds`] – [`SpawnBand`][bounds::SpawnBand] and
//!   [`ExitBoundary`][bounds::ExitBoundary]: where objects appear and where
//!   they leave the scene.

pub mod bounds;
pub mod fov;
pub mod transform;

pub use bounds::{ExitBoundary, SpawnBand};
pub use fov::{FieldOfView, Sighting};
pub use transform::{Axis, Quaternion, Vec3};
