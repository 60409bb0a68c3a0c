//! `vigil-scene` – the presentation seams of a sweep scene.
//!
//! Nothing in here draws pixels.  The traits describe what a host must
//! provide, and [`sim`] supplies in-process implementations that record what
//! they were asked to do so the whole stack runs headless.
//!
//! # Modules
//!
//! - [`decoration`] – [`Visual`] and [`DecorationFactory`]: the capability
//!   set that produces a representation for the normal and detected states
//!   of an object.
//! - [`stage`] – [`Stage`]: receives the counter label and the per-frame
//!   render call.
//! - [`asset`] – [`AssetLoader`] and [`load_or_fallback`]: model loading
//!   with a primitive-shape substitute on failure.
//! - [`sim`] – recording implementations of all of the above.

pub mod asset;
pub mod decoration;
pub mod sim;
pub mod stage;

pub use asset::{AssetLoader, Mesh, Primitive, load_or_fallback};
pub use decoration::{Appearance, DecorationFactory, OverlayKind, Visual};
pub use stage::Stage;
