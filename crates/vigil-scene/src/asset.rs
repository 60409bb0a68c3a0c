//! Model loading with a primitive-shape fallback.
//!
//! A failed model load is the only recoverable error a scene has.  Callers
//! go through [`load_or_fallback`], which logs the failure and hands back a
//! simple primitive so the animation keeps running.

use tracing::{info, warn};
use vigil_types::VigilError;

/// Simple shapes used when a model is unavailable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Cube { size: f32 },
    Sphere { radius: f32 },
    Cone { radius: f32, height: f32 },
}

/// Geometry backing an object's body.
#[derive(Debug, Clone, PartialEq)]
pub enum Mesh {
    /// A loaded model.
    Model { name: String, triangles: u32 },
    /// A stand-in primitive.
    Primitive(Primitive),
}

impl Mesh {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Mesh::Primitive(_))
    }
}

/// A source of named 3-D models.
pub trait AssetLoader {
    /// Load the model called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::AssetLoad`] if the model cannot be fetched or
    /// decoded.
    fn load(&mut self, name: &str) -> Result<Mesh, VigilError>;
}

/// Load `name`, substituting `fallback` on failure.
pub fn load_or_fallback(loader: &mut dyn AssetLoader, name: &str, fallback: Primitive) -> Mesh {
    match loader.load(name) {
        Ok(mesh) => {
            info!(asset = name, "model loaded");
            mesh
        }
        Err(e) => {
            warn!(asset = name, error = %e, ?fallback, "model load failed; using primitive");
            Mesh::Primitive(fallback)
        }
    }
}
