//! In-process scene implementations for headless runs and tests.
//!
//! [`SimDecorationFactory`] builds [`SimVisual`]s that only record their
//! state, [`SimStage`] logs labels and frames, and [`SimAssetLoader`] serves
//! models from an in-memory table.  Together they let the full Vigil stack
//! run without a renderer.
//!
//! # Example
//!
//! ```rust
//! use vigil_perception::Vec3;
//! use vigil_scene::DecorationFactory;
//! use vigil_scene::sim::SimDecorationFactory;
//!
//! let mut factory = SimDecorationFactory::new().with_marker().with_label("DETECTED");
//! let live = factory.live();
//!
//! let body = factory.body(0, Vec3::zero());
//! let overlay = factory.overlay(0, Vec3::zero());
//! assert_eq!(live.count(), 3);
//!
//! drop(body);
//! drop(overlay);
//! assert_eq!(live.count(), 0);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use vigil_perception::Vec3;
use vigil_types::VigilError;

use crate::asset::{AssetLoader, Mesh, Primitive};
use crate::decoration::{Appearance, DecorationFactory, OverlayKind, Visual};
use crate::stage::Stage;

// ────────────────────────────────────────────────────────────────────────────
// Live visual tracking
// ────────────────────────────────────────────────────────────────────────────

/// Shared count of [`SimVisual`]s that have been built and not yet dropped.
#[derive(Debug, Clone, Default)]
pub struct LiveVisuals(Arc<AtomicUsize>);

impl LiveVisuals {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SimVisual
// ────────────────────────────────────────────────────────────────────────────

/// What a [`SimVisual`] stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum SimRole {
    Body(Mesh),
    Overlay { kind: OverlayKind, text: Option<String> },
}

/// A visual that records its position and appearance.
#[derive(Debug)]
pub struct SimVisual {
    id: String,
    role: SimRole,
    position: Vec3,
    appearance: Appearance,
    live: LiveVisuals,
}

impl SimVisual {
    fn spawn(id: String, role: SimRole, position: Vec3, live: &LiveVisuals) -> Box<Self> {
        live.0.fetch_add(1, Ordering::SeqCst);
        Box::new(Self {
            id,
            role,
            position,
            appearance: Appearance::Normal,
            live: live.clone(),
        })
    }

    pub fn role(&self) -> &SimRole {
        &self.role
    }

    pub fn appearance(&self) -> Appearance {
        self.appearance
    }
}

impl Visual for SimVisual {
    fn id(&self) -> &str {
        &self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_appearance(&mut self, appearance: Appearance) {
        self.appearance = appearance;
    }
}

impl Drop for SimVisual {
    fn drop(&mut self) {
        self.live.0.fetch_sub(1, Ordering::SeqCst);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SimDecorationFactory builder
// ────────────────────────────────────────────────────────────────────────────

/// Builder for a [`DecorationFactory`] producing [`SimVisual`]s.
///
/// Call the `with_*` methods to choose the overlay pieces shown on
/// detection.  Bodies use the configured [`Mesh`] (a unit cube by default).
pub struct SimDecorationFactory {
    mesh: Mesh,
    overlay: Vec<(OverlayKind, Option<String>)>,
    live: LiveVisuals,
}

impl Default for SimDecorationFactory {
    fn default() -> Self {
        Self {
            mesh: Mesh::Primitive(Primitive::Cube { size: 1.0 }),
            overlay: Vec::new(),
            live: LiveVisuals::default(),
        }
    }
}

impl SimDecorationFactory {
    /// Create a factory with no overlay pieces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `mesh` for every body.
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = mesh;
        self
    }

    /// Add a highlight marker to the detection overlay.
    pub fn with_marker(mut self) -> Self {
        self.overlay.push((OverlayKind::Marker, None));
        self
    }

    /// Add a text label to the detection overlay.
    pub fn with_label(mut self, text: impl Into<String>) -> Self {
        self.overlay.push((OverlayKind::Label, Some(text.into())));
        self
    }

    /// Add a bounding outline to the detection overlay.
    pub fn with_bounding_box(mut self) -> Self {
        self.overlay.push((OverlayKind::BoundingBox, None));
        self
    }

    /// Marker, `"DETECTED"` label and bounding box.
    pub fn full_overlay() -> Self {
        Self::new().with_marker().with_label("DETECTED").with_bounding_box()
    }

    /// Handle on the number of visuals currently alive.
    pub fn live(&self) -> LiveVisuals {
        self.live.clone()
    }

    /// Number of visuals one detected object carries, body included.
    pub fn visuals_per_detected_object(&self) -> usize {
        1 + self.overlay.len()
    }
}

impl DecorationFactory for SimDecorationFactory {
    fn body(&mut self, slot: usize, position: Vec3) -> Box<dyn Visual> {
        SimVisual::spawn(
            format!("slot-{slot}/body"),
            SimRole::Body(self.mesh.clone()),
            position,
            &self.live,
        )
    }

    fn overlay(&mut self, slot: usize, position: Vec3) -> Vec<Box<dyn Visual>> {
        self.overlay
            .iter()
            .enumerate()
            .map(|(i, (kind, text))| {
                SimVisual::spawn(
                    format!("slot-{slot}/overlay-{i}"),
                    SimRole::Overlay {
                        kind: *kind,
                        text: text.clone(),
                    },
                    position,
                    &self.live,
                ) as Box<dyn Visual>
            })
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SimStage
// ────────────────────────────────────────────────────────────────────────────

/// What a [`SimStage`] has been asked to show.
#[derive(Debug, Default, Clone)]
pub struct StageLog {
    pub counter_label: String,
    pub frames_rendered: u64,
}

/// A stage that records instead of drawing.  Clone the [`log`][Self::log]
/// handle before moving the stage into a driver.
#[derive(Debug, Default, Clone)]
pub struct SimStage {
    log: Arc<Mutex<StageLog>>,
}

impl SimStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Arc<Mutex<StageLog>> {
        Arc::clone(&self.log)
    }

    /// Copy of the current log; a poisoned lock yields the default.
    pub fn snapshot(&self) -> StageLog {
        self.log.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl Stage for SimStage {
    fn set_counter_label(&mut self, text: &str) {
        if let Ok(mut log) = self.log.lock() {
            log.counter_label = text.to_string();
        }
    }

    fn render(&mut self) {
        if let Ok(mut log) = self.log.lock() {
            log.frames_rendered += 1;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SimAssetLoader
// ────────────────────────────────────────────────────────────────────────────

/// Serves models from an in-memory table; unknown names fail.
#[derive(Debug, Default)]
pub struct SimAssetLoader {
    models: HashMap<String, u32>,
}

impl SimAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `name` loadable with the given triangle count.
    pub fn with_model(mut self, name: impl Into<String>, triangles: u32) -> Self {
        self.models.insert(name.into(), triangles);
        self
    }
}

impl AssetLoader for SimAssetLoader {
    fn load(&mut self, name: &str) -> Result<Mesh, VigilError> {
        self.models
            .get(name)
            .map(|&triangles| Mesh::Model {
                name: name.to_string(),
                triangles,
            })
            .ok_or_else(|| VigilError::AssetLoad {
                asset: name.to_string(),
                details: "not found".to_string(),
            })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::load_or_fallback;

    #[test]
    fn full_overlay_has_three_pieces() {
        let mut factory = SimDecorationFactory::full_overlay();
        assert_eq!(factory.visuals_per_detected_object(), 4);
        let overlay = factory.overlay(1, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(overlay.len(), 3);
        assert_eq!(overlay[1].id(), "slot-1/overlay-1");
    }

    #[test]
    fn live_count_tracks_drops() {
        let mut factory = SimDecorationFactory::full_overlay();
        let live = factory.live();
        let a = factory.body(0, Vec3::zero());
        let b = factory.body(1, Vec3::zero());
        let o = factory.overlay(0, Vec3::zero());
        assert_eq!(live.count(), 5);
        drop(o);
        assert_eq!(live.count(), 2);
        drop(a);
        drop(b);
        assert_eq!(live.count(), 0);
    }

    #[test]
    fn sim_visual_records_position_and_appearance() {
        let live = LiveVisuals::default();
        let mut v = SimVisual::spawn(
            "x".to_string(),
            SimRole::Body(Mesh::Primitive(Primitive::Sphere { radius: 1.0 })),
            Vec3::zero(),
            &live,
        );
        v.set_position(Vec3::new(4.0, 0.0, 0.0));
        v.set_appearance(Appearance::Detected);
        assert_eq!(v.position(), Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(v.appearance(), Appearance::Detected);
    }

    #[test]
    fn label_overlay_carries_text() {
        let mut factory = SimDecorationFactory::new().with_label("DETECTED");
        let overlay = factory.overlay(0, Vec3::zero());
        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay[0].id(), "slot-0/overlay-0");
    }

    #[test]
    fn sim_stage_log_is_shared() {
        let mut stage = SimStage::new();
        let log = stage.log();
        stage.set_counter_label("DETECTED: 2");
        stage.render();
        let l = log.lock().unwrap();
        assert_eq!(l.counter_label, "DETECTED: 2");
        assert_eq!(l.frames_rendered, 1);
    }

    #[test]
    fn sim_asset_loader_serves_known_models_only() {
        let mut loader = SimAssetLoader::new().with_model("robot.glb", 5000);
        assert!(loader.load("robot.glb").is_ok());
        assert!(matches!(loader.load("ship.glb"), Err(VigilError::AssetLoad { .. })));

        let mesh = load_or_fallback(&mut loader, "ship.glb", Primitive::Cone { radius: 0.5, height: 1.0 });
        assert!(mesh.is_fallback());
    }
}
