//! `Visual` and `DecorationFactory` traits.
//!
//! A scene theme (robot, drones, ships, boxes) is a [`DecorationFactory`]:
//! it builds the body of each pooled object and, on detection, the overlay
//! attached to it.  The sweep keeps the returned boxes alive for as long as
//! the object lives and drops them when the object is destroyed, so a host
//! implementation removes its scene-graph node in `Drop`.

use vigil_perception::Vec3;

/// Visual state of a pooled object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Normal,
    Detected,
}

/// The kinds of overlay attached to a detected object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// A small highlight sphere at the object.
    Marker,
    /// A text label, normally reading `"DETECTED"`.
    Label,
    /// A wireframe box around the object.
    BoundingBox,
}

/// Something placed in the scene that follows an object.
pub trait Visual: Send {
    /// Stable identifier, e.g. `"slot-3/body"`.
    fn id(&self) -> &str;

    fn position(&self) -> Vec3;

    fn set_position(&mut self, position: Vec3);

    /// Switch between the normal and detected representation.  Overlays
    /// may ignore this.
    fn set_appearance(&mut self, appearance: Appearance);
}

/// Produces the visuals for one scene theme.
pub trait DecorationFactory: Send {
    /// Build the body of the object occupying `slot`, in its normal state.
    fn body(&mut self, slot: usize, position: Vec3) -> Box<dyn Visual>;

    /// Build the overlay shown while the object in `slot` is detected.
    /// May be empty.
    fn overlay(&mut self, slot: usize, position: Vec3) -> Vec<Box<dyn Visual>>;
}
