//! Generic `Stage` trait: the surface a scene is presented on.

/// Receives the per-frame HUD text and render requests.
pub trait Stage {
    /// Replace the detection counter label.
    fn set_counter_label(&mut self, text: &str);

    /// Present the current frame.
    fn render(&mut self);
}
