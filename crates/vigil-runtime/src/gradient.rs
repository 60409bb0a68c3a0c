//! Slowly cycling colour wash behind the hero section.
//!
//! [`GradientField`] describes, per frame, four overlapping linear gradients
//! and a pulsing radial glow at the centre.  It only computes geometry and colours; the
//! caller paints them.  The field works at a quarter of the canvas
//! resolution and the canvas is scaled up to fill 90 % of the viewport.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vigil_types::VigilError;

/// Colours the wash cycles through.
pub const PALETTE_HEX: [&str; 7] = [
    "#FF0000", "#800000", "#FFA500", "#006400", "#00008B", "#FF1493", "#800080",
];

/// Time added by each [`GradientField::advance`].
pub const TIME_STEP: f32 = 0.000125;

const CANVAS_SCALE: f32 = 0.9;
const BUFFER_DIVISOR: u32 = 4;
const STOP_OFFSETS: [f32; 4] = [0.0, 0.33, 0.66, 1.0];
const LINEAR_ALPHA: f32 = 0.8;
const RADIAL_RADIUS: f32 = 0.2;
const RADIAL_OFFSETS: [f32; 3] = [0.0, 0.8, 1.0];
const RADIAL_ALPHAS: [f32; 3] = [0.3, 0.1, 0.0];
const RADIAL_FREQ: f32 = 0.6;
/// Palette positions of the four stops, relative to a gradient's progress.
const STOP_SPREAD: [f32; 4] = [-1.5, -0.5, 0.5, 1.5];

// ─────────────────────────────────────────────────────────────────────────────
// Rgb
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (hex digits in either case).
    pub fn from_hex(hex: &str) -> Result<Self, VigilError> {
        let invalid = || VigilError::InvalidConfig(format!("not a #RRGGBB colour: {hex:?}"));
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel =
            |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Like [`from_hex`][Self::from_hex], falling back to black.
    pub fn parse_or_black(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or_else(|e| {
            warn!(error = %e, "colour rejected, using black");
            Self::BLACK
        })
    }

    /// Channel-wise blend, rounded; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Frame description
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgb,
    pub alpha: f32,
}

/// Gradient along the line `from → to`, in buffer pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialGradient {
    pub centre: (f32, f32),
    pub radius: f32,
    pub stops: Vec<ColorStop>,
}

/// Everything to paint for one frame, back to front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientFrame {
    pub buffer: (u32, u32),
    pub linear: Vec<LinearGradient>,
    pub radial: RadialGradient,
}

// ─────────────────────────────────────────────────────────────────────────────
// GradientField
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GradientField {
    palette: Vec<Rgb>,
    canvas: (u32, u32),
    buffer: (u32, u32),
    time: f32,
}

impl GradientField {
    /// `None` if either viewport side is zero.
    pub fn new(viewport_w: u32, viewport_h: u32) -> Option<Self> {
        let mut field = Self {
            palette: PALETTE_HEX.iter().map(|h| Rgb::parse_or_black(h)).collect(),
            canvas: (0, 0),
            buffer: (0, 0),
            time: 0.0,
        };
        if !field.resize(viewport_w, viewport_h) {
            debug!(viewport_w, viewport_h, "empty viewport; gradient not started");
            return None;
        }
        Some(field)
    }

    /// Recompute sizes for a new viewport.  Returns `false` and keeps the old
    /// sizes if either side is zero.
    pub fn resize(&mut self, viewport_w: u32, viewport_h: u32) -> bool {
        if viewport_w == 0 || viewport_h == 0 {
            return false;
        }
        let scale = |v: u32| ((v as f32 * CANVAS_SCALE).round() as u32).max(1);
        self.canvas = (scale(viewport_w), scale(viewport_h));
        self.buffer = (
            (self.canvas.0 / BUFFER_DIVISOR).max(1),
            (self.canvas.1 / BUFFER_DIVISOR).max(1),
        );
        true
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas
    }

    pub fn buffer_size(&self) -> (u32, u32) {
        self.buffer
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn advance(&mut self) {
        self.time += TIME_STEP;
    }

    /// Palette colour at a continuous position; whole numbers hit palette
    /// entries exactly, fractions blend toward the next entry.
    fn palette_at(&self, position: f32) -> Rgb {
        let n = self.palette.len();
        let base = position.floor();
        let i = (base as i64).rem_euclid(n as i64) as usize;
        self.palette[i].lerp(self.palette[(i + 1) % n], position - base)
    }

    /// How far through the palette gradient `index` of `count` is.  Each
    /// gradient is a fixed fraction of a cycle ahead of the previous one.
    fn progress(&self, index: usize, count: usize) -> f32 {
        let t = (self.time + index as f32 / count as f32) % 1.0;
        t * (self.palette.len() - 1) as f32
    }

    pub fn frame(&self) -> GradientFrame {
        let (w, h) = (self.buffer.0 as f32, self.buffer.1 as f32);
        let centre = (w / 2.0, h / 2.0);
        let lines = [
            ((0.0, 0.0), (w, h)),
            ((w, 0.0), (0.0, h)),
            ((0.0, h), (w, 0.0)),
            (centre, (0.0, 0.0)),
        ];

        let linear = lines
            .iter()
            .enumerate()
            .map(|(g, &(from, to))| {
                let progress = self.progress(g, lines.len());
                LinearGradient {
                    from,
                    to,
                    stops: STOP_OFFSETS
                        .iter()
                        .zip(STOP_SPREAD)
                        .map(|(&offset, spread)| ColorStop {
                            offset,
                            color: self.palette_at(progress + spread),
                            alpha: LINEAR_ALPHA,
                        })
                        .collect(),
                }
            })
            .collect();

        // Inner colour swings green to red, the rim purple to blue.
        let pulse = ((self.time * RADIAL_FREQ).sin() + 1.0) / 2.0;
        let colors = [
            self.palette[3].lerp(self.palette[0], pulse),
            self.palette[6].lerp(self.palette[4], pulse),
            Rgb::BLACK,
        ];
        let radial = RadialGradient {
            centre,
            radius: RADIAL_RADIUS * w.min(h),
            stops: RADIAL_OFFSETS
                .iter()
                .zip(colors)
                .zip(RADIAL_ALPHAS)
                .map(|((&offset, color), alpha)| ColorStop {
                    offset,
                    color,
                    alpha,
                })
                .collect(),
        };

        GradientFrame {
            buffer: self.buffer,
            linear,
            radial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_either_case() {
        assert_eq!(Rgb::from_hex("#FF1493").unwrap(), Rgb::new(255, 20, 147));
        assert_eq!(Rgb::from_hex("#ff1493").unwrap(), Rgb::new(255, 20, 147));
        assert_eq!(Rgb::new(0, 0, 139).to_hex(), "#00008B");
    }

    #[test]
    fn invalid_hex_is_rejected_or_black() {
        for bad in ["FF0000", "#FF00", "#GG0000", "#FF00000", "#ÿÿÿ"] {
            assert!(Rgb::from_hex(bad).is_err(), "{bad} accepted");
            assert_eq!(Rgb::parse_or_black(bad), Rgb::BLACK);
        }
    }

    #[test]
    fn lerp_rounds_and_clamps() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(255, 100, 1);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(128, 50, 1));
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, -1.0), a);
    }

    #[test]
    fn zero_viewport_is_rejected() {
        assert!(GradientField::new(0, 600).is_none());
        assert!(GradientField::new(800, 0).is_none());
    }

    #[test]
    fn canvas_and_buffer_sizes() {
        let mut field = GradientField::new(1000, 800).unwrap();
        assert_eq!(field.canvas_size(), (900, 720));
        assert_eq!(field.buffer_size(), (225, 180));

        assert!(field.resize(400, 200));
        assert_eq!(field.canvas_size(), (360, 180));
        assert_eq!(field.buffer_size(), (90, 45));

        assert!(!field.resize(0, 0));
        assert_eq!(field.canvas_size(), (360, 180));
    }

    #[test]
    fn frame_layout() {
        let field = GradientField::new(1000, 800).unwrap();
        let frame = field.frame();
        assert_eq!(frame.linear.len(), 4);
        for g in &frame.linear {
            let offsets: Vec<f32> = g.stops.iter().map(|s| s.offset).collect();
            assert_eq!(offsets, STOP_OFFSETS.to_vec());
            assert!(g.stops.iter().all(|s| s.alpha == LINEAR_ALPHA));
        }
        let alphas: Vec<f32> = frame.radial.stops.iter().map(|s| s.alpha).collect();
        assert_eq!(alphas, vec![0.3, 0.1, 0.0]);
        assert!((frame.radial.radius - 36.0).abs() < 1e-4);
    }

    fn hexes(stops: &[ColorStop]) -> Vec<String> {
        stops.iter().map(|s| s.color.to_hex()).collect()
    }

    #[test]
    fn diagonals_cover_both_directions() {
        let frame = GradientField::new(1000, 800).unwrap().frame();
        let lines: Vec<_> = frame.linear.iter().map(|g| (g.from, g.to)).collect();
        assert_eq!(
            lines,
            vec![
                ((0.0, 0.0), (225.0, 180.0)),
                ((225.0, 0.0), (0.0, 180.0)),
                ((0.0, 180.0), (225.0, 0.0)),
                ((112.5, 90.0), (0.0, 0.0)),
            ]
        );
        assert_eq!(frame.radial.centre, (112.5, 90.0));
    }

    #[test]
    fn first_frame_stops_straddle_progress() {
        let frame = GradientField::new(100, 100).unwrap().frame();
        // Progress 0: stops at palette positions 5.5, 6.5, 0.5, 1.5.
        assert_eq!(
            hexes(&frame.linear[0].stops),
            vec!["#C00A8A", "#C00040", "#C00000", "#C05300"]
        );
        // A quarter cycle later, progress 1.5 lands on whole entries 0..=3.
        assert_eq!(
            hexes(&frame.linear[1].stops),
            vec!["#FF0000", "#800000", "#FFA500", "#006400"]
        );
    }

    #[test]
    fn radial_glow_blends_fixed_palette_pairs() {
        let frame = GradientField::new(100, 100).unwrap().frame();
        let offsets: Vec<f32> = frame.radial.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.8, 1.0]);
        // sin(0) puts the pulse halfway.
        assert_eq!(hexes(&frame.radial.stops), vec!["#803200", "#400086", "#000000"]);
    }

    #[test]
    fn advance_moves_colours() {
        let mut field = GradientField::new(100, 100).unwrap();
        let before = field.frame();
        for _ in 0..400 {
            field.advance();
        }
        assert!((field.time() - 400.0 * TIME_STEP).abs() < 1e-5);
        assert_ne!(before.linear[0].stops[0].color, field.frame().linear[0].stops[0].color);
    }
}
