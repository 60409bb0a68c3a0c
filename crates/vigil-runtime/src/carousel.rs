//! Endless vertical scroll of testimonial cards.
//!
//! Cards are stacked top to bottom in columns.  Each column slides as one
//! strip, up or down, covering its own height once per cycle, so every
//! column takes the same time regardless of how tall it is.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Time added by each [`Carousel::tick`], in seconds.
pub const TICK_SECS: f32 = 0.016;
/// Seconds for one full cycle.
pub const CYCLE_SECS: f32 = 20.0;
/// Scrolling starts this long after the carousel is shown.
pub const START_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scroll {
    Up,
    Down,
}

/// One column of cards, given by their heights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub scroll: Scroll,
    pub heights: Vec<f32>,
}

impl Column {
    pub fn new(scroll: Scroll, heights: Vec<f32>) -> Self {
        Self { scroll, heights }
    }

    pub fn total(&self) -> f32 {
        self.heights.iter().sum()
    }

    /// Resting top edge of every card, stacked with no gap.
    pub fn initial_tops(&self) -> Vec<f32> {
        self.heights
            .iter()
            .scan(0.0, |top, h| {
                let this = *top;
                *top += h;
                Some(this)
            })
            .collect()
    }

    /// Vertical translation of the whole strip at `t` seconds.
    pub fn shift(&self, t: f32) -> f32 {
        let total = self.total();
        if total <= 0.0 {
            return 0.0;
        }
        let travelled = (t * total / CYCLE_SECS) % total;
        match self.scroll {
            Scroll::Up => -travelled,
            Scroll::Down if travelled > 0.0 => travelled - total,
            Scroll::Down => 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Carousel {
    columns: Vec<Column>,
    time: f32,
}

impl Carousel {
    /// `None` when no column has any cards.
    pub fn new(columns: Vec<Column>) -> Option<Self> {
        if columns.iter().all(|c| c.heights.is_empty()) {
            debug!("carousel has no cards; not starting");
            return None;
        }
        Some(Self { columns, time: 0.0 })
    }

    /// Split cards, in order, into contiguous up, down, up columns.  The
    /// middle column takes a third of the cards (rounded down) and the sides
    /// share the rest, left first: five cards become `[0, 1]`, `[2]`, `[3, 4]`.
    pub fn three_column(heights: &[f32]) -> Option<Self> {
        let middle = heights.len() / 3;
        let left = (heights.len() - middle).div_ceil(2);
        let (left_cards, rest) = heights.split_at(left);
        let (middle_cards, right_cards) = rest.split_at(middle);
        Self::new(vec![
            Column::new(Scroll::Up, left_cards.to_vec()),
            Column::new(Scroll::Down, middle_cards.to_vec()),
            Column::new(Scroll::Up, right_cards.to_vec()),
        ])
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Seconds into the current cycle.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn tick(&mut self) {
        self.time = (self.time + TICK_SECS) % CYCLE_SECS;
    }

    /// [`tick`][Self::tick] unless `since_shown` is still inside
    /// [`START_DELAY`].  Returns whether time moved.
    pub fn tick_at(&mut self, since_shown: Duration) -> bool {
        if since_shown < START_DELAY {
            return false;
        }
        self.tick();
        true
    }

    /// Current top edge of every card, per column.
    pub fn offsets(&self) -> Vec<Vec<f32>> {
        self.columns
            .iter()
            .map(|c| {
                let shift = c.shift(self.time);
                c.initial_tops().into_iter().map(|top| top + shift).collect()
            })
            .collect()
    }
}
