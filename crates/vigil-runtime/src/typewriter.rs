//! Cycling type-and-delete text for the hero headline.
//!
//! A [`Typewriter`] types a phrase one character at a time, holds it, deletes
//! it, then moves on to the next phrase forever.  Each [`Typewriter::advance`]
//! returns how long to wait before the next call.  [`TypewriterSet`] runs
//! several of them off one [`Scheduler`].
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use vigil_runtime::typewriter::Typewriter;
//!
//! let mut tw = Typewriter::new(["Hi"], Duration::from_millis(2500)).unwrap();
//! assert_eq!(tw.advance(), Duration::from_millis(100));
//! assert_eq!(tw.text(), "H");
//! assert_eq!(tw.advance(), Duration::from_millis(2500));
//! assert_eq!(tw.text(), "Hi");
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scheduler::Scheduler;

/// Delay after typing one character.
pub const TYPE_DELAY: Duration = Duration::from_millis(100);
/// Delay after deleting one character.
pub const DELETE_DELAY: Duration = Duration::from_millis(50);
/// Default hold on a finished phrase.
pub const DEFAULT_WAIT: Duration = Duration::from_millis(2500);
/// Pause between an emptied phrase and typing the next.
pub const NEXT_PHRASE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypewriterState {
    Typing,
    Pausing,
    Deleting,
}

/// One type-hold-delete cycle over a list of phrases.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    index: usize,
    shown: usize,
    state: TypewriterState,
    wait: Duration,
}

impl Typewriter {
    /// `None` when `phrases` is empty.
    pub fn new<I, S>(phrases: I, wait: Duration) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<Vec<char>> = phrases
            .into_iter()
            .map(|p| p.as_ref().chars().collect())
            .collect();
        if phrases.is_empty() {
            debug!("typewriter has no phrases; not starting");
            return None;
        }
        Some(Self {
            phrases,
            index: 0,
            shown: 0,
            state: TypewriterState::Typing,
            wait,
        })
    }

    /// Currently visible text.
    pub fn text(&self) -> String {
        self.current()[..self.shown].iter().collect()
    }

    pub fn state(&self) -> TypewriterState {
        self.state
    }

    /// Index of the phrase being typed or deleted.
    pub fn phrase_index(&self) -> usize {
        self.index
    }

    /// Move one step and return the delay before the next step.
    pub fn advance(&mut self) -> Duration {
        match self.state {
            TypewriterState::Typing => {
                if self.shown < self.current().len() {
                    self.shown += 1;
                }
                if self.shown == self.current().len() {
                    self.state = TypewriterState::Pausing;
                    self.wait
                } else {
                    TYPE_DELAY
                }
            }
            TypewriterState::Pausing | TypewriterState::Deleting => {
                self.state = TypewriterState::Deleting;
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.index = (self.index + 1) % self.phrases.len();
                    self.state = TypewriterState::Typing;
                    NEXT_PHRASE_DELAY
                } else {
                    DELETE_DELAY
                }
            }
        }
    }

    fn current(&self) -> &[char] {
        &self.phrases[self.index]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TypewriterSet
// ─────────────────────────────────────────────────────────────────────────────

/// Several typewriters sharing one scheduler.
#[derive(Debug, Default)]
pub struct TypewriterSet {
    writers: Vec<Typewriter>,
    schedule: Scheduler<usize>,
}

impl TypewriterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `writer`, first step due at `start`.  Returns its id.
    pub fn add(&mut self, writer: Typewriter, start: Duration) -> usize {
        let id = self.writers.len();
        self.writers.push(writer);
        self.schedule.schedule(start, id);
        id
    }

    pub fn get(&self, id: usize) -> Option<&Typewriter> {
        self.writers.get(id)
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }

    /// Step every writer that is due at `now`, catching up on missed steps.
    /// Returns the ids whose text changed, in first-change order.
    pub fn poll(&mut self, now: Duration) -> Vec<usize> {
        let mut changed = Vec::new();
        while let Some((due, id)) = self.schedule.pop_next_due(now) {
            let Some(writer) = self.writers.get_mut(id) else {
                continue;
            };
            let delay = writer.advance();
            self.schedule.schedule(due + delay, id);
            if !changed.contains(&id) {
                changed.push(id);
            }
        }
        if !changed.is_empty() {
            debug!(changed = changed.len(), "typewriters stepped");
        }
        changed
    }
}
