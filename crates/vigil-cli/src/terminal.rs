//! Terminal presentation: theme colours and a one-line status [`Stage`].

use colored::{ColoredString, Colorize};
use std::io::Write;
use vigil_scene::Stage;
use vigil_types::Theme;

/// Headings, prompt and counter text.
pub fn accent(theme: Theme, text: &str) -> ColoredString {
    match theme {
        Theme::Dark => text.bold().cyan(),
        Theme::Light => text.bold().blue(),
    }
}

/// Secondary text.
pub fn muted(theme: Theme, text: &str) -> ColoredString {
    match theme {
        Theme::Dark => text.dimmed(),
        Theme::Light => text.black(),
    }
}

/// Redraws `LABEL  frame N` in place every `refresh_every` frames, and
/// immediately whenever the label changes.
pub struct TerminalStage<W: Write> {
    out: W,
    theme: Theme,
    label: String,
    dirty: bool,
    frames: u64,
    refresh_every: u64,
}

impl<W: Write> TerminalStage<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self {
            out,
            theme,
            label: String::new(),
            dirty: false,
            frames: 0,
            refresh_every: 15,
        }
    }

    #[cfg(test)]
    fn frames(&self) -> u64 {
        self.frames
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Stage for TerminalStage<W> {
    fn set_counter_label(&mut self, text: &str) {
        if self.label != text {
            self.label = text.to_string();
            self.dirty = true;
        }
    }

    fn render(&mut self) {
        self.frames += 1;
        if !self.dirty && self.frames % self.refresh_every != 0 {
            return;
        }
        self.dirty = false;
        let line = format!(
            "\r  {}  {}",
            accent(self.theme, &self.label),
            muted(self.theme, &format!("frame {}", self.frames))
        );
        // A closed terminal is not worth failing the scene over.
        self.out.write_all(line.as_bytes()).ok();
        self.out.flush().ok();
    }
}
