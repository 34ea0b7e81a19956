//! Committed-line recall for Up/Down

use tracing::trace;

/// Committed lines, oldest first, plus a browsing position
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    max: usize,
    /// `entries.len()` means "not browsing"
    index: usize,
    /// The live text stashed when browsing starts
    saved: String,
}

impl History {
    pub fn new(seed: Vec<String>, max: usize) -> Self {
        let mut history = Self {
            entries: seed,
            max,
            index: 0,
            saved: String::new(),
        };
        history.trim();
        history.rewind();
        history
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_browsing(&self) -> bool {
        self.index < self.entries.len()
    }

    /// Stop browsing and forget the stashed text
    pub fn rewind(&mut self) {
        self.index = self.entries.len();
        self.saved.clear();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.rewind();
    }

    /// Step back one entry. `current` is stashed when browsing starts.
    /// Returns the text to show, or `None` at the oldest entry.
    pub fn previous(&mut self, current: &str) -> Option<String> {
        if self.index == 0 {
            return None;
        }
        if self.index == self.entries.len() {
            self.saved = current.to_string();
        }
        self.index -= 1;
        Some(self.entries[self.index].clone())
    }

    /// Step forward one entry; stepping off the newest one gives back the
    /// stashed text. `None` when not browsing.
    pub fn next(&mut self) -> Option<String> {
        if self.index >= self.entries.len() {
            return None;
        }
        self.index += 1;
        if self.index == self.entries.len() {
            Some(self.saved.clone())
        } else {
            Some(self.entries[self.index].clone())
        }
    }

    /// Append `line`, dropping any older copy of it, and evict the oldest
    /// entries past the cap
    pub fn record(&mut self, line: &str) {
        self.entries.retain(|entry| entry != line);
        self.entries.push(line.to_string());
        self.trim();
        trace!(entries = self.entries.len(), "history recorded");
    }

    fn trim(&mut self) {
        if self.entries.len() > self.max {
            let excess = self.entries.len() - self.max;
            self.entries.drain(..excess);
        }
    }
}
