//! Navigation history backing `back`.

use std::collections::VecDeque;

/// Previously visited fragments, most recent last.
///
/// The stack sits on an implicit root: popping past the first entry yields
/// the root path (or a fallback) instead of underflowing.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    entries: VecDeque<String>,
    limit: Option<usize>,
}

impl HistoryStack {
    /// Creates an unbounded stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stack keeping at most `limit` entries.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: Some(limit.max(1)),
        }
    }

    /// Records a visited fragment.
    ///
    /// Repeating the current top is a no-op; past the limit the oldest
    /// entry is dropped.
    pub fn push(&mut self, path: impl Into<String>) {
        let path = path.into();
        if self.entries.back() == Some(&path) {
            return;
        }
        self.entries.push_back(path);
        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.entries.pop_front();
            }
        }
    }

    /// Pops the current entry and returns the one to navigate back to.
    ///
    /// With no earlier entry the stack is left at the root and `fallback`
    /// (or the empty root path) is returned.
    pub fn back(&mut self, fallback: Option<&str>) -> String {
        self.entries.pop_back();
        match self.entries.back() {
            Some(previous) => previous.clone(),
            None => fallback.unwrap_or_default().to_string(),
        }
    }

    /// Returns the most recent entry.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Returns true when nothing has been recorded above the root.
    #[must_use]
    pub fn is_at_root(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Resets to the root.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
