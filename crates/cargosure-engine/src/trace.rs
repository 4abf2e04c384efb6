//! Append-only decision trace

/// Human-readable log of the rules that fired, in evaluation order.
///
/// Entries can only be appended; the finished trace is handed to the
/// decision record as a plain list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionTrace {
    entries: Vec<String>,
}

impl DecisionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry
    pub fn record(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }
}
