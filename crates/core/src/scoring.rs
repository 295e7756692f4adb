//! Scoring module - line clear points and the running total

use crate::sink::SessionSink;
use crate::types::{LINE_SCORES, SCORE_DIGITS};

/// Points for clearing `rows` rows with one lock
///
/// Counts outside 1-4 score nothing.
pub fn line_clear_score(rows: usize) -> u32 {
    LINE_SCORES.get(rows).copied().unwrap_or(0)
}

/// Zero-pad `total` to `digits` characters
pub fn format_score(total: u32, digits: usize) -> String {
    format!("{:0width$}", total, width = digits)
}

/// Running score of one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    total: u32,
    digits: usize,
}

impl ScoreTracker {
    pub fn new(digits: usize) -> Self {
        Self { total: 0, digits }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn text(&self) -> String {
        format_score(self.total, self.digits)
    }

    /// Send the current total to the sink
    pub fn announce(&self, sink: &mut dyn SessionSink) {
        sink.report_score(self.total, &self.text());
    }

    /// Add the points for `rows_cleared` rows and report the new total
    ///
    /// Returns the points added.
    pub fn add_score(&mut self, rows_cleared: usize, sink: &mut dyn SessionSink) -> u32 {
        let delta = line_clear_score(rows_cleared);
        self.total = self.total.saturating_add(delta);
        self.announce(sink);
        delta
    }
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new(SCORE_DIGITS)
    }
}
