use crate::error::Warning;
use serde::{Deserialize, Serialize};

/// Result of a structural validation pass over a `Graph`.
///
/// Always recomputed wholesale; never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Screens with no outgoing transition, in specification order.
    pub dead_ends: Vec<String>,
    /// Screens not reachable from the entry point, in specification order.
    pub orphaned_screens: Vec<String>,
    pub cycle_present: bool,
    /// Heuristic score in `[0, 100]`.
    pub completeness_score: u32,
    /// The screen traversal started from. `None` for an empty graph.
    pub entry_point: Option<String>,
    pub warnings: Vec<Warning>,
}

impl ValidationReport {
    /// A report with no findings and a perfect score.
    pub fn empty() -> Self {
        Self {
            dead_ends: Vec::new(),
            orphaned_screens: Vec::new(),
            cycle_present: false,
            completeness_score: 100,
            entry_point: None,
            warnings: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.dead_ends.is_empty() && self.orphaned_screens.is_empty() && !self.cycle_present
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::empty()
    }
}
