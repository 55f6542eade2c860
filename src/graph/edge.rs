use serde::{Deserialize, Serialize};

/// Where an edge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeOrigin {
    /// Declared by a transition record of the specification.
    Declared,
    /// Confirmed by a live navigation that the specification did not declare.
    Observed,
}

/// A directed transition between two screens.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowEdge {
    pub from: String,
    pub to: String,
    pub trigger: String,
    pub origin: EdgeOrigin,
    pub active: bool,
    /// Timestamp (ms) after which an active edge falls back to inactive.
    pub active_until: Option<u64>,
    /// Highlight animation parameter in `[0, 1)`.
    pub progress: f64,
}

impl FlowEdge {
    pub fn new(from: &str, to: &str, trigger: &str, origin: EdgeOrigin) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            trigger: trigger.to_string(),
            origin,
            active: false,
            active_until: None,
            progress: 0.0,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Whether the edge is still highlighted at `now`.
    pub fn is_active_at(&self, now: u64) -> bool {
        self.active && self.active_until.is_none_or(|until| now < until)
    }

    pub(crate) fn matches(&self, from: &str, to: &str, trigger: &str) -> bool {
        self.from == from && self.to == to && self.trigger == trigger
    }
}
