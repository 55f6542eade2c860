use super::Phase;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// The edge that was highlighted when a sample was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRef {
    pub from: String,
    pub to: String,
    pub trigger: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseSample {
    pub timestamp: u64,
    pub phase: Phase,
    pub active_transition: Option<TransitionRef>,
}

/// Accumulated statistics of one monitoring session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowCounters {
    /// Observed phase changes.
    pub total: u64,
    /// Phase changes allowed by the legality table.
    pub completed: u64,
    /// Phase changes the legality table forbids.
    pub broken: u64,
    /// Interaction events received while running.
    pub interactions: u64,
}

impl FlowCounters {
    pub fn completed_ratio(&self) -> f64 {
        ratio(self.completed, self.total)
    }

    pub fn broken_ratio(&self) -> f64 {
        ratio(self.broken, self.total)
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

/// Live state of the runtime monitor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorState {
    pub phase: Phase,
    pub history: VecDeque<PhaseSample>,
    pub counters: FlowCounters,
    /// Phases visited since the last entry into `show`.
    pub current_flow: Vec<Phase>,
    /// Most recent finished flow instances, oldest first.
    pub finished_flows: VecDeque<Vec<Phase>>,
}

impl MonitorState {
    /// Phases of the newest `n` samples, oldest first.
    pub fn recent_phases(&self, n: usize) -> Vec<Phase> {
        let skip = self.history.len().saturating_sub(n);
        self.history.iter().skip(skip).map(|s| s.phase).collect()
    }

    pub fn latest(&self) -> Option<&PhaseSample> {
        self.history.back()
    }

    pub(super) fn push_sample(&mut self, sample: PhaseSample, capacity: usize) {
        self.history.push_back(sample);
        while self.history.len() > capacity.max(1) {
            self.history.pop_front();
        }
    }

    /// Opens a new flow instance, archiving the current one.
    pub(super) fn begin_flow(&mut self, capacity: usize) {
        let finished = std::mem::replace(&mut self.current_flow, vec![Phase::Show]);
        if !finished.is_empty() {
            self.finished_flows.push_back(finished);
            while self.finished_flows.len() > capacity {
                self.finished_flows.pop_front();
            }
        }
    }
}
