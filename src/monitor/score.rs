use super::{FlowCounters, Phase};
use serde::{Deserialize, Serialize};

/// Weights of the real-time compliance score.
///
/// Like the static score weights these are heuristics. The defaults blend
/// 60 % structural completeness with 40 % runtime behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceWeights {
    pub static_share: f64,
    pub runtime_share: f64,
    /// Maximum deduction for a fully broken session.
    pub broken_penalty: f64,
    /// The behaviour score never drops below `completed_ratio * completed_floor`.
    pub completed_floor: f64,
    /// Maximum deduction for a stagnating session.
    pub stagnation_penalty: f64,
    /// Number of recent samples inspected for stagnation.
    pub stagnation_window: usize,
}

impl Default for ComplianceWeights {
    fn default() -> Self {
        Self {
            static_share: 0.6,
            runtime_share: 0.4,
            broken_penalty: 40.0,
            completed_floor: 60.0,
            stagnation_penalty: 20.0,
            stagnation_window: 10,
        }
    }
}

impl ComplianceWeights {
    /// Runtime behaviour score in `[0, 100]`.
    ///
    /// `recent` is the phase of the newest samples, oldest first; only the last
    /// `stagnation_window` entries are considered.
    pub fn behaviour_score(&self, counters: &FlowCounters, recent: &[Phase]) -> f64 {
        let mut score = 100.0;
        if counters.total > 0 {
            score -= self.broken_penalty * counters.broken_ratio();
            score = f64::max(score, self.completed_floor * counters.completed_ratio());
        }
        score -= self.stagnation_penalty * self.stagnation(recent);
        score.clamp(0.0, 100.0)
    }

    /// Fraction of the window sharing the newest sample's phase.
    pub fn stagnation(&self, recent: &[Phase]) -> f64 {
        let window = &recent[recent.len().saturating_sub(self.stagnation_window)..];
        match window.last() {
            Some(latest) => {
                window.iter().filter(|p| *p == latest).count() as f64 / window.len() as f64
            }
            None => 0.0,
        }
    }

    pub fn blend(&self, completeness: u32, behaviour: f64) -> f64 {
        (self.static_share * f64::from(completeness) + self.runtime_share * behaviour)
            .clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Phase::*;

    #[test]
    fn fresh_session_scores_full_behaviour() {
        let weights = ComplianceWeights::default();
        assert_eq!(weights.behaviour_score(&FlowCounters::default(), &[]), 100.0);
        assert_eq!(weights.blend(75, 100.0), 85.0);
    }

    #[test]
    fn stagnation_counts_latest_phase() {
        let weights = ComplianceWeights::default();
        let recent = [Show, Do, Do, Process, Do];
        assert!((weights.stagnation(&recent) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn broken_transitions_reduce_behaviour() {
        let weights = ComplianceWeights::default();
        let counters = FlowCounters {
            total: 4,
            completed: 2,
            broken: 2,
            interactions: 0,
        };
        // 100 - 40 * 0.5 = 80, floor 30, stagnation 1/2 of [Show, Do]
        let score = weights.behaviour_score(&counters, &[Show, Do]);
        assert!((score - 70.0).abs() < 1e-9);
    }
}
