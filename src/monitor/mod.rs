//! Runtime flow monitor: classifies live interaction into phases and scores it.

use crate::graph::Graph;
use crate::templates::{Recommendation, TemplateMatch, TemplateMatcher};
use crate::validator::ValidationReport;
use serde::{Deserialize, Serialize};

mod phase;
mod score;
mod state;

pub use phase::Phase;
pub use score::ComplianceWeights;
pub use state::{FlowCounters, MonitorState, PhaseSample, TransitionRef};

/// A user-visible navigation reported by the previewed application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub action_label: String,
    pub from_screen: String,
    pub to_screen: String,
    /// Milliseconds on the host's clock.
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// A visual change younger than this classifies the sample as `show`.
    pub recency_window_ms: u64,
    /// How long an observed transition keeps its edge active.
    pub transition_duration_ms: u64,
    /// Minimum spacing between periodic samples taken by a session. The
    /// layout may tick much faster than this.
    pub sample_interval_ms: u64,
    pub history_capacity: usize,
    /// Finished flow instances kept for diagnostics.
    pub flow_log_capacity: usize,
    pub compliance: ComplianceWeights,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            recency_window_ms: 1000,
            transition_duration_ms: 400,
            sample_interval_ms: 500,
            history_capacity: 50,
            flow_log_capacity: 20,
            compliance: ComplianceWeights::default(),
        }
    }
}

/// What the monitor did with an interaction event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Recorded; `new_edge` tells whether the graph gained an observed edge.
    Recorded { new_edge: bool, phase: Phase },
    /// The monitor is stopped.
    Ignored,
    /// One of the screens is not part of the current graph.
    UnknownScreen,
}

/// Diagnostics view of the monitor for the host UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSnapshot {
    pub running: bool,
    pub phase: Phase,
    pub current_screen: Option<String>,
    pub completeness_score: u32,
    pub behaviour_score: f64,
    pub realtime_score: f64,
    pub counters: FlowCounters,
    pub current_flow: Vec<Phase>,
    pub finished_flows: usize,
    pub matches: Vec<TemplateMatch>,
    pub recommendations: Vec<Recommendation>,
}

pub struct FlowMonitor {
    config: MonitorConfig,
    running: bool,
    state: MonitorState,
    current_screen: Option<String>,
    last_visual_change: Option<u64>,
}

impl FlowMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            running: false,
            state: MonitorState::default(),
            current_screen: None,
            last_visual_change: None,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn current_screen(&self) -> Option<&str> {
        self.current_screen.as_deref()
    }

    /// Starts monitoring on the graph's entry screen. Starting a running
    /// monitor does nothing and returns `false`.
    pub fn start(&mut self, graph: &Graph, now: u64) -> bool {
        if self.running {
            tracing::debug!("Flow monitor already running");
            return false;
        }
        self.running = true;
        self.current_screen = graph.entry().map(|n| n.id.clone());
        // The entry screen's first render counts as a visual change.
        self.last_visual_change = Some(now);
        tracing::info!(entry = ?self.current_screen, "Flow monitor started");
        true
    }

    /// Stops monitoring and discards every statistic of the session.
    pub fn stop(&mut self) {
        if self.running {
            tracing::info!(
                transitions = self.state.counters.total,
                broken = self.state.counters.broken,
                "Flow monitor stopped"
            );
        }
        self.running = false;
        self.state = MonitorState::default();
        self.current_screen = None;
        self.last_visual_change = None;
    }

    /// Records a visual change reported by the preview, e.g. a re-render.
    pub fn note_visual_change(&mut self, timestamp: u64) {
        if self.running {
            self.last_visual_change = Some(timestamp);
        }
    }

    /// Keeps the current screen valid after the graph was rebuilt.
    pub fn rebase(&mut self, graph: &Graph) {
        if !self.running {
            return;
        }
        let still_present = self
            .current_screen
            .as_deref()
            .is_some_and(|id| graph.node(id).is_some());
        if !still_present {
            self.current_screen = graph.entry().map(|n| n.id.clone());
        }
    }

    /// Applies a live navigation: highlights (or creates) its edge, moves the
    /// current screen and samples immediately at the event's timestamp.
    pub fn observe(&mut self, graph: &mut Graph, event: &InteractionEvent) -> Observation {
        if !self.running {
            tracing::debug!(action = %event.action_label, "Ignoring interaction while stopped");
            return Observation::Ignored;
        }
        self.state.counters.interactions += 1;

        let until = event.timestamp.saturating_add(self.config.transition_duration_ms);
        let Some(new_edge) = graph.activate_transition(
            &event.from_screen,
            &event.to_screen,
            &event.action_label,
            until,
        ) else {
            tracing::warn!(
                from = %event.from_screen,
                to = %event.to_screen,
                action = %event.action_label,
                "Interaction references a screen outside the current graph"
            );
            return Observation::UnknownScreen;
        };
        if new_edge {
            tracing::info!(
                from = %event.from_screen,
                to = %event.to_screen,
                action = %event.action_label,
                "Recorded undeclared transition"
            );
        }

        self.current_screen = Some(event.to_screen.clone());
        self.last_visual_change = Some(event.timestamp);
        let phase = self.sample(graph, event.timestamp);
        Observation::Recorded { new_edge, phase }
    }

    /// Whether a periodic sample is due at `now`. Samples taken by
    /// [`observe`](Self::observe) count towards the interval.
    pub fn sample_due(&self, now: u64) -> bool {
        self.running
            && self
                .state
                .latest()
                .is_none_or(|last| now.saturating_sub(last.timestamp) >= self.config.sample_interval_ms)
    }

    /// Derives the current phase, appends it to the history and evaluates
    /// legality if the phase changed.
    pub fn sample(&mut self, graph: &Graph, now: u64) -> Phase {
        if !self.running {
            return self.state.phase;
        }

        let active = graph.active_transition(now);
        let phase = if active.is_some() {
            Phase::Process
        } else if self
            .last_visual_change
            .is_some_and(|t| now >= t && now - t <= self.config.recency_window_ms)
        {
            Phase::Show
        } else if self
            .current_screen
            .as_deref()
            .is_some_and(|id| graph.has_outgoing_triggers(id))
        {
            Phase::Do
        } else {
            Phase::Idle
        };

        let sample = PhaseSample {
            timestamp: now,
            phase,
            active_transition: active.map(|e| TransitionRef {
                from: e.from.clone(),
                to: e.to.clone(),
                trigger: e.trigger.clone(),
            }),
        };
        self.state.push_sample(sample, self.config.history_capacity);

        if phase != self.state.phase {
            self.change_phase(phase);
        }
        phase
    }

    /// Applies a phase change, classifying it against the legality table.
    fn change_phase(&mut self, next: Phase) {
        let previous = self.state.phase;
        let counters = &mut self.state.counters;
        counters.total += 1;
        if previous.allows(next) {
            counters.completed += 1;
            tracing::debug!(%previous, %next, "Phase change");
        } else {
            counters.broken += 1;
            tracing::warn!(%previous, %next, "Phase change breaks the expected flow");
        }

        if next == Phase::Show {
            self.state.begin_flow(self.config.flow_log_capacity);
        } else {
            self.state.current_flow.push(next);
        }
        self.state.phase = next;
    }

    pub fn behaviour_score(&self) -> f64 {
        let weights = &self.config.compliance;
        weights.behaviour_score(
            &self.state.counters,
            &self.state.recent_phases(weights.stagnation_window),
        )
    }

    /// Blends the static completeness score with the runtime behaviour score.
    pub fn realtime_score(&self, completeness: u32) -> f64 {
        self.config
            .compliance
            .blend(completeness, self.behaviour_score())
    }

    pub fn snapshot(
        &self,
        graph: &Graph,
        report: &ValidationReport,
        matcher: &TemplateMatcher,
    ) -> MonitorSnapshot {
        let observed = self.state.recent_phases(matcher.config().window);
        let evaluation = matcher.evaluate(&observed, &graph.action_labels());
        MonitorSnapshot {
            running: self.running,
            phase: self.state.phase,
            current_screen: self.current_screen.clone(),
            completeness_score: report.completeness_score,
            behaviour_score: self.behaviour_score(),
            realtime_score: self.realtime_score(report.completeness_score),
            counters: self.state.counters,
            current_flow: self.state.current_flow.clone(),
            finished_flows: self.state.finished_flows.len(),
            matches: evaluation.matches,
            recommendations: evaluation.recommendations,
        }
    }
}

impl Default for FlowMonitor {
    fn default() -> Self {
        Self::new(MonitorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::spec::SpecSnapshot;

    fn graph() -> Graph {
        GraphBuilder::new(
            SpecSnapshot::new()
                .screen("home", "Home", None, &["open"])
                .screen("detail", "Detail", None, &[])
                .transition("Home", "open", "Detail"),
        )
        .build()
        .unwrap()
    }

    #[test]
    fn start_is_idempotent() {
        let graph = graph();
        let mut monitor = FlowMonitor::default();
        assert!(monitor.start(&graph, 0));
        monitor.sample(&graph, 0);
        assert!(!monitor.start(&graph, 10));
        assert_eq!(monitor.state().history.len(), 1);
    }

    #[test]
    fn history_is_bounded() {
        let graph = graph();
        let mut monitor = FlowMonitor::new(MonitorConfig {
            history_capacity: 5,
            ..MonitorConfig::default()
        });
        monitor.start(&graph, 0);
        for t in 0..20 {
            monitor.sample(&graph, t * 100);
        }
        assert_eq!(monitor.state().history.len(), 5);
        assert_eq!(monitor.state().history.front().unwrap().timestamp, 1500);
    }

    #[test]
    fn sampling_is_spaced_by_interval() {
        let mut graph = graph();
        let mut monitor = FlowMonitor::default();
        assert!(!monitor.sample_due(0));
        monitor.start(&graph, 0);
        assert!(monitor.sample_due(0));
        monitor.sample(&graph, 0);
        assert!(!monitor.sample_due(499));
        assert!(monitor.sample_due(500));

        let event = InteractionEvent {
            action_label: "open".into(),
            from_screen: "home".into(),
            to_screen: "detail".into(),
            timestamp: 800,
        };
        monitor.observe(&mut graph, &event);
        assert!(!monitor.sample_due(1000));
        assert!(monitor.sample_due(1300));
    }

    #[test]
    fn stopped_monitor_ignores_events() {
        let mut graph = graph();
        let mut monitor = FlowMonitor::default();
        let event = InteractionEvent {
            action_label: "open".into(),
            from_screen: "home".into(),
            to_screen: "detail".into(),
            timestamp: 5,
        };
        assert_eq!(monitor.observe(&mut graph, &event), Observation::Ignored);
        assert!(!graph.edges()[0].active);
    }
}
