//! A live diagnostics session: one graph, its report, the layout simulation
//! and the runtime monitor, driven by an explicit inbound queue.
//!
//! Nothing here blocks or spawns. The host calls [`Session::tick`] once per
//! frame; events pushed between ticks are applied at the start of the next one.

use crate::error::{MalformedGraphError, Warning};
use crate::graph::{Graph, GraphBuilder, Vec2};
use crate::layout::{LayoutConfig, LayoutEngine, LayoutFrame, TickStats};
use crate::monitor::{
    FlowMonitor, InteractionEvent, MonitorConfig, MonitorSnapshot, Observation, Phase,
};
use crate::spec::{ExportBundle, SpecSnapshot};
use crate::templates::{MatcherConfig, TemplateMatcher};
use crate::validator::{ScoreWeights, ValidationReport, validate_with};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub layout: LayoutConfig,
    pub monitor: MonitorConfig,
    pub matcher: MatcherConfig,
    pub score_weights: ScoreWeights,
}

impl SessionConfig {
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_monitor(mut self, monitor: MonitorConfig) -> Self {
        self.monitor = monitor;
        self
    }

    pub fn with_matcher(mut self, matcher: MatcherConfig) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_score_weights(mut self, weights: ScoreWeights) -> Self {
        self.score_weights = weights;
        self
    }
}

/// Everything the host or the preview can hand to a session between ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InboundEvent {
    Interaction(InteractionEvent),
    /// The preview re-rendered without a navigation.
    VisualChange { timestamp: u64 },
    Pin { id: String },
    PinAt { id: String, position: Vec2 },
    Unpin { id: String },
    ResetLayout,
}

/// Outcome of one [`Session::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionTick {
    /// Current phase, whether or not this tick took a sample.
    pub phase: Phase,
    /// Whether the monitor sampled during this tick.
    pub sampled: bool,
    pub layout: TickStats,
    /// Inbound events drained during this tick.
    pub processed: usize,
    /// Whether an observed edge forced a new validation pass.
    pub revalidated: bool,
}

pub struct Session {
    config: SessionConfig,
    spec: Option<SpecSnapshot>,
    graph: Graph,
    report: ValidationReport,
    layout: LayoutEngine,
    monitor: FlowMonitor,
    matcher: TemplateMatcher,
    inbox: VecDeque<InboundEvent>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let graph = Graph::default();
        let report = validate_with(&graph, &config.score_weights);
        Self {
            layout: LayoutEngine::new(config.layout.clone()),
            monitor: FlowMonitor::new(config.monitor.clone()),
            matcher: TemplateMatcher::new(config.matcher.clone()),
            config,
            spec: None,
            graph,
            report,
            inbox: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn spec(&self) -> Option<&SpecSnapshot> {
        self.spec.as_ref()
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn monitor(&self) -> &FlowMonitor {
        &self.monitor
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    /// Number of inbound events waiting for the next tick.
    pub fn pending(&self) -> usize {
        self.inbox.len()
    }

    /// Rebuilds the graph from a new snapshot.
    ///
    /// On error the previous graph, report and layout stay in place. On
    /// success screens whose id survived keep their position and pin; new
    /// screens get a fresh initial placement.
    pub fn load_spec(&mut self, snapshot: SpecSnapshot) -> Result<&ValidationReport, MalformedGraphError> {
        let mut graph = match GraphBuilder::new(snapshot.clone()).build() {
            Ok(graph) => graph,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected specification, keeping previous graph");
                return Err(e);
            }
        };

        self.layout.place(&mut graph);
        let mut retained = 0usize;
        for previous in self.graph.nodes() {
            if let Some(node) = graph.node_mut(&previous.id) {
                node.position = previous.position;
                node.velocity = previous.velocity;
                node.pinned = previous.pinned;
                retained += 1;
            }
        }

        self.graph = graph;
        self.spec = Some(snapshot);
        self.revalidate();
        self.monitor.rebase(&self.graph);
        tracing::info!(
            screens = self.graph.len(),
            transitions = self.graph.edges().len(),
            retained,
            score = self.report.completeness_score,
            "Rebuilt flow graph"
        );
        Ok(&self.report)
    }

    pub fn push(&mut self, event: InboundEvent) {
        self.inbox.push_back(event);
    }

    /// Starts the runtime monitor. Returns `false` if it was already running.
    pub fn start(&mut self, now: u64) -> bool {
        self.monitor.start(&self.graph, now)
    }

    /// Stops the monitor and drops its statistics and any queued interactions.
    pub fn stop(&mut self) {
        self.monitor.stop();
        self.inbox
            .retain(|e| !matches!(e, InboundEvent::Interaction(_) | InboundEvent::VisualChange { .. }));
    }

    /// Drains the inbox, steps the layout once and expires finished
    /// transitions. The monitor samples on its own cadence: only when
    /// `sample_interval_ms` has passed since its last sample.
    pub fn tick(&mut self, now: u64) -> SessionTick {
        let mut processed = 0;
        let mut revalidated = false;
        while let Some(event) = self.inbox.pop_front() {
            processed += 1;
            revalidated |= self.apply(event);
        }

        let layout = self.layout.tick(&mut self.graph);
        self.graph.expire_transitions(now);
        let sampled = self.monitor.sample_due(now);
        let phase = if sampled {
            self.monitor.sample(&self.graph, now)
        } else {
            self.monitor.state().phase
        };
        SessionTick {
            phase,
            sampled,
            layout,
            processed,
            revalidated,
        }
    }

    /// Applies one inbound event. Returns whether the graph was revalidated.
    fn apply(&mut self, event: InboundEvent) -> bool {
        match event {
            InboundEvent::Interaction(interaction) => {
                match self.monitor.observe(&mut self.graph, &interaction) {
                    Observation::Recorded { new_edge: true, .. } => {
                        self.revalidate();
                        true
                    }
                    _ => false,
                }
            }
            InboundEvent::VisualChange { timestamp } => {
                self.monitor.note_visual_change(timestamp);
                false
            }
            InboundEvent::Pin { id } => {
                let found = self.layout.pin(&mut self.graph, &id);
                log_unknown(&id, found);
                false
            }
            InboundEvent::PinAt { id, position } => {
                let found = self.layout.pin_at(&mut self.graph, &id, position);
                log_unknown(&id, found);
                false
            }
            InboundEvent::Unpin { id } => {
                let found = self.layout.unpin(&mut self.graph, &id);
                log_unknown(&id, found);
                false
            }
            InboundEvent::ResetLayout => {
                self.layout.reset(&mut self.graph);
                false
            }
        }
    }

    fn revalidate(&mut self) {
        self.report = validate_with(&self.graph, &self.config.score_weights);
    }

    /// Report warnings followed by layout instability warnings.
    pub fn warnings(&self) -> Vec<Warning> {
        self.report
            .warnings
            .iter()
            .chain(self.layout.warnings())
            .cloned()
            .collect()
    }

    pub fn frame(&self) -> LayoutFrame {
        self.layout.frame(&self.graph)
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        self.monitor.snapshot(&self.graph, &self.report, &self.matcher)
    }

    pub fn export(&self) -> ExportBundle {
        ExportBundle {
            spec: self.spec.clone().unwrap_or_default(),
            report: self.report.clone(),
            frame: self.frame(),
            monitor: self.snapshot(),
        }
    }
}

fn log_unknown(id: &str, found: bool) {
    if !found {
        tracing::debug!(id, "Layout command for unknown screen");
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> SpecSnapshot {
        SpecSnapshot::new()
            .screen("home", "Home", None, &["open"])
            .screen("detail", "Detail", None, &["back"])
            .transition("Home", "open", "Detail")
            .transition("Detail", "back", "Home")
    }

    #[test]
    fn retained_screens_keep_position_and_pin() {
        let mut session = Session::default();
        session.load_spec(spec()).unwrap();
        session.push(InboundEvent::PinAt {
            id: "home".into(),
            position: Vec2::new(100.0, 100.0),
        });
        session.tick(0);

        session
            .load_spec(spec().screen("extra", "Extra", None, &[]))
            .unwrap();
        let home = session.graph().node("home").unwrap();
        assert!(home.pinned);
        assert_eq!(home.position, Vec2::new(100.0, 100.0));
        assert!(session.graph().node("extra").is_some());
    }

    #[test]
    fn stop_drops_queued_interactions() {
        let mut session = Session::default();
        session.load_spec(spec()).unwrap();
        session.start(0);
        session.push(InboundEvent::VisualChange { timestamp: 5 });
        session.push(InboundEvent::ResetLayout);
        session.stop();
        assert_eq!(session.pending(), 1);
    }

    #[test]
    fn layout_ticks_faster_than_sampling() {
        let mut session = Session::default();
        session.load_spec(spec()).unwrap();
        session.start(0);
        let sampled = (0..100u64).filter(|frame| session.tick(frame * 16).sampled).count();
        // Samples land on 0, 512, 1024 and 1536 ms.
        assert_eq!(sampled, 4);
        assert_eq!(session.layout().ticks(), 100);
        assert_eq!(session.monitor().state().history.len(), 4);
    }
}
