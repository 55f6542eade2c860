//! The canonical in-memory flow graph: screens as nodes, transitions as edges.

use crate::error::Warning;
use ahash::AHashMap;
use itertools::Itertools;

mod builder;
mod edge;
mod node;

pub use builder::GraphBuilder;
pub use edge::{EdgeOrigin, FlowEdge};
pub use node::{ScreenKind, ScreenNode, Vec2};

/// Screens and transitions of one specification snapshot.
///
/// Every edge references node ids present in the same graph. Self-loops are
/// allowed.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<ScreenNode>,
    pub(crate) edges: Vec<FlowEdge>,
    pub(crate) index: AHashMap<String, usize>,
    /// Edge indices keyed by source node id.
    pub(crate) outgoing: AHashMap<String, Vec<usize>>,
    pub(crate) warnings: Vec<Warning>,
}

impl Graph {
    pub fn builder(snapshot: crate::spec::SpecSnapshot) -> GraphBuilder {
        GraphBuilder::new(snapshot)
    }

    pub fn nodes(&self) -> &[ScreenNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    /// Warnings recorded while building the graph.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: &str) -> Option<&ScreenNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut ScreenNode> {
        self.index.get(id).map(|&i| &mut self.nodes[i])
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// The designated entry screen: the first screen in specification order.
    pub fn entry(&self) -> Option<&ScreenNode> {
        self.nodes.first()
    }

    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a FlowEdge> + 'a {
        self.outgoing
            .get(id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }

    pub(crate) fn find_edge(&self, from: &str, to: &str, trigger: &str) -> Option<usize> {
        self.outgoing
            .get(from)?
            .iter()
            .copied()
            .find(|&i| self.edges[i].matches(from, to, trigger))
    }

    pub(crate) fn push_edge(&mut self, edge: FlowEdge) -> usize {
        let i = self.edges.len();
        self.outgoing.entry(edge.from.clone()).or_default().push(i);
        self.edges.push(edge);
        i
    }

    /// Whether a user standing on `id` has anything to act on.
    pub fn has_outgoing_triggers(&self, id: &str) -> bool {
        self.edges_from(id).next().is_some()
            || self.node(id).is_some_and(|n| !n.actions.is_empty())
    }

    /// Every user-action label the graph exposes: declared actions and edge triggers.
    pub fn action_labels(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .flat_map(|n| n.actions.iter().map(String::as_str))
            .chain(self.edges.iter().map(|e| e.trigger.as_str()))
            .filter(|label| !label.is_empty())
            .unique()
            .collect()
    }

    /// Highlights the edge `from --trigger--> to` until `until`, creating an
    /// observed edge when no such edge exists yet.
    ///
    /// Returns `Some(true)` when a new edge was inserted, `Some(false)` when an
    /// existing edge was activated, and `None` when either screen is unknown.
    pub fn activate_transition(
        &mut self,
        from: &str,
        to: &str,
        trigger: &str,
        until: u64,
    ) -> Option<bool> {
        if !self.index.contains_key(from) || !self.index.contains_key(to) {
            return None;
        }

        let (i, created) = match self.find_edge(from, to, trigger) {
            Some(i) => (i, false),
            None => (
                self.push_edge(FlowEdge::new(from, to, trigger, EdgeOrigin::Observed)),
                true,
            ),
        };
        let edge = &mut self.edges[i];
        edge.active = true;
        edge.active_until = Some(until);
        edge.progress = 0.0;
        Some(created)
    }

    /// Clears the highlight of every edge whose expiry has passed.
    pub fn expire_transitions(&mut self, now: u64) {
        for edge in self.edges.iter_mut().filter(|e| e.active) {
            if !edge.is_active_at(now) {
                edge.active = false;
                edge.active_until = None;
                edge.progress = 0.0;
            }
        }
    }

    /// The first edge still highlighted at `now`, if any.
    pub fn active_transition(&self, now: u64) -> Option<&FlowEdge> {
        self.edges.iter().find(|e| e.is_active_at(now))
    }

    pub fn any_active(&self, now: u64) -> bool {
        self.active_transition(now).is_some()
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut [ScreenNode], &mut [FlowEdge]) {
        (&mut self.nodes, &mut self.edges)
    }
}
