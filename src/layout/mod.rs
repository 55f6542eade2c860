//! Force-directed layout of the flow graph for the live diagram.
//!
//! The engine owns nothing but its configuration and divergence bookkeeping;
//! node positions and velocities live on the `Graph` and are only written by
//! `LayoutEngine` methods.

use crate::error::Warning;
use crate::graph::{Graph, Vec2};
use ahash::{AHashMap, AHashSet};

mod config;
mod frame;
mod placement;

pub use config::LayoutConfig;
pub use frame::{EdgeFrame, LayoutFrame, NodeFrame};
pub use placement::{PlacementStrategy, initial_positions};

use placement::clamp_to_canvas;

/// Summary of one simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickStats {
    /// Number of nodes that were integrated (i.e. not pinned).
    pub moved: usize,
    /// Sum of squared speeds after integration.
    pub kinetic_energy: f64,
    /// Nodes that landed far outside the canvas before clamping.
    pub diverged: usize,
}

pub struct LayoutEngine {
    config: LayoutConfig,
    diverged_streaks: AHashMap<String, u32>,
    /// Nodes that already produced an instability warning.
    warned: AHashSet<String>,
    warnings: Vec<Warning>,
    ticks: u64,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            diverged_streaks: AHashMap::new(),
            warned: AHashSet::new(),
            warnings: Vec::new(),
            ticks: 0,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Instability warnings recorded since the last placement.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Seeds every node position and zeroes velocities.
    pub fn place(&mut self, graph: &mut Graph) {
        let positions = initial_positions(graph.nodes(), &self.config);
        let (nodes, _) = graph.parts_mut();
        for (node, position) in nodes.iter_mut().zip(positions) {
            node.position = position;
            node.velocity = Vec2::ZERO;
        }
        self.diverged_streaks.clear();
        self.warned.clear();
        self.warnings.clear();
        tracing::debug!(
            nodes = graph.len(),
            strategy = ?PlacementStrategy::for_node_count(graph.len()),
            "Placed nodes"
        );
    }

    /// Re-places all nodes from scratch and releases every pin.
    pub fn reset(&mut self, graph: &mut Graph) {
        let (nodes, _) = graph.parts_mut();
        for node in nodes.iter_mut() {
            node.pinned = false;
        }
        self.place(graph);
    }

    /// Locks a node in place. Returns `false` for an unknown id.
    pub fn pin(&self, graph: &mut Graph, id: &str) -> bool {
        match graph.node_mut(id) {
            Some(node) => {
                node.pinned = true;
                node.velocity = Vec2::ZERO;
                true
            }
            None => false,
        }
    }

    /// Moves a node to `position` (clamped to the canvas) and pins it there.
    pub fn pin_at(&self, graph: &mut Graph, id: &str, position: Vec2) -> bool {
        let position = clamp_to_canvas(position, &self.config);
        match graph.node_mut(id) {
            Some(node) => {
                node.position = position;
                node.velocity = Vec2::ZERO;
                node.pinned = true;
                true
            }
            None => false,
        }
    }

    pub fn unpin(&self, graph: &mut Graph, id: &str) -> bool {
        match graph.node_mut(id) {
            Some(node) => {
                node.pinned = false;
                true
            }
            None => false,
        }
    }

    /// Advances the simulation by one step.
    ///
    /// Forces are accumulated in order (repulsion, centre pull, edge springs),
    /// then velocities are damped and integrated, and finally the highlight
    /// animation of active edges advances.
    pub fn tick(&mut self, graph: &mut Graph) -> TickStats {
        self.ticks += 1;
        let endpoints: Vec<(usize, usize)> = graph
            .edges()
            .iter()
            .filter_map(|e| Some((graph.node_index(&e.from)?, graph.node_index(&e.to)?)))
            .collect();

        let config = &self.config;
        let (nodes, edges) = graph.parts_mut();
        let mut forces = vec![Vec2::ZERO; nodes.len()];

        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                if nodes[i].pinned && nodes[j].pinned {
                    continue;
                }
                let delta = nodes[i].position - nodes[j].position;
                let dist = delta.length();
                if dist > config.repulsion_cutoff {
                    continue;
                }
                let direction = if dist > f64::EPSILON {
                    delta * (1.0 / dist)
                } else {
                    separation_axis(i, j)
                };
                let clamped = dist.max(config.min_distance);
                let push = direction * (config.repulsion / (clamped * clamped));
                forces[i] += push;
                forces[j] -= push;
            }
        }

        let center = config.center();
        let pull_radius = config.center_pull_radius * config.half_diagonal();
        for (force, node) in forces.iter_mut().zip(nodes.iter()) {
            let to_center = center - node.position;
            if to_center.length() > pull_radius {
                *force += to_center * config.center_pull;
            }
        }

        for &(a, b) in &endpoints {
            if a == b {
                continue;
            }
            let delta = nodes[b].position - nodes[a].position;
            let dist = delta.length();
            if dist > config.rest_length {
                let pull = delta * (config.spring * (dist - config.rest_length) / dist);
                forces[a] += pull;
                forces[b] -= pull;
            }
        }

        let mut stats = TickStats::default();
        let extent = config.width.max(config.height);
        let (min_x, max_x) = (config.margin, (config.width - config.margin).max(config.margin));
        let (min_y, max_y) = (config.margin, (config.height - config.margin).max(config.margin));

        for (node, force) in nodes.iter_mut().zip(forces) {
            if node.pinned {
                node.velocity = Vec2::ZERO;
                continue;
            }
            stats.moved += 1;
            node.velocity = (node.velocity + force) * config.damping;
            let mut next = node.position + node.velocity;

            if !next.is_finite() {
                next = center;
                node.velocity = Vec2::ZERO;
            }

            let diverged = next.x < min_x - extent
                || next.x > max_x + extent
                || next.y < min_y - extent
                || next.y > max_y + extent;
            if diverged {
                stats.diverged += 1;
                let streak = self.diverged_streaks.entry(node.id.clone()).or_insert(0);
                *streak += 1;
                if *streak >= config.instability_tick_threshold
                    && self.warned.insert(node.id.clone())
                {
                    tracing::warn!(node = %node.id, ticks = *streak, "Layout simulation is unstable");
                    self.warnings.push(Warning::SimulationInstability {
                        node_id: node.id.clone(),
                        ticks: *streak,
                    });
                }
            } else {
                self.diverged_streaks.remove(&node.id);
            }

            if next.x < min_x || next.x > max_x {
                next.x = next.x.clamp(min_x, max_x);
                node.velocity.x = 0.0;
            }
            if next.y < min_y || next.y > max_y {
                next.y = next.y.clamp(min_y, max_y);
                node.velocity.y = 0.0;
            }
            node.position = next;
            stats.kinetic_energy += node.velocity.x.powi(2) + node.velocity.y.powi(2);
        }

        for edge in edges.iter_mut().filter(|e| e.active) {
            edge.progress = (edge.progress + config.animation_step) % 1.0;
        }

        stats
    }

    /// Runs `ticks` steps and returns the stats of the last one.
    pub fn run(&mut self, graph: &mut Graph, ticks: usize) -> TickStats {
        let mut last = TickStats::default();
        for _ in 0..ticks {
            last = self.tick(graph);
        }
        last
    }

    pub fn frame(&self, graph: &Graph) -> LayoutFrame {
        LayoutFrame::capture(graph)
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

/// Deterministic push direction for two nodes sitting on the same point.
fn separation_axis(i: usize, j: usize) -> Vec2 {
    let angle = (i * 31 + j * 17) as f64;
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::spec::SpecSnapshot;

    fn chain(n: usize) -> Graph {
        let mut snapshot = SpecSnapshot::new();
        for i in 0..n {
            snapshot = snapshot.screen(&format!("s{i}"), &format!("S{i}"), None, &[]);
        }
        for i in 1..n {
            snapshot = snapshot.transition(&format!("S{}", i - 1), "next", &format!("S{i}"));
        }
        GraphBuilder::new(snapshot).build().unwrap()
    }

    #[test]
    fn coincident_nodes_separate() {
        let mut graph = chain(2);
        let mut engine = LayoutEngine::default();
        let center = engine.config().center();
        for id in ["s0", "s1"] {
            graph.node_mut(id).unwrap().position = center;
        }
        engine.tick(&mut graph);
        let a = graph.node("s0").unwrap().position;
        let b = graph.node("s1").unwrap().position;
        assert!(a.distance(b) > 0.0);
    }

    #[test]
    fn positions_stay_on_canvas() {
        let mut graph = chain(5);
        let mut engine = LayoutEngine::default();
        engine.place(&mut graph);
        graph.node_mut("s2").unwrap().velocity = Vec2::new(1e6, -1e6);
        engine.run(&mut graph, 50);
        let config = engine.config();
        for node in graph.nodes() {
            assert!(node.position.x >= config.margin && node.position.x <= config.width - config.margin);
            assert!(node.position.y >= config.margin && node.position.y <= config.height - config.margin);
        }
    }

    #[test]
    fn active_edge_animation_wraps() {
        let mut graph = chain(2);
        graph.activate_transition("s0", "s1", "next", u64::MAX);
        let mut engine = LayoutEngine::new(LayoutConfig {
            animation_step: 0.3,
            ..LayoutConfig::default()
        });
        engine.run(&mut graph, 4);
        let progress = graph.edges()[0].progress;
        assert!((progress - 0.2).abs() < 1e-9, "progress was {progress}");
    }
}
