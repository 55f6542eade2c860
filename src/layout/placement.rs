use super::config::LayoutConfig;
use crate::graph::{ScreenKind, ScreenNode, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, TAU};

/// The scheme used to seed node positions before the simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStrategy {
    /// Fewer than 4 nodes: a horizontal row.
    Linear,
    /// 4 to 6 nodes: evenly spaced on a circle.
    Circular,
    /// More than 6 nodes: one cluster per screen kind.
    Clustered,
}

impl PlacementStrategy {
    pub fn for_node_count(count: usize) -> Self {
        match count {
            0..=3 => PlacementStrategy::Linear,
            4..=6 => PlacementStrategy::Circular,
            _ => PlacementStrategy::Clustered,
        }
    }
}

/// Computes deterministic starting positions, one per node, in node order.
///
/// No two nodes start at the same point; coincident nodes would stall the
/// repulsion step. Positions are clamped inside the margins unless the canvas
/// leaves no room between them, in which case the raw spread is kept.
pub fn initial_positions(nodes: &[ScreenNode], config: &LayoutConfig) -> Vec<Vec2> {
    let positions = match PlacementStrategy::for_node_count(nodes.len()) {
        PlacementStrategy::Linear => linear(nodes.len(), config),
        PlacementStrategy::Circular => circular(nodes.len(), config),
        PlacementStrategy::Clustered => clustered(nodes, config),
    };
    if !has_room(config) {
        return positions;
    }
    positions
        .into_iter()
        .map(|p| clamp_to_canvas(p, config))
        .collect()
}

/// Whether the canvas has a positive area inside its margins.
fn has_room(config: &LayoutConfig) -> bool {
    config.width > 2.0 * config.margin && config.height > 2.0 * config.margin
}

fn linear(count: usize, config: &LayoutConfig) -> Vec<Vec2> {
    let (start, usable) = if config.width > 2.0 * config.margin {
        (config.margin, config.width - 2.0 * config.margin)
    } else {
        (0.0, config.width.max(1.0))
    };
    let step = usable / (count as f64 + 1.0);
    (0..count)
        .map(|i| Vec2::new(start + step * (i as f64 + 1.0), config.height / 2.0))
        .collect()
}

fn circular(count: usize, config: &LayoutConfig) -> Vec<Vec2> {
    let radius = 0.35 * config.width.min(config.height);
    (0..count)
        .map(|i| config.center() + on_ring(radius, i, count))
        .collect()
}

fn clustered(nodes: &[ScreenNode], config: &LayoutConfig) -> Vec<Vec2> {
    let present: Vec<ScreenKind> = ScreenKind::ALL
        .into_iter()
        .filter(|kind| nodes.iter().any(|n| n.kind == *kind))
        .collect();

    let ring = 0.3 * config.width.min(config.height);
    let centroid = |kind: ScreenKind| -> Vec2 {
        let slot = present.iter().position(|k| *k == kind).unwrap_or(0);
        if present.len() == 1 {
            config.center()
        } else {
            config.center() + on_ring(ring, slot, present.len())
        }
    };

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut seen_per_kind = vec![0usize; ScreenKind::ALL.len()];
    let mut positions = Vec::with_capacity(nodes.len());
    for node in nodes {
        let members = nodes.iter().filter(|n| n.kind == node.kind).count();
        let slot = seen_per_kind[node.kind.index()];
        seen_per_kind[node.kind.index()] += 1;

        let offset = if members > 1 {
            on_ring(config.cluster_spread, slot, members)
        } else {
            Vec2::ZERO
        };
        let jitter = if config.jitter > 0.0 {
            Vec2::new(
                rng.random_range(-config.jitter..=config.jitter),
                rng.random_range(-config.jitter..=config.jitter),
            )
        } else {
            Vec2::ZERO
        };
        positions.push(centroid(node.kind) + offset + jitter);
    }
    positions
}

/// Point `i` of `count` evenly spaced on a circle, starting at twelve o'clock.
fn on_ring(radius: f64, i: usize, count: usize) -> Vec2 {
    let angle = TAU * i as f64 / count.max(1) as f64 - FRAC_PI_2;
    Vec2::new(radius * angle.cos(), radius * angle.sin())
}

pub(crate) fn clamp_to_canvas(p: Vec2, config: &LayoutConfig) -> Vec2 {
    Vec2::new(
        p.x.clamp(config.margin, (config.width - config.margin).max(config.margin)),
        p.y.clamp(config.margin, (config.height - config.margin).max(config.margin)),
    )
}
