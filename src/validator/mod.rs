//! Structural validation: dead ends, reachability, cycles and a completeness score.

use crate::error::Warning;
use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

mod report;

pub use report::ValidationReport;

/// Penalties subtracted from a perfect score of 100.
///
/// These are heuristic weights, not derived from anything. The defaults are
/// kept so that scores stay comparable with existing diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub dead_end: u32,
    pub orphan: u32,
    pub cycle: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            dead_end: 20,
            orphan: 15,
            cycle: 25,
        }
    }
}

impl ScoreWeights {
    /// Applies the penalties and clamps the result to `[0, 100]`.
    pub fn score(&self, dead_ends: usize, orphans: usize, cycle_present: bool) -> u32 {
        let count = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        let penalty = self
            .dead_end
            .saturating_mul(count(dead_ends))
            .saturating_add(self.orphan.saturating_mul(count(orphans)))
            .saturating_add(if cycle_present { self.cycle } else { 0 });
        100u32.saturating_sub(penalty)
    }
}

/// Validates a graph with the default score weights.
pub fn validate(graph: &Graph) -> ValidationReport {
    validate_with(graph, &ScoreWeights::default())
}

/// Validates a graph. Never fails: every finding is reported as data.
pub fn validate_with(graph: &Graph, weights: &ScoreWeights) -> ValidationReport {
    let mut warnings = graph.warnings().to_vec();
    let Some(entry) = graph.entry() else {
        warnings.push(Warning::EmptyGraph);
        return ValidationReport {
            warnings,
            ..ValidationReport::empty()
        };
    };

    let adjacency = adjacency(graph);
    let dead_ends: Vec<String> = graph
        .nodes()
        .iter()
        .zip(&adjacency)
        .filter(|(_, targets)| targets.is_empty())
        .map(|(node, _)| node.id.clone())
        .collect();

    let reachable = reachable_from(&adjacency, 0);
    let orphaned_screens: Vec<String> = graph
        .nodes()
        .iter()
        .zip(&reachable)
        .filter(|(_, seen)| !**seen)
        .map(|(node, _)| node.id.clone())
        .collect();

    let cycle_present = has_cycle(&adjacency);
    let completeness_score = weights.score(dead_ends.len(), orphaned_screens.len(), cycle_present);

    tracing::debug!(
        dead_ends = dead_ends.len(),
        orphans = orphaned_screens.len(),
        cycle_present,
        completeness_score,
        "Validated flow graph"
    );

    ValidationReport {
        dead_ends,
        orphaned_screens,
        cycle_present,
        completeness_score,
        entry_point: Some(entry.id.clone()),
        warnings,
    }
}

/// Outgoing neighbour indices per node, in node order.
fn adjacency(graph: &Graph) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); graph.len()];
    for edge in graph.edges() {
        if let (Some(from), Some(to)) = (graph.node_index(&edge.from), graph.node_index(&edge.to)) {
            adjacency[from].push(to);
        }
    }
    adjacency
}

/// Breadth-first traversal; returns a visited flag per node.
pub(crate) fn reachable_from(adjacency: &[Vec<usize>], start: usize) -> Vec<bool> {
    let mut visited = vec![false; adjacency.len()];
    if start >= adjacency.len() {
        return visited;
    }
    let mut queue = VecDeque::from([start]);
    visited[start] = true;
    while let Some(current) = queue.pop_front() {
        for &next in &adjacency[current] {
            if !visited[next] {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }
    visited
}

/// Presence-only cycle detection. Every node is tried as a start so that
/// cycles in components unreachable from the entry are found too.
///
/// The walk keeps an explicit stack of `(node, next edge)` frames, so path
/// depth is bounded by the heap rather than the call stack.
fn has_cycle(adjacency: &[Vec<usize>]) -> bool {
    let mut visited = vec![false; adjacency.len()];
    let mut on_stack = vec![false; adjacency.len()];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for start in 0..adjacency.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        on_stack[start] = true;
        stack.push((start, 0));

        while let Some((node, next_edge)) = stack.last_mut() {
            let node = *node;
            match adjacency[node].get(*next_edge) {
                Some(&next) => {
                    *next_edge += 1;
                    if on_stack[next] {
                        return true;
                    }
                    if !visited[next] {
                        visited[next] = true;
                        on_stack[next] = true;
                        stack.push((next, 0));
                    }
                }
                None => {
                    on_stack[node] = false;
                    stack.pop();
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_loop_is_a_cycle() {
        assert!(has_cycle(&[vec![0]]));
    }

    #[test]
    fn diamond_is_acyclic() {
        let adjacency = vec![vec![1, 2], vec![3], vec![3], vec![]];
        assert!(!has_cycle(&adjacency));
    }

    #[test]
    fn cycle_outside_entry_component_is_found() {
        let adjacency = vec![vec![], vec![2], vec![1]];
        assert!(has_cycle(&adjacency));
        assert_eq!(reachable_from(&adjacency, 0), vec![true, false, false]);
    }

    #[test]
    fn long_chain_does_not_exhaust_the_stack() {
        let n = 100_000;
        let mut adjacency: Vec<Vec<usize>> = (1..n).map(|i| vec![i]).collect();
        adjacency.push(Vec::new());
        assert!(!has_cycle(&adjacency));

        adjacency[n - 1].push(0);
        assert!(has_cycle(&adjacency));
    }

    #[test]
    fn score_clamps_at_zero() {
        let weights = ScoreWeights::default();
        assert_eq!(weights.score(10, 10, true), 0);
        assert_eq!(weights.score(0, 0, false), 100);
        assert_eq!(weights.score(1, 1, true), 40);
    }
}
