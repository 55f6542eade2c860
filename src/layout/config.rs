use serde::{Deserialize, Serialize};

/// Tuning knobs for the force simulation. All distances are canvas units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    /// Nodes are clamped this far inside the canvas edges.
    pub margin: f64,

    // Pairwise repulsion
    pub repulsion: f64,
    /// Pairs farther apart than this exert no repulsion.
    pub repulsion_cutoff: f64,
    /// Lower bound for the distance used in the inverse-square law.
    pub min_distance: f64,

    // Centre pull
    /// Fraction of the canvas half-diagonal beyond which the pull applies.
    pub center_pull_radius: f64,
    pub center_pull: f64,

    // Edge springs
    pub rest_length: f64,
    pub spring: f64,

    /// Velocity multiplier applied each tick, below 1.
    pub damping: f64,
    /// Advance of an active edge's animation progress per tick.
    pub animation_step: f64,

    // Initial placement
    pub seed: u64,
    pub jitter: f64,
    pub cluster_spread: f64,

    /// Consecutive out-of-canvas ticks before a node is reported unstable.
    pub instability_tick_threshold: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 40.0,
            repulsion: 8000.0,
            repulsion_cutoff: 300.0,
            min_distance: 20.0,
            center_pull_radius: 0.5,
            center_pull: 0.01,
            rest_length: 150.0,
            spring: 0.005,
            damping: 0.85,
            animation_step: 0.02,
            seed: 42,
            jitter: 12.0,
            cluster_spread: 60.0,
            instability_tick_threshold: 5,
        }
    }
}

impl LayoutConfig {
    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn center(&self) -> crate::graph::Vec2 {
        crate::graph::Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn half_diagonal(&self) -> f64 {
        (self.width * self.width + self.height * self.height).sqrt() / 2.0
    }
}
