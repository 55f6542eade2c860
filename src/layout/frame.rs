use crate::graph::{EdgeOrigin, Graph, ScreenKind, Vec2};
use serde::{Deserialize, Serialize};

/// Positions and edge highlight states for one rendered frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutFrame {
    pub nodes: Vec<NodeFrame>,
    pub edges: Vec<EdgeFrame>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeFrame {
    pub id: String,
    pub name: String,
    pub kind: ScreenKind,
    pub position: Vec2,
    pub pinned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeFrame {
    pub from: String,
    pub to: String,
    pub trigger: String,
    pub origin: EdgeOrigin,
    pub active: bool,
    pub progress: f64,
}

impl LayoutFrame {
    pub fn capture(graph: &Graph) -> Self {
        Self {
            nodes: graph
                .nodes()
                .iter()
                .map(|n| NodeFrame {
                    id: n.id.clone(),
                    name: n.name.clone(),
                    kind: n.kind,
                    position: n.position,
                    pinned: n.pinned,
                })
                .collect(),
            edges: graph
                .edges()
                .iter()
                .map(|e| EdgeFrame {
                    from: e.from.clone(),
                    to: e.to.clone(),
                    trigger: e.trigger.clone(),
                    origin: e.origin,
                    active: e.active,
                    progress: e.progress,
                })
                .collect(),
        }
    }

    pub fn position_of(&self, id: &str) -> Option<Vec2> {
        self.nodes.iter().find(|n| n.id == id).map(|n| n.position)
    }
}
