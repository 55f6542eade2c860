use super::edge::{EdgeOrigin, FlowEdge};
use super::node::{ScreenKind, ScreenNode};
use super::Graph;
use crate::error::{MalformedGraphError, Warning};
use crate::spec::{ScreenRecord, SpecRecord, SpecSnapshot, TransitionRecord};
use ahash::AHashMap;

/// Builds a `Graph` from a `SpecSnapshot`.
///
/// Screens become nodes in declaration order. Transitions become edges once
/// both endpoints resolve; a transition whose destination cannot be resolved
/// is dropped with a warning, while an unknown source refuses the snapshot.
pub struct GraphBuilder {
    snapshot: SpecSnapshot,
    kind_mappings: AHashMap<String, ScreenKind>,
}

impl GraphBuilder {
    pub fn new(snapshot: SpecSnapshot) -> Self {
        Self {
            snapshot,
            kind_mappings: AHashMap::new(),
        }
    }

    /// Maps a custom classification hint onto one of the built-in kinds.
    pub fn with_kind_mapping(mut self, hint: &str, kind: ScreenKind) -> Self {
        self.kind_mappings.insert(hint.to_ascii_lowercase(), kind);
        self
    }

    pub fn build(self) -> Result<Graph, MalformedGraphError> {
        let mut graph = Graph::default();
        let mut by_name: AHashMap<String, String> = AHashMap::new();

        for (index, record) in self.snapshot.records.iter().enumerate() {
            if let SpecRecord::Screen(screen) = record {
                let node = self.build_node(index, screen)?;
                if graph.index.contains_key(&node.id) {
                    return Err(MalformedGraphError::DuplicateScreen(node.id));
                }
                // First declaration wins when two screens share a display name.
                by_name
                    .entry(node.name.clone())
                    .or_insert_with(|| node.id.clone());
                graph.index.insert(node.id.clone(), graph.nodes.len());
                graph.nodes.push(node);
            }
        }

        for record in &self.snapshot.records {
            if let SpecRecord::Transition(transition) = record {
                self.add_transition(&mut graph, &by_name, transition)?;
            }
        }

        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            warnings = graph.warnings.len(),
            "Built flow graph"
        );
        Ok(graph)
    }

    fn build_node(
        &self,
        index: usize,
        screen: &ScreenRecord,
    ) -> Result<ScreenNode, MalformedGraphError> {
        let id = screen.id.trim();
        if id.is_empty() {
            return Err(MalformedGraphError::EmptyScreenId { index });
        }
        let name = if screen.name.trim().is_empty() {
            id
        } else {
            screen.name.as_str()
        };

        let mut node = ScreenNode::new(id, name, self.classify(screen.kind.as_deref(), name), index);
        node.actions = screen.actions.clone();
        Ok(node)
    }

    fn classify(&self, hint: Option<&str>, name: &str) -> ScreenKind {
        hint.and_then(|h| {
            self.kind_mappings
                .get(&h.trim().to_ascii_lowercase())
                .copied()
                .or_else(|| ScreenKind::from_hint(h))
        })
        .unwrap_or_else(|| ScreenKind::infer_from_name(name))
    }

    fn add_transition(
        &self,
        graph: &mut Graph,
        by_name: &AHashMap<String, String>,
        transition: &TransitionRecord,
    ) -> Result<(), MalformedGraphError> {
        let from = Self::resolve(graph, by_name, &transition.source).ok_or_else(|| {
            MalformedGraphError::UnknownSource {
                from_screen: transition.source.clone(),
                trigger: transition.trigger.clone(),
            }
        })?;

        let Some(to) = Self::resolve(graph, by_name, &transition.destination) else {
            tracing::warn!(
                from = %transition.source,
                trigger = %transition.trigger,
                destination = %transition.destination,
                "Dropping transition with unresolved destination"
            );
            graph.warnings.push(Warning::UnresolvedDestination {
                from_screen: transition.source.clone(),
                trigger: transition.trigger.clone(),
                destination: transition.destination.clone(),
            });
            return Ok(());
        };

        if graph.find_edge(&from, &to, &transition.trigger).is_none() {
            graph.push_edge(FlowEdge::new(
                &from,
                &to,
                &transition.trigger,
                EdgeOrigin::Declared,
            ));
        }
        Ok(())
    }

    /// Resolves a screen reference by display name first, then by id.
    fn resolve(
        graph: &Graph,
        by_name: &AHashMap<String, String>,
        reference: &str,
    ) -> Option<String> {
        let reference = reference.trim();
        by_name.get(reference).cloned().or_else(|| {
            graph
                .index
                .contains_key(reference)
                .then(|| reference.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_resolve_by_name_then_id() {
        let snapshot = SpecSnapshot::new()
            .screen("s1", "Welcome", None, &["start"])
            .screen("s2", "List", None, &[])
            .transition("Welcome", "start", "s2");
        let graph = GraphBuilder::new(snapshot).build().unwrap();
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].from, "s1");
        assert_eq!(graph.edges()[0].to, "s2");
    }

    #[test]
    fn custom_kind_mapping_overrides_inference() {
        let snapshot = SpecSnapshot::new().screen("a", "Welcome", Some("Panel"), &[]);
        let graph = GraphBuilder::new(snapshot)
            .with_kind_mapping("panel", ScreenKind::Form)
            .build()
            .unwrap();
        assert_eq!(graph.node("a").unwrap().kind, ScreenKind::Form);
    }

    #[test]
    fn duplicate_transitions_collapse() {
        let snapshot = SpecSnapshot::new()
            .screen("a", "A", None, &[])
            .transition("A", "loop", "A")
            .transition("A", "loop", "A");
        let graph = GraphBuilder::new(snapshot).build().unwrap();
        assert_eq!(graph.edges().len(), 1);
        assert!(graph.edges()[0].is_self_loop());
    }
}
