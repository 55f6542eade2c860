//! Structural validation tests
//!
//! Dead ends, reachability, cycles and the completeness score on built graphs.
//!
mod common;
use common::*;
use nagare::prelude::{Graph, MalformedGraphError, ScoreWeights, SpecSnapshot, Warning, validate};
use proptest::prelude::*;

#[cfg(test)]
mod validator_tests {
    use super::*;

    #[test]
    fn test_todo_flow_scores_cycle_only() {
        let report = validate(&build(todo_spec()));

        assert!(report.dead_ends.is_empty());
        assert!(report.orphaned_screens.is_empty());
        assert!(report.cycle_present);
        assert_eq!(report.completeness_score, 75);
        assert_eq!(report.entry_point.as_deref(), Some("welcome"));
    }

    #[test]
    fn test_single_screen_is_a_dead_end() {
        let report = validate(&build(single_screen_spec()));

        assert_eq!(report.dead_ends, vec!["only".to_string()]);
        assert!(report.orphaned_screens.is_empty());
        assert!(!report.cycle_present);
        assert_eq!(report.completeness_score, 80);
    }

    #[test]
    fn test_two_screen_loop() {
        let spec = SpecSnapshot::new()
            .screen("a", "A", None, &[])
            .screen("b", "B", None, &[])
            .transition("A", "go", "B")
            .transition("B", "back", "A");
        let report = validate(&build(spec));

        assert!(report.cycle_present);
        assert!(report.dead_ends.is_empty());
        assert_eq!(report.completeness_score, 75);
    }

    #[test]
    fn test_self_loop_counts_as_cycle() {
        let spec = SpecSnapshot::new()
            .screen("feed", "Feed", None, &["refresh"])
            .transition("Feed", "refresh", "Feed");
        let report = validate(&build(spec));

        assert!(report.cycle_present);
        assert!(report.dead_ends.is_empty());
    }

    #[test]
    fn test_orphans_in_declaration_order() {
        let spec = SpecSnapshot::new()
            .screen("a", "A", None, &[])
            .screen("c", "C", None, &[])
            .screen("b", "B", None, &[])
            .transition("A", "go", "B");
        let report = validate(&build(spec));

        assert_eq!(report.dead_ends, vec!["c".to_string(), "b".to_string()]);
        assert_eq!(report.orphaned_screens, vec!["c".to_string()]);
        assert_eq!(report.completeness_score, 100 - 2 * 20 - 15);
    }

    #[test]
    fn test_score_is_clamped_at_zero() {
        let mut spec = SpecSnapshot::new();
        for i in 0..8 {
            spec = spec.screen(&format!("s{i}"), &format!("S{i}"), None, &[]);
        }
        let report = validate(&build(spec));

        assert_eq!(report.dead_ends.len(), 8);
        assert_eq!(report.orphaned_screens.len(), 7);
        assert_eq!(report.completeness_score, 0);
    }

    #[test]
    fn test_empty_graph_reports_warning() {
        let report = validate(&build(SpecSnapshot::new()));

        assert_eq!(report.entry_point, None);
        assert_eq!(report.completeness_score, 100);
        assert_eq!(report.warnings, vec![Warning::EmptyGraph]);
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        let spec = todo_spec().transition("Ghost", "boo", "List");
        let err = Graph::builder(spec).build().unwrap_err();

        assert_eq!(
            err,
            MalformedGraphError::UnknownSource {
                from_screen: "Ghost".to_string(),
                trigger: "boo".to_string(),
            }
        );
    }

    #[test]
    fn test_unresolved_destination_is_dropped_with_warning() {
        let spec = todo_spec().transition("List", "settings", "Settings");
        let graph = build(spec);
        let report = validate(&graph);

        assert_eq!(graph.edges().len(), 3);
        assert!(matches!(
            report.warnings.as_slice(),
            [Warning::UnresolvedDestination { destination, .. }] if destination == "Settings"
        ));
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoreWeights {
            dead_end: 50,
            orphan: 0,
            cycle: 0,
        };
        let report = nagare::validator::validate_with(&build(dead_end_spec()), &weights);
        assert_eq!(report.completeness_score, 50);
    }

    #[test]
    fn test_deep_chain_validates() {
        let n = 30_000;
        let mut spec = SpecSnapshot::new();
        for i in 0..n {
            spec = spec.screen(&format!("s{i}"), &format!("S{i}"), None, &[]);
        }
        for i in 1..n {
            spec = spec
                .transition(&format!("S{}", i - 1), "next", &format!("S{i}"))
                .transition(&format!("S{}", i - 1), "next", &format!("S{i}"));
        }
        let graph = build(spec);
        assert_eq!(graph.edges().len(), n - 1);

        let report = validate(&graph);
        assert!(!report.cycle_present);
        assert!(report.orphaned_screens.is_empty());
        assert_eq!(report.dead_ends, vec![format!("s{}", n - 1)]);
    }
}

/// Random graphs of up to eight screens with arbitrary edges, including self-loops.
fn arbitrary_spec() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..8).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..16)))
}

fn spec_from(n: usize, edges: &[(usize, usize)]) -> SpecSnapshot {
    let mut spec = SpecSnapshot::new();
    for i in 0..n {
        spec = spec.screen(&format!("s{i}"), &format!("S{i}"), None, &[]);
    }
    for (k, (a, b)) in edges.iter().enumerate() {
        spec = spec.transition(&format!("S{a}"), &format!("t{k}"), &format!("S{b}"));
    }
    spec
}

proptest! {
    #[test]
    fn prop_score_matches_findings((n, edges) in arbitrary_spec()) {
        let report = validate(&build(spec_from(n, &edges)));
        let penalty = 20 * report.dead_ends.len() as i64
            + 15 * report.orphaned_screens.len() as i64
            + if report.cycle_present { 25 } else { 0 };

        prop_assert!(report.completeness_score <= 100);
        prop_assert_eq!(i64::from(report.completeness_score), (100 - penalty).max(0));
    }

    #[test]
    fn prop_dead_ends_have_no_outgoing_edges((n, edges) in arbitrary_spec()) {
        let report = validate(&build(spec_from(n, &edges)));
        for i in 0..n {
            let id = format!("s{i}");
            let has_out = edges.iter().any(|(a, _)| *a == i);
            prop_assert_eq!(report.dead_ends.contains(&id), !has_out);
        }
    }

    #[test]
    fn prop_entry_is_never_orphaned((n, edges) in arbitrary_spec()) {
        let report = validate(&build(spec_from(n, &edges)));
        prop_assert!(!report.orphaned_screens.contains(&"s0".to_string()));

        // Nothing reachable points at an orphan.
        for (a, b) in &edges {
            let from_reachable = !report.orphaned_screens.contains(&format!("s{a}"));
            if from_reachable {
                let to = format!("s{b}");
                prop_assert!(!report.orphaned_screens.contains(&to));
            }
        }
    }

    #[test]
    fn prop_acyclic_chains_have_no_cycle(n in 1usize..8) {
        let edges: Vec<(usize, usize)> = (1..n).map(|i| (i - 1, i)).collect();
        let report = validate(&build(spec_from(n, &edges)));
        prop_assert!(!report.cycle_present);
        prop_assert!(report.orphaned_screens.is_empty());
    }
}

proptest! {
    #[test]
    fn prop_score_never_increases_with_findings(
        dead_ends in 0usize..20,
        orphans in 0usize..20,
        cycle in any::<bool>(),
    ) {
        let weights = ScoreWeights::default();
        let base = weights.score(dead_ends, orphans, cycle);

        prop_assert!(base <= 100);
        prop_assert!(weights.score(dead_ends + 1, orphans, cycle) <= base);
        prop_assert!(weights.score(dead_ends, orphans + 1, cycle) <= base);
        prop_assert!(weights.score(dead_ends, orphans, true) <= base);
    }
}
