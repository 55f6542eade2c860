use crate::layout::LayoutFrame;
use crate::monitor::MonitorSnapshot;
use crate::validator::ValidationReport;
use itertools::Itertools;
use std::fmt::Write;

/// Formats reports and snapshots into human-readable text for terminals.
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format_report(report: &ValidationReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Completeness: {}/100", report.completeness_score);
        let _ = writeln!(
            out,
            "Entry point:  {}",
            report.entry_point.as_deref().unwrap_or("-")
        );
        let _ = writeln!(out, "Dead ends:    {}", Self::format_ids(&report.dead_ends));
        let _ = writeln!(out, "Orphaned:     {}", Self::format_ids(&report.orphaned_screens));
        let _ = writeln!(
            out,
            "Cycle:        {}",
            if report.cycle_present { "yes" } else { "no" }
        );
        for warning in &report.warnings {
            let _ = writeln!(out, "  warning: {warning}");
        }
        out
    }

    pub fn format_snapshot(snapshot: &MonitorSnapshot) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Monitor {} in phase '{}' on screen {}",
            if snapshot.running { "running" } else { "stopped" },
            snapshot.phase,
            snapshot.current_screen.as_deref().unwrap_or("-")
        );
        let _ = writeln!(
            out,
            "Score: {} (static {}, behaviour {})",
            Self::format_score(snapshot.realtime_score),
            snapshot.completeness_score,
            Self::format_score(snapshot.behaviour_score)
        );
        let counters = &snapshot.counters;
        let _ = writeln!(
            out,
            "Transitions: {} total, {} completed, {} broken ({} interactions)",
            counters.total, counters.completed, counters.broken, counters.interactions
        );
        if !snapshot.current_flow.is_empty() {
            let _ = writeln!(
                out,
                "Current flow: {}",
                snapshot.current_flow.iter().join(" -> ")
            );
        }

        if !snapshot.matches.is_empty() {
            let _ = writeln!(out, "Template matches:");
            for m in &snapshot.matches {
                let _ = writeln!(
                    out,
                    "  {:<16} {:>4}% compatible, {:>4}% covered{}",
                    m.name,
                    Self::format_score(m.compatibility * 100.0),
                    Self::format_score(m.coverage * 100.0),
                    if m.matched { "" } else { " (no match)" }
                );
            }
        }
        for recommendation in &snapshot.recommendations {
            let _ = writeln!(out, "  hint: {}", recommendation.message);
        }
        out
    }

    /// One line per node with its position, then every highlighted edge.
    pub fn format_frame(frame: &LayoutFrame) -> String {
        let mut out = String::new();
        for node in &frame.nodes {
            let _ = writeln!(
                out,
                "{:<16} ({:>7.1}, {:>7.1}){}",
                node.id,
                node.position.x,
                node.position.y,
                if node.pinned { " pinned" } else { "" }
            );
        }
        for edge in frame.edges.iter().filter(|e| e.active) {
            let _ = writeln!(
                out,
                "  {} --{}--> {} at {:.0}%",
                edge.from,
                edge.trigger,
                edge.to,
                edge.progress * 100.0
            );
        }
        out
    }

    fn format_ids(ids: &[String]) -> String {
        if ids.is_empty() {
            "none".to_string()
        } else {
            ids.iter().join(", ")
        }
    }

    /// Whole numbers print without decimals.
    fn format_score(score: f64) -> String {
        if score.fract() == 0.0 {
            format!("{}", score as i64)
        } else {
            format!("{:.1}", score)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_findings() {
        let report = ValidationReport {
            dead_ends: vec!["add".into()],
            cycle_present: true,
            completeness_score: 55,
            entry_point: Some("welcome".into()),
            ..ValidationReport::empty()
        };
        let text = ReportFormatter::format_report(&report);
        assert!(text.contains("Completeness: 55/100"));
        assert!(text.contains("Dead ends:    add"));
        assert!(text.contains("Orphaned:     none"));
        assert!(text.contains("Cycle:        yes"));
    }

    #[test]
    fn scores_drop_trailing_zeroes() {
        assert_eq!(ReportFormatter::format_score(85.0), "85");
        assert_eq!(ReportFormatter::format_score(66.666), "66.7");
    }
}
