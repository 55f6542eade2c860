use crate::monitor::Phase::{self, Do, Process, Show};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative complexity of a workflow template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        };
        f.write_str(name)
    }
}

/// A canonical interaction pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowTemplate {
    pub name: &'static str,
    pub phases: &'static [Phase],
    /// Trigger-name fragments the pattern's actions are expected to contain.
    pub keywords: &'static [&'static str],
    pub complexity: Complexity,
}

static LIBRARY: [WorkflowTemplate; 8] = [
    WorkflowTemplate {
        name: "chat",
        phases: &[Show, Do, Process, Show],
        keywords: &["message", "send", "reply"],
        complexity: Complexity::Simple,
    },
    WorkflowTemplate {
        name: "form submission",
        phases: &[Show, Do, Do, Process, Show],
        keywords: &["submit", "save", "cancel"],
        complexity: Complexity::Simple,
    },
    WorkflowTemplate {
        name: "browse",
        phases: &[Show, Do, Show, Do, Show],
        keywords: &["open", "next", "back", "view"],
        complexity: Complexity::Simple,
    },
    WorkflowTemplate {
        name: "search",
        phases: &[Show, Do, Process, Show, Do],
        keywords: &["search", "filter", "query", "clear"],
        complexity: Complexity::Moderate,
    },
    WorkflowTemplate {
        name: "authentication",
        phases: &[Show, Do, Process, Show, Do],
        keywords: &["login", "logout", "password", "register"],
        complexity: Complexity::Moderate,
    },
    WorkflowTemplate {
        name: "crud list",
        phases: &[Show, Do, Process, Show, Do, Process, Show],
        keywords: &["add", "edit", "delete", "save"],
        complexity: Complexity::Moderate,
    },
    WorkflowTemplate {
        name: "onboarding",
        phases: &[Show, Do, Show, Do, Show, Do, Process, Show],
        keywords: &["start", "next", "skip", "finish"],
        complexity: Complexity::Moderate,
    },
    WorkflowTemplate {
        name: "checkout",
        phases: &[Show, Do, Process, Show, Do, Process, Show, Do, Process, Show],
        keywords: &["cart", "checkout", "pay", "confirm", "address"],
        complexity: Complexity::Complex,
    },
];

/// The built-in template library. Immutable for the life of the process.
pub fn library() -> &'static [WorkflowTemplate] {
    &LIBRARY
}

/// Looks a template up by name.
pub fn find(name: &str) -> Option<&'static WorkflowTemplate> {
    LIBRARY.iter().find(|t| t.name == name)
}
