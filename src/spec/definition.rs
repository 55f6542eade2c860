use serde::{Deserialize, Serialize};

/// One parsed snapshot of an application specification, in declaration order.
///
/// This is the target structure for any custom format conversion. The core
/// rebuilds its graph wholesale every time a new snapshot arrives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecSnapshot {
    pub records: Vec<SpecRecord>,
}

/// A single record of the specification, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpecRecord {
    Screen(ScreenRecord),
    Transition(TransitionRecord),
}

/// Declares a screen of the described application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenRecord {
    pub id: String,
    pub name: String,
    /// Free-form classification hint, e.g. `"form"` or `"list"`.
    pub kind: Option<String>,
    /// Names of the user actions the screen exposes.
    pub actions: Vec<String>,
}

/// Declares a navigation: `source --trigger--> destination`, by screen name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub source: String,
    pub trigger: String,
    pub destination: String,
}

impl SpecSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a screen record. Intended for building snapshots in code.
    pub fn screen(mut self, id: &str, name: &str, kind: Option<&str>, actions: &[&str]) -> Self {
        self.records.push(SpecRecord::Screen(ScreenRecord {
            id: id.to_string(),
            name: name.to_string(),
            kind: kind.map(str::to_string),
            actions: actions.iter().map(|a| a.to_string()).collect(),
        }));
        self
    }

    /// Appends a transition record.
    pub fn transition(mut self, source: &str, trigger: &str, destination: &str) -> Self {
        self.records.push(SpecRecord::Transition(TransitionRecord {
            source: source.to_string(),
            trigger: trigger.to_string(),
            destination: destination.to_string(),
        }));
        self
    }

    pub fn screens(&self) -> impl Iterator<Item = &ScreenRecord> {
        self.records.iter().filter_map(|r| match r {
            SpecRecord::Screen(s) => Some(s),
            SpecRecord::Transition(_) => None,
        })
    }

    pub fn transitions(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter().filter_map(|r| match r {
            SpecRecord::Transition(t) => Some(t),
            SpecRecord::Screen(_) => None,
        })
    }
}
