use serde::{Deserialize, Serialize};
use std::fmt;

/// The four phases of the expected interaction pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Before the first interaction, or nothing to act on.
    #[default]
    Idle,
    /// The application just presented something new.
    Show,
    /// The user has actions available.
    Do,
    /// A transition is in flight.
    Process,
}

impl Phase {
    /// Whether moving from `self` to `next` follows the expected pattern.
    ///
    /// ```text
    /// idle    -> show | do
    /// show    -> do | show
    /// do      -> process | show
    /// process -> show | do | process
    /// ```
    pub fn allows(self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, next),
            (Idle, Show | Do) | (Show, Do | Show) | (Do, Process | Show) | (Process, Show | Do | Process)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Show => "show",
            Phase::Do => "do",
            Phase::Process => "process",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Phase::*;

    #[test]
    fn legality_table() {
        assert!(Idle.allows(Show));
        assert!(Idle.allows(Do));
        assert!(!Idle.allows(Process));
        assert!(Show.allows(Show));
        assert!(!Show.allows(Process));
        assert!(Do.allows(Process));
        assert!(!Do.allows(Idle));
        assert!(!Do.allows(Do));
        assert!(Process.allows(Process));
        assert!(!Process.allows(Idle));
    }
}
