use crate::monitor::InteractionEvent;
use serde::{Deserialize, Serialize};
use std::fs;

/// A recorded stream of interaction events, replayable against a session.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RecordedSession {
    /// Events in the order they were observed.
    pub events: Vec<InteractionEvent>,
}

impl RecordedSession {
    /// Load a recording from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Timestamp of the last event, or 0 for an empty recording.
    pub fn end_time(&self) -> u64 {
        self.events.iter().map(|e| e.timestamp).max().unwrap_or(0)
    }

    /// Events ordered by timestamp. Ties keep their recorded order.
    pub fn chronological(&self) -> Vec<&InteractionEvent> {
        let mut events: Vec<&InteractionEvent> = self.events.iter().collect();
        events.sort_by_key(|e| e.timestamp);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recording() {
        let json = r#"{"events":[
            {"action_label":"open","from_screen":"a","to_screen":"b","timestamp":300},
            {"action_label":"back","from_screen":"b","to_screen":"a","timestamp":100}
        ]}"#;
        let recording = RecordedSession::from_json(json).unwrap();
        assert_eq!(recording.end_time(), 300);
        assert_eq!(recording.chronological()[0].action_label, "back");
    }
}
