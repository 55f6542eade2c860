use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that refuse a specification snapshot at graph construction.
///
/// A snapshot rejected with one of these never produces a partially built
/// `Graph`; a running `Session` keeps serving its previous graph instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedGraphError {
    #[error("Screen record #{index} has an empty id")]
    EmptyScreenId { index: usize },

    #[error("Screen id '{0}' is declared more than once")]
    DuplicateScreen(String),

    #[error(
        "Transition '{trigger}' starts at screen '{from_screen}', which is not declared in the specification"
    )]
    UnknownSource { from_screen: String, trigger: String },
}

/// Recoverable conditions surfaced as data on reports and snapshots.
///
/// None of these interrupt validation or the simulation loop.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Warning {
    #[error("The graph has no screens, so there is no entry point")]
    EmptyGraph,

    #[error(
        "Transition '{trigger}' from '{from_screen}' points at unknown screen '{destination}' and was dropped"
    )]
    UnresolvedDestination {
        from_screen: String,
        trigger: String,
        destination: String,
    },

    #[error("Node '{node_id}' left the canvas for {ticks} consecutive ticks and was clamped")]
    SimulationInstability { node_id: String, ticks: u32 },
}

/// Errors that can occur when converting a custom user format into a `SpecSnapshot`.
#[derive(Error, Debug, Clone)]
pub enum SpecConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),

    #[error("Record #{index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },
}

/// Errors raised while encoding or decoding an export bundle.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Could not access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary encoding failed: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("Binary decoding failed: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}
