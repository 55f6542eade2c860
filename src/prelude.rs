//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the nagare crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use nagare::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let graph = Graph::builder(
//!     SpecSnapshot::new()
//!         .screen("home", "Home", None, &["open"])
//!         .screen("detail", "Detail", None, &[])
//!         .transition("Home", "open", "Detail"),
//! )
//! .build()?;
//!
//! let report = validate(&graph);
//! println!("{}", ReportFormatter::format_report(&report));
//! # Ok(())
//! # }
//! ```

// Sessions
pub use crate::session::{InboundEvent, Session, SessionConfig, SessionTick};

// Specification input and export
pub use crate::spec::{ExportBundle, IntoSpec, SpecRecord, SpecSnapshot};

// Graph model
pub use crate::graph::{EdgeOrigin, FlowEdge, Graph, GraphBuilder, ScreenKind, ScreenNode, Vec2};

// Analysis
pub use crate::layout::{LayoutConfig, LayoutEngine, LayoutFrame};
pub use crate::monitor::{FlowMonitor, InteractionEvent, MonitorConfig, MonitorSnapshot, Phase};
pub use crate::templates::{MatcherConfig, TemplateMatcher};
pub use crate::validator::{ScoreWeights, ValidationReport, validate};

// Error types
pub use crate::error::{MalformedGraphError, Warning};

// Report formatting
pub use crate::report::ReportFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
