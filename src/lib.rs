//! # Nagare - Flow Graph Validation, Layout and Runtime Compliance Engine
//!
//! **Nagare** turns a declarative application specification (screens and the
//! transitions between them) into a flow graph, checks it for structural
//! problems, lays it out as a live diagram and watches a running preview to
//! judge whether real interaction follows the expected
//! *show → do → process → show* pattern.
//!
//! ## Core Workflow
//!
//! The engine is format-agnostic. It operates on a canonical snapshot of the
//! specification. The primary workflow is:
//!
//! 1.  **Load Your Data**: Parse your specification format into your own Rust structs.
//! 2.  **Convert to Nagare's Model**: Implement the `IntoSpec` trait to produce a `SpecSnapshot`.
//! 3.  **Load**: Hand the snapshot to a `Session`, which builds the `Graph`, validates it and places the nodes.
//! 4.  **Drive**: Push `InboundEvent`s from the preview and call `Session::tick` once per frame.
//! 5.  **Inspect**: Read the `ValidationReport`, a `LayoutFrame` and a `MonitorSnapshot`, or export everything at once.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nagare::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let spec = SpecSnapshot::new()
//!         .screen("welcome", "Welcome", Some("entry"), &["start"])
//!         .screen("list", "List", None, &["add"])
//!         .screen("add", "Add Item", Some("form"), &["save"])
//!         .transition("Welcome", "start", "List")
//!         .transition("List", "add", "Add Item")
//!         .transition("Add Item", "save", "List");
//!
//!     let mut session = Session::new(SessionConfig::default());
//!     let report = session.load_spec(spec)?;
//!     println!("{}", ReportFormatter::format_report(report));
//!
//!     session.start(0);
//!     session.push(InboundEvent::Interaction(InteractionEvent {
//!         action_label: "start".to_string(),
//!         from_screen: "welcome".to_string(),
//!         to_screen: "list".to_string(),
//!         timestamp: 100,
//!     }));
//!     for frame in 0..120 {
//!         session.tick(100 + frame * 16);
//!     }
//!
//!     let snapshot = session.snapshot();
//!     println!("{}", ReportFormatter::format_snapshot(&snapshot));
//!     std::fs::write("session.json", session.export().to_json_pretty()?)?;
//!     Ok(())
//! }
//! ```

pub mod data;
pub mod error;
pub mod graph;
pub mod layout;
pub mod monitor;
pub mod prelude;
pub mod report;
pub mod session;
pub mod spec;
pub mod templates;
pub mod validator;
