//! Plain-text rendering of validation reports, monitor snapshots and frames.

mod formatter;

pub use formatter::ReportFormatter;
