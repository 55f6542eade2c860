//! Workflow template library and LCS-based sequence matching.

mod library;
mod matcher;

pub use library::{Complexity, WorkflowTemplate, find, library};
pub use matcher::{
    Evaluation, MatcherConfig, Recommendation, TemplateMatch, TemplateMatcher, compatibility,
    coverage, lcs_len, missing_keywords,
};
