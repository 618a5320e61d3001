//! snipfix: rule-based repair for short JavaScript snippets.
//!
//! One call to [`analyze`] runs the whole pipeline:
//!
//! 1. the declaration scanner builds an index of what the snippet declares,
//! 2. Layer 1 applies deterministic pattern rules,
//! 3. Layer 2 repoints undefined identifiers onto names that exist,
//! 4. Layer 3 explains the original snippet's issues and the applied fixes.
//!
//! The stages live in the workspace crates re-exported below; this crate owns
//! the controller, the tracing setup and the command-line front end.

pub use snipfix_common as common;
pub use snipfix_explain as explain;
pub use snipfix_fixer as fixer;
pub use snipfix_scanner as scanner;

pub use snipfix_common::{Fix, Issue};
pub use snipfix_fixer::{FixerOptions, Rule};

// Pipeline controller
pub mod pipeline;
pub use pipeline::{
    Analysis, AnalysisResult, EMPTY_INPUT_ERROR, Outcome, PipelineOptions, SENTINEL_TEXT, Stage,
    analyze, analyze_with_options,
};

// Tracing configuration (SNIPFIX_LOG / SNIPFIX_LOG_FORMAT)
pub mod tracing_config;

// Command-line front end
#[cfg(feature = "cli")]
pub mod cli;

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod pipeline_tests;
#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;
