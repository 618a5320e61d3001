//! Tracing setup for the `snipfix` binary.
//!
//! Three output formats, selected by `SNIPFIX_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented spans and events via `tracing-tree`
//! - `json`: one JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Follow one snippet through every stage
//! SNIPFIX_LOG=debug SNIPFIX_LOG_FORMAT=tree snipfix snippet.js
//!
//! # Per-identifier decisions of the fixer only
//! SNIPFIX_LOG="snipfix_fixer=trace" snipfix snippet.js
//! ```
//!
//! A bare level in `SNIPFIX_LOG` (`SNIPFIX_LOG=debug`) applies to the pipeline
//! crates only, so regex compilation and other dependencies stay quiet. Any
//! value with a `target=` directive is used as written.
//!
//! The subscriber is only installed when `SNIPFIX_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `SNIPFIX_LOG_FORMAT` value. Unknown values mean `Text`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("SNIPFIX_LOG_FORMAT").unwrap_or_default())
    }
}

/// Targets that make up the pipeline.
const PIPELINE_TARGETS: [&str; 5] = [
    "snipfix",
    "snipfix_common",
    "snipfix_scanner",
    "snipfix_fixer",
    "snipfix_explain",
];

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Expand a bare `SNIPFIX_LOG` level into one directive per pipeline crate.
#[must_use]
pub fn expand_directives(value: &str) -> String {
    let level = value.trim().to_lowercase();
    if !LEVELS.contains(&level.as_str()) {
        return value.to_string();
    }
    PIPELINE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// `SNIPFIX_LOG` wins over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("SNIPFIX_LOG") {
        EnvFilter::builder().parse_lossy(expand_directives(&val))
    } else {
        EnvFilter::from_default_env()
    }
}

/// Install the global subscriber, writing to stderr.
///
/// Does nothing unless `SNIPFIX_LOG` or `RUST_LOG` is set, so stdout stays
/// reserved for the report.
pub fn init_tracing() {
    let has_snipfix_log = std::env::var("SNIPFIX_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_snipfix_log && !has_rust_log {
        return;
    }

    let filter = build_filter();

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
