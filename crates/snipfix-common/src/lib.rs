//! Common types and utilities for the snipfix repair pipeline.
//!
//! This crate provides the types shared by every pipeline stage:
//! - Findings and fix-log entries (`Issue`, `Fix`) with their message table
//! - Byte-offset text edits (`TextEdit`, `apply_edits`)

// Issue/fix messages and their stable codes
pub mod diagnostics;
pub use diagnostics::{
    Fix, Issue, MessageCategory, MessageTemplate, format_message, get_message_template,
    message_codes,
};

// Text edits spliced into snippet text
pub mod edits;
pub use edits::{TextEdit, apply_edits};

#[cfg(test)]
#[path = "tests/diagnostics_tests.rs"]
mod diagnostics_tests;
#[cfg(test)]
#[path = "tests/edits_tests.rs"]
mod edits_tests;
