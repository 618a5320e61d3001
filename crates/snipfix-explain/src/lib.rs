//! Layer 3 of the snipfix pipeline.
//!
//! Re-analyzes the *original* snippet, independently of what Layers 1 and 2
//! rewrote, and turns the findings and the fix log into the user-facing issue
//! list and explanation.

pub mod detect;
pub use detect::{detect_issues, has_loose_equality};

pub mod summary;
pub use summary::{CLEAN_EXPLANATION, Explanation, UNFIXABLE_EXPLANATION, explain};

#[cfg(test)]
#[path = "tests/detect_tests.rs"]
mod detect_tests;
#[cfg(test)]
#[path = "tests/summary_tests.rs"]
mod summary_tests;
