//! Rewriting stages of the snipfix pipeline.
//!
//! - Layer 1 (`apply_pattern_fixes`): a fixed, ordered list of deterministic
//!   pattern rules (`Rule`).
//! - Layer 2 (`resolve_undefined_identifiers`): repoints references to
//!   undeclared names onto names that are proven to exist (`Resolver`), and
//!   never invents a declaration or a value.

pub mod options;
pub use options::FixerOptions;

pub mod rules;
pub use rules::{PatternFixOutput, Rule, apply_pattern_fixes};

pub mod resolve;
pub use resolve::{ResolutionOutput, Resolver, resolve_undefined_identifiers};

#[cfg(test)]
#[path = "tests/rules_tests.rs"]
mod rules_tests;
#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod resolve_tests;
#[cfg(test)]
#[path = "tests/options_tests.rs"]
mod options_tests;
