//! Lexical scanning for JavaScript snippets.
//!
//! This crate never parses. It provides:
//! - `mask_source` - blanks out strings and comments so patterns only see code
//! - `identifiers` - identifier tokens over masked text
//! - `scan_declarations` - the declaration/assignment index (`DeclarationIndex`)
//! - `computed_variables` / `first_return` - shapes used by the return-target rules
//! - `undefined_identifiers` - referenced-but-undeclared names

pub mod source;
pub use source::{
    Ident, identifiers, is_ident_char, is_ident_start, is_member_name, is_object_key,
    is_standalone, is_valid_identifier, line_starts, mask_source, prev_non_whitespace,
};

pub mod reserved;
pub use reserved::is_reserved;

pub mod declarations;
pub use declarations::{
    AssignOp, AssignmentMatch, AssignmentSite, DeclarationIndex, assignment_sites,
    scan_declarations,
};

pub mod computed;
pub use computed::{ReturnSite, computed_variables, first_return};

pub mod usage;
pub use usage::undefined_identifiers;

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod source_tests;
#[cfg(test)]
#[path = "tests/declarations_tests.rs"]
mod declarations_tests;
#[cfg(test)]
#[path = "tests/computed_tests.rs"]
mod computed_tests;
#[cfg(test)]
#[path = "tests/usage_tests.rs"]
mod usage_tests;
