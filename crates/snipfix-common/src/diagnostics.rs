//! Issue and fix messages for the repair pipeline.
//!
//! An `Issue` is a defect found in the original snippet; a `Fix` is a rewrite
//! that was actually applied. Both are rendered from the `MESSAGES` table so
//! the wording of every report stays in one place.

use serde::{Serialize, Serializer};
use std::fmt;

// =============================================================================
// Message Table
// =============================================================================

/// Which log a message belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MessageCategory {
    Issue,
    Fix,
}

/// A message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct MessageTemplate {
    pub code: u32,
    pub category: MessageCategory,
    pub message: &'static str,
}

pub mod message_codes {
    // Issues (1xxx)
    pub const NO_ISSUES_DETECTED: u32 = 1000;
    pub const LEGACY_DECLARATION: u32 = 1001;
    pub const LOOSE_EQUALITY: u32 = 1002;
    pub const UNDEFINED_VARIABLE: u32 = 1003;
    pub const OFF_BY_ONE_COMPARISON: u32 = 1004;
    pub const WRONG_RETURN_TARGET: u32 = 1005;
    pub const QUALITY_IMPROVEMENTS_APPLIED: u32 = 1010;

    // Layer-1 fixes (20xx)
    pub const REPLACED_LEGACY_DECLARATION: u32 = 2001;
    pub const FIXED_LOOP_BOUND: u32 = 2002;
    pub const ADDED_DECLARATION: u32 = 2003;
    pub const FIXED_RETURN_TARGET: u32 = 2004;
    pub const REPLACED_UNDEFINED_COUNTER: u32 = 2005;

    // Layer-2 fixes (21xx)
    pub const RESOLVED_IDENTIFIER: u32 = 2101;
}

use message_codes as codes;

pub static MESSAGES: &[MessageTemplate] = &[
    MessageTemplate {
        code: codes::NO_ISSUES_DETECTED,
        category: MessageCategory::Issue,
        message: "No obvious issues detected",
    },
    MessageTemplate {
        code: codes::LEGACY_DECLARATION,
        category: MessageCategory::Issue,
        message: "Uses var instead of modern let/const declarations",
    },
    MessageTemplate {
        code: codes::LOOSE_EQUALITY,
        category: MessageCategory::Issue,
        message: "Uses loose equality (==) instead of strict equality (===)",
    },
    MessageTemplate {
        code: codes::UNDEFINED_VARIABLE,
        category: MessageCategory::Issue,
        message: "Variable '{0}' is undefined or missing declaration",
    },
    MessageTemplate {
        code: codes::OFF_BY_ONE_COMPARISON,
        category: MessageCategory::Issue,
        message: "Potential off-by-one error: loop condition uses <= with .length",
    },
    MessageTemplate {
        code: codes::WRONG_RETURN_TARGET,
        category: MessageCategory::Issue,
        message: "Function returns '{0}' but should return computed variable '{1}'",
    },
    MessageTemplate {
        code: codes::QUALITY_IMPROVEMENTS_APPLIED,
        category: MessageCategory::Issue,
        message: "Code quality improvements applied",
    },
    MessageTemplate {
        code: codes::REPLACED_LEGACY_DECLARATION,
        category: MessageCategory::Fix,
        message: "Replaced var with let for modern JavaScript practices",
    },
    MessageTemplate {
        code: codes::FIXED_LOOP_BOUND,
        category: MessageCategory::Fix,
        message: "Fixed off-by-one error in loop condition",
    },
    MessageTemplate {
        code: codes::ADDED_DECLARATION,
        category: MessageCategory::Fix,
        message: "Added let declaration for variable '{0}'",
    },
    MessageTemplate {
        code: codes::FIXED_RETURN_TARGET,
        category: MessageCategory::Fix,
        message: "Fixed return statement to return computed variable '{0}'",
    },
    MessageTemplate {
        code: codes::REPLACED_UNDEFINED_COUNTER,
        category: MessageCategory::Fix,
        message: "Replaced undefined counter '{0}' with {1}.length",
    },
    MessageTemplate {
        code: codes::RESOLVED_IDENTIFIER,
        category: MessageCategory::Fix,
        message: "Resolved undefined identifier '{0}' → '{1}'",
    },
];

/// Look up a message definition by code.
#[must_use]
pub fn get_message(code: u32) -> Option<&'static MessageTemplate> {
    MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a code.
///
/// Returns the template string with `{0}`, `{1}`, etc. placeholders.
/// Use `format_message()` to fill in the placeholders.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_message(code).map(|m| m.message)
}

/// Format a message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

fn render(code: u32, args: &[&str]) -> String {
    get_message_template(code)
        .map(|template| format_message(template, args))
        .unwrap_or_default()
}

// =============================================================================
// Issue / Fix
// =============================================================================

/// A defect found in the original snippet, independent of whether it was fixed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issue {
    pub code: u32,
    pub message_text: String,
}

impl Issue {
    #[must_use]
    pub fn new(code: u32, args: &[&str]) -> Self {
        Self {
            code,
            message_text: render(code, args),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message_text)
    }
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message_text)
    }
}

/// One entry of the append-only fix log: a rewrite that has already been applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fix {
    pub code: u32,
    pub message_text: String,
}

impl Fix {
    #[must_use]
    pub fn new(code: u32, args: &[&str]) -> Self {
        Self {
            code,
            message_text: render(code, args),
        }
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message_text)
    }
}

impl Serialize for Fix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message_text)
    }
}
