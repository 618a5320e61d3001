//! Computed variables and return targets.
//!
//! A computed variable is the target of an assignment whose right side
//! contains a binary arithmetic operator, or of any compound arithmetic
//! assignment. Function-valued right sides never count.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::reserved::is_reserved;
use crate::source::{is_ident_char, is_member_name, is_standalone};

static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z_$][\w$]*)[ \t]*([-+*/%]?)=([^=>][^;\n{}]*|$)").unwrap()
});
static BINARY_ARITHMETIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w$)\]]\s*[-+*/%]\s*[\w$(\[]").unwrap());
static RETURN_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\breturn\s+([A-Za-z_$][\w$]*)\s*;").unwrap());

fn is_function_value(rhs: &str) -> bool {
    let rhs = rhs.trim_start();
    rhs.contains("=>") || rhs.starts_with("function") || rhs.starts_with("async")
}

/// Computed variables of `masked`, distinct, in order of first appearance.
#[must_use]
pub fn computed_variables(masked: &str) -> IndexSet<String> {
    let bytes = masked.as_bytes();
    let mut computed = IndexSet::new();
    for caps in ASSIGNMENT.captures_iter(masked) {
        let Some(name) = caps.get(1) else { continue };
        if name.start() > 0 && is_ident_char(bytes[name.start() - 1]) {
            continue;
        }
        if is_reserved(name.as_str()) || is_member_name(masked, name.start()) {
            continue;
        }
        let compound = caps.get(2).is_some_and(|op| !op.as_str().is_empty());
        let rhs = caps.get(3).map_or("", |m| m.as_str());
        if is_function_value(rhs) {
            continue;
        }
        if compound || BINARY_ARITHMETIC.is_match(rhs) {
            computed.insert(name.as_str().to_string());
        }
    }
    computed
}

/// The first `return <identifier>;` in the snippet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnSite {
    pub name: String,
    /// Byte range of the returned identifier.
    pub start: usize,
    pub end: usize,
}

/// Locate the first `return <identifier>;` in `masked`.
#[must_use]
pub fn first_return(masked: &str) -> Option<ReturnSite> {
    RETURN_IDENT.captures_iter(masked).find_map(|caps| {
        let whole = caps.get(0)?;
        if !is_standalone(masked, whole.start(), whole.start() + "return".len()) {
            return None;
        }
        let name = caps.get(1)?;
        Some(ReturnSite {
            name: name.as_str().to_string(),
            start: name.start(),
            end: name.end(),
        })
    })
}
