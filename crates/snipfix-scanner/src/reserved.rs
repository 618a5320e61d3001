//! Names that are never treated as snippet variables.
//!
//! Keywords, literal names, and the well-known globals a snippet may use
//! without declaring them.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

const KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "finally", "for", "from",
    "function", "if", "import", "in", "instanceof", "let", "new", "of", "return", "static",
    "super", "switch", "this", "throw", "try", "typeof", "var", "void", "while", "with", "yield",
];

const LITERALS: &[&str] = &["true", "false", "null", "undefined", "NaN", "Infinity"];

const GLOBALS: &[&str] = &[
    "Array", "Boolean", "Date", "Error", "JSON", "Map", "Math", "Number", "Object", "Promise",
    "RegExp", "Set", "String", "Symbol", "arguments", "console", "document", "exports",
    "globalThis", "isNaN", "module", "parseFloat", "parseInt", "require", "window",
];

static RESERVED: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    KEYWORDS
        .iter()
        .chain(LITERALS)
        .chain(GLOBALS)
        .copied()
        .collect()
});

#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(name)
}
