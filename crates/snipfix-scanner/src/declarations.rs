//! Declaration scanner.
//!
//! Walks the snippet line by line and folds four independent extractions into
//! a `DeclarationIndex`:
//!
//! 1. named `function` parameter lists (and the function's own name),
//! 2. arrow-style parameter lists, parenthesized or bare,
//! 3. names bound by `var`/`let`/`const` (including simple destructuring) and
//!    `catch` bindings,
//! 4. bare assignment targets at statement starts.
//!
//! A single line may contribute to several containers.

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::reserved::is_reserved;
use crate::source::{is_ident_char, is_standalone, is_valid_identifier, mask_source};

static FUNCTION_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bfunction\b\s*\*?\s*([A-Za-z_$][\w$]*)?\s*\(([^)]*)\)").unwrap()
});
static ARROW_PARAMS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^()]*)\)\s*=>").unwrap());
static ARROW_SINGLE_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z_$][\w$]*)\s*=>").unwrap());
static DECLARATION_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:var|let|const)\s+").unwrap());
static CATCH_BINDING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bcatch\s*\(\s*([A-Za-z_$][\w$]*)\s*\)").unwrap());
static CLASS_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bclass\s+([A-Za-z_$][\w$]*)").unwrap());
static ASSIGNMENT_SITE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[{};])([ \t]*)([A-Za-z_$][\w$]*)[ \t]*([-+*/%]?)=(?:[^=>]|$)").unwrap()
});

/// Operator of a bare assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    /// `name = value`
    Plain,
    /// `name += value` and friends; holds the arithmetic operator.
    Compound(char),
}

impl AssignOp {
    fn from_prefix(prefix: &str) -> Self {
        match prefix.chars().next() {
            Some(op) => Self::Compound(op),
            None => Self::Plain,
        }
    }

    /// Initial value that makes the first compound update a no-op.
    #[must_use]
    pub const fn identity_value(self) -> &'static str {
        match self {
            Self::Compound('*' | '/') => "1",
            _ => "0",
        }
    }
}

/// Where a name is first assigned without a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentSite {
    pub line: usize,
    /// Whitespace between the statement boundary and the name.
    pub indent: String,
    pub operator: AssignOp,
}

/// A bare assignment found on one (masked) line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentMatch {
    pub name: String,
    /// Byte offset of the name within the line.
    pub name_start: usize,
    pub indent: String,
    pub operator: AssignOp,
}

/// Bare assignment targets at statement starts on a masked line.
///
/// A statement starts at the beginning of the line or after `{`, `}` or `;`.
/// Reserved words are never targets.
#[must_use]
pub fn assignment_sites(masked_line: &str) -> Vec<AssignmentMatch> {
    ASSIGNMENT_SITE
        .captures_iter(masked_line)
        .filter_map(|caps| {
            let name = caps.get(2)?;
            if is_reserved(name.as_str()) {
                return None;
            }
            Some(AssignmentMatch {
                name: name.as_str().to_string(),
                name_start: name.start(),
                indent: caps.get(1).map_or("", |m| m.as_str()).to_string(),
                operator: AssignOp::from_prefix(caps.get(3).map_or("", |m| m.as_str())),
            })
        })
        .collect()
}

/// Declared names, parameters, callables, and undeclared assignment sites.
///
/// Sets keep insertion order; "first parameter" and "first declared variable"
/// mean first in textual order. Names are never removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclarationIndex {
    /// Every name bound by a declaration keyword or as a parameter.
    pub declared: IndexSet<String>,
    /// Function and arrow parameters. Each is also in `declared`.
    pub parameters: IndexSet<String>,
    /// `function NAME` and `class NAME`.
    pub callables: IndexSet<String>,
    /// First bare assignment per name. Later writes never move the record,
    /// so a missing declaration lands at the earliest write rather than the
    /// last one.
    pub assignments: IndexMap<String, AssignmentSite>,
}

impl DeclarationIndex {
    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    /// Mark `name` as declared. Returns `false` if it already was.
    pub fn declare(&mut self, name: &str) -> bool {
        self.declared.insert(name.to_string())
    }

    fn add_parameters(&mut self, list: &str) {
        for part in split_top_level(list) {
            let part = part.trim().trim_start_matches("...");
            let name = part.split('=').next().unwrap_or_default().trim();
            if is_valid_identifier(name) && !is_reserved(name) {
                self.parameters.insert(name.to_string());
                self.declared.insert(name.to_string());
            }
        }
    }

    fn scan_line(&mut self, line_index: usize, line: &str) {
        for caps in FUNCTION_SIGNATURE.captures_iter(line) {
            if let Some(name) = caps.get(1) {
                self.callables.insert(name.as_str().to_string());
            }
            if let Some(params) = caps.get(2) {
                self.add_parameters(params.as_str());
            }
        }

        for caps in ARROW_PARAMS.captures_iter(line) {
            if let Some(params) = caps.get(1) {
                self.add_parameters(params.as_str());
            }
        }

        for caps in ARROW_SINGLE_PARAM.captures_iter(line) {
            if let Some(param) = caps.get(1) {
                if is_standalone(line, param.start(), param.end()) {
                    self.add_parameters(param.as_str());
                }
            }
        }

        for keyword in DECLARATION_KEYWORD.find_iter(line) {
            let word_end = keyword.start() + keyword.as_str().trim_end().len();
            if !is_standalone(line, keyword.start(), word_end) {
                continue;
            }
            for name in declaration_bindings(&line[keyword.end()..]) {
                self.declared.insert(name);
            }
        }

        for caps in CATCH_BINDING.captures_iter(line) {
            if let Some(binding) = caps.get(1) {
                if !is_reserved(binding.as_str()) {
                    self.declared.insert(binding.as_str().to_string());
                }
            }
        }

        for caps in CLASS_NAME.captures_iter(line) {
            if let Some(name) = caps.get(1) {
                self.callables.insert(name.as_str().to_string());
            }
        }

        for site in assignment_sites(line) {
            self.assignments
                .entry(site.name)
                .or_insert_with(|| AssignmentSite {
                    line: line_index,
                    indent: site.indent,
                    operator: site.operator,
                });
        }
    }
}

/// Split at commas that are not nested in brackets, stopping at a `;` or an
/// unmatched closing bracket.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, b) in text.bytes().enumerate() {
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' if depth == 0 => {
                segments.push(&text[start..i]);
                return segments;
            }
            b')' | b']' | b'}' => depth -= 1,
            b';' if depth == 0 => {
                segments.push(&text[start..i]);
                return segments;
            }
            b',' if depth == 0 => {
                segments.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&text[start..]);
    segments
}

/// Names bound by the declaration list that follows a `var`/`let`/`const`.
fn declaration_bindings(rest: &str) -> Vec<String> {
    let mut names = Vec::new();
    for segment in split_top_level(rest) {
        let segment = segment.trim_start();
        if let Some(pattern) = segment
            .strip_prefix('{')
            .or_else(|| segment.strip_prefix('['))
        {
            let inner = pattern.split(['}', ']']).next().unwrap_or_default();
            for element in inner.split(',') {
                let element = element.trim().trim_start_matches("...");
                let target = element.rsplit(':').next().unwrap_or(element);
                let name = target.split('=').next().unwrap_or_default().trim();
                if is_valid_identifier(name) && !is_reserved(name) {
                    names.push(name.to_string());
                }
            }
        } else {
            let end = segment
                .bytes()
                .position(|b| !is_ident_char(b))
                .unwrap_or(segment.len());
            let name = &segment[..end];
            if is_valid_identifier(name) && !is_reserved(name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// Build the declaration index for `text`.
#[must_use]
pub fn scan_declarations(text: &str) -> DeclarationIndex {
    let masked = mask_source(text);
    let mut index = DeclarationIndex::default();
    for (line_index, line) in masked.split('\n').enumerate() {
        index.scan_line(line_index, line);
    }
    trace!(
        declared = index.declared.len(),
        parameters = index.parameters.len(),
        assignments = index.assignments.len(),
        "scanned declarations"
    );
    index
}
