//! Layer 1: deterministic pattern rules.
//!
//! Rules run in the fixed order of `Rule::ALL` over a working copy of the
//! snippet. Each rule locates its targets on masked text, rewrites through
//! `TextEdit`s, and logs at most one `Fix` (one per name for the
//! declaration rule). The declaration index is shared so a name declared by
//! one rule is seen as declared by the rules after it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

use snipfix_common::{Fix, TextEdit, apply_edits, message_codes};
use snipfix_scanner::{
    AssignOp, AssignmentSite, DeclarationIndex, Ident, assignment_sites, computed_variables,
    first_return, identifiers, is_ident_char, is_member_name, is_reserved, is_standalone,
    line_starts, mask_source, prev_non_whitespace,
};

use crate::options::FixerOptions;

static LEGACY_DECLARATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bvar\s").unwrap());
static LOOSE_LENGTH_BOUND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z_$][\w$]*\s*(<=)\s*[A-Za-z_$][\w$]*\.length\b").unwrap()
});
static COUNTER_FROM_LENGTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z_$][\w$]*)\s*=\s*([A-Za-z_$][\w$]*)\.length\b").unwrap()
});

/// A Layer-1 rewrite rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// `var` becomes `let`, everywhere.
    LegacyDeclaration,
    /// `i <= arr.length` becomes `i < arr.length`.
    LoopBound,
    /// An undeclared bare assignment gets a `let` declaration.
    MissingDeclaration,
    /// `return <undeclared>;` returns the first computed variable instead.
    ReturnTarget,
    /// An undeclared `n = arr.length` counter is replaced by `arr.length`.
    UndefinedCounter,
}

impl Rule {
    /// Every rule, in application order.
    pub const ALL: [Self; 5] = [
        Self::LegacyDeclaration,
        Self::LoopBound,
        Self::MissingDeclaration,
        Self::ReturnTarget,
        Self::UndefinedCounter,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LegacyDeclaration => "legacy-declaration",
            Self::LoopBound => "loop-bound",
            Self::MissingDeclaration => "missing-declaration",
            Self::ReturnTarget => "return-target",
            Self::UndefinedCounter => "undefined-counter",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.name() == name)
    }

    fn apply(self, state: &mut FixState) -> bool {
        match self {
            Self::LegacyDeclaration => modernize_legacy_declarations(state),
            Self::LoopBound => fix_loop_bounds(state),
            Self::MissingDeclaration => insert_missing_declarations(state),
            Self::ReturnTarget => correct_return_target(state),
            Self::UndefinedCounter => substitute_undefined_counter(state),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

struct FixState {
    text: String,
    index: DeclarationIndex,
    fixes: Vec<Fix>,
}

impl FixState {
    fn rewrite(&mut self, edits: Vec<TextEdit>) {
        self.text = apply_edits(&self.text, edits);
    }
}

/// Result of Layer 1.
#[derive(Clone, Debug)]
pub struct PatternFixOutput {
    pub text: String,
    pub fixes: Vec<Fix>,
    /// The input index, grown by any declarations the rules inserted.
    pub index: DeclarationIndex,
}

/// Run every enabled rule over `snippet`, in order.
#[must_use]
pub fn apply_pattern_fixes(
    snippet: &str,
    index: DeclarationIndex,
    options: &FixerOptions,
) -> PatternFixOutput {
    let mut state = FixState {
        text: snippet.to_string(),
        index,
        fixes: Vec::new(),
    };

    for rule in Rule::ALL {
        if !options.is_enabled(rule) {
            trace!(%rule, "rule disabled");
            continue;
        }
        if rule.apply(&mut state) {
            debug!(%rule, fixes = state.fixes.len(), "rule applied");
        }
    }

    PatternFixOutput {
        text: state.text,
        fixes: state.fixes,
        index: state.index,
    }
}

// =============================================================================
// Rule 1: legacy declarations
// =============================================================================

fn modernize_legacy_declarations(state: &mut FixState) -> bool {
    let masked = mask_source(&state.text);
    let edits: Vec<TextEdit> = LEGACY_DECLARATION
        .find_iter(&masked)
        .filter(|m| is_standalone(&masked, m.start(), m.start() + 3))
        .map(|m| TextEdit::replace(m.start(), m.start() + 3, "let"))
        .collect();
    if edits.is_empty() {
        return false;
    }

    trace!(occurrences = edits.len(), "replacing var");
    state.rewrite(edits);
    state
        .fixes
        .push(Fix::new(message_codes::REPLACED_LEGACY_DECLARATION, &[]));
    true
}

// =============================================================================
// Rule 2: off-by-one loop bounds
// =============================================================================

fn fix_loop_bounds(state: &mut FixState) -> bool {
    let masked = mask_source(&state.text);
    let edits: Vec<TextEdit> = LOOSE_LENGTH_BOUND
        .captures_iter(&masked)
        .filter_map(|caps| caps.get(1))
        .map(|op| TextEdit::replace(op.start(), op.end(), "<"))
        .collect();
    if edits.is_empty() {
        return false;
    }

    trace!(occurrences = edits.len(), "tightening <= .length bounds");
    state.rewrite(edits);
    state.fixes.push(Fix::new(message_codes::FIXED_LOOP_BOUND, &[]));
    true
}

// =============================================================================
// Rule 3: missing declarations
// =============================================================================

fn insert_missing_declarations(state: &mut FixState) -> bool {
    let mut pending: Vec<(String, AssignmentSite)> = state
        .index
        .assignments
        .iter()
        .filter(|(name, _)| !state.index.is_declared(name))
        .map(|(name, site)| (name.clone(), site.clone()))
        .collect();

    let mut fired = false;
    for i in 0..pending.len() {
        let (name, site) = pending[i].clone();
        let Some(edit) = declaration_edit(&state.text, &name, &site) else {
            trace!(name = %name, line = site.line, "assignment site no longer matches");
            continue;
        };

        // A declaration on its own line pushes every later site down.
        let added_lines = edit.new_text.matches('\n').count();
        if added_lines > 0 {
            let inserted_at = state.text[..edit.start].matches('\n').count();
            for (_, later) in &mut pending[i + 1..] {
                if later.line >= inserted_at {
                    later.line += added_lines;
                }
            }
        }

        state.rewrite(vec![edit]);
        state.index.declare(&name);
        state
            .fixes
            .push(Fix::new(message_codes::ADDED_DECLARATION, &[name.as_str()]));
        fired = true;
    }
    fired
}

/// The edit that declares `name` at its recorded assignment site.
///
/// The site is looked up on the recorded line only, by name and indentation.
/// A plain assignment is prefixed with `let`. A compound assignment gets a
/// separate declaration initialised to the operator's identity value, placed
/// before the outermost loop that repeats the site.
fn declaration_edit(text: &str, name: &str, site: &AssignmentSite) -> Option<TextEdit> {
    let masked = mask_source(text);
    let starts = line_starts(&masked);
    let line_start = *starts.get(site.line)?;
    let line_end = starts
        .get(site.line + 1)
        .map_or(masked.len(), |next| next - 1);
    let found = assignment_sites(&masked[line_start..line_end])
        .into_iter()
        .find(|m| m.name == name && m.indent == site.indent)?;
    let name_at = line_start + found.name_start;

    match found.operator {
        AssignOp::Plain => Some(TextEdit::insert(name_at, "let ")),
        op @ AssignOp::Compound(_) => {
            let anchor = outermost_repeating_scope(&masked, name_at).unwrap_or(name_at);
            let declaration = format!("let {name} = {};", op.identity_value());
            let anchor_line = starts.partition_point(|&start| start <= anchor) - 1;
            let leading = &masked[starts[anchor_line]..anchor];
            if leading.bytes().all(|b| b == b' ' || b == b'\t') {
                Some(TextEdit::insert(anchor, format!("{declaration}\n{leading}")))
            } else {
                Some(TextEdit::insert(anchor, format!("{declaration} ")))
            }
        }
    }
}

/// Identifier that ends right before `end` (ignoring whitespace).
fn word_before(masked: &str, end: usize) -> Option<(usize, &str)> {
    let bytes = masked.as_bytes();
    let last = prev_non_whitespace(masked, end)?;
    if !is_ident_char(bytes[last]) {
        return None;
    }
    let start = bytes[..=last]
        .iter()
        .rposition(|&b| !is_ident_char(b))
        .map_or(0, |i| i + 1);
    Some((start, &masked[start..=last]))
}

fn matching_open_paren(masked: &str, close: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in masked.as_bytes()[..=close].iter().enumerate().rev() {
        match b {
            b')' => depth += 1,
            b'(' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn enclosing_open_brace(masked: &str, pos: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in masked.as_bytes()[..pos].iter().enumerate().rev() {
        match b {
            b'}' => depth += 1,
            b'{' if depth == 0 => return Some(i),
            b'{' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn enclosing_open_paren(masked: &str, pos: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in masked.as_bytes()[..pos].iter().enumerate().rev() {
        match b {
            b')' => depth += 1,
            b'(' if depth == 0 => return Some(i),
            b'(' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Start of the statement containing `pos`.
fn statement_start(masked: &str, pos: usize) -> usize {
    let bytes = masked.as_bytes();
    let mut depth = 0usize;
    let mut boundary = None;
    for i in (0..pos).rev() {
        match bytes[i] {
            b')' | b']' => depth += 1,
            b'}' if depth > 0 => depth += 1,
            b'(' | b'[' | b'{' if depth > 0 => depth -= 1,
            b'(' | b'[' | b'{' | b'}' | b';' => {
                boundary = Some(i + 1);
                break;
            }
            _ => {}
        }
    }
    let from = boundary.unwrap_or(0);
    (from..pos)
        .find(|&i| !bytes[i].is_ascii_whitespace())
        .unwrap_or(pos)
}

/// Where a function whose body opens right after `head` begins, if it is a
/// function expression or arrow function.
fn function_expression_start(masked: &str, head: usize) -> Option<usize> {
    let bytes = masked.as_bytes();
    if bytes[head] == b'>' && head > 0 && bytes[head - 1] == b'=' {
        let params_end = prev_non_whitespace(masked, head - 1)?;
        return if bytes[params_end] == b')' {
            matching_open_paren(masked, params_end)
        } else {
            word_before(masked, params_end + 1).map(|(start, _)| start)
        };
    }
    if bytes[head] != b')' {
        return None;
    }
    let open = matching_open_paren(masked, head)?;
    let (start, word) = word_before(masked, open)?;
    if word == "function" {
        return Some(start);
    }
    match word_before(masked, start) {
        Some((function_start, "function")) => Some(function_start),
        _ => None,
    }
}

/// Keyword that owns the block or statement whose body begins after `head`.
fn owning_keyword(masked: &str, head: usize) -> Option<(usize, &str)> {
    if masked.as_bytes()[head] == b')' {
        let open = matching_open_paren(masked, head)?;
        word_before(masked, open)
    } else {
        word_before(masked, head + 1)
    }
}

/// Start of the outermost construct that executes `pos` repeatedly: a loop,
/// or a call whose callback argument contains `pos`. Stops at the enclosing
/// function declaration.
fn outermost_repeating_scope(masked: &str, pos: usize) -> Option<usize> {
    let bytes = masked.as_bytes();
    let mut cursor = pos;
    let mut outermost = None;

    loop {
        // A brace-less body (`for (..) stmt`, `else stmt`) is owned by the
        // construct right before it.
        let braceless_owner = prev_non_whitespace(masked, cursor).and_then(|prev| {
            if bytes[prev] == b')' {
                owning_keyword(masked, prev)
            } else {
                word_before(masked, cursor).filter(|(_, word)| matches!(*word, "else" | "do"))
            }
        });

        let (start, keyword) = match braceless_owner {
            Some(owner) => owner,
            None => {
                let Some(open) = enclosing_open_brace(masked, cursor) else {
                    break;
                };
                let Some(head) = prev_non_whitespace(masked, open) else {
                    break;
                };
                if let Some(function_start) = function_expression_start(masked, head) {
                    let is_argument = prev_non_whitespace(masked, function_start)
                        .is_some_and(|prev| matches!(bytes[prev], b'(' | b','));
                    if !is_argument {
                        break;
                    }
                    let Some(open_paren) = enclosing_open_paren(masked, function_start) else {
                        break;
                    };
                    let call = statement_start(masked, open_paren);
                    outermost = Some(call);
                    cursor = call;
                    continue;
                }
                match owning_keyword(masked, head) {
                    Some(owner) => owner,
                    None => break,
                }
            }
        };

        match keyword {
            "for" | "while" | "do" => {
                outermost = Some(start);
                cursor = start;
            }
            "if" | "else" | "switch" | "catch" | "try" | "finally" | "with" => cursor = start,
            _ => break,
        }
    }

    outermost
}

// =============================================================================
// Rule 4: return target
// =============================================================================

fn correct_return_target(state: &mut FixState) -> bool {
    let masked = mask_source(&state.text);
    let Some(site) = first_return(&masked) else {
        return false;
    };
    if state.index.is_declared(&site.name)
        || is_reserved(&site.name)
        || state.index.callables.contains(&site.name)
    {
        return false;
    }
    let computed = computed_variables(&masked);
    let Some(target) = computed.iter().find(|name| **name != site.name).cloned() else {
        return false;
    };

    trace!(returned = %site.name, %target, "retargeting return");
    state.rewrite(vec![TextEdit::replace(site.start, site.end, target.clone())]);
    state
        .fixes
        .push(Fix::new(message_codes::FIXED_RETURN_TARGET, &[target.as_str()]));
    true
}

// =============================================================================
// Rule 5: undefined counter
// =============================================================================

fn is_write(masked: &str, ident: &Ident<'_>) -> bool {
    let after = masked[ident.end()..].trim_start();
    let before = masked[..ident.start].trim_end();
    if after.starts_with("++")
        || after.starts_with("--")
        || before.ends_with("++")
        || before.ends_with("--")
    {
        return true;
    }
    let after = after
        .strip_prefix(['+', '-', '*', '/', '%'])
        .unwrap_or(after);
    after.starts_with('=') && !after.starts_with("==") && !after.starts_with("=>")
}

fn substitute_undefined_counter(state: &mut FixState) -> bool {
    let masked = mask_source(&state.text);
    let Some(caps) = COUNTER_FROM_LENGTH.captures_iter(&masked).find(|caps| {
        caps.get(1)
            .is_some_and(|counter| is_standalone(&masked, counter.start(), counter.end()))
    }) else {
        return false;
    };
    let (Some(whole), Some(counter), Some(array)) = (caps.get(0), caps.get(1), caps.get(2))
    else {
        return false;
    };
    let counter_name = counter.as_str();
    let array_name = array.as_str();

    if is_reserved(counter_name)
        || state.index.is_declared(counter_name)
        || !state.index.is_declared(array_name)
    {
        return false;
    }

    let occurrences: Vec<Ident<'_>> = identifiers(&masked)
        .filter(|ident| ident.text == counter_name && !is_member_name(&masked, ident.start))
        .collect();
    let writes = occurrences
        .iter()
        .filter(|ident| is_write(&masked, ident))
        .count();
    if writes != 1 {
        trace!(counter = counter_name, writes, "counter is reassigned");
        return false;
    }

    let replacement = format!("{array_name}.length");
    let mut edits = vec![TextEdit::replace(
        whole.start(),
        whole.end(),
        replacement.clone(),
    )];
    edits.extend(
        occurrences
            .iter()
            .filter(|ident| ident.start != counter.start())
            .map(|ident| TextEdit::replace(ident.start, ident.end(), replacement.clone())),
    );

    let fix = Fix::new(
        message_codes::REPLACED_UNDEFINED_COUNTER,
        &[counter_name, array_name],
    );
    state.rewrite(edits);
    state.fixes.push(fix);
    true
}
