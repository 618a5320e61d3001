//! Layer 2: identifier resolution gate.
//!
//! Re-scans the Layer-1 output for identifiers that are referenced but never
//! declared and repoints each one onto a name that already exists, chosen by
//! an ordered chain of `Resolver` strategies. When no declared name exists the
//! identifier is left untouched: the gate never invents a declaration and
//! never guesses a value.

use tracing::{debug, trace};

use snipfix_common::{Fix, TextEdit, apply_edits, message_codes};
use snipfix_scanner::{
    DeclarationIndex, identifiers, is_member_name, mask_source, undefined_identifiers,
};

/// Name fragments that mark a variable as holding a result. Matching is
/// case-sensitive: `runningTotal` is not result-like, `running_total` is.
const RESULT_TOKENS: [&str; 4] = ["result", "sum", "total", "average"];

/// One replacement strategy. Strategies are tried in `Resolver::CHAIN` order
/// and the first that yields a name wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolver {
    /// The first function or arrow parameter.
    FirstParameter,
    /// The first declared variable whose name looks like a result.
    ResultLikeVariable,
    /// The first declared variable of any kind.
    AnyDeclared,
}

impl Resolver {
    pub const CHAIN: [Self; 3] = [
        Self::FirstParameter,
        Self::ResultLikeVariable,
        Self::AnyDeclared,
    ];

    #[must_use]
    pub fn candidate(self, index: &DeclarationIndex) -> Option<&str> {
        let found = match self {
            Self::FirstParameter => index.parameters.first(),
            Self::ResultLikeVariable => index
                .declared
                .iter()
                .find(|name| RESULT_TOKENS.iter().any(|token| name.contains(*token))),
            Self::AnyDeclared => index.declared.first(),
        };
        found.map(String::as_str)
    }

    /// Run the chain and return the first candidate with the strategy that
    /// produced it.
    #[must_use]
    pub fn resolve(index: &DeclarationIndex) -> Option<(Self, &str)> {
        Self::CHAIN
            .into_iter()
            .find_map(|resolver| resolver.candidate(index).map(|name| (resolver, name)))
    }
}

/// Result of Layer 2.
#[derive(Clone, Debug)]
pub struct ResolutionOutput {
    pub text: String,
    pub fixes: Vec<Fix>,
    /// Undefined identifiers no strategy could resolve.
    pub unresolved: Vec<String>,
}

fn replace_identifier(text: &str, from: &str, to: &str) -> String {
    let masked = mask_source(text);
    let edits = identifiers(&masked)
        .filter(|ident| ident.text == from && !is_member_name(&masked, ident.start))
        .map(|ident| TextEdit::replace(ident.start, ident.end(), to))
        .collect();
    apply_edits(text, edits)
}

/// Resolve the undefined identifiers of `text` against `index`.
#[must_use]
pub fn resolve_undefined_identifiers(text: &str, index: &DeclarationIndex) -> ResolutionOutput {
    let mut output = ResolutionOutput {
        text: text.to_string(),
        fixes: Vec::new(),
        unresolved: Vec::new(),
    };

    for name in undefined_identifiers(text, index) {
        let Some((resolver, replacement)) = Resolver::resolve(index) else {
            trace!(name = %name, "no declared name to resolve to");
            output.unresolved.push(name);
            continue;
        };
        if replacement == name {
            continue;
        }
        debug!(name = %name, replacement, ?resolver, "resolved undefined identifier");
        output.text = replace_identifier(&output.text, &name, replacement);
        output.fixes.push(Fix::new(
            message_codes::RESOLVED_IDENTIFIER,
            &[name.as_str(), replacement],
        ));
    }

    output
}
