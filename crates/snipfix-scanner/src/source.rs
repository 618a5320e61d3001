//! Source masking and identifier tokens.
//!
//! Every pattern in the pipeline runs over *masked* text: string literal
//! contents and comments are replaced by spaces of the same byte length, with
//! newlines kept. Offsets found in masked text are therefore valid in the real
//! text, and nothing inside a string or a comment is ever reported or rewritten.

#[derive(Clone, Copy, PartialEq, Eq)]
enum MaskState {
    Code,
    Quoted(char),
    Template,
    LineComment,
    BlockComment,
}

fn blank(out: &mut String, ch: char) {
    if ch == '\n' {
        out.push('\n');
    } else {
        for _ in 0..ch.len_utf8() {
            out.push(' ');
        }
    }
}

/// Mask string literal contents and comments.
///
/// Quote characters are kept so the shape of the code survives. A `'` or `"`
/// string that is not closed on its line ends at the newline. Inside a
/// template literal, `${ .. }` interpolations stay code; only the `${` and
/// the closing `}` are blanked.
#[must_use]
pub fn mask_source(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = MaskState::Code;
    // Brace depth inside each open `${`, innermost last.
    let mut interpolations: Vec<usize> = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match state {
            MaskState::Code => match ch {
                '\'' | '"' => {
                    out.push(ch);
                    state = MaskState::Quoted(ch);
                }
                '`' => {
                    out.push(ch);
                    state = MaskState::Template;
                }
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    out.push_str("  ");
                    state = MaskState::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push_str("  ");
                    state = MaskState::BlockComment;
                }
                '{' => {
                    if let Some(depth) = interpolations.last_mut() {
                        *depth += 1;
                    }
                    out.push(ch);
                }
                '}' if interpolations.last() == Some(&0) => {
                    interpolations.pop();
                    out.push(' ');
                    state = MaskState::Template;
                }
                '}' => {
                    if let Some(depth) = interpolations.last_mut() {
                        *depth -= 1;
                    }
                    out.push(ch);
                }
                _ => out.push(ch),
            },
            MaskState::Quoted(quote) => {
                if ch == '\\' {
                    blank(&mut out, ch);
                    if let Some(escaped) = chars.next() {
                        blank(&mut out, escaped);
                    }
                } else if ch == quote {
                    out.push(ch);
                    state = MaskState::Code;
                } else if ch == '\n' {
                    out.push('\n');
                    state = MaskState::Code;
                } else {
                    blank(&mut out, ch);
                }
            }
            MaskState::Template => {
                if ch == '\\' {
                    blank(&mut out, ch);
                    if let Some(escaped) = chars.next() {
                        blank(&mut out, escaped);
                    }
                } else if ch == '`' {
                    out.push(ch);
                    state = MaskState::Code;
                } else if ch == '$' && chars.peek() == Some(&'{') {
                    chars.next();
                    out.push_str("  ");
                    interpolations.push(0);
                    state = MaskState::Code;
                } else {
                    blank(&mut out, ch);
                }
            }
            MaskState::LineComment => {
                if ch == '\n' {
                    out.push('\n');
                    state = MaskState::Code;
                } else {
                    blank(&mut out, ch);
                }
            }
            MaskState::BlockComment => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = MaskState::Code;
                } else {
                    blank(&mut out, ch);
                }
            }
        }
    }

    out
}

#[inline]
#[must_use]
pub const fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

#[inline]
#[must_use]
pub const fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let bytes = name.as_bytes();
    match bytes.first() {
        Some(&first) => is_ident_start(first) && bytes.iter().all(|&b| is_ident_char(b)),
        None => false,
    }
}

/// An identifier token in masked text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ident<'a> {
    pub start: usize,
    pub text: &'a str,
}

impl Ident<'_> {
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

struct Identifiers<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Iterator for Identifiers<'a> {
    type Item = Ident<'a>;

    fn next(&mut self) -> Option<Ident<'a>> {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() {
            if !is_ident_char(bytes[self.pos]) {
                self.pos += 1;
                continue;
            }
            let start = self.pos;
            while self.pos < bytes.len() && is_ident_char(bytes[self.pos]) {
                self.pos += 1;
            }
            // Runs that begin with a digit are numeric literals (`10`, `1e5`, `0xff`).
            if is_ident_start(bytes[start]) {
                return Some(Ident {
                    start,
                    text: &self.src[start..self.pos],
                });
            }
        }
        None
    }
}

/// Iterate identifier tokens of `masked` in textual order.
pub fn identifiers(masked: &str) -> impl Iterator<Item = Ident<'_>> {
    Identifiers {
        src: masked,
        pos: 0,
    }
}

/// Index of the last non-whitespace byte before `pos`.
#[must_use]
pub fn prev_non_whitespace(masked: &str, pos: usize) -> Option<usize> {
    masked.as_bytes()[..pos.min(masked.len())]
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
}

fn next_non_whitespace(masked: &str, pos: usize) -> Option<usize> {
    let bytes = masked.as_bytes();
    (pos..bytes.len()).find(|&i| !bytes[i].is_ascii_whitespace())
}

/// Whether the token starting at `start` is a property name (`obj.name`).
///
/// A spread (`...name`) is not a property access.
#[must_use]
pub fn is_member_name(masked: &str, start: usize) -> bool {
    let bytes = masked.as_bytes();
    match prev_non_whitespace(masked, start) {
        Some(dot) if bytes[dot] == b'.' => dot == 0 || bytes[dot - 1] != b'.',
        _ => false,
    }
}

/// Whether the token `ident` is an object-literal key (`{ key: value }`).
#[must_use]
pub fn is_object_key(masked: &str, ident: &Ident<'_>) -> bool {
    let bytes = masked.as_bytes();
    let followed_by_colon = match next_non_whitespace(masked, ident.end()) {
        Some(i) => bytes[i] == b':' && bytes.get(i + 1) != Some(&b':'),
        None => false,
    };
    followed_by_colon
        && matches!(
            prev_non_whitespace(masked, ident.start).map(|i| bytes[i]),
            Some(b'{' | b',')
        )
}

/// Whether `start..end` is a whole word that is not a property access.
#[must_use]
pub fn is_standalone(masked: &str, start: usize, end: usize) -> bool {
    let bytes = masked.as_bytes();
    let clean_before = start == 0 || {
        let prev = bytes[start - 1];
        !is_ident_char(prev) && prev != b'.'
    };
    let clean_after = bytes.get(end).is_none_or(|&next| !is_ident_char(next));
    clean_before && clean_after
}

/// Byte offset of the start of every line.
#[must_use]
pub fn line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    starts.extend(
        text.bytes()
            .enumerate()
            .filter(|&(_, b)| b == b'\n')
            .map(|(i, _)| i + 1),
    );
    starts
}
