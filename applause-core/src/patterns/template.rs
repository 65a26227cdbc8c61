//! template.rs - Replacement text with `$` backreferences.
//!
//! Replacement strings are parsed once, when the pattern is compiled, into
//! literal runs and capture-group references. Recognized tokens:
//!
//! * `$$` is a literal `$`.
//! * `$N` / `$NN` refers to capture group N. The two-digit form wins when that
//!   group exists; a group that did not participate expands to nothing.
//!
//! Any other `$` (including `$0` or a reference past the last group) is kept
//! literally. The regex crate's own `$name` expansion is never used.

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Group(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementTemplate {
    pieces: Vec<Piece>,
}

enum DollarToken {
    Escaped,
    Group { index: usize, width: usize },
    Bare,
}

impl ReplacementTemplate {
    /// Parses `text` for a matcher with `group_count` capture groups.
    pub fn parse(text: &str, group_count: usize) -> Self {
        let bytes = text.as_bytes();
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut run_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] != b'$' {
                i += 1;
                continue;
            }
            literal.push_str(&text[run_start..i]);
            match read_dollar(&bytes[i + 1..], group_count) {
                DollarToken::Escaped => {
                    literal.push('$');
                    i += 2;
                }
                DollarToken::Group { index, width } => {
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(Piece::Group(index));
                    i += 1 + width;
                }
                DollarToken::Bare => {
                    literal.push('$');
                    i += 1;
                }
            }
            run_start = i;
        }

        literal.push_str(&text[run_start..]);
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }
        Self { pieces }
    }

    /// Appends the expansion to `out`. `groups[0]` is capture group 1.
    pub fn expand_into(&self, groups: &[Option<&str>], out: &mut String) {
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Group(index) => {
                    if let Some(Some(text)) = groups.get(index - 1) {
                        out.push_str(text);
                    }
                }
            }
        }
    }

    pub fn expand(&self, groups: &[Option<&str>]) -> String {
        let mut out = String::new();
        self.expand_into(groups, &mut out);
        out
    }
}

fn read_dollar(rest: &[u8], group_count: usize) -> DollarToken {
    let digit = |i: usize| rest.get(i).filter(|b| b.is_ascii_digit()).map(|b| (b - b'0') as usize);

    if rest.first() == Some(&b'$') {
        return DollarToken::Escaped;
    }
    let Some(first) = digit(0) else {
        return DollarToken::Bare;
    };
    if let Some(second) = digit(1) {
        let index = first * 10 + second;
        if (1..=group_count).contains(&index) {
            return DollarToken::Group { index, width: 2 };
        }
    }
    if (1..=group_count).contains(&first) {
        return DollarToken::Group { index: first, width: 1 };
    }
    DollarToken::Bare
}
