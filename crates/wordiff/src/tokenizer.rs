//! Lossless lexical tokenizer.
//!
//! Splits a line into the units the aligner matches on. Every character of
//! the input lands in exactly one token, so `tokenize(s).concat() == s`.
//! Tokens are slices of the input and therefore always start and end on
//! code-point boundaries.

use regex::Regex;

/// Ordered alternatives, evaluated leftmost-first. The final `.` (with the
/// `s` flag) matches any single code point, so the pattern never stalls.
const TOKEN_PATTERN: &str = concat!(
    r#"(?s)"#,
    r#"(?P<ident>[\p{L}_]\w*)"#,
    r#"|(?P<num>\d+(?:\.\d+)?)"#,
    r#"|(?P<str>"[^"]*"|'[^']*')"#,
    r#"|(?P<op>[+\-*/=<>!&|^%:~?]+)"#,
    r#"|(?P<punct>[(){}\[\];,.])"#,
    r#"|(?P<ws>\s+)"#,
    r#"|(?P<other>.)"#,
);

/// Lexical class of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Letter or underscore followed by word characters.
    Identifier,
    /// Digit run, optionally with one decimal point between digit runs.
    Number,
    /// Single- or double-quoted run without an embedded quote of its kind.
    StringLiteral,
    /// Maximal run of operator characters.
    Operator,
    /// One of `(){}[];,.`.
    Punctuation,
    /// Maximal whitespace run.
    Whitespace,
    /// Any other single code point.
    Other,
}

impl TokenKind {
    const GROUPS: [(&'static str, TokenKind); 7] = [
        ("ident", TokenKind::Identifier),
        ("num", TokenKind::Number),
        ("str", TokenKind::StringLiteral),
        ("op", TokenKind::Operator),
        ("punct", TokenKind::Punctuation),
        ("ws", TokenKind::Whitespace),
        ("other", TokenKind::Other),
    ];
}

/// Splits strings into alignment tokens.
///
/// The pattern is compiled once in [`Tokenizer::new`]; the tokenizer is
/// immutable afterwards and can be shared across threads.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    /// Compile the token pattern.
    pub fn new() -> Self {
        // The pattern is a compile-time constant covered by tests.
        let pattern = Regex::new(TOKEN_PATTERN).expect("token pattern is valid");
        Self { pattern }
    }

    /// Split `s` into tokens. The empty string yields no tokens.
    pub fn tokenize<'a>(&self, s: &'a str) -> Vec<&'a str> {
        let tokens: Vec<&str> = self.pattern.find_iter(s).map(|m| m.as_str()).collect();
        debug_assert_eq!(tokens.concat(), s);
        tokens
    }

    /// Split `s` into tokens, tagging each with its lexical class.
    pub fn tokenize_classified<'a>(&self, s: &'a str) -> Vec<(TokenKind, &'a str)> {
        self.pattern
            .captures_iter(s)
            .filter_map(|caps| {
                TokenKind::GROUPS
                    .iter()
                    .find_map(|(name, kind)| caps.name(name).map(|m| (*kind, m.as_str())))
            })
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
