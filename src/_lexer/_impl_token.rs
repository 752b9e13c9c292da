use crate::{Token, TokenKind};
use std::fmt::{Display, Error, Formatter};

impl Token {
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The exact source text of this token.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The (1-based) line of the model source this token comes from.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Byte offset of this token within the lexed text of its line. `tokenize_text`
    /// lexes trimmed lines, so leading indentation is not counted.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Priority of a `Rank` token, i.e. the digits before the `:`.
    pub fn rank(&self) -> Option<u32> {
        if self.kind == TokenKind::Rank {
            self.value.trim_end_matches(':').parse().ok()
        } else {
            None
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Tokens are equal when they have the same type and text. Positions are only
/// kept for diagnostics.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

impl Eq for Token {}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{:?}(`{}`)", self.kind, self.value)
    }
}
