use crate::{BooleanNetError, Token, TokenKind, TokenLine};
use lazy_static::lazy_static;
use regex::Regex;

/// **(internal)** Accessors and `Display` for `Token`.
mod _impl_token;
/// **(internal)** Classification and re-serialization of `TokenLine`s.
mod _impl_token_line;

lazy_static! {
    /// A rank marker: digits immediately followed by `:`.
    static ref RANK: Regex = Regex::new(r"^[0-9]+:").unwrap();

    /// A number with an optional sign and an optional fractional part.
    static ref NUMBER: Regex = Regex::new(r"^[+\-]?[0-9]+(\.[0-9]*)?").unwrap();

    /// A node name or a reserved word. Signs are allowed in names (e.g. `Ca2+c`, `IL-2`).
    static ref ID: Regex = Regex::new(r"^[a-zA-Z_+\-][a-zA-Z_0-9+\-]*").unwrap();
}

/// Map reserved words to their token types.
fn reserved(word: &str) -> Option<TokenKind> {
    match word {
        "and" => Some(TokenKind::And),
        "or" => Some(TokenKind::Or),
        "not" => Some(TokenKind::Not),
        "True" | "False" | "Random" => Some(TokenKind::State),
        _ => None,
    }
}

/// Split one line of a BooleanNet model into tokens.
///
/// Whitespace is skipped and `#` starts a comment which extends to the end of the line.
/// Returns a `Lex` error naming the unconsumed rest of the line if some part of it
/// is not a valid token.
pub fn tokenize_line(line: &str, line_number: usize) -> Result<TokenLine, BooleanNetError> {
    let mut tokens = Vec::new();
    let mut position = 0;
    while position < line.len() {
        let rest = &line[position..];
        let c = match rest.chars().next() {
            Some(c) => c,
            None => break,
        };
        if c == ' ' || c == '\t' {
            position += 1;
            continue;
        }
        if c == '#' {
            break;
        }

        let single = match c {
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            ',' => Some(TokenKind::Comma),
            '*' => Some(TokenKind::Assign),
            '=' => Some(TokenKind::Equal),
            _ => None,
        };

        let (kind, length) = if let Some(kind) = single {
            (kind, 1)
        } else if let Some(m) = RANK.find(rest) {
            (TokenKind::Rank, m.end())
        } else if let Some(m) = NUMBER.find(rest) {
            (TokenKind::Number, m.end())
        } else if let Some(m) = ID.find(rest) {
            let kind = reserved(m.as_str()).unwrap_or(TokenKind::Id);
            (kind, m.end())
        } else {
            return Err(BooleanNetError::Lex {
                line: line.trim().to_string(),
                fragment: rest.to_string(),
            });
        };

        tokens.push(Token {
            kind,
            value: rest[..length].to_string(),
            line: line_number,
            column: position,
        });
        position += length;
    }

    Ok(TokenLine {
        tokens,
        source: line.trim().to_string(),
        line: line_number,
    })
}

/// Tokenize a whole model. Blank lines and comment lines are skipped; the returned
/// lines keep their original (1-based) line numbers.
pub fn tokenize_text(text: &str) -> Result<Vec<TokenLine>, BooleanNetError> {
    let mut result = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let tokens = tokenize_line(line, index + 1)?;
        if !tokens.is_empty() {
            result.push(tokens);
        }
    }
    Ok(result)
}
