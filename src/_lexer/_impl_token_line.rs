use crate::TokenKind::{Assign, Equal, Id, Rank};
use crate::{Token, TokenLine};
use std::fmt::{Display, Error, Formatter};

impl TokenLine {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The trimmed source text of this line, used for error reporting.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The (1-based) line number in the model source.
    pub fn line_number(&self) -> usize {
        self.line
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True if this line is `[rank:] ID * = ...`.
    pub fn is_update(&self) -> bool {
        match self.body_tokens() {
            [id, assign, equal, ..] => id.is(Id) && assign.is(Assign) && equal.is(Equal),
            _ => false,
        }
    }

    /// True if this line assigns an initial value with a plain `=`.
    pub fn is_initializer(&self) -> bool {
        match self.tokens.as_slice() {
            [first, second, ..] => first.is(Id) && second.is(Equal),
            _ => false,
        }
    }

    /// The explicit rank of an update line, if it has one.
    ///
    /// `None` is also returned for a rank marker that does not fit into `u32`,
    /// see `TokenLine::has_rank_marker`.
    pub fn rank(&self) -> Option<u32> {
        self.tokens.first().and_then(|it| it.rank())
    }

    /// True if the first token of this line is a rank marker.
    pub fn has_rank_marker(&self) -> bool {
        self.tokens.first().map_or(false, |it| it.is(Rank))
    }

    /// **(internal)** Tokens after the rank marker (if any).
    fn body_tokens(&self) -> &[Token] {
        if self.has_rank_marker() {
            &self.tokens[1..]
        } else {
            &self.tokens[..]
        }
    }

    /// A copy of this line without the leading rank marker.
    pub fn body(&self) -> TokenLine {
        TokenLine {
            tokens: self.body_tokens().to_vec(),
            source: self.source.clone(),
            line: self.line,
        }
    }

    /// Names of the nodes written by this line.
    ///
    /// For initializers, this is the whole assignment chain (`A = B = True` targets
    /// both `A` and `B`). For updates, it is the node before `*`.
    pub fn targets(&self) -> Vec<&str> {
        let body = self.body_tokens();
        let mut result = Vec::new();
        let mut i = 0;
        while i + 1 < body.len() && body[i].is(Id) {
            if body[i + 1].is(Equal) {
                result.push(body[i].value());
                i += 2;
            } else if body[i + 1].is(Assign) && i + 2 < body.len() && body[i + 2].is(Equal) {
                result.push(body[i].value());
                i += 3;
            } else {
                break;
            }
        }
        result
    }

    /// Names of all nodes that appear anywhere in this line.
    pub fn referenced_nodes(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|it| it.is(Id))
            .map(|it| it.value())
    }

    /// Write the tokens back into a line of source text.
    ///
    /// Comments and the original spacing are lost, but lexing the result produces
    /// the same sequence of tokens.
    pub fn to_line(&self) -> String {
        let values: Vec<&str> = self.tokens.iter().map(|it| it.value()).collect();
        values.join(" ")
    }
}

impl Display for TokenLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.to_line())
    }
}

#[cfg(test)]
mod tests {
    use crate::{tokenize_line, tokenize_text};

    #[test]
    fn classify_lines() {
        let init = tokenize_line("A = B = True", 1).unwrap();
        assert!(init.is_initializer());
        assert!(!init.is_update());
        assert_eq!(vec!["A", "B"], init.targets());
        assert_eq!(None, init.rank());

        let update = tokenize_line("C* = not C", 1).unwrap();
        assert!(update.is_update());
        assert!(!update.is_initializer());
        assert_eq!(vec!["C"], update.targets());

        let ranked = tokenize_line("3: D* = A or B", 1).unwrap();
        assert!(ranked.is_update());
        assert_eq!(Some(3), ranked.rank());
        assert_eq!(vec!["D"], ranked.targets());
        assert_eq!(
            vec!["D", "A", "B"],
            ranked.referenced_nodes().collect::<Vec<_>>()
        );

        let expression = tokenize_line("A and B", 1).unwrap();
        assert!(!expression.is_update());
        assert!(!expression.is_initializer());
        assert!(expression.targets().is_empty());

        // A rank marker alone does not make an update.
        let ranked_init = tokenize_line("1: A = True", 1).unwrap();
        assert!(ranked_init.has_rank_marker());
        assert!(!ranked_init.is_update());
        assert!(!ranked_init.is_initializer());
        assert!(!tokenize_line("A* True", 1).unwrap().is_update());

        // Oversized ranks are still recognized as markers.
        let oversized = tokenize_line("4294967296: A* = B", 1).unwrap();
        assert!(oversized.has_rank_marker());
        assert_eq!(None, oversized.rank());
        assert!(oversized.is_update());
        assert_eq!("A * = B", oversized.body().to_line());
    }

    #[test]
    fn strip_rank() {
        let ranked = tokenize_line("3: D* = A", 4).unwrap();
        let body = ranked.body();
        assert_eq!(None, body.rank());
        assert_eq!(4, body.len());
        assert_eq!("D * = A", body.to_line());
        assert_eq!(4, body.line_number());
        assert_eq!("3: D* = A", body.source());
    }

    #[test]
    fn serialization_is_restartable() {
        let text = "
            A = B = (0.6, 1.0, 0.5)
            1: A* = not (B or Ca2+c) and Random # comment
            IL-2 *= -1
            12:C*=True
        ";
        for line in tokenize_text(text).unwrap() {
            let written = line.to_line();
            let relexed = tokenize_line(&written, line.line_number()).unwrap();
            assert_eq!(line.tokens(), relexed.tokens());
            assert_eq!(written, relexed.to_line());
        }
    }
}
