use crate::rules::RuleTable;
use crate::{BooleanNetError, Mode, State, Token, TokenLine, Value};
use rand::rngs::StdRng;

/// **(internal)** Grammar productions and their semantic actions.
mod _grammar;

/// **(internal)** The two state images a line is evaluated against.
///
/// Expressions in synchronous mode read from `old` while assignments write into `new`.
/// In all other modes there is no separate `old` image and both refer to `new`.
#[derive(Clone, Debug)]
pub(crate) struct Images {
    old: Option<State>,
    new: State,
}

impl Images {
    pub fn new(mode: Mode) -> Images {
        Images {
            old: if mode.is_sync() {
                Some(State::new())
            } else {
                None
            },
            new: State::new(),
        }
    }

    pub fn old(&self) -> &State {
        self.old.as_ref().unwrap_or(&self.new)
    }

    pub fn new_image(&self) -> &State {
        &self.new
    }

    pub fn new_mut(&mut self) -> &mut State {
        &mut self.new
    }

    /// The `old` image, if it is distinct from `new`.
    pub fn old_mut(&mut self) -> Option<&mut State> {
        self.old.as_mut()
    }

    /// Start a new round: the current `new` image becomes the `old` snapshot.
    pub fn advance(&mut self) {
        if let Some(old) = self.old.as_mut() {
            *old = self.new.clone();
        }
    }
}

/// **(internal)** Evaluates `TokenLine`s directly against the state images.
///
/// There is no intermediate syntax tree: every production immediately calls the
/// corresponding hook of the `RuleTable`.
pub(crate) struct Evaluator<'a> {
    mode: Mode,
    rules: &'a RuleTable,
    images: &'a mut Images,
    rng: &'a mut StdRng,
}

/// **(internal)** Position of the evaluator within the line that is being evaluated.
struct Cursor<'a> {
    line: &'a TokenLine,
    position: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        mode: Mode,
        rules: &'a RuleTable,
        images: &'a mut Images,
        rng: &'a mut StdRng,
    ) -> Evaluator<'a> {
        Evaluator {
            mode,
            rules,
            images,
            rng,
        }
    }

    /// Evaluate one statement. The whole line must be consumed.
    pub fn evaluate(&mut self, line: &TokenLine) -> Result<Value, BooleanNetError> {
        let mut cursor = Cursor { line, position: 0 };
        if line.is_empty() {
            return Err(cursor.error());
        }
        let value = self.stmt(&mut cursor)?;
        if cursor.peek().is_some() {
            Err(cursor.error())
        } else {
            Ok(value)
        }
    }
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<&'a Token> {
        self.line.tokens().get(self.position + offset)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.peek();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// A `Parse` error pointing at the current token.
    fn error(&self) -> BooleanNetError {
        BooleanNetError::Parse {
            line: self.line.source().to_string(),
            token: self
                .peek()
                .map(|it| it.to_string())
                .unwrap_or_else(|| "end of line".to_string()),
        }
    }
}
