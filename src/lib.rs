//! A simulator for Boolean regulatory networks written in the BooleanNet text format.
//!
//! A model is a list of lines. Initializer lines (`A = B = True`) assign initial values,
//! update lines (`2: C* = A and not B`) describe how a node evolves. The optional numeric
//! prefix is a *rank*: lines of a lower rank are applied before lines of a higher rank
//! within one simulation round.
//!
//! ```rust
//! use biodivine_lib_booleannet::Model;
//!
//! let text = "
//!     A = True
//!     B = False
//!     A* = B
//!     B* = A
//! ";
//! let mut model = Model::with_seed("sync", text, 0).unwrap();
//! model.initialize().unwrap();
//! model.iterate_shuffled(2).unwrap();
//! // Synchronous updates swap the two values every round.
//! assert_eq!(model.states()[1].get_bool("A"), Some(false));
//! assert_eq!(model.states()[2].get_bool("A"), Some(true));
//! ```
//!
//! The same grammar drives all update disciplines. What changes between them is the
//! image of the state that expressions read from, whether ranks are respected, and the
//! [orderers::LineOrderer] used to schedule lines of one rank. Operators are dispatched
//! through a [rules::RuleTable], which is how the continuous (`plde`) mode substitutes
//! threshold triples for plain Booleans.

use rand::rngs::StdRng;
use std::collections::BTreeMap;

pub mod classifier;
pub mod error;
pub mod orderers;
pub mod rules;
pub mod trajectory;
pub mod util;

/// **(internal)** Combined parser and evaluator of a single `TokenLine`.
mod _evaluator;
/// **(internal)** Parsing and properties of `Mode` tags.
mod _impl_mode;
/// **(internal)** Initialization and simulation of a `Model`.
mod _impl_model;
/// **(internal)** Utility methods for `State`.
mod _impl_state;
/// **(internal)** Conversions between Boolean and triple `Value`s.
mod _impl_value;
/// **(internal)** Regex based lexer producing `TokenLine`s.
mod _lexer;

pub use _lexer::{tokenize_line, tokenize_text};
pub use error::{BooleanNetError, Result};

/// One of the supported update disciplines.
///
/// Ranks are respected only by `Rank` and `Time`. Expressions read the pre-round
/// state only in `Sync`. `Plde` represents values as threshold triples.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
    Plde,
    Sync,
    Async,
    Rank,
    Time,
}

/// A `(concentration, decay, threshold)` triple used by the continuous mode.
///
/// The Boolean interpretation of a triple is `concentration > threshold / decay`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triple {
    pub concentration: f64,
    pub decay: f64,
    pub threshold: f64,
}

/// Value of a single network node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Triple(Triple),
}

/// Possible token types occurring in a line of a BooleanNet model.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    Rank,   // '12:'
    Id,     // 'name'
    State,  // 'True', 'False', 'Random'
    Assign, // '*'
    Equal,  // '='
    And,    // 'and'
    Or,     // 'or'
    Not,    // 'not'
    Number, // '-0.5'
    LParen, // '('
    RParen, // ')'
    Comma,  // ','
}

/// A single lexed token together with its position in the model source.
///
/// The `value` is the exact source text of the token, so a sequence of tokens can be
/// written back into a line that lexes into the same sequence.
#[derive(Clone, Debug)]
pub struct Token {
    kind: TokenKind,
    value: String,
    line: usize,
    column: usize,
}

/// The tokens of one non-empty source line.
///
/// A line is either an *initializer* (`A = B = True`) or an *update*
/// (`[rank:] A* = expression`).
#[derive(Clone, Debug)]
pub struct TokenLine {
    tokens: Vec<Token>,
    source: String,
    line: usize,
}

/// A snapshot of node values, ordered by node name.
///
/// Cloning a `State` produces an independent successor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct State {
    values: BTreeMap<String, Value>,
}

/// A loaded BooleanNet model together with its simulation state.
///
/// The source is lexed and classified once in the constructor. `initialize` evaluates
/// the initializer lines and `iterate` appends one `State` per round to the trajectory.
pub struct Model {
    mode: Mode,
    rules: rules::RuleTable,
    rng: StdRng,
    classes: classifier::LineClasses,
    schedule: Vec<(u32, Vec<TokenLine>)>,
    images: Option<_evaluator::Images>,
    states: Vec<State>,
}
