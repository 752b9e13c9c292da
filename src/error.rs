//! Errors raised while loading, initializing or simulating a model.
//!
//! None of these are recovered internally. The operation that raised the error is
//! aborted and the error carries enough context (line text, token or node names)
//! to fix the model source.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BooleanNetError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum BooleanNetError {
    #[error("Lexer error in `{line}` at `{fragment}`.")]
    Lex { line: String, fragment: String },

    #[error("Syntax error in `{line}` at {token}.")]
    Parse { line: String, token: String },

    #[error("Node names differ only in capitalization: {0:?}.")]
    NameCollision(Vec<String>),

    #[error("Uninitialized nodes: {0:?}.")]
    UninitializedNodes(Vec<String>),

    #[error("Mode must be one of `plde`, `sync`, `async`, `rank`, `time`, found `{0}`.")]
    InvalidMode(String),

    #[error("Node `{name}` has no value when evaluating `{line}`.")]
    UnknownNode { line: String, name: String },

    #[error("Nodes are turned both on and off: {0:?}.")]
    ConflictingModification(Vec<String>),

    #[error("Model must be initialized before it can be simulated.")]
    NotInitialized,
}
