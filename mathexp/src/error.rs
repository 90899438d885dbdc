//! Error type shared by every fallible operation of the crate.

use strum::Display;
use thiserror::Error;

use crate::exp::ExpType;

/// Rewrite operation that a node kind may not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Operation {
    #[strum(serialize = "equivalent")]
    Equivalent,
    #[strum(serialize = "replace")]
    Replace,
}

#[derive(Debug, Error)]
pub enum ExpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file '{file}': {source}")]
    ConfigParse {
        source: toml::de::Error,
        file: String,
    },

    #[error("Failed during serialization of configuration to path `{path}`: {message}")]
    ConfigSerialize { path: String, message: String },

    #[error("Operation `{operation}` is not supported for expressions of kind `{kind}`")]
    Unsupported { operation: Operation, kind: ExpType },

    #[error(
        "An alternative expression requires an otherwise-branch (an item without a test), found none"
    )]
    MissingOtherwise,

    #[error("A `{kind}` requires at least one segment")]
    EmptyChain { kind: ExpType },

    #[error("A tuple expression requires at least 2 fields, found {found}")]
    TupleArity { found: usize },

    #[error("Tuple field index {index} is out of bounds for a tuple of size {size}")]
    TupleFieldOutOfBounds { index: usize, size: usize },

    #[error("Sub-expression index {index} is out of bounds for `{kind}` with {len} children")]
    SubExpressionIndex {
        kind: ExpType,
        index: usize,
        len: usize,
    },

    #[error("Child {index} of `{kind}` must be a `{expected}`, found `{found}`")]
    InvalidChild {
        kind: ExpType,
        index: usize,
        expected: ExpType,
        found: ExpType,
    },

    #[error("Cannot assign an absent math type to a `{kind}` expression")]
    NullMathType { kind: ExpType },

    #[error("A lambda expression must be typed by a function type, found `{found}`")]
    NotAFunctionType { found: String },
}

pub type ExpResult<T> = Result<T, ExpError>;
