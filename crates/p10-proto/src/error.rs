//! Wire-level parse and encode errors.

use thiserror::Error;

use crate::numeric::NumericError;

/// Errors that can occur while parsing or encoding a single IRC line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("line exceeds the 512-byte limit ({0} bytes)")]
    OversizeLine(usize),

    #[error("empty line")]
    EmptyLine,

    #[error("line is missing a command verb")]
    MissingCommand,

    #[error("unknown command token: {0:?}")]
    UnknownCommand(String),

    #[error("command {command:?} expected at least {expected} parameters, got {got}")]
    NotEnoughParams {
        command: String,
        expected: usize,
        got: usize,
    },

    #[error("malformed prefix: {0:?}")]
    MalformedPrefix(String),

    #[error("malformed line: {0:?}")]
    MalformedLine(String),

    #[error(transparent)]
    Numeric(#[from] NumericError),

    #[error("parameter {0:?} is not valid UTF-8")]
    InvalidUtf8(String),

    #[error("invalid numeric reply code: {0:?}")]
    InvalidNumeric(String),
}
