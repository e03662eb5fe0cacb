//! Error types for the chain front-end.

use thiserror::Error;

/// Errors that can occur while parsing or applying a chain.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChainError {
    /// Lexer error (invalid token).
    #[error("Lexer error at position {position}: {message}")]
    LexerError { position: usize, message: String },

    /// Unexpected token.
    #[error("Unexpected token at position {position}: expected {expected}, found {found}")]
    UnexpectedToken {
        position: usize,
        expected: String,
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// Argument expression that cannot be evaluated.
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// Error raised by the circuit while resolving or binding a segment.
    #[error("Circuit error: {0}")]
    Circuit(#[from] qsv_ir::IrError),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
