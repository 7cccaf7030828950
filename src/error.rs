//! Error types for the Kannada compiler

use crate::span::Span;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KannadaError {
    #[error("Lexer error at {span:?}: {message}")]
    Lexer { message: String, span: Span },

    #[error("Parser error at {span:?}: {message}")]
    Parser { message: String, span: Span },

    #[error("Toolchain error: {message}")]
    Toolchain { message: String },

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KannadaError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        KannadaError::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        KannadaError::Parser {
            message: message.into(),
            span,
        }
    }

    pub fn toolchain(message: impl Into<String>) -> Self {
        KannadaError::Toolchain {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        KannadaError::Config {
            message: message.into(),
        }
    }

    /// Source location, for the errors that have one.
    pub fn span(&self) -> Option<Span> {
        match self {
            KannadaError::Lexer { span, .. } | KannadaError::Parser { span, .. } => Some(*span),
            _ => None,
        }
    }
}

/// Result type for compiler operations
pub type KannadaResult<T> = Result<T, KannadaError>;
