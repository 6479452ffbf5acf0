//! Compiler error types.

use thiserror::Error;
use tydl_analyzer::SemanticError;
use tydl_core::SourceLocation;
use tydl_parser::ParseError;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Parse error from the parser.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Semantic error from domain materialization, checking or diffing.
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

impl CompileError {
    pub fn location(&self) -> &SourceLocation {
        match self {
            CompileError::Parse(e) => e.location(),
            CompileError::Semantic(e) => e.location(),
        }
    }
}

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;
