//! Parser error types.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tydl_core::SourceLocation;

/// Errors that can occur while reading and parsing a type universe.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Malformed s-expression text.
    #[error("{location}: syntax error: {message}")]
    Syntax {
        message: String,
        location: SourceLocation,
    },

    #[error("{location}: invalid top-level tag '{tag}', expected define, transform or include_file")]
    InvalidTopLevelTag {
        tag: String,
        location: SourceLocation,
    },

    #[error("{location}: '{tag}' expects {expected} argument(s), got {actual}")]
    InvalidArityForTag {
        tag: String,
        expected: usize,
        actual: usize,
        location: SourceLocation,
    },

    #[error("{location}: unknown {context} constructor '{tag}'")]
    UnknownConstructor {
        tag: String,
        context: &'static str,
        location: SourceLocation,
    },

    #[error("{location}: expected '?' or '*' as type reference arity tag, found '{found}'")]
    ExpectedTypeReferenceArityTag {
        found: String,
        location: SourceLocation,
    },

    #[error("{location}: record elements must have the form (tag type)")]
    InvalidRecordElement { location: SourceLocation },

    #[error("{location}: expected a symbol, found {found}")]
    ExpectedSymbol {
        found: &'static str,
        location: SourceLocation,
    },

    #[error("{location}: expected an s-expression, found {found}")]
    ExpectedSexp {
        found: &'static str,
        location: SourceLocation,
    },

    #[error("{location}: expected a symbol or an s-expression, found {found}")]
    ExpectedSymbolOrSexp {
        found: &'static str,
        location: SourceLocation,
    },

    #[error("{location}: expected a string, found {found}")]
    ExpectedString {
        found: &'static str,
        location: SourceLocation,
    },

    #[error("{location}: expected an integer, found {found}")]
    ExpectedInteger {
        found: &'static str,
        location: SourceLocation,
    },

    #[error("{location}: minimum arity must be a non-negative 32-bit integer, found {value}")]
    InvalidMinimumArity {
        value: i64,
        location: SourceLocation,
    },

    #[error("{location}: product element is missing its identifier annotation")]
    MissingElementIdentifier { location: SourceLocation },

    #[error("{location}: element has more than one identifier annotation")]
    MultipleElementIdentifiers { location: SourceLocation },

    #[error("{location}: include file '{path}' not found, searched: {}", join_paths(.searched))]
    IncludeFileNotFound {
        path: String,
        searched: Vec<PathBuf>,
        location: SourceLocation,
    },

    #[error("{location}: invalid include path '{path}': only relative paths of [A-Za-z0-9_.-] segments without '.' or '..' are allowed")]
    InvalidIncludePath {
        path: String,
        location: SourceLocation,
    },

    #[error("{location}: cannot read '{}': {message}", .path.display())]
    Io {
        path: PathBuf,
        message: String,
        location: SourceLocation,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::Syntax {
            message: message.into(),
            location,
        }
    }

    pub fn invalid_arity(
        tag: impl Into<String>,
        expected: usize,
        actual: usize,
        location: SourceLocation,
    ) -> Self {
        Self::InvalidArityForTag {
            tag: tag.into(),
            expected,
            actual,
            location,
        }
    }

    pub fn unknown_constructor(
        tag: impl Into<String>,
        context: &'static str,
        location: SourceLocation,
    ) -> Self {
        Self::UnknownConstructor {
            tag: tag.into(),
            context,
            location,
        }
    }

    pub fn io(path: &Path, err: std::io::Error, location: SourceLocation) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
            location,
        }
    }

    /// Where the error was detected.
    pub fn location(&self) -> &SourceLocation {
        match self {
            Self::Syntax { location, .. }
            | Self::InvalidTopLevelTag { location, .. }
            | Self::InvalidArityForTag { location, .. }
            | Self::UnknownConstructor { location, .. }
            | Self::ExpectedTypeReferenceArityTag { location, .. }
            | Self::InvalidRecordElement { location }
            | Self::ExpectedSymbol { location, .. }
            | Self::ExpectedSexp { location, .. }
            | Self::ExpectedSymbolOrSexp { location, .. }
            | Self::ExpectedString { location, .. }
            | Self::ExpectedInteger { location, .. }
            | Self::InvalidMinimumArity { location, .. }
            | Self::MissingElementIdentifier { location }
            | Self::MultipleElementIdentifiers { location }
            | Self::IncludeFileNotFound { location, .. }
            | Self::InvalidIncludePath { location, .. }
            | Self::Io { location, .. } => location,
        }
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_carries_location() {
        let err = ParseError::invalid_arity("define", 2, 1, SourceLocation::new(4, 1));
        assert_eq!(err.to_string(), "4:1: 'define' expects 2 argument(s), got 1");
        assert_eq!(err.location().line, 4);
    }

    #[test]
    fn test_not_found_lists_every_candidate() {
        let err = ParseError::IncludeFileNotFound {
            path: "common.tydl".into(),
            searched: vec![PathBuf::from("a/common.tydl"), PathBuf::from("b/common.tydl")],
            location: SourceLocation::new(1, 1),
        };
        let message = err.to_string();
        assert!(message.contains("a/common.tydl"), "message was: {}", message);
        assert!(message.contains("b/common.tydl"), "message was: {}", message);
    }
}
