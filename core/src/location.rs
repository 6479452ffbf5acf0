//! Source locations.

use std::fmt;
use std::sync::Arc;

/// Where a node was parsed from.
///
/// Locations are metadata: none of the model types compare them in their
/// `PartialEq` implementations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// File the node came from, if it was parsed from a file.
    pub file: Option<Arc<str>>,
    /// 1-based line; 0 when unknown.
    pub line: usize,
    /// 1-based column; 0 when unknown.
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    pub fn in_file(file: Option<Arc<str>>, line: usize, column: usize) -> Self {
        Self { file, line, column }
    }

    /// A location for nodes that were synthesized rather than parsed.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_known(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.is_known()) {
            (Some(file), true) => write!(f, "{}:{}:{}", file, self.line, self.column),
            (Some(file), false) => write!(f, "{}", file),
            (None, true) => write!(f, "{}:{}", self.line, self.column),
            (None, false) => write!(f, "<unknown location>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_file() {
        let loc = SourceLocation::in_file(Some(Arc::from("toy.tydl")), 3, 7);
        assert_eq!(loc.to_string(), "toy.tydl:3:7");
    }

    #[test]
    fn test_display_without_file() {
        assert_eq!(SourceLocation::new(1, 2).to_string(), "1:2");
        assert_eq!(SourceLocation::unknown().to_string(), "<unknown location>");
    }
}
