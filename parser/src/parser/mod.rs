//! Parser for type universe source text.
//!
//! This module is organized into submodules by parsing category:
//! - `universe`: top-level forms (define, transform, include_file) and
//!   permuted domains
//! - `types`: type declarations, elements and type references
//!
//! Parsing runs on the s-expression values produced by [`crate::sexp`].

mod types;
mod universe;

use crate::error::{ParseError, ParseResult};
use crate::include::IncludeResolver;
use crate::sexp::{read_sexps, SExp, SExpKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, instrument};
use tydl_core::{SourceLocation, TypeUniverse};

// ==================== PARSER STATE ====================

/// Parser state for one source file.
///
/// `include_file` forms are resolved against `base_dir` and the resolver's
/// search directories, and parsed recursively with a parser of their own
/// that shares the resolver.
pub struct Parser<'r> {
    resolver: &'r mut IncludeResolver,
    base_dir: PathBuf,
    file: Option<Arc<str>>,
}

impl<'r> Parser<'r> {
    /// Create a parser for text that lives in `base_dir`, optionally naming
    /// the file it came from for error locations.
    pub fn new(
        resolver: &'r mut IncludeResolver,
        base_dir: impl Into<PathBuf>,
        file: Option<Arc<str>>,
    ) -> Self {
        Self {
            resolver,
            base_dir: base_dir.into(),
            file,
        }
    }

    /// Parse all top-level forms of `source`, following includes.
    pub fn parse(&mut self, source: &str) -> ParseResult<TypeUniverse> {
        let values = read_sexps(source, self.file.clone())?;
        let mut statements = Vec::new();
        for value in &values {
            statements.extend(self.parse_top_level(value)?);
        }
        Ok(TypeUniverse::new(statements))
    }

    /// Read and parse an already resolved, canonical file.
    #[instrument(level = "debug", skip(self))]
    pub(crate) fn parse_included_file(
        &mut self,
        path: &Path,
        location: &SourceLocation,
    ) -> ParseResult<TypeUniverse> {
        let source =
            std::fs::read_to_string(path).map_err(|e| ParseError::io(path, e, location.clone()))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let file: Arc<str> = Arc::from(path.display().to_string());
        Parser::new(&mut *self.resolver, base_dir, Some(file)).parse(&source)
    }
}

// ==================== SHAPE HELPERS ====================

pub(crate) fn expect_symbol(value: &SExp) -> ParseResult<&str> {
    value.as_symbol().ok_or_else(|| ParseError::ExpectedSymbol {
        found: value.kind_name(),
        location: value.location.clone(),
    })
}

pub(crate) fn expect_list(value: &SExp) -> ParseResult<&[SExp]> {
    value.as_list().ok_or_else(|| ParseError::ExpectedSexp {
        found: value.kind_name(),
        location: value.location.clone(),
    })
}

pub(crate) fn expect_string(value: &SExp) -> ParseResult<&str> {
    match &value.kind {
        SExpKind::String(s) => Ok(s),
        _ => Err(ParseError::ExpectedString {
            found: value.kind_name(),
            location: value.location.clone(),
        }),
    }
}

/// Split `(tag arg*)` into its tag and arguments.
pub(crate) fn expect_tagged(value: &SExp) -> ParseResult<(&str, &[SExp])> {
    let items = expect_list(value)?;
    match items.split_first() {
        Some((head, args)) => Ok((expect_symbol(head)?, args)),
        None => Err(ParseError::ExpectedSymbol {
            found: value.kind_name(),
            location: value.location.clone(),
        }),
    }
}

/// First argument of `(tag first rest*)`, or an error located at the form.
pub(crate) fn expect_first<'s>(
    tag: &str,
    args: &'s [SExp],
    location: &SourceLocation,
) -> ParseResult<(&'s SExp, &'s [SExp])> {
    args.split_first()
        .ok_or_else(|| ParseError::invalid_arity(tag, 1, 0, location.clone()))
}

pub(crate) fn require_arity(
    tag: &str,
    args: &[SExp],
    expected: usize,
    location: &SourceLocation,
) -> ParseResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ParseError::invalid_arity(
            tag,
            expected,
            args.len(),
            location.clone(),
        ))
    }
}

// ==================== PUBLIC API ====================

/// Parse a type universe held in memory. Includes are resolved against the
/// current directory, then `search_dirs`.
pub fn parse_type_universe(source: &str, search_dirs: &[PathBuf]) -> ParseResult<TypeUniverse> {
    let mut resolver = IncludeResolver::new(search_dirs.to_vec());
    Parser::new(&mut resolver, PathBuf::from("."), None).parse(source)
}

/// Parse the type universe rooted at `path`. Includes are resolved against
/// the including file's directory, then `search_dirs`.
#[instrument(level = "debug", skip(search_dirs))]
pub fn parse_type_universe_file(path: &Path, search_dirs: &[PathBuf]) -> ParseResult<TypeUniverse> {
    let location = SourceLocation::in_file(Some(Arc::from(path.display().to_string())), 0, 0);
    let canonical = path
        .canonicalize()
        .map_err(|e| ParseError::io(path, e, location.clone()))?;

    let mut resolver = IncludeResolver::new(search_dirs.to_vec());
    resolver.mark_seen(canonical.clone());
    let universe = Parser::new(&mut resolver, PathBuf::new(), None)
        .parse_included_file(&canonical, &location)?;
    debug!(statements = universe.statements.len(), "parsed type universe");
    Ok(universe)
}

// ==================== TESTS ====================
