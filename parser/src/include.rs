//! Include-file resolution and cycle handling.
//!
//! One [`IncludeResolver`] is created per compilation and threaded through
//! every recursive parse. It remembers the canonical path of each file that
//! has been parsed so that a file reached a second time (through a cycle or
//! a diamond of includes) contributes nothing.

use crate::{ParseError, ParseResult};
use regex_lite::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, trace};
use tydl_core::SourceLocation;

/// Segments of `[A-Za-z0-9_.-]`, separated by `/`, optionally rooted.
fn include_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^/?[A-Za-z0-9_.-]+(/[A-Za-z0-9_.-]+)*$")
            .expect("include path pattern should compile")
    })
}

/// Check the literal of an `include_file` form and return it without any
/// leading `/`.
pub fn validate_include_path<'p>(path: &'p str, location: &SourceLocation) -> ParseResult<&'p str> {
    let relative = path.strip_prefix('/').unwrap_or(path);
    let valid = include_path_pattern().is_match(path)
        && relative.split('/').all(|segment| segment != "." && segment != "..");
    if valid {
        Ok(relative)
    } else {
        Err(ParseError::InvalidIncludePath {
            path: path.to_string(),
            location: location.clone(),
        })
    }
}

/// Tracks which files have been parsed and where to look for new ones.
#[derive(Debug, Default)]
pub struct IncludeResolver {
    search_dirs: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl IncludeResolver {
    /// Create a resolver that searches `search_dirs`, in order, after the
    /// includer's own directory.
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self {
            search_dirs,
            seen: HashSet::new(),
        }
    }

    /// Record `path` as parsed. Returns `false` if it already was.
    ///
    /// `path` must be canonical; every path returned by [`resolve`] is.
    ///
    /// [`resolve`]: IncludeResolver::resolve
    pub fn mark_seen(&mut self, path: PathBuf) -> bool {
        self.seen.insert(path)
    }

    pub fn is_seen(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    /// Find the file named by an `include_file` literal.
    ///
    /// Candidates are `includer_dir/path` followed by `dir/path` for every
    /// search directory. The first existing file wins and is returned in
    /// canonical form.
    pub fn resolve(
        &self,
        path: &str,
        includer_dir: &Path,
        location: &SourceLocation,
    ) -> ParseResult<PathBuf> {
        let relative = validate_include_path(path, location)?;

        let candidates: Vec<PathBuf> = std::iter::once(includer_dir)
            .chain(self.search_dirs.iter().map(PathBuf::as_path))
            .map(|dir| dir.join(relative))
            .collect();

        for candidate in &candidates {
            trace!(candidate = %candidate.display(), "probing include candidate");
            if candidate.is_file() {
                let canonical = candidate
                    .canonicalize()
                    .map_err(|e| ParseError::io(candidate, e, location.clone()))?;
                debug!(include = path, resolved = %canonical.display(), "resolved include");
                return Ok(canonical);
            }
        }

        Err(ParseError::IncludeFileNotFound {
            path: path.to_string(),
            searched: candidates,
            location: location.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    #[test]
    fn test_valid_paths() {
        assert_eq!(validate_include_path("a.tydl", &loc()).unwrap(), "a.tydl");
        assert_eq!(validate_include_path("dir/a-b_c.tydl", &loc()).unwrap(), "dir/a-b_c.tydl");
        assert_eq!(validate_include_path("/lib/a.tydl", &loc()).unwrap(), "lib/a.tydl");
    }

    #[test]
    fn test_invalid_paths() {
        for path in ["../a.tydl", "a/../b.tydl", "./a.tydl", "a//b", "a b", "a\\b", "", "dir/"] {
            let err = validate_include_path(path, &loc()).unwrap_err();
            assert!(
                matches!(err, ParseError::InvalidIncludePath { .. }),
                "{:?} should be rejected",
                path
            );
        }
    }

    #[test]
    fn test_includer_directory_wins() {
        let includer = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        fs::write(includer.path().join("common.tydl"), "").unwrap();
        fs::write(root.path().join("common.tydl"), "").unwrap();

        let resolver = IncludeResolver::new(vec![root.path().to_path_buf()]);
        let resolved = resolver
            .resolve("common.tydl", includer.path(), &loc())
            .unwrap();
        assert_eq!(
            resolved,
            includer.path().join("common.tydl").canonicalize().unwrap()
        );
    }

    #[test]
    fn test_search_dirs_in_order() {
        let includer = tempfile::tempdir().unwrap();
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(first.path().join("common.tydl"), "").unwrap();
        fs::write(second.path().join("common.tydl"), "").unwrap();

        let resolver = IncludeResolver::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        let resolved = resolver
            .resolve("/common.tydl", includer.path(), &loc())
            .unwrap();
        assert_eq!(
            resolved,
            first.path().join("common.tydl").canonicalize().unwrap()
        );
    }

    #[test]
    fn test_not_found_lists_candidates() {
        let includer = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        let resolver = IncludeResolver::new(vec![root.path().to_path_buf()]);

        match resolver.resolve("missing.tydl", includer.path(), &loc()) {
            Err(ParseError::IncludeFileNotFound { searched, .. }) => {
                assert_eq!(
                    searched,
                    vec![
                        includer.path().join("missing.tydl"),
                        root.path().join("missing.tydl"),
                    ]
                );
            }
            other => panic!("Expected IncludeFileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_mark_seen() {
        let mut resolver = IncludeResolver::default();
        assert!(resolver.mark_seen(PathBuf::from("/x/a.tydl")));
        assert!(!resolver.mark_seen(PathBuf::from("/x/a.tydl")));
        assert!(resolver.is_seen(Path::new("/x/a.tydl")));
    }
}
