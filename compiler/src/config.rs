//! Configuration for compilation

use std::path::PathBuf;

/// Configuration for compilation
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Search roots for `include_file`, tried in order after the including
    /// file's own directory
    pub include_dirs: Vec<PathBuf>,
    /// Compute the domain diff of every `transform` statement
    pub check_transforms: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            include_dirs: Vec::new(),
            check_transforms: true,
        }
    }
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dirs.push(dir.into());
        self
    }

    pub fn with_include_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.include_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    pub fn with_check_transforms(mut self, check: bool) -> Self {
        self.check_transforms = check;
        self
    }
}
