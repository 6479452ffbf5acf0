//! Name table for one domain check.

use std::collections::HashMap;
use tydl_core::SourceLocation;

/// What a name was registered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    BuiltinType,
    UserType,
    Variant,
    Element,
}

impl NameKind {
    /// Whether a type reference may name this.
    pub fn is_type(&self) -> bool {
        matches!(self, NameKind::BuiltinType | NameKind::UserType)
    }
}

/// A registered name.
#[derive(Debug, Clone)]
pub struct NameBinding {
    pub name: String,
    pub kind: NameKind,
    pub location: SourceLocation,
}

impl NameBinding {
    pub fn new(name: impl Into<String>, kind: NameKind, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            kind,
            location,
        }
    }
}

/// Names visible while checking a domain.
///
/// The outermost frame holds the domain namespace (types and variants).
/// A frame is pushed per tuple for its element identifiers.
#[derive(Debug)]
pub struct NameTable {
    frames: Vec<HashMap<String, NameBinding>>,
}

impl NameTable {
    /// Create a table with an empty domain frame.
    pub fn new() -> Self {
        Self {
            frames: vec![HashMap::new()],
        }
    }

    pub fn push(&mut self) {
        self.frames.push(HashMap::new());
    }

    /// Pop the innermost frame. The domain frame is never popped.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Register a name in the innermost frame.
    /// Returns `false` if the name is already registered in that frame.
    pub fn define(&mut self, binding: NameBinding) -> bool {
        let Some(frame) = self.frames.last_mut() else {
            return false;
        };
        if frame.contains_key(&binding.name) {
            return false;
        }
        frame.insert(binding.name.clone(), binding);
        true
    }

    /// Look up a name in the domain frame only.
    pub fn lookup_domain(&self, name: &str) -> Option<&NameBinding> {
        self.frames.first().and_then(|frame| frame.get(name))
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new()
    }
}
