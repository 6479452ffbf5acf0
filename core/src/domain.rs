//! Domains, permutations, transforms and the type universe.

use crate::{DataType, SourceLocation, Tuple, BUILTIN_TYPES};

/// A name written in source, kept with its location so that errors about
/// it can point at it.
#[derive(Debug, Clone)]
pub struct Ident {
    pub name: String,
    pub location: SourceLocation,
}

impl Ident {
    pub fn new(name: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Ident {}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::new(name, SourceLocation::unknown())
    }
}

/// A complete, concrete domain definition.
#[derive(Debug, Clone)]
pub struct TypeDomain {
    pub tag: String,
    pub user_types: Vec<DataType>,
    pub location: SourceLocation,
}

impl TypeDomain {
    pub fn new(
        tag: impl Into<String>,
        user_types: Vec<DataType>,
        location: SourceLocation,
    ) -> Self {
        Self {
            tag: tag.into(),
            user_types,
            location,
        }
    }

    /// Built-ins followed by the user types.
    pub fn types(&self) -> impl Iterator<Item = &DataType> {
        BUILTIN_TYPES.iter().chain(self.user_types.iter())
    }

    /// Find a type (built-in or user) by tag.
    pub fn resolve_type(&self, name: &str) -> Option<&DataType> {
        self.types().find(|t| t.tag() == name)
    }
}

impl PartialEq for TypeDomain {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.user_types == other.user_types
    }
}

impl Eq for TypeDomain {}

/// Alterations of one sum inside a permuted domain.
#[derive(Debug, Clone)]
pub struct PermutedSum {
    pub tag: String,
    pub removed_variants: Vec<Ident>,
    pub added_variants: Vec<Tuple>,
    pub location: SourceLocation,
}

impl PartialEq for PermutedSum {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.removed_variants == other.removed_variants
            && self.added_variants == other.added_variants
    }
}

impl Eq for PermutedSum {}

/// A domain defined as a delta against another domain.
#[derive(Debug, Clone)]
pub struct PermutedDomain {
    pub tag: String,
    pub permutes_domain: String,
    pub excluded_types: Vec<Ident>,
    pub included_types: Vec<DataType>,
    pub permuted_sums: Vec<PermutedSum>,
    pub location: SourceLocation,
}

impl PartialEq for PermutedDomain {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.permutes_domain == other.permutes_domain
            && self.excluded_types == other.excluded_types
            && self.included_types == other.included_types
            && self.permuted_sums == other.permuted_sums
    }
}

impl Eq for PermutedDomain {}

/// A request to diff two domains.
#[derive(Debug, Clone)]
pub struct Transform {
    pub source_domain_tag: String,
    pub destination_domain_tag: String,
    pub location: SourceLocation,
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.source_domain_tag == other.source_domain_tag
            && self.destination_domain_tag == other.destination_domain_tag
    }
}

impl Eq for Transform {}

/// A top-level statement of a type universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    TypeDomain(TypeDomain),
    PermutedDomain(PermutedDomain),
    Transform(Transform),
}

impl Statement {
    pub fn location(&self) -> &SourceLocation {
        match self {
            Statement::TypeDomain(d) => &d.location,
            Statement::PermutedDomain(p) => &p.location,
            Statement::Transform(t) => &t.location,
        }
    }
}

/// Every statement of one compilation, across all included files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeUniverse {
    pub statements: Vec<Statement>,
}

impl TypeUniverse {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn transforms(&self) -> impl Iterator<Item = &Transform> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Transform(t) => Some(t),
            _ => None,
        })
    }
}
