//! Semantic error types.

use thiserror::Error;
use tydl_core::SourceLocation;

/// Errors found while materializing or checking domains.
#[derive(Debug, Error)]
pub enum SemanticError {
    /// The universe contains no statements at all.
    #[error("{location}: type universe is empty")]
    EmptyUniverse { location: SourceLocation },

    #[error("{location}: a domain named '{name}' is already defined")]
    DuplicateTypeDomainName {
        name: String,
        location: SourceLocation,
    },

    /// Type and variant tags share one namespace per domain; element
    /// identifiers and record field tags are unique per tuple.
    #[error("{location}: name '{name}' is already used")]
    NameAlreadyUsed {
        name: String,
        location: SourceLocation,
    },

    #[error("{location}: undefined type '{name}'")]
    UndefinedType {
        name: String,
        location: SourceLocation,
    },

    #[error("{location}: '{name}' is not the name of a type")]
    NotATypeName {
        name: String,
        location: SourceLocation,
    },

    #[error("{location}: required element '{element}' follows a variadic element")]
    RequiredElementAfterVariadic {
        element: String,
        location: SourceLocation,
    },

    #[error("{location}: optional element '{element}' follows a variadic element")]
    OptionalElementAfterVariadic {
        element: String,
        location: SourceLocation,
    },

    #[error("{location}: element '{element}' is a second variadic element")]
    MoreThanOneVariadicElement {
        element: String,
        location: SourceLocation,
    },

    #[error("{location}: element '{element}' is an optional ion, which is not allowed")]
    OptionalIonElement {
        element: String,
        location: SourceLocation,
    },

    #[error("{location}: sum '{tag}' has no variants")]
    EmptySum { tag: String, location: SourceLocation },

    #[error("{location}: record '{tag}' has no elements")]
    EmptyRecord { tag: String, location: SourceLocation },

    #[error("{location}: domain '{domain}' permutes '{base}', which is not defined")]
    DomainPermutesNonExistentDomain {
        domain: String,
        base: String,
        location: SourceLocation,
    },

    #[error("{location}: cannot remove built-in type '{name}'")]
    CannotRemoveBuiltinType {
        name: String,
        location: SourceLocation,
    },

    #[error("{location}: cannot remove type '{name}', it does not exist")]
    CannotRemoveNonExistentType {
        name: String,
        location: SourceLocation,
    },

    #[error("{location}: cannot permute sum '{name}', it does not exist")]
    CannotPermuteNonExistentSum {
        name: String,
        location: SourceLocation,
    },

    #[error("{location}: cannot permute '{name}', it is not a sum")]
    CannotPermuteNonSumType {
        name: String,
        location: SourceLocation,
    },

    #[error("{location}: cannot remove variant '{variant}' from sum '{sum}', it does not exist")]
    CannotRemoveNonExistentSumVariant {
        sum: String,
        variant: String,
        location: SourceLocation,
    },

    #[error("{location}: transform references undefined domain '{name}'")]
    TransformReferencesUndefinedDomain {
        name: String,
        location: SourceLocation,
    },
}

impl SemanticError {
    pub fn name_already_used(name: impl Into<String>, location: &SourceLocation) -> Self {
        Self::NameAlreadyUsed {
            name: name.into(),
            location: location.clone(),
        }
    }

    pub fn undefined_type(name: impl Into<String>, location: &SourceLocation) -> Self {
        Self::UndefinedType {
            name: name.into(),
            location: location.clone(),
        }
    }

    pub fn not_a_type_name(name: impl Into<String>, location: &SourceLocation) -> Self {
        Self::NotATypeName {
            name: name.into(),
            location: location.clone(),
        }
    }

    pub fn undefined_domain(name: impl Into<String>, location: &SourceLocation) -> Self {
        Self::TransformReferencesUndefinedDomain {
            name: name.into(),
            location: location.clone(),
        }
    }

    /// Where the error was detected.
    pub fn location(&self) -> &SourceLocation {
        match self {
            Self::EmptyUniverse { location }
            | Self::DuplicateTypeDomainName { location, .. }
            | Self::NameAlreadyUsed { location, .. }
            | Self::UndefinedType { location, .. }
            | Self::NotATypeName { location, .. }
            | Self::RequiredElementAfterVariadic { location, .. }
            | Self::OptionalElementAfterVariadic { location, .. }
            | Self::MoreThanOneVariadicElement { location, .. }
            | Self::OptionalIonElement { location, .. }
            | Self::EmptySum { location, .. }
            | Self::EmptyRecord { location, .. }
            | Self::DomainPermutesNonExistentDomain { location, .. }
            | Self::CannotRemoveBuiltinType { location, .. }
            | Self::CannotRemoveNonExistentType { location, .. }
            | Self::CannotPermuteNonExistentSum { location, .. }
            | Self::CannotPermuteNonSumType { location, .. }
            | Self::CannotRemoveNonExistentSumVariant { location, .. }
            | Self::TransformReferencesUndefinedDomain { location, .. } => location,
        }
    }
}

/// Result type for semantic operations.
pub type SemanticResult<T> = Result<T, SemanticError>;
