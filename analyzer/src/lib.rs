//! TYDL Analyzer
//!
//! Semantic checks for concrete type domains: one flat namespace for
//! type and variant tags, resolvable type references, element arity
//! ordering and the emptiness rules for sums and records.

mod checker;
mod error;
mod names;

pub use checker::check_type_domain;
pub use error::{SemanticError, SemanticResult};
pub use names::{NameBinding, NameKind, NameTable};
