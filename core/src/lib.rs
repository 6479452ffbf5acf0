//! TYDL Core Types
//!
//! This crate provides the domain model shared by every other TYDL crate:
//! - Source locations attached to parsed nodes
//! - Type references and arities
//! - Data types (built-ins, products, records, sums)
//! - Domains, permutations, transforms and the type universe
//! - Rendering of the model back to source text

mod domain;
mod location;
mod render;
mod types;

pub use domain::*;
pub use location::*;
pub use types::*;
