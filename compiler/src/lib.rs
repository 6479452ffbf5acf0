//! TYDL Compiler
//!
//! Turn a type universe into concrete, checked domains.
//!
//! Responsibilities:
//! - Parse the universe, following includes
//! - Materialize permuted domains against earlier domains
//! - Check every domain
//! - Diff the domain pairs named by `transform` statements

mod compiler;
mod config;
mod error;
mod permute;
mod transform;

pub use compiler::{
    compile_file, compile_source, compute_transforms, compute_type_domains, CompiledUniverse,
    Compiler,
};
pub use config::CompilerConfig;
pub use error::{CompileError, CompileResult};
pub use permute::compute_permutation;
pub use transform::compute_transform;
