//! TYDL Parser
//!
//! This crate turns TYDL source text into a [`tydl_core::TypeUniverse`]:
//! - S-expression reading (symbols, strings, integers, `name::` annotations)
//! - Statement parsing (define, permute_domain, transform)
//! - `include_file` resolution with cycle and diamond handling
//! - Error handling with location information

mod error;
mod include;
mod lexer;
mod parser;
mod sexp;

pub use error::*;
pub use include::{validate_include_path, IncludeResolver};
pub use parser::{parse_type_universe, parse_type_universe_file, Parser};
pub use sexp::{read_sexps, SExp, SExpKind};
