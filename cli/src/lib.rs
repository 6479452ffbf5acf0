//! TYDL command line interface.
//!
//! - `args`: clap argument definitions
//! - `format`: summary and source output for compiled universes

mod args;
mod format;

pub use args::Cli;
pub use format::{format_domains, format_summary};

use tracing::debug;
use tydl_compiler::{compile_file, CompileResult};

/// Compile the file named on the command line and render the output.
pub fn run(cli: &Cli) -> CompileResult<String> {
    let config = cli.compiler_config();
    debug!(?config, file = %cli.file.display(), "compiling");
    let compiled = compile_file(&cli.file, &config)?;
    Ok(if cli.print {
        format_domains(&compiled)
    } else {
        format_summary(&compiled)
    })
}
