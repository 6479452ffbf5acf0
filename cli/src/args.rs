//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use tydl_compiler::CompilerConfig;

/// Compile a TYDL type universe: check every domain and diff every transform
#[derive(Parser, Debug)]
#[command(name = "tydl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Universe file to compile
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Additional include search directory (repeatable, searched in order)
    #[arg(
        short = 'I',
        long = "include",
        value_name = "DIR",
        env = "TYDL_INCLUDE_PATH",
        value_delimiter = ':',
        value_hint = ValueHint::DirPath
    )]
    pub include_dirs: Vec<PathBuf>,

    /// Skip computing transform diffs
    #[arg(long)]
    pub no_transforms: bool,

    /// Print the concrete domains as source text instead of a summary
    #[arg(short, long)]
    pub print: bool,

    /// Enable debug logging (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,
}

impl Cli {
    pub fn compiler_config(&self) -> CompilerConfig {
        CompilerConfig::new()
            .with_include_dirs(self.include_dirs.iter().cloned())
            .with_check_transforms(!self.no_transforms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "tydl", "-I", "lib", "--include", "vendor", "--no-transforms", "-dd", "main.tydl",
        ])
        .unwrap();
        assert_eq!(cli.file, PathBuf::from("main.tydl"));
        assert_eq!(
            cli.include_dirs,
            vec![PathBuf::from("lib"), PathBuf::from("vendor")]
        );
        assert_eq!(cli.debug, 2);
        assert!(!cli.print);

        let config = cli.compiler_config();
        assert!(!config.check_transforms);
        assert_eq!(config.include_dirs, cli.include_dirs);
    }

    #[test]
    fn test_include_list_is_colon_separated() {
        let cli = Cli::try_parse_from(["tydl", "-I", "a:b", "main.tydl"]).unwrap();
        assert_eq!(cli.include_dirs, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert!(cli.compiler_config().check_transforms);
    }

    #[test]
    fn test_file_is_required() {
        assert!(Cli::try_parse_from(["tydl"]).is_err());
    }
}
