//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "memdump")]
#[command(about = "Compare and flatten ADDRESS:HEXBYTES memory dumps", long_about = None)]
pub struct Cli {
    /// Config file (defaults to <config dir>/memdump/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Diff a reference dump against one or more test dumps
    #[command(visible_alias = "diff")]
    Compare {
        /// Reference dump followed by test dumps (.bin files are read raw)
        files: Vec<PathBuf>,

        /// Memory buffer size in bytes (e.g. 65536 or 0x10000)
        #[arg(long, value_parser = parse_size)]
        memory_size: Option<usize>,

        /// Also report a differing run that reaches the last compared byte
        #[arg(long)]
        flush_trailing: bool,

        /// Print a `== reference vs test ==` line before each test image
        #[arg(long)]
        headers: bool,
    },

    /// Concatenate dump payloads into a single binary file
    #[command(visible_alias = "cat")]
    Concat {
        /// Output file followed by one or more input dumps
        #[arg(value_name = "FILE")]
        paths: Vec<PathBuf>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Default compare inputs, reference first (comma separated)
        #[arg(long, value_delimiter = ',')]
        inputs: Option<Vec<PathBuf>>,

        /// Default memory buffer size
        #[arg(long, value_parser = parse_size)]
        memory_size: Option<usize>,

        /// Report trailing differing runs by default
        #[arg(long)]
        flush_trailing: Option<bool>,

        /// Print per-image header lines by default
        #[arg(long)]
        headers: Option<bool>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

/// Parse a hex (`0x` prefixed) or decimal size, bounded by `MAX_MEMORY_SIZE`
fn parse_size(value: &str) -> Result<usize, String> {
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(digits) => usize::from_str_radix(digits, 16),
        None => value.parse::<usize>(),
    };

    match parsed {
        Ok(size) => memdump::check_memory_size(size).map_err(|e| e.to_string()),
        Err(e) => Err(format!("invalid size {value:?}: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("65536"), Ok(0x10000));
        assert_eq!(parse_size("0x8000"), Ok(0x8000));
        assert_eq!(parse_size("0x1000000"), Ok(memdump::MAX_MEMORY_SIZE));
        assert!(parse_size("0").is_err());
        assert!(parse_size("big").is_err());
        assert!(parse_size("0x1000001").is_err());
    }

    #[test]
    fn test_huge_memory_size_rejected() {
        let result = Cli::try_parse_from([
            "memdump",
            "compare",
            "--memory-size",
            "0xFFFFFFFFFFFFFFFF",
            "ref.txt",
            "test.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_compare_args() {
        let cli = Cli::try_parse_from([
            "memdump",
            "compare",
            "--memory-size",
            "0x100",
            "--flush-trailing",
            "ref.txt",
            "test.txt",
        ])
        .unwrap();

        match cli.command {
            Commands::Compare {
                files,
                memory_size,
                flush_trailing,
                headers,
            } => {
                assert_eq!(files, vec![PathBuf::from("ref.txt"), PathBuf::from("test.txt")]);
                assert_eq!(memory_size, Some(0x100));
                assert!(flush_trailing);
                assert!(!headers);
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_concat_accepts_missing_paths() {
        // Argument count is checked by the handler so it can print its own usage
        let cli = Cli::try_parse_from(["memdump", "concat"]).unwrap();
        assert!(matches!(cli.command, Commands::Concat { paths } if paths.is_empty()));
    }

    #[test]
    fn test_configure_inputs_list() {
        let cli = Cli::try_parse_from([
            "memdump",
            "-v",
            "configure",
            "--inputs",
            "reference.txt,memory_00.txt",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Configure { inputs, .. } => {
                assert_eq!(inputs.unwrap().len(), 2);
            }
            _ => panic!("expected configure"),
        }
    }
}
