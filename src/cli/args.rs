//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `analyze`: Build the component graph and write it to every output
//! - `init`: Initialize a uigraph configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        matches!(&self.command, Some(Command::Analyze(args)) if args.verbose)
    }

    pub fn quiet(&self) -> bool {
        matches!(&self.command, Some(Command::Analyze(args)) if args.quiet)
    }
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Source code root directory
    #[arg(long, env = "UIGRAPH_SOURCE_ROOT")]
    pub source_root: Option<PathBuf>,

    /// Output file (replaces configured outputs, repeatable)
    #[arg(short, long)]
    pub output: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze the source tree and write the component graph
    Analyze(AnalyzeArgs),
    /// Initialize a new .uigraphrc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_with_outputs() {
        let args = Arguments::try_parse_from([
            "uigraph",
            "analyze",
            "--source-root",
            "web",
            "-o",
            "a.json",
            "--output",
            "b.json",
            "-v",
        ])
        .unwrap();

        let Some(Command::Analyze(analyze)) = &args.command else {
            panic!("expected analyze command");
        };
        assert_eq!(analyze.source_root, Some(PathBuf::from("web")));
        assert_eq!(
            analyze.output,
            vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
        );
        assert!(args.verbose());
        assert!(!args.quiet());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Arguments::try_parse_from(["uigraph", "analyze", "-v", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_init_has_no_log_flags() {
        let args = Arguments::try_parse_from(["uigraph", "init"]).unwrap();
        assert!(matches!(args.command, Some(Command::Init)));
        assert!(!args.verbose());
    }
}
