use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Output verbosity selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// Default tracing level for this verbosity.
    pub fn to_log_level(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "debug",
        }
    }

    pub fn as_level(self) -> u8 {
        match self {
            Verbosity::Quiet => 0,
            Verbosity::Normal => 1,
            Verbosity::Verbose => 2,
        }
    }
}

#[derive(Parser)]
#[command(name = "check-sourcemaps")]
#[command(
    about = "Build the runtime and verify its source maps",
    long_about = "Builds the core runtime with full source maps, then checks that each map \
                  has a valid sourceRoot, only references files that exist, and maps its \
                  first line of code back to the expected original source."
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub check: CheckArgs,

    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Skip the build step and check the maps already on disk
    #[arg(long)]
    pub nobuild: bool,

    /// Verify every source map even after one fails
    #[arg(long)]
    pub keep_going: bool,

    /// Configuration file (default: .sourcemap-check.toml in the current directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Working tree that map and source paths are resolved against
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
