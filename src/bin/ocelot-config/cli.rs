//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Resolve the Ocelot build configuration
#[derive(Parser)]
#[command(name = "ocelot-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project source tree (defaults to the current directory)
    #[arg(long, global = true, env = "OCELOT_SOURCE_ROOT", value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and print the full build configuration
    Resolve(ResolveArgs),

    /// Show the composed compile and link flags
    Flags(FlagsArgs),

    /// Show dependency locations and LLVM availability
    Deps(ConfigArgs),

    /// Print the project version
    Version,

    /// List recognized build options with their defaults and values
    Options(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Build options and targets, as given to the build driver.
#[derive(Args, Clone, Default)]
pub struct ConfigArgs {
    /// `KEY=VALUE` option assignments and build targets (e.g. `install`)
    #[arg(value_name = "KEY=VALUE|TARGET")]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print the configuration as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Only show compile flags
    #[arg(long, conflicts_with = "link")]
    pub compile: bool,

    /// Only show link flags
    #[arg(long)]
    pub link: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
