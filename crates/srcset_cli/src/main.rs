//! srcset CLI: resolves source-set topologies into properties files.
//!
//! Provides `srcset resolve` for writing each module's properties file,
//! `srcset check` for verifying the stored files are current, and
//! `srcset show` for printing a module's resolved compilation units.

#![warn(missing_docs)]

mod check;
mod logging;
mod pipeline;
mod resolve;
mod show;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// srcset: source-set resolution for code generators and IDE tooling.
#[derive(Parser, Debug)]
#[command(name = "srcset", version, about = "Source-set resolver")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `srcset.toml` file or the directory containing it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve modules and write their properties files if they changed.
    Resolve(ModuleArgs),
    /// Resolve modules and fail if any stored properties file is out of date.
    Check(ModuleArgs),
    /// Print the resolved compilation units of a module.
    Show(ShowArgs),
}

/// Arguments for commands that operate on a set of modules.
#[derive(Parser, Debug)]
pub struct ModuleArgs {
    /// Modules to process. Defaults to every module in `srcset.toml`.
    pub modules: Vec<String>,
}

/// Arguments for the `srcset show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// The module to show.
    pub module: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ShowFormat::Text)]
    pub format: ShowFormat,
}

/// Output format for `srcset show`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    /// Human-readable listing.
    Text,
    /// The exact properties file encoding.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    logging::init(&global);

    let result = match cli.command {
        Command::Resolve(ref args) => resolve::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
        Command::Show(ref args) => show::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
