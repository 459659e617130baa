#![warn(clippy::pedantic)]

//! # nativenv
//!
//! Command line front end of the native toolchain environment resolver.
//! It discovers the compiler suite, the platform SDK and the companion tools,
//! and either prints the resulting environment or runs a program inside it.
//!
//! ## Subcommands
//!
//! - `env` - Print the resolved environment
//! - `exec` - Run a program with the resolved environment applied
//! - `doctor` - Run each discovery step and report its outcome
//! - `version` - Display version information
//!
//! ## Examples
//!
//! Open a shell with the compiler on PATH:
//! ```bash
//! nativenv exec -- pwsh -NoLogo
//! ```
//!
//! Print a replacement environment without the compiler suite:
//! ```bash
//! nativenv env --cleanup --no-compiler
//! ```

mod commands;
mod diagnostics;
mod errors;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{doctor, env, exec, version};
use errors::CliError;

/// Native toolchain environment resolver.
#[derive(Parser)]
#[command(
    name = "nativenv",
    author,
    version,
    about = "Synthesizes the native C/C++ build environment without vendor setup scripts",
    after_help = "\
ENVIRONMENT VARIABLES:
    NATIVENV_LOG            Log filter, e.g. 'debug' or 'nativenv_core=trace' (default: warn)
    NATIVENV_SELF_TOOL      Executable stem of the self-tool (default: nativenv)"
)]
pub struct Cli {
    /// Log every probed and admitted directory to stderr.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the nativenv CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the resolved environment.
    ///
    /// Prints only the variables the resolver produces (PATH and, when the
    /// compiler suite is included, INCLUDE, LIB and LIBPATH).
    Env(env::EnvArgs),

    /// Run a program with the resolved environment applied.
    ///
    /// The program's exit code becomes the exit code of nativenv.
    Exec(exec::ExecArgs),

    /// Check toolchain discovery.
    ///
    /// Runs every discovery step independently and reports which ones
    /// succeed, so a failing resolution can be diagnosed.
    Doctor(doctor::DoctorArgs),

    /// Display version information.
    Version(version::VersionArgs),
}

fn main() {
    if let Err(e) = run() {
        let exit_code = handle_error(&e);
        std::process::exit(exit_code);
    }
}

/// Handles an error and returns the appropriate exit code.
///
/// `ProcessExitCode` errors carry the child's exit code and print nothing.
/// Every other error is printed and yields exit code 1.
fn handle_error(e: &anyhow::Error) -> i32 {
    if let Some(CliError::ProcessExitCode { code }) = e.downcast_ref::<CliError>() {
        return *code;
    }
    eprintln!("Error: {e:?}");
    1
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Env(args) => env::execute(&args),
        Commands::Exec(args) => exec::execute(&args),
        Commands::Doctor(args) => doctor::execute(&args),
        Commands::Version(args) => version::execute(&args),
    }
}
