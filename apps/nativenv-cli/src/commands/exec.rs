//! Exec command for the nativenv CLI.
//!
//! Runs a program with the resolved environment applied on top of the
//! inherited one. The program is looked up on the resolved PATH, so
//! `nativenv exec -- cl /?` finds the compiler without a setup script.
//!
//! ## Exit Codes
//!
//! The program's exit code is propagated. A program terminated without an
//! exit code maps to 1.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use clap::Args;
use nativenv_core::{Resolver, SystemHost};
use tracing::debug;

use super::ResolveArgs;
use crate::errors::CliError;

/// Arguments for the exec command.
#[derive(Args)]
pub struct ExecArgs {
    #[command(flatten)]
    pub resolve: ResolveArgs,

    /// Program to run.
    pub program: PathBuf,

    /// Arguments passed to the program.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<OsString>,
}

/// Executes the exec command.
///
/// # Errors
///
/// Returns an error if resolution fails or the program cannot be started,
/// and `CliError::ProcessExitCode` if it exits unsuccessfully.
pub fn execute(args: &ExecArgs) -> Result<()> {
    let host = SystemHost;
    let block = Resolver::new(&host, args.resolve.options())
        .resolve()
        .context("failed to resolve the toolchain environment")?;

    let mut cmd = Command::new(&args.program);
    block.apply(&mut cmd);
    cmd.args(&args.args);

    debug!(program = %args.program.display(), "starting");
    let status = cmd
        .status()
        .map_err(|source| CliError::spawn_failed(&args.program, source))?;

    if status.success() {
        Ok(())
    } else {
        let code = status.code().unwrap_or(1);
        Err(CliError::process_exit_code(code).into())
    }
}
