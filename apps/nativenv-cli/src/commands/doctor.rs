//! Doctor command for the nativenv CLI.
//!
//! Runs each discovery step and prints its outcome.
//!
//! ## Usage
//!
//! ```bash
//! nativenv doctor
//! ```

use anyhow::Result;
use clap::Args;
use nativenv_core::SystemHost;

use super::SelfToolArg;
use crate::diagnostics::{Outcome, overall, run_all_checks};

/// Arguments for the doctor command.
#[derive(Args)]
pub struct DoctorArgs {
    #[command(flatten)]
    pub self_tool: SelfToolArg,
}

/// Executes the doctor command.
///
/// # Errors
///
/// Never fails because of a failed check; failures are reported in the output.
#[allow(clippy::unnecessary_wraps)]
pub fn execute(args: &DoctorArgs) -> Result<()> {
    println!("Checking native toolchain discovery...");
    println!();

    let checks = run_all_checks(&SystemHost, &args.self_tool.name);

    for check in &checks {
        println!("  {check}");
    }
    println!();

    let summary = match overall(&checks) {
        Outcome::Passed => "All checks passed. The toolchain environment can be resolved.",
        Outcome::Degraded => {
            "Some warnings were found. The environment can be resolved but may be incomplete."
        }
        Outcome::Failed => {
            "Some checks failed. Use 'nativenv env --no-compiler' if only the companion tools are needed."
        }
    };
    println!("{summary}");

    Ok(())
}
