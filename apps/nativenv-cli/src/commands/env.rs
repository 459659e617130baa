//! Env command for the nativenv CLI.
//!
//! Resolves the toolchain environment and prints it.
//!
//! ## Usage
//!
//! ```bash
//! nativenv env                     # NAME=value lines
//! nativenv env --format json       # strategy and variables as JSON
//! nativenv env --format shell      # statements to source into a shell
//! nativenv env --format nul        # complete NUL-delimited block
//! ```

use std::ffi::OsString;
use std::io::Write;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use nativenv_core::{EnvironmentBlock, Resolver, SystemHost};

use super::ResolveArgs;

/// How the environment is printed.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `NAME=value` line per produced variable.
    #[default]
    Lines,
    /// JSON object with the path strategy and the produced variables.
    Json,
    /// Shell statements setting the produced variables.
    Shell,
    /// Inherited and produced variables as a NUL-delimited block.
    Nul,
}

/// Arguments for the env command.
#[derive(Args)]
pub struct EnvArgs {
    #[command(flatten)]
    pub resolve: ResolveArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
    pub format: OutputFormat,
}

/// Executes the env command.
///
/// # Errors
///
/// Returns an error if resolution fails or stdout cannot be written.
pub fn execute(args: &EnvArgs) -> Result<()> {
    let host = SystemHost;
    let block = Resolver::new(&host, args.resolve.options())
        .resolve()
        .context("failed to resolve the toolchain environment")?;

    let rendered = render(&block, args.format, inherited_vars())?;
    std::io::stdout()
        .lock()
        .write_all(&rendered)
        .context("failed to write the environment")
}

fn inherited_vars() -> Vec<(OsString, OsString)> {
    std::env::vars_os().collect()
}

/// Text formats are lossy for non-Unicode values; the NUL block is not.
fn render(
    block: &EnvironmentBlock,
    format: OutputFormat,
    inherited: Vec<(OsString, OsString)>,
) -> Result<Vec<u8>> {
    Ok(match format {
        OutputFormat::Lines => block
            .vars()
            .map(|(name, value)| format!("{name}={}\n", value.to_string_lossy()))
            .collect::<String>()
            .into_bytes(),
        OutputFormat::Json => {
            let mut json = serde_json::to_vec_pretty(block)?;
            json.push(b'\n');
            json
        }
        OutputFormat::Shell => block
            .vars()
            .map(|(name, value)| shell_statement(name, &value.to_string_lossy()))
            .collect::<String>()
            .into_bytes(),
        OutputFormat::Nul => block.render_block(inherited).into_encoded_bytes(),
    })
}

#[cfg(windows)]
fn shell_statement(name: &str, value: &str) -> String {
    format!("set \"{name}={value}\"\n")
}

#[cfg(not(windows))]
fn shell_statement(name: &str, value: &str) -> String {
    format!("export {name}='{}'\n", value.replace('\'', r"'\''"))
}
