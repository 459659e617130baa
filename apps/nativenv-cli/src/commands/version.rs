//! Version command for the nativenv CLI.

use anyhow::Result;
use clap::Args;
use nativenv_core::TargetArch;

/// Arguments for the version command.
#[derive(Args)]
pub struct VersionArgs {
    /// Show build commit, platform and target architecture.
    #[arg(short = 'v', long = "detailed")]
    pub detailed: bool,
}

/// Executes the version command.
#[allow(clippy::unnecessary_wraps)]
pub fn execute(args: &VersionArgs) -> Result<()> {
    println!("nativenv {}", env!("CARGO_PKG_VERSION"));
    if args.detailed {
        print!("{}", details());
    }
    Ok(())
}

/// `key: value` lines describing this build.
fn details() -> String {
    let rows = [
        ("Commit", option_env!("NATIVENV_GIT_COMMIT").unwrap_or("unknown").to_string()),
        ("Platform", format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)),
        ("Target", TargetArch::HOST.to_string()),
    ];
    rows.iter()
        .map(|(key, value)| format!("{key}: {value}\n"))
        .collect()
}
