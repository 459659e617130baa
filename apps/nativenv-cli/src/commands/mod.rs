//! Command modules for the nativenv CLI.
//!
//! - [`env`] - Print the resolved environment
//! - [`exec`] - Run a program inside the resolved environment
//! - [`doctor`] - Report each discovery step
//! - [`version`] - Display version information

pub mod doctor;
pub mod env;
pub mod exec;
pub mod version;

use clap::Args;
use nativenv_core::{DEFAULT_SELF_TOOL, ResolveOptions};

/// Resolution flags shared by `env` and `exec`.
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Skip the compiler suite and platform SDK.
    ///
    /// Only the self-tool and the version-control tool are put on PATH;
    /// INCLUDE, LIB and LIBPATH are left unset.
    #[arg(long)]
    pub no_compiler: bool,

    /// Replace the inherited PATH instead of prepending to it.
    #[arg(long)]
    pub cleanup: bool,

    #[command(flatten)]
    pub self_tool: SelfToolArg,
}

/// Name of the self-tool executable.
#[derive(Args, Debug, Clone)]
pub struct SelfToolArg {
    /// Executable stem searched next to and above nativenv.
    #[arg(long = "self-tool", env = "NATIVENV_SELF_TOOL", default_value = DEFAULT_SELF_TOOL)]
    pub name: String,
}

impl ResolveArgs {
    #[must_use]
    pub fn options(&self) -> ResolveOptions {
        ResolveOptions {
            include_compiler_suite: !self.no_compiler,
            merge_with_inherited_path: !self.cleanup,
            self_tool: self.self_tool.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(no_compiler: bool, cleanup: bool) -> ResolveArgs {
        ResolveArgs {
            no_compiler,
            cleanup,
            self_tool: SelfToolArg {
                name: "pkg".to_string(),
            },
        }
    }

    #[test]
    fn defaults_map_to_merge_with_compiler() {
        let options = args(false, false).options();
        assert!(options.include_compiler_suite);
        assert!(options.merge_with_inherited_path);
        assert_eq!(options.self_tool, "pkg");
    }

    #[test]
    fn flags_invert_options() {
        let options = args(true, true).options();
        assert!(!options.include_compiler_suite);
        assert!(!options.merge_with_inherited_path);
    }
}
