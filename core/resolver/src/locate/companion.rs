//! Companion tool locators.
//!
//! ## Self-tool
//!
//! The package manager's own executable must be reachable from the produced
//! environment. It is searched relative to the running executable:
//!
//! ```text
//! <exe_dir>/<tool>              found directly next to the resolver
//! <exe_dir>/bin/<tool>          then <dir>/bin/<tool> for <dir> = exe_dir
//! <exe_dir>/../bin/<tool>       and up to four of its ancestors
//! ...
//! ```
//!
//! ## Version-control tool
//!
//! `git` is taken from the inherited PATH when present; otherwise its
//! registered install root is probed for `cmd/git`.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::executable_name;
use crate::errors::LocateError;
use crate::host::Host;

/// Number of directories (starting at the executable's own) checked for a `bin/<tool>`.
pub const MAX_ANCESTOR_LEVELS: usize = 5;

/// Executable stem of the version-control tool.
pub const VERSION_CONTROL_TOOL: &str = "git";

/// Locates the directory holding the self-tool executable named `tool`.
///
/// # Errors
///
/// - `Io` if the running executable's directory cannot be determined
/// - `NotFound` if the tool is not found within [`MAX_ANCESTOR_LEVELS`]
pub fn locate_self_tool(host: &dyn Host, tool: &str) -> Result<PathBuf, LocateError> {
    let exe_dir = host
        .executable_dir()
        .map_err(|source| LocateError::io("current executable", source))?;
    let exe = executable_name(tool);

    if exe_dir.join(&exe).exists() {
        debug!(dir = %exe_dir.display(), "self-tool next to executable");
        return Ok(exe_dir);
    }

    let mut current: Option<&Path> = Some(&exe_dir);
    for _ in 0..MAX_ANCESTOR_LEVELS {
        let Some(dir) = current else {
            break;
        };
        let bin = dir.join("bin");
        if bin.join(&exe).exists() {
            debug!(dir = %bin.display(), "self-tool in ancestor bin directory");
            return Ok(bin);
        }
        current = dir.parent();
    }

    Err(LocateError::not_found(format!(
        "{exe} near {}",
        exe_dir.display()
    )))
}

/// How the version-control tool was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionControlLocation {
    /// Found on the inherited PATH, in this directory.
    OnPath(PathBuf),
    /// Found under the registered install root, in this directory.
    Registered(PathBuf),
}

impl VersionControlLocation {
    /// Directory containing the executable.
    #[must_use]
    pub fn dir(&self) -> &Path {
        match self {
            Self::OnPath(dir) | Self::Registered(dir) => dir,
        }
    }
}

/// Locates the version-control tool.
///
/// # Errors
///
/// Returns `NotFound` if the tool is neither on PATH nor under its registered root.
pub fn locate_version_control(host: &dyn Host) -> Result<VersionControlLocation, LocateError> {
    let exe = executable_name(VERSION_CONTROL_TOOL);

    if let Some(found) = host.find_executable(&exe)
        && let Some(dir) = found.parent()
    {
        debug!(dir = %dir.display(), "version-control tool on PATH");
        return Ok(VersionControlLocation::OnPath(dir.to_path_buf()));
    }

    let root = host
        .lookup_version_control_install()
        .ok_or_else(|| LocateError::not_found(format!("{exe} (on PATH or in the registry)")))?;
    let cmd = root.join("cmd");
    if cmd.join(&exe).exists() {
        debug!(dir = %cmd.display(), "version-control tool from registry");
        return Ok(VersionControlLocation::Registered(cmd));
    }

    Err(LocateError::not_found(format!(
        "{exe} under {}",
        cmd.display()
    )))
}
