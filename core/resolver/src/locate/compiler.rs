//! Compiler suite locator.
//!
//! The compiler suite is found by running its installation finder
//! (`vswhere.exe`), which lives under one of two "Program Files" roots.
//! The legacy 32-bit root is checked first:
//!
//! ```text
//! %ProgramFiles(x86)%\Microsoft Visual Studio\Installer\vswhere.exe
//! %ProgramFiles%\Microsoft Visual Studio\Installer\vswhere.exe
//! ```
//!
//! The finder is run once with `-format json -utf8` and the first element of
//! the returned array describes the installation in use.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::errors::LocateError;
use crate::host::Host;
use crate::paths::join_segments;

/// Environment variables naming the roots searched for the finder, in priority order.
pub const PROGRAM_FILES_VARS: [&str; 2] = ["ProgramFiles(x86)", "ProgramFiles"];

/// Location of the finder relative to a "Program Files" root.
pub const FINDER_RELATIVE_PATH: [&str; 3] = ["Microsoft Visual Studio", "Installer", "vswhere.exe"];

/// Arguments requesting UTF-8 JSON output from the finder.
pub const FINDER_ARGS: [&str; 3] = ["-format", "json", "-utf8"];

/// A compiler suite installation as reported by the finder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationDescriptor {
    pub installation_path: PathBuf,
    #[serde(default)]
    pub installation_version: String,
    #[serde(default)]
    pub instance_id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default = "default_launchable")]
    pub is_launchable: bool,
    #[serde(default)]
    pub is_prerelease: bool,
}

const fn default_launchable() -> bool {
    true
}

/// Returns the first finder executable that exists, if any.
pub fn find_vswhere(host: &dyn Host) -> Option<PathBuf> {
    PROGRAM_FILES_VARS.iter().find_map(|var| {
        let root = host.env_var(var)?;
        let candidate = join_segments(Path::new(&root), &FINDER_RELATIVE_PATH);
        candidate.exists().then_some(candidate)
    })
}

/// Decodes the finder's JSON output and returns its first instance.
///
/// # Errors
///
/// - `Parse` if the text is not JSON or the first element lacks required fields
/// - `EmptyInstanceList` if the JSON is not a non-empty array
pub fn parse_instances(text: &str) -> Result<InstallationDescriptor, LocateError> {
    let text = text.trim_start_matches('\u{feff}');
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|source| LocateError::Parse { source })?;
    let serde_json::Value::Array(instances) = value else {
        return Err(LocateError::EmptyInstanceList);
    };
    let first = instances
        .into_iter()
        .next()
        .ok_or(LocateError::EmptyInstanceList)?;
    serde_json::from_value(first).map_err(|source| LocateError::Parse { source })
}

/// Locates the compiler suite installation.
///
/// # Errors
///
/// - `NotFound` if the finder is not installed
/// - `Io` if the finder cannot be started
/// - `Process` if the finder exits unsuccessfully
/// - `Parse` / `EmptyInstanceList` if its output is unusable
pub fn locate_compiler_suite(host: &dyn Host) -> Result<InstallationDescriptor, LocateError> {
    let finder = find_vswhere(host).ok_or_else(|| LocateError::not_found("vswhere.exe"))?;
    debug!(finder = %finder.display(), "running installation finder");

    let output = host
        .capture(&finder, &FINDER_ARGS)
        .map_err(|source| LocateError::io(&finder, source))?;
    if !output.success() {
        return Err(LocateError::Process {
            program: finder,
            code: output.code,
        });
    }

    let instance = parse_instances(&String::from_utf8_lossy(&output.stdout))?;
    debug!(
        path = %instance.installation_path.display(),
        version = %instance.installation_version,
        "found compiler suite"
    );
    Ok(instance)
}
