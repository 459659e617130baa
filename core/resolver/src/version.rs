//! Version resolvers.
//!
//! The compiler suite pins its default toolset version in a text file inside
//! the installation. The platform SDK registers only a product-version prefix
//! (e.g. `10.0.19041`); the concrete version (`10.0.19041.0`) is the name of a
//! directory under `<sdk>/Include`.

use std::fs;
use std::io;
use std::path::Path;

use crate::errors::LocateError;
use crate::paths::join_segments;

/// Location of the toolset version pin, relative to the installation path.
pub const TOOLSET_VERSION_FILE: [&str; 4] = [
    "VC",
    "Auxiliary",
    "Build",
    "Microsoft.VCToolsVersion.default.txt",
];

/// Reads the toolset version from the first line of the version pin file.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read or its first line is empty.
pub fn read_toolset_version(installation_path: &Path) -> Result<String, LocateError> {
    let file = join_segments(installation_path, &TOOLSET_VERSION_FILE);
    let content = fs::read_to_string(&file).map_err(|source| LocateError::io(&file, source))?;
    let version = content
        .trim_start_matches('\u{feff}')
        .lines()
        .next()
        .unwrap_or_default()
        .trim();
    if version.is_empty() {
        return Err(LocateError::io(
            file,
            io::Error::new(io::ErrorKind::InvalidData, "empty toolset version"),
        ));
    }
    Ok(version.to_string())
}

/// Resolves the concrete SDK version from its product-version prefix.
///
/// Among the subdirectories of `<sdk_root>/Include` whose names start with
/// `product_version`, the lexicographically greatest is returned, so the
/// result does not depend on directory iteration order.
///
/// # Errors
///
/// - `Io` if the include directory cannot be listed
/// - `VersionMismatch` if no subdirectory matches
pub fn resolve_sdk_version(sdk_root: &Path, product_version: &str) -> Result<String, LocateError> {
    let include_dir = sdk_root.join("Include");
    let entries =
        fs::read_dir(&include_dir).map_err(|source| LocateError::io(&include_dir, source))?;

    entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(product_version))
        .max()
        .ok_or_else(|| LocateError::VersionMismatch {
            include_dir,
            prefix: product_version.to_string(),
        })
}
