//! Path builders and the ordered path collections they feed.
//!
//! A builder is a pure function from an installation (root, version, target
//! architecture) to a [`PathSet`] of *candidates*. Candidates are admitted into
//! the owning set with [`PathSet::admit_existing`], which keeps exactly the
//! candidates that exist at that moment, in generation order. Nothing is sorted
//! and nothing is deduplicated.
//!
//! ## Platform SDK layout
//!
//! ```text
//! <sdk>/Include/<ver>/{um,ucrt,cppwinrt,shared,winrt}    -> INCLUDE
//! <sdk>/Lib/<ver>/{um,ucrt}/<arch>                       -> LIB
//! <sdk>/bin/<arch>, <sdk>/bin/<ver>/<arch>               -> PATH
//! <sdk>/UnionMetadata/<ver>, <sdk>/References/<ver>      -> LIBPATH
//! ```
//!
//! ## Compiler suite layout
//!
//! ```text
//! <vs>/VC/Tools/MSVC/<ver>/{ATLMFC/include,include}      -> INCLUDE
//! <vs>/VC/Tools/MSVC/<ver>/{ATLMFC/lib,lib}/<arch>       -> LIB, LIBPATH
//! <vs>/VC/Tools/MSVC/<ver>/lib/x86/store/references      -> LIBPATH
//! <vs>/VC/Tools/MSVC/<ver>/bin/Host<arch>/<arch>         -> PATH
//! <vs>/Common7/IDE, <vs>/Common7/IDE/Tools               -> PATH
//! <vs>/Common7/IDE/CommonExtensions/Microsoft/CMake/...  -> PATH
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::arch::TargetArch;

/// Joins `segments` onto `root` in order.
#[must_use]
pub fn join_segments(root: &Path, segments: &[&str]) -> PathBuf {
    segments
        .iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

/// Ordered path collections, one per produced environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    /// Entries for `PATH`.
    pub paths: Vec<PathBuf>,
    /// Entries for `LIB`.
    pub libs: Vec<PathBuf>,
    /// Entries for `INCLUDE`.
    pub includes: Vec<PathBuf>,
    /// Entries for `LIBPATH`.
    pub libpaths: Vec<PathBuf>,
}

impl PathSet {
    /// Appends `candidate` to `paths` if it exists.
    pub fn admit_path(&mut self, candidate: PathBuf) -> bool {
        admit(&mut self.paths, candidate)
    }

    /// Appends every existing candidate of each collection, preserving order.
    pub fn admit_existing(&mut self, candidates: PathSet) {
        let PathSet {
            paths,
            libs,
            includes,
            libpaths,
        } = candidates;
        for (target, list) in [
            (&mut self.paths, paths),
            (&mut self.libs, libs),
            (&mut self.includes, includes),
            (&mut self.libpaths, libpaths),
        ] {
            for candidate in list {
                admit(target, candidate);
            }
        }
    }
}

fn admit(target: &mut Vec<PathBuf>, candidate: PathBuf) -> bool {
    if candidate.exists() {
        debug!(path = %candidate.display(), "admitted");
        target.push(candidate);
        true
    } else {
        trace!(path = %candidate.display(), "skipped, does not exist");
        false
    }
}

const SDK_INCLUDE_SUBDIRS: [&str; 5] = ["um", "ucrt", "cppwinrt", "shared", "winrt"];

/// Candidate directories of a platform SDK installation.
#[must_use]
pub fn sdk_candidates(sdk_root: &Path, version: &str, arch: TargetArch) -> PathSet {
    let arch = arch.as_str();
    PathSet {
        includes: SDK_INCLUDE_SUBDIRS
            .into_iter()
            .map(|sub| join_segments(sdk_root, &["Include", version, sub]))
            .collect(),
        libs: vec![
            join_segments(sdk_root, &["Lib", version, "um", arch]),
            join_segments(sdk_root, &["Lib", version, "ucrt", arch]),
        ],
        paths: vec![
            join_segments(sdk_root, &["bin", arch]),
            join_segments(sdk_root, &["bin", version, arch]),
        ],
        libpaths: vec![
            join_segments(sdk_root, &["UnionMetadata", version]),
            join_segments(sdk_root, &["References", version]),
        ],
    }
}

/// Candidate directories of a compiler suite installation.
///
/// The store reference metadata is architecture-neutral and always comes from
/// the x86 tree.
#[must_use]
pub fn compiler_suite_candidates(
    installation_path: &Path,
    toolset_version: &str,
    arch: TargetArch,
) -> PathSet {
    let host_dir = arch.host_dir();
    let arch = arch.as_str();
    let toolset = join_segments(installation_path, &["VC", "Tools", "MSVC", toolset_version]);
    let atlmfc_lib = join_segments(&toolset, &["ATLMFC", "lib", arch]);
    let lib = join_segments(&toolset, &["lib", arch]);
    let ide = join_segments(installation_path, &["Common7", "IDE"]);
    let cmake_extension = join_segments(&ide, &["CommonExtensions", "Microsoft", "CMake"]);

    PathSet {
        includes: vec![
            join_segments(&toolset, &["ATLMFC", "include"]),
            toolset.join("include"),
        ],
        libs: vec![atlmfc_lib.clone(), lib.clone()],
        paths: vec![
            join_segments(&toolset, &["bin", host_dir.as_str(), arch]),
            ide.clone(),
            ide.join("Tools"),
            join_segments(&cmake_extension, &["CMake", "bin"]),
            cmake_extension.join("Ninja"),
        ],
        libpaths: vec![
            atlmfc_lib,
            lib,
            join_segments(&toolset, &["lib", "x86", "store", "references"]),
        ],
    }
}
