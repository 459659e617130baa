//! Environment assembly.
//!
//! [`Resolver`] runs the discovery sequence against a [`Host`] and serializes
//! the collected [`PathSet`]:
//!
//! 1. self-tool, fatal
//! 2. version-control tool, non-fatal
//! 3. compiler suite, fatal (only with `include_compiler_suite`)
//! 4. platform SDK, fatal (only with `include_compiler_suite`)
//!
//! The first fatal failure aborts resolution and is reported together with its
//! [`Step`].

use tracing::{info, warn};

use crate::arch::TargetArch;
use crate::env::EnvironmentBlock;
use crate::errors::{LocateError, ResolveError, Step};
use crate::host::Host;
use crate::locate::companion::{self, VersionControlLocation};
use crate::locate::{compiler, sdk};
use crate::paths::{self, PathSet};
use crate::version;

/// Default executable stem of the self-tool.
pub const DEFAULT_SELF_TOOL: &str = "nativenv";

/// Options of a single resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Discover the compiler suite and platform SDK.
    pub include_compiler_suite: bool,
    /// Prepend to the inherited `PATH` instead of replacing it.
    pub merge_with_inherited_path: bool,
    /// Executable stem of the self-tool.
    pub self_tool: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            include_compiler_suite: true,
            merge_with_inherited_path: true,
            self_tool: DEFAULT_SELF_TOOL.to_string(),
        }
    }
}

/// Runs the discovery sequence for one set of [`ResolveOptions`].
pub struct Resolver<'h> {
    host: &'h dyn Host,
    options: ResolveOptions,
    arch: TargetArch,
}

impl<'h> Resolver<'h> {
    #[must_use]
    pub fn new(host: &'h dyn Host, options: ResolveOptions) -> Self {
        Self {
            host,
            options,
            arch: TargetArch::HOST,
        }
    }

    /// Resolves and serializes the environment.
    ///
    /// In merge mode the inherited `PATH` is read once through the host.
    ///
    /// # Errors
    ///
    /// Returns the first fatal failure of the sequence.
    pub fn resolve(&self) -> Result<EnvironmentBlock, ResolveError> {
        let set = self.collect()?;
        Ok(if self.options.merge_with_inherited_path {
            EnvironmentBlock::merge(&set, &self.host.inherited_path())
        } else {
            EnvironmentBlock::cleanup(&set)
        })
    }

    /// Runs the discovery sequence and returns the admitted paths.
    ///
    /// # Errors
    ///
    /// Returns the first fatal failure of the sequence.
    pub fn collect(&self) -> Result<PathSet, ResolveError> {
        let mut set = PathSet::default();

        self.add_self_tool(&mut set)
            .map_err(|source| ResolveError::new(Step::SelfTool, source))?;
        self.add_version_control(&mut set);

        if self.options.include_compiler_suite {
            self.add_compiler_suite(&mut set)
                .map_err(|source| ResolveError::new(Step::CompilerSuite, source))?;
            self.add_platform_sdk(&mut set)
                .map_err(|source| ResolveError::new(Step::PlatformSdk, source))?;
        }

        Ok(set)
    }

    fn add_self_tool(&self, set: &mut PathSet) -> Result<(), LocateError> {
        let dir = companion::locate_self_tool(self.host, &self.options.self_tool)?;
        let linkbin = dir.join("linkbin");
        set.admit_path(dir);
        set.admit_path(linkbin);
        Ok(())
    }

    fn add_version_control(&self, set: &mut PathSet) {
        match companion::locate_version_control(self.host) {
            Ok(VersionControlLocation::OnPath(dir)) => {
                // Merge mode re-surfaces it from the inherited PATH.
                if !self.options.merge_with_inherited_path {
                    set.admit_path(dir);
                }
            }
            Ok(VersionControlLocation::Registered(dir)) => {
                set.admit_path(dir);
            }
            Err(err) => warn!(error = %err, "skipping {}", Step::VersionControl),
        }
    }

    fn add_compiler_suite(&self, set: &mut PathSet) -> Result<(), LocateError> {
        let instance = compiler::locate_compiler_suite(self.host)?;
        let toolset = version::read_toolset_version(&instance.installation_path)?;
        info!(
            path = %instance.installation_path.display(),
            toolset = %toolset,
            arch = %self.arch,
            "using compiler suite"
        );
        set.admit_existing(paths::compiler_suite_candidates(
            &instance.installation_path,
            &toolset,
            self.arch,
        ));
        Ok(())
    }

    fn add_platform_sdk(&self, set: &mut PathSet) -> Result<(), LocateError> {
        let sdk = sdk::locate_platform_sdk(self.host)?;
        let version = version::resolve_sdk_version(&sdk.installation_folder, &sdk.product_version)?;
        info!(
            path = %sdk.installation_folder.display(),
            version = %version,
            "using platform SDK"
        );
        set.admit_existing(paths::sdk_candidates(
            &sdk.installation_folder,
            &version,
            self.arch,
        ));
        Ok(())
    }
}
