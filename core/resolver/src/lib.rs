#![warn(clippy::pedantic)]
//! Native Toolchain Environment Resolver
//!
//! This crate discovers a locally installed C/C++ compiler suite and its
//! companion platform SDK, and synthesizes the environment variables a build
//! needs to find the compiler, headers, import libraries and auxiliary tools,
//! without the user having run the vendor's environment-setup script first.
//!
//! ## Overview
//!
//! Resolution runs a fixed sequence of one-shot probes:
//!
//! ```text
//! self-tool --> version-control tool --> [compiler suite --> platform SDK] --> serialize
//!  (fatal)          (non-fatal)              (fatal)           (fatal)
//! ```
//!
//! Every probe contributes candidate directories to a [`PathSet`]. A candidate
//! is admitted only if it exists on disk at the time it is probed. The set is
//! then serialized into an [`EnvironmentBlock`] using one of two strategies:
//!
//! - **Cleanup**: `PATH` is replaced by the discovered entries only.
//! - **Merge**: the discovered entries are prepended to the inherited `PATH`.
//!
//! `INCLUDE`, `LIB` and `LIBPATH` are set only when their collection is non-empty.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nativenv_core::{ResolveOptions, Resolver, SystemHost};
//!
//! let host = SystemHost;
//! let options = ResolveOptions::default();
//! let block = Resolver::new(&host, options).resolve()?;
//! for (name, value) in block.vars() {
//!     println!("{name}={}", value.to_string_lossy());
//! }
//! # Ok::<(), nativenv_core::ResolveError>(())
//! ```
//!
//! ## External Collaborators
//!
//! Everything the resolver reads from outside the filesystem (environment
//! variables, its own location, PATH lookups, the installation finder process
//! and registry lookups) goes through the [`Host`] trait. [`SystemHost`] is
//! the production implementation.

pub mod arch;
pub mod env;
pub mod errors;
pub mod host;
pub mod locate;
pub mod paths;
pub mod resolver;
pub mod version;

pub use arch::TargetArch;
pub use env::{EnvironmentBlock, PATH_LIST_SEPARATOR, PathStrategy};
pub use errors::{ErrorKind, LocateError, ResolveError, Step};
pub use host::{CapturedOutput, Host, SystemHost};
pub use locate::compiler::InstallationDescriptor;
pub use locate::sdk::SdkDescriptor;
pub use paths::PathSet;
pub use resolver::{DEFAULT_SELF_TOOL, ResolveOptions, Resolver};
