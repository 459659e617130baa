//! Error types for toolchain discovery.
//!
//! [`LocateError`] describes why a single probe failed. [`ResolveError`]
//! attaches the [`Step`] of the resolution sequence that failed, so callers
//! can report which locator gave up and why.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`LocateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A tool, installation or registry entry does not exist.
    NotFound,
    /// The installation finder produced output that could not be used.
    Parse,
    /// A subprocess exited unsuccessfully.
    Process,
    /// A file or directory could not be read.
    Io,
    /// No SDK directory matches the registered product version.
    VersionMismatch,
}

/// Failure of a single discovery probe.
#[derive(Debug, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum LocateError {
    /// The probed component is not installed or could not be found.
    #[error("{what} not found")]
    NotFound { what: String },

    /// The finder output is not valid JSON, or its first element has the wrong shape.
    #[error("malformed installation list: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// The finder output is valid JSON but not a non-empty array.
    #[error("installation finder reported no instances")]
    EmptyInstanceList,

    /// A subprocess exited with a non-zero (or missing) exit code.
    #[error("{} exited with {}", program.display(), describe_code(*code))]
    Process { program: PathBuf, code: Option<i32> },

    /// Reading a file or directory failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No subdirectory of the SDK include root starts with the product version.
    #[error("invalid sdk version: no entry in {} starts with '{prefix}'", include_dir.display())]
    VersionMismatch { include_dir: PathBuf, prefix: String },
}

fn describe_code(code: Option<i32>) -> String {
    code.map_or_else(|| "no exit code".to_string(), |c| format!("code {c}"))
}

impl LocateError {
    /// Creates a new `NotFound` error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Creates a new `Io` error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Parse { .. } | Self::EmptyInstanceList => ErrorKind::Parse,
            Self::Process { .. } => ErrorKind::Process,
            Self::Io { .. } => ErrorKind::Io,
            Self::VersionMismatch { .. } => ErrorKind::VersionMismatch,
        }
    }
}

/// A step of the resolution sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Locating the package manager's own executable.
    SelfTool,
    /// Locating the version-control tool.
    VersionControl,
    /// Locating the compiler suite and its toolset version.
    CompilerSuite,
    /// Locating the platform SDK and its concrete version.
    PlatformSdk,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SelfTool => "self-tool",
            Self::VersionControl => "version-control tool",
            Self::CompilerSuite => "compiler suite",
            Self::PlatformSdk => "platform SDK",
        })
    }
}

/// The first fatal failure of a resolution.
#[derive(Debug, Error)]
#[error("{step}: {source}")]
pub struct ResolveError {
    /// Step that failed.
    pub step: Step,
    /// Why it failed.
    #[source]
    pub source: LocateError,
}

impl ResolveError {
    /// Wraps a probe failure with the step it belongs to.
    pub fn new(step: Step, source: LocateError) -> Self {
        Self { step, source }
    }

    /// Shortcut for `self.source.kind()`.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}
