//! Error types for the nativenv CLI.
//!
//! Most failures travel as `anyhow::Error` with context attached. The typed
//! variants below are the ones `main` needs to tell apart.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// The program given to `exec` could not be started.
    #[error("failed to start {}", program.display())]
    SpawnFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Child process exited with a non-zero code.
    ///
    /// The code is propagated without printing an additional message; the
    /// child already reported its own failure.
    #[error("process exited with code {code}")]
    ProcessExitCode { code: i32 },
}

impl CliError {
    /// Creates a new `SpawnFailed` error.
    #[must_use]
    pub fn spawn_failed(program: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SpawnFailed {
            program: program.into(),
            source,
        }
    }

    /// Creates a new `ProcessExitCode` error.
    #[must_use]
    pub const fn process_exit_code(code: i32) -> Self {
        Self::ProcessExitCode { code }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_exit_code_displays_code() {
        let err = CliError::process_exit_code(42);
        assert_eq!(err.to_string(), "process exited with code 42");
    }

    #[test]
    fn spawn_failed_displays_program() {
        let err = CliError::spawn_failed(
            "cl.exe",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "failed to start cl.exe");
    }
}
