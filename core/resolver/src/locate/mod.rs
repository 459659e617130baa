//! Installation locators.
//!
//! - [`compiler`] - compiler suite, via the installation finder
//! - [`sdk`] - platform SDK, via the registry
//! - [`companion`] - the self-tool and the version-control tool

pub mod companion;
pub mod compiler;
pub mod sdk;

/// Appends the platform executable suffix to `stem`.
#[must_use]
pub fn executable_name(stem: &str) -> String {
    format!("{stem}{}", std::env::consts::EXE_SUFFIX)
}
