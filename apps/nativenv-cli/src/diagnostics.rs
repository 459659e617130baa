//! Doctor checks for toolchain discovery.
//!
//! Each check runs one discovery step on its own, so every failing step is
//! reported instead of only the first one a resolution would hit.
//!
//! ## Checks Performed
//!
//! - Target architecture
//! - Self-tool location
//! - Version-control tool location (a warning when missing, it is optional)
//! - Compiler suite and its toolset version
//! - Platform SDK and its resolved version

use std::fmt;

use nativenv_core::locate::companion::{self, VersionControlLocation};
use nativenv_core::locate::{compiler, sdk};
use nativenv_core::{Host, LocateError, TargetArch, version};

/// Outcome of a check, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    Passed,
    /// An optional step failed.
    Degraded,
    /// A required step failed.
    Failed,
}

/// One discovery step and what happened to it.
#[derive(Debug, Clone)]
pub struct Check {
    pub step: &'static str,
    pub outcome: Outcome,
    pub detail: String,
}

impl Check {
    /// Builds a check from a step result; an error yields `on_error`.
    fn from_result(step: &'static str, result: Result<String, LocateError>, on_error: Outcome) -> Self {
        match result {
            Ok(detail) => Self {
                step,
                outcome: Outcome::Passed,
                detail,
            },
            Err(e) => Self {
                step,
                outcome: on_error,
                detail: e.to_string(),
            },
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.outcome {
            Outcome::Passed => "[OK]",
            Outcome::Degraded => "[WARN]",
            Outcome::Failed => "[FAIL]",
        };
        write!(f, "{tag} {}: {}", self.step, self.detail)
    }
}

/// Runs every check in discovery order.
pub fn run_all_checks(host: &dyn Host, self_tool: &str) -> Vec<Check> {
    vec![
        Check::from_result("Target architecture", Ok(TargetArch::HOST.to_string()), Outcome::Failed),
        check_self_tool(host, self_tool),
        check_version_control(host),
        check_compiler_suite(host),
        check_platform_sdk(host),
    ]
}

/// Worst outcome among `checks`, `Passed` when empty.
#[must_use]
pub fn overall(checks: &[Check]) -> Outcome {
    checks
        .iter()
        .map(|check| check.outcome)
        .max()
        .unwrap_or(Outcome::Passed)
}

fn check_self_tool(host: &dyn Host, self_tool: &str) -> Check {
    let found = companion::locate_self_tool(host, self_tool)
        .map(|dir| format!("Found in {}", dir.display()));
    Check::from_result("Self-tool", found, Outcome::Failed)
}

fn check_version_control(host: &dyn Host) -> Check {
    let found = companion::locate_version_control(host)
        .map(|location| match location {
            VersionControlLocation::OnPath(dir) => format!("On PATH in {}", dir.display()),
            VersionControlLocation::Registered(dir) => {
                format!("Registered in {}", dir.display())
            }
        });
    let mut check = Check::from_result("Version-control tool", found, Outcome::Degraded);
    if check.outcome == Outcome::Degraded {
        check.detail.push_str(". It will be missing from PATH.");
    }
    check
}

fn check_compiler_suite(host: &dyn Host) -> Check {
    let found = compiler::locate_compiler_suite(host).and_then(|instance| {
        let toolset = version::read_toolset_version(&instance.installation_path)?;
        Ok(format!(
            "{} {} (toolset {toolset})",
            instance.installation_path.display(),
            instance.installation_version,
        ))
    });
    Check::from_result("Compiler suite", found, Outcome::Failed)
}

fn check_platform_sdk(host: &dyn Host) -> Check {
    let found = sdk::locate_platform_sdk(host).and_then(|sdk| {
        let version = version::resolve_sdk_version(&sdk.installation_folder, &sdk.product_version)?;
        Ok(format!("{} (version {version})", sdk.installation_folder.display()))
    });
    Check::from_result("Platform SDK", found, Outcome::Failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nativenv_core::{CapturedOutput, SdkDescriptor};
    use std::ffi::OsString;
    use std::io;
    use std::path::{Path, PathBuf};

    /// Host with nothing installed except what the fields name.
    #[derive(Default)]
    struct StubHost {
        exe_dir: Option<PathBuf>,
        sdk: Option<SdkDescriptor>,
    }

    impl Host for StubHost {
        fn env_var(&self, _name: &str) -> Option<String> {
            None
        }

        fn inherited_path(&self) -> OsString {
            OsString::new()
        }

        fn executable_dir(&self) -> io::Result<PathBuf> {
            self.exe_dir
                .clone()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }

        fn find_executable(&self, _name: &str) -> Option<PathBuf> {
            None
        }

        fn capture(&self, _program: &Path, _args: &[&str]) -> io::Result<CapturedOutput> {
            Err(io::Error::from(io::ErrorKind::NotFound))
        }

        fn lookup_platform_sdk(&self) -> Option<SdkDescriptor> {
            self.sdk.clone()
        }

        fn lookup_version_control_install(&self) -> Option<PathBuf> {
            None
        }
    }

    fn check(outcome: Outcome) -> Check {
        Check {
            step: "Step",
            outcome,
            detail: "detail".into(),
        }
    }

    #[test]
    fn display_tags_outcome() {
        assert_eq!(check(Outcome::Passed).to_string(), "[OK] Step: detail");
        assert_eq!(check(Outcome::Degraded).to_string(), "[WARN] Step: detail");
        assert_eq!(check(Outcome::Failed).to_string(), "[FAIL] Step: detail");
    }

    #[test]
    fn overall_is_worst_outcome() {
        assert_eq!(overall(&[]), Outcome::Passed);
        assert_eq!(
            overall(&[check(Outcome::Passed), check(Outcome::Degraded)]),
            Outcome::Degraded
        );
        assert_eq!(
            overall(&[check(Outcome::Failed), check(Outcome::Degraded)]),
            Outcome::Failed
        );
    }

    #[test]
    fn empty_host_fails_required_checks_and_warns_on_optional() {
        let checks = run_all_checks(&StubHost::default(), "pkg");
        let outcomes: Vec<_> = checks.iter().map(|c| (c.step, c.outcome)).collect();

        assert_eq!(
            outcomes,
            vec![
                ("Target architecture", Outcome::Passed),
                ("Self-tool", Outcome::Failed),
                ("Version-control tool", Outcome::Degraded),
                ("Compiler suite", Outcome::Failed),
                ("Platform SDK", Outcome::Failed),
            ]
        );
        assert!(checks[2].detail.ends_with("It will be missing from PATH."));
    }

    #[test]
    fn self_tool_found_next_to_executable() {
        let temp = assert_fs::TempDir::new().unwrap();
        let exe = format!("pkg{}", std::env::consts::EXE_SUFFIX);
        std::fs::write(temp.path().join(exe), "").unwrap();
        let host = StubHost {
            exe_dir: Some(temp.path().to_path_buf()),
            ..StubHost::default()
        };

        let check = check_self_tool(&host, "pkg");
        assert_eq!(check.outcome, Outcome::Passed);
        assert!(check.detail.contains(&temp.path().display().to_string()));
    }

    #[test]
    fn platform_sdk_reports_resolved_version() {
        let temp = assert_fs::TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("Include").join("10.0.19041.0")).unwrap();
        let host = StubHost {
            sdk: Some(SdkDescriptor::new(temp.path(), "10.0.19041")),
            ..StubHost::default()
        };

        let check = check_platform_sdk(&host);
        assert_eq!(check.outcome, Outcome::Passed);
        assert!(check.detail.ends_with("(version 10.0.19041.0)"));
    }
}
