//! Access to the resolver's external collaborators.
//!
//! The resolver never reads ambient process state directly. Environment
//! variables, its own location, PATH searches, the installation finder
//! subprocess and registry lookups all go through [`Host`], which keeps
//! resolution a function of its explicit inputs plus the filesystem.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::locate::sdk::SdkDescriptor;

/// Result of running a subprocess to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Exit code, `None` if the process was terminated without one.
    pub code: Option<i32>,
    /// Entire standard output.
    pub stdout: Vec<u8>,
}

impl CapturedOutput {
    /// Returns whether the process exited with code 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// External collaborators consulted during resolution.
pub trait Host {
    /// Reads an environment variable of the calling process.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Directory containing the running executable.
    ///
    /// # Errors
    ///
    /// Returns an error if the executable location cannot be determined.
    fn executable_dir(&self) -> io::Result<PathBuf>;

    /// Searches the inherited PATH for an executable.
    fn find_executable(&self, name: &str) -> Option<PathBuf>;

    /// Runs `program` with `args`, blocking until it exits, and captures stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be started.
    fn capture(&self, program: &Path, args: &[&str]) -> io::Result<CapturedOutput>;

    /// Looks up the registered platform SDK.
    fn lookup_platform_sdk(&self) -> Option<SdkDescriptor>;

    /// Looks up the registered install root of the version-control tool.
    fn lookup_version_control_install(&self) -> Option<PathBuf>;

    /// The inherited PATH value, empty if unset. Not required to be Unicode.
    fn inherited_path(&self) -> OsString;
}

/// [`Host`] backed by the real process environment, `which`, and the registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl Host for SystemHost {
    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn executable_dir(&self) -> io::Result<PathBuf> {
        let exe = std::env::current_exe()?;
        exe.parent().map(Path::to_path_buf).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} has no parent directory", exe.display()),
            )
        })
    }

    fn find_executable(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }

    fn capture(&self, program: &Path, args: &[&str]) -> io::Result<CapturedOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;
        Ok(CapturedOutput {
            code: output.status.code(),
            stdout: output.stdout,
        })
    }

    fn lookup_platform_sdk(&self) -> Option<SdkDescriptor> {
        registry::platform_sdk()
    }

    fn lookup_version_control_install(&self) -> Option<PathBuf> {
        registry::version_control_install()
    }

    fn inherited_path(&self) -> OsString {
        std::env::var_os("PATH").unwrap_or_default()
    }
}

#[cfg(windows)]
mod registry {
    use std::path::PathBuf;

    use winreg::RegKey;
    use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};

    use crate::locate::sdk::SdkDescriptor;

    /// The 32-bit registry view is where the SDK installer registers itself.
    const SDK_KEYS: [&str; 2] = [
        r"SOFTWARE\WOW6432Node\Microsoft\Microsoft SDKs\Windows\v10.0",
        r"SOFTWARE\Microsoft\Microsoft SDKs\Windows\v10.0",
    ];

    const GIT_KEY: &str = r"SOFTWARE\GitForWindows";

    pub(super) fn platform_sdk() -> Option<SdkDescriptor> {
        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        SDK_KEYS.iter().find_map(|path| {
            let key = hklm.open_subkey(path).ok()?;
            let folder: String = key.get_value("InstallationFolder").ok()?;
            let version: String = key.get_value("ProductVersion").ok()?;
            Some(SdkDescriptor::new(folder, version))
        })
    }

    pub(super) fn version_control_install() -> Option<PathBuf> {
        [HKEY_LOCAL_MACHINE, HKEY_CURRENT_USER]
            .into_iter()
            .find_map(|root| {
                let key = RegKey::predef(root).open_subkey(GIT_KEY).ok()?;
                let path: String = key.get_value("InstallPath").ok()?;
                Some(PathBuf::from(path))
            })
    }
}

#[cfg(not(windows))]
mod registry {
    use std::path::PathBuf;

    use crate::locate::sdk::SdkDescriptor;

    pub(super) fn platform_sdk() -> Option<SdkDescriptor> {
        None
    }

    pub(super) fn version_control_install() -> Option<PathBuf> {
        None
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeHost;
    use super::*;

    #[test]
    fn captured_output_success_requires_zero() {
        let ok = CapturedOutput {
            code: Some(0),
            stdout: Vec::new(),
        };
        let failed = CapturedOutput {
            code: Some(1),
            stdout: Vec::new(),
        };
        let killed = CapturedOutput {
            code: None,
            stdout: Vec::new(),
        };
        assert!(ok.success());
        assert!(!failed.success());
        assert!(!killed.success());
    }

    #[test]
    #[serial_test::serial]
    fn system_host_inherited_path_matches_process_path() {
        assert_eq!(
            SystemHost.inherited_path(),
            std::env::var_os("PATH").unwrap_or_default()
        );
    }

    #[cfg(unix)]
    #[test]
    #[serial_test::serial]
    fn system_host_keeps_non_unicode_path_for_merge() {
        use crate::env::EnvironmentBlock;
        use crate::paths::PathSet;
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"/usr/bin:/opt/caf\xE9:/bin");
        let saved = std::env::var_os("PATH");
        // SAFETY: every test touching PATH is #[serial_test::serial].
        unsafe { std::env::set_var("PATH", raw) };
        let inherited = SystemHost.inherited_path();
        match saved {
            Some(path) => unsafe { std::env::set_var("PATH", path) },
            None => unsafe { std::env::remove_var("PATH") },
        }

        assert_eq!(inherited.as_os_str(), raw);
        let set = PathSet {
            paths: vec![PathBuf::from("tool")],
            ..PathSet::default()
        };
        let block = EnvironmentBlock::merge(&set, &inherited);
        assert_eq!(
            block.get("PATH").map(OsStr::as_bytes),
            Some(&b"tool:/usr/bin:/opt/caf\xE9:/bin"[..])
        );
    }

    #[test]
    fn system_host_knows_its_executable_dir() {
        let dir = SystemHost.executable_dir().unwrap();
        assert!(dir.is_dir());
    }

    #[cfg(not(windows))]
    #[test]
    fn system_host_has_no_registry_off_windows() {
        assert!(SystemHost.lookup_platform_sdk().is_none());
        assert!(SystemHost.lookup_version_control_install().is_none());
    }
}
