//! Target architecture selection.
//!
//! The resolver always configures the toolchain for the architecture it was
//! itself built for. There is no per-invocation override.

use std::fmt;

/// Architecture the synthesized environment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetArch {
    /// 64-bit x86 (`Hostx64\x64`).
    X64,
    /// 32-bit x86 (`Hostx86\x86`).
    X86,
}

impl TargetArch {
    /// The architecture of the running binary.
    #[cfg(target_arch = "x86_64")]
    pub const HOST: Self = Self::X64;

    /// The architecture of the running binary.
    #[cfg(not(target_arch = "x86_64"))]
    pub const HOST: Self = Self::X86;

    /// Directory name used by the compiler suite and SDK layouts.
    #[must_use = "returns the architecture string without side effects"]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X64 => "x64",
            Self::X86 => "x86",
        }
    }

    /// Name of the host tools directory, e.g. `Hostx64`.
    #[must_use]
    pub fn host_dir(self) -> String {
        format!("Host{}", self.as_str())
    }
}

impl fmt::Display for TargetArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
