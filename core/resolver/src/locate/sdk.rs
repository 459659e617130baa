//! Platform SDK locator.

use std::path::PathBuf;

use crate::errors::LocateError;
use crate::host::Host;

/// A registered platform SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkDescriptor {
    /// SDK root, e.g. `C:\Program Files (x86)\Windows Kits\10\`.
    pub installation_folder: PathBuf,
    /// Registered product version, e.g. `10.0.19041`. Used as a directory-name prefix.
    pub product_version: String,
}

impl SdkDescriptor {
    #[must_use]
    pub fn new(installation_folder: impl Into<PathBuf>, product_version: impl Into<String>) -> Self {
        Self {
            installation_folder: installation_folder.into(),
            product_version: product_version.into(),
        }
    }
}

/// Looks up the platform SDK through the host's registry.
///
/// # Errors
///
/// Returns `NotFound` if no SDK is registered.
pub fn locate_platform_sdk(host: &dyn Host) -> Result<SdkDescriptor, LocateError> {
    host.lookup_platform_sdk()
        .ok_or_else(|| LocateError::not_found("Windows SDK registration"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::host::testing::FakeHost;

    #[test]
    fn returns_registered_sdk() {
        let mut host = FakeHost::default();
        host.sdk = Some(SdkDescriptor::new("/kits/10", "10.0.19041"));

        let sdk = locate_platform_sdk(&host).unwrap();
        assert_eq!(sdk.installation_folder, PathBuf::from("/kits/10"));
        assert_eq!(sdk.product_version, "10.0.19041");
    }

    #[test]
    fn missing_registration_is_not_found() {
        let host = FakeHost::default();
        let err = locate_platform_sdk(&host).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
