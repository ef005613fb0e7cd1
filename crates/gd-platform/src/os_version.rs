//! OS version detection for the capability table.

use gd_core::{OsPlatform, OsVersion};

/// Version of the running OS.
///
/// Windows reads `HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion`, since
/// the version APIs lie to unmanifested processes. When the registry cannot
/// be read the result is a Windows version of 0.0.0, which only unlocks the
/// effects every Windows build supports.
#[cfg(windows)]
pub fn detect_os_version() -> OsVersion {
    match read_registry_version() {
        Ok(version) => version,
        Err(e) => {
            log::warn!("Failed to read Windows version from registry: {}", e);
            OsVersion::windows(0, 0, 0)
        }
    }
}

/// Version of the running OS. Only the platform family matters off Windows.
#[cfg(not(windows))]
pub fn detect_os_version() -> OsVersion {
    OsVersion::other(OsPlatform::current())
}

#[cfg(windows)]
fn read_registry_version() -> std::io::Result<OsVersion> {
    use winreg::enums::HKEY_LOCAL_MACHINE;
    use winreg::RegKey;

    let key = RegKey::predef(HKEY_LOCAL_MACHINE)
        .open_subkey("SOFTWARE\\Microsoft\\Windows NT\\CurrentVersion")?;

    let build = key
        .get_value::<String, _>("CurrentBuildNumber")
        .ok()
        .and_then(|b| b.trim().parse::<u32>().ok())
        .unwrap_or(0);

    // Windows 10 and later publish the real major/minor as DWORDs; older
    // releases only have the "6.1" style string.
    let major = key.get_value::<u32, _>("CurrentMajorVersionNumber");
    let minor = key.get_value::<u32, _>("CurrentMinorVersionNumber");
    if let (Ok(major), Ok(minor)) = (major, minor) {
        return Ok(OsVersion::windows(major, minor, build));
    }

    let legacy: String = key.get_value("CurrentVersion")?;
    let (major, minor) = parse_legacy_version(&legacy).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("unrecognized CurrentVersion {legacy:?}"),
        )
    })?;
    Ok(OsVersion::windows(major, minor, build))
}

/// Parses the pre-Windows 10 `CurrentVersion` string ("6.1").
pub fn parse_legacy_version(value: &str) -> Option<(u32, u32)> {
    let mut parts = value.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = match parts.next() {
        Some(minor) => minor.parse().ok()?,
        None => 0,
    };
    Some((major, minor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_legacy_version_strings() {
        assert_eq!(parse_legacy_version("6.1"), Some((6, 1)));
        assert_eq!(parse_legacy_version(" 6.3 "), Some((6, 3)));
        assert_eq!(parse_legacy_version("10"), Some((10, 0)));
        assert_eq!(parse_legacy_version("six.one"), None);
        assert_eq!(parse_legacy_version(""), None);
    }

    #[cfg(not(windows))]
    #[test]
    fn non_windows_reports_platform_only() {
        let version = detect_os_version();
        assert!(!version.is_windows());
        assert_eq!(version.platform, OsPlatform::current());
    }
}
