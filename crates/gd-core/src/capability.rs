//! Platform capability table for background effects.
//!
//! The table maps an OS version to the set of compositor effects it can
//! render. It is evaluated once at startup; the effect applier only asks
//! [`EffectCapabilities`] and never compares versions itself.

use crate::appearance::BackgroundEffectKind;

/// Coarse platform family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsPlatform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl OsPlatform {
    /// Platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            OsPlatform::Windows
        } else if cfg!(target_os = "macos") {
            OsPlatform::MacOs
        } else if cfg!(target_os = "linux") {
            OsPlatform::Linux
        } else {
            OsPlatform::Other
        }
    }
}

/// OS version as reported by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OsVersion {
    pub platform: OsPlatform,
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl OsVersion {
    pub const fn windows(major: u32, minor: u32, build: u32) -> Self {
        Self {
            platform: OsPlatform::Windows,
            major,
            minor,
            build,
        }
    }

    /// A non-Windows platform; version numbers are irrelevant for effects.
    pub const fn other(platform: OsPlatform) -> Self {
        Self {
            platform,
            major: 0,
            minor: 0,
            build: 0,
        }
    }

    pub fn is_windows(&self) -> bool {
        self.platform == OsPlatform::Windows
    }

    pub fn is_at_least(&self, min: WindowsRequirement) -> bool {
        self.is_windows() && (self.major, self.build) >= (min.major, min.build)
    }
}

/// Minimum Windows version for a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowsRequirement {
    pub major: u32,
    pub build: u32,
}

const ANY_WINDOWS: WindowsRequirement = WindowsRequirement { major: 0, build: 0 };
const WINDOWS_VISTA: WindowsRequirement = WindowsRequirement { major: 6, build: 0 };

/// Windows 10: client-area custom rendering (caption buttons survive blur-behind).
pub const WINDOWS_10: WindowsRequirement = WindowsRequirement { major: 10, build: 0 };

/// Windows 11 21H2: DWMWA_MICA_EFFECT.
pub const WINDOWS_11: WindowsRequirement = WindowsRequirement {
    major: 10,
    build: 22000,
};

/// Windows 11 22H2 preview: DWMWA_SYSTEMBACKDROP_TYPE (tabbed / transient backdrops).
pub const WINDOWS_11_SYSTEM_BACKDROP: WindowsRequirement = WindowsRequirement {
    major: 10,
    build: 22523,
};

const EFFECT_TABLE: &[(BackgroundEffectKind, WindowsRequirement)] = &[
    (BackgroundEffectKind::None, ANY_WINDOWS),
    (BackgroundEffectKind::Acrylic, ANY_WINDOWS),
    (BackgroundEffectKind::Aero, WINDOWS_VISTA),
    (BackgroundEffectKind::Mica, WINDOWS_11),
    (BackgroundEffectKind::MicaAlt, WINDOWS_11_SYSTEM_BACKDROP),
    (BackgroundEffectKind::MicaBlur, WINDOWS_11_SYSTEM_BACKDROP),
];

/// Result of evaluating [`EFFECT_TABLE`] against one OS version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectCapabilities {
    os: OsVersion,
    supported: Vec<BackgroundEffectKind>,
    client_area_rendering: bool,
}

impl EffectCapabilities {
    pub fn for_os(os: OsVersion) -> Self {
        let supported = if os.is_windows() {
            EFFECT_TABLE
                .iter()
                .filter(|(_, min)| os.is_at_least(*min))
                .map(|(kind, _)| *kind)
                .collect()
        } else {
            vec![BackgroundEffectKind::None]
        };

        Self {
            os,
            supported,
            client_area_rendering: os.is_at_least(WINDOWS_10),
        }
    }

    pub fn os(&self) -> OsVersion {
        self.os
    }

    /// Compositor effects exist only on Windows-class platforms.
    pub fn effects_enabled(&self) -> bool {
        self.os.is_windows()
    }

    pub fn supports(&self, effect: BackgroundEffectKind) -> bool {
        self.supported.contains(&effect)
    }

    pub fn supported(&self) -> &[BackgroundEffectKind] {
        &self.supported
    }

    /// Effect that will actually be rendered; unsupported requests degrade to `None`.
    pub fn effective(&self, requested: BackgroundEffectKind) -> BackgroundEffectKind {
        if self.supports(requested) {
            requested
        } else {
            BackgroundEffectKind::None
        }
    }

    /// Below Windows 10 the caption buttons render incorrectly over blur-behind.
    pub fn hides_caption_buttons_for_aero(&self) -> bool {
        self.os.is_windows() && !self.client_area_rendering
    }

    /// Frameless windows get blur-behind, animation and shadow from Windows 10 on.
    pub fn frameless_decorations(&self) -> bool {
        self.client_area_rendering
    }
}
