use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User-selected theme mode, persisted as `themeMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThemeMode {
    /// Follow the OS light/dark signal.
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::System => "System",
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }

    /// Whether this mode needs the OS theme watcher.
    pub fn follows_system(&self) -> bool {
        matches!(self, ThemeMode::System)
    }

    /// Resolve the effective appearance.
    ///
    /// `os_is_dark` is only consulted in `System` mode.
    pub fn resolve(self, os_is_dark: impl FnOnce() -> bool) -> ResolvedAppearance {
        match self {
            ThemeMode::System => ResolvedAppearance::from_is_dark(os_is_dark()),
            ThemeMode::Light => ResolvedAppearance::LIGHT,
            ThemeMode::Dark => ResolvedAppearance::DARK,
        }
    }

    /// Theme handed to the widget layer for this mode.
    pub fn widget_theme(&self) -> WidgetTheme {
        match self {
            ThemeMode::System => WidgetTheme::Auto,
            ThemeMode::Light => WidgetTheme::Light,
            ThemeMode::Dark => WidgetTheme::Dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "System" => Ok(ThemeMode::System),
            "Light" => Ok(ThemeMode::Light),
            "Dark" => Ok(ThemeMode::Dark),
            other => Err(UnknownVariant {
                kind: "theme mode",
                value: other.to_string(),
            }),
        }
    }
}

/// Effective light/dark state. Derived on every reconciliation, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedAppearance {
    pub is_dark: bool,
}

impl ResolvedAppearance {
    pub const DARK: Self = Self { is_dark: true };
    pub const LIGHT: Self = Self { is_dark: false };

    pub const fn from_is_dark(is_dark: bool) -> Self {
        Self { is_dark }
    }

    pub fn widget_theme(&self) -> WidgetTheme {
        if self.is_dark {
            WidgetTheme::Dark
        } else {
            WidgetTheme::Light
        }
    }
}

/// Theme value understood by the widget toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetTheme {
    Auto,
    Light,
    Dark,
}

/// Window backdrop material, persisted as `backgroundEffect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BackgroundEffectKind {
    None,
    Acrylic,
    #[default]
    Mica,
    MicaBlur,
    MicaAlt,
    Aero,
}

impl BackgroundEffectKind {
    pub const ALL: [BackgroundEffectKind; 6] = [
        BackgroundEffectKind::None,
        BackgroundEffectKind::Acrylic,
        BackgroundEffectKind::Mica,
        BackgroundEffectKind::MicaBlur,
        BackgroundEffectKind::MicaAlt,
        BackgroundEffectKind::Aero,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundEffectKind::None => "None",
            BackgroundEffectKind::Acrylic => "Acrylic",
            BackgroundEffectKind::Mica => "Mica",
            BackgroundEffectKind::MicaBlur => "MicaBlur",
            BackgroundEffectKind::MicaAlt => "MicaAlt",
            BackgroundEffectKind::Aero => "Aero",
        }
    }

    /// Mica materials are rejected by the compositor right after a switch to dark.
    pub fn is_mica_family(&self) -> bool {
        matches!(
            self,
            BackgroundEffectKind::Mica | BackgroundEffectKind::MicaBlur | BackgroundEffectKind::MicaAlt
        )
    }

    /// Any effect other than `None` needs a transparent window background.
    pub fn needs_transparent_background(&self) -> bool {
        !matches!(self, BackgroundEffectKind::None)
    }
}

impl fmt::Display for BackgroundEffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackgroundEffectKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BackgroundEffectKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "background effect",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
