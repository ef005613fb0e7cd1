use serde::{Deserialize, Serialize};

use crate::appearance::{BackgroundEffectKind, ThemeMode};
use crate::geometry::GeometrySetting;

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Settings the shell reads from the configuration store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellSettings {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub theme_mode: ThemeMode,

    #[serde(default)]
    pub background_effect: BackgroundEffectKind,

    #[serde(default = "enabled")]
    pub enable_clipboard_listener: bool,

    #[serde(default = "enabled")]
    pub check_update_at_start_up: bool,

    #[serde(default)]
    pub geometry: GeometrySetting,
}

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

fn enabled() -> bool {
    true
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            theme_mode: ThemeMode::System,
            background_effect: BackgroundEffectKind::default(),
            enable_clipboard_listener: true,
            check_update_at_start_up: true,
            geometry: GeometrySetting::Default,
        }
    }
}

impl ShellSettings {
    /// Apply a change notification to this snapshot.
    pub fn apply(&mut self, change: &SettingsChange) {
        match change {
            SettingsChange::ThemeMode(mode) => self.theme_mode = *mode,
            SettingsChange::BackgroundEffect(effect) => self.background_effect = *effect,
            SettingsChange::ClipboardListener(enabled) => self.enable_clipboard_listener = *enabled,
            SettingsChange::CheckUpdateAtStartUp(enabled) => self.check_update_at_start_up = *enabled,
        }
    }
}

/// A single setting changed by the user through the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsChange {
    ThemeMode(ThemeMode),
    BackgroundEffect(BackgroundEffectKind),
    ClipboardListener(bool),
    CheckUpdateAtStartUp(bool),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: ShellSettings = serde_json::from_str(r#"{"themeMode":"Dark"}"#).unwrap();

        assert_eq!(settings.theme_mode, ThemeMode::Dark);
        assert_eq!(settings.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(settings.enable_clipboard_listener);
        assert!(settings.check_update_at_start_up);
        assert!(settings.geometry.is_default());
    }

    #[test]
    fn saved_geometry_is_an_object() {
        let settings = ShellSettings {
            geometry: GeometrySetting::Saved(Rect::new(10, 20, 800, 600)),
            ..ShellSettings::default()
        };

        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(
            json["geometry"],
            serde_json::json!({"x": 10, "y": 20, "width": 800, "height": 600})
        );
    }

    #[test]
    fn apply_updates_only_the_changed_field() {
        let mut settings = ShellSettings::default();
        settings.apply(&SettingsChange::ClipboardListener(false));

        assert!(!settings.enable_clipboard_listener);
        assert_eq!(settings.theme_mode, ThemeMode::System);
    }
}
