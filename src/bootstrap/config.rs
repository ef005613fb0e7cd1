//! # Configuration Loader / 配置加载器
//!
//! Reads the shell's bootstrap TOML into [`ShellConfig`].
//! 读取外壳启动用的 TOML 配置。
//!
//! Pure loading only: values are accepted as written. Absent keys take the
//! serde defaults below and a missing file yields [`ShellConfig::default`].
//! 仅做纯数据加载，不做验证。

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use gd_app::deps::{DEFAULT_FEEDBACK_URL, DEFAULT_MICA_RETRY_DELAY, DEFAULT_PROPOSE_DELAY};
use gd_platform::DEFAULT_POLL_INTERVAL;
use serde::Deserialize;

/// Directory name used under the OS config / data directories.
pub const APP_DIR_NAME: &str = "GhostDownloader";

/// Floor for `theme_poll_interval_ms`; `0` would spin the watcher thread.
pub const MIN_THEME_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Bootstrap configuration / 启动配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// User settings JSON. `None` means `<config dir>/GhostDownloader/settings.json`.
    pub settings_path: Option<PathBuf>,
    /// Log directory. `None` means `<local data dir>/GhostDownloader/logs`.
    pub log_dir: Option<PathBuf>,
    pub propose_delay_ms: u64,
    pub mica_retry_delay_ms: u64,
    pub theme_poll_interval_ms: u64,
    pub feedback_url: String,
    /// Whitespace separated extensions clipboard links must end with; empty accepts all.
    pub clipboard_attachment_types: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            settings_path: None,
            log_dir: None,
            propose_delay_ms: DEFAULT_PROPOSE_DELAY.as_millis() as u64,
            mica_retry_delay_ms: DEFAULT_MICA_RETRY_DELAY.as_millis() as u64,
            theme_poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            feedback_url: DEFAULT_FEEDBACK_URL.to_string(),
            clipboard_attachment_types: String::new(),
        }
    }
}

impl ShellConfig {
    pub fn propose_delay(&self) -> Duration {
        Duration::from_millis(self.propose_delay_ms)
    }

    pub fn mica_retry_delay(&self) -> Duration {
        Duration::from_millis(self.mica_retry_delay_ms)
    }

    pub fn theme_poll_interval(&self) -> Duration {
        Duration::from_millis(self.theme_poll_interval_ms).max(MIN_THEME_POLL_INTERVAL)
    }

    pub fn resolved_settings_path(&self) -> Option<PathBuf> {
        self.settings_path
            .clone()
            .or_else(|| dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("settings.json")))
    }

    pub fn resolved_log_dir(&self) -> Option<PathBuf> {
        self.log_dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|d| d.join(APP_DIR_NAME).join("logs")))
    }
}

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file exists but cannot be read, or is not valid TOML
/// for [`ShellConfig`].
/// 文件存在但无法读取或格式错误时返回错误。
pub fn load_config(config_path: &Path) -> anyhow::Result<ShellConfig> {
    let content = match std::fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ShellConfig::default()),
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            })
        }
    };

    toml::from_str(&content).context("Failed to parse config as TOML")
}
