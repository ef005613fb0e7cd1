//! # Shell Dependencies / 外壳依赖
//!
//! This module defines the dependency grouping for shell construction.
//! 此模块定义外壳构造的依赖分组。
//!
//! **Note / 注意**: This is NOT a Builder pattern. Every collaborator is
//! required and is handed in by the bootstrap layer; the shell never looks
//! anything up from global scope.
//! **这不是 Builder 模式。** 所有协作者都由 bootstrap 层注入。

use std::sync::Arc;
use std::time::Duration;

use gd_core::ports::*;
use gd_core::{EffectCapabilities, OsPlatform};

/// Default delay before a proposal is dispatched.
pub const DEFAULT_PROPOSE_DELAY: Duration = Duration::from_millis(10);

/// Default delay before Mica is re-applied after a switch to dark.
pub const DEFAULT_MICA_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Feedback page opened from the error-report dialog.
pub const DEFAULT_FEEDBACK_URL: &str = "https://github.com/XiaoYouChR/Ghost-Downloader-3/issues";

/// Shell dependency grouping (non-Builder, just parameter grouping)
/// 外壳依赖分组（非 Builder，仅参数打包）
pub struct ShellDeps {
    // Window dependencies / 窗口依赖
    pub window: Arc<dyn WindowPort>,
    pub compositor: Arc<dyn CompositorPort>,

    // Theme dependencies / 主题依赖
    pub os_theme: Arc<dyn OsThemePort>,
    pub theme_watcher: Arc<dyn ThemeWatcherPort>,

    // Clipboard dependencies / 剪贴板依赖
    pub clipboard: Arc<dyn SystemClipboardPort>,
    pub clipboard_monitor: Arc<dyn ClipboardMonitorPort>,
    pub link_validator: Arc<dyn LinkValidatorPort>,

    // Collaborators / 外部协作者
    pub task_manager: Arc<dyn TaskManagerPort>,
    pub settings: Arc<dyn SettingsPort>,
    pub dialog: Arc<dyn DialogPort>,
    pub opener: Arc<dyn OpenerPort>,
    pub tray: Arc<dyn TrayPort>,
    pub splash: Arc<dyn SplashPort>,
    pub update_checker: Arc<dyn UpdateCheckerPort>,
}

/// Tunables resolved once at startup.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub platform: OsPlatform,
    pub capabilities: EffectCapabilities,
    /// Staging delay before `propose_task`; lets the originating OS event unwind.
    pub propose_delay: Duration,
    /// Staging delay before the second Mica application after a dark switch.
    pub mica_retry_delay: Duration,
    pub feedback_url: String,
    pub event_capacity: usize,
}

impl ShellOptions {
    pub fn new(platform: OsPlatform, capabilities: EffectCapabilities) -> Self {
        Self {
            platform,
            capabilities,
            propose_delay: DEFAULT_PROPOSE_DELAY,
            mica_retry_delay: DEFAULT_MICA_RETRY_DELAY,
            feedback_url: DEFAULT_FEEDBACK_URL.to_string(),
            event_capacity: 64,
        }
    }
}
