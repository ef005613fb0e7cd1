//! # Dependency Injection / 依赖注入模块
//!
//! The only place that depends on gd-infra, gd-platform and gd-app at once.
//! It assembles [`ShellDeps`] and [`ShellOptions`]; it makes no decisions.
//! 这是唯一允许同时依赖 gd-infra、gd-platform 和 gd-app 的地方，仅用于"组装"。

use std::sync::Arc;

use gd_app::{ShellDeps, ShellOptions};
use gd_core::ports::*;
use gd_core::{EffectCapabilities, OsPlatform};
use gd_infra::{FileSettingsRepository, UrlLinkValidator};
use gd_platform::{
    ClipboardRsClipboard, ClipboardRsMonitor, DarkLightProbe, OsThemeWatcher, SystemOpener,
};

use super::config::ShellConfig;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Clipboard initialization failed: {0}")]
    ClipboardInit(String),

    #[error("Settings repository initialization failed: {0}")]
    SettingsInit(String),
}

/// Window-side adapters supplied by the GUI host (or the headless probe).
/// 由 GUI 宿主提供的窗口侧适配器。
pub struct WindowLayer {
    pub window: Arc<dyn WindowPort>,
    pub compositor: Arc<dyn CompositorPort>,
    pub capabilities: EffectCapabilities,
}

/// Collaborators owned by the rest of the application.
/// 应用其余部分拥有的协作者。
pub struct Collaborators {
    pub task_manager: Arc<dyn TaskManagerPort>,
    pub dialog: Arc<dyn DialogPort>,
    pub tray: Arc<dyn TrayPort>,
    pub splash: Arc<dyn SplashPort>,
    pub update_checker: Arc<dyn UpdateCheckerPort>,
}

/// Clipboard adapters, shared with the probe's `copy` command.
pub fn create_clipboard_layer(
) -> WiringResult<(Arc<dyn SystemClipboardPort>, Arc<dyn ClipboardMonitorPort>)> {
    let clipboard =
        ClipboardRsClipboard::new().map_err(|e| WiringError::ClipboardInit(e.to_string()))?;
    Ok((Arc::new(clipboard), Arc::new(ClipboardRsMonitor::new())))
}

pub fn create_link_validator(config: &ShellConfig) -> Arc<dyn LinkValidatorPort> {
    Arc::new(UrlLinkValidator::with_attachment_types(
        &config.clipboard_attachment_types,
    ))
}

pub fn create_options(config: &ShellConfig, capabilities: EffectCapabilities) -> ShellOptions {
    let mut options = ShellOptions::new(OsPlatform::current(), capabilities);
    options.propose_delay = config.propose_delay();
    options.mica_retry_delay = config.mica_retry_delay();
    options.feedback_url = config.feedback_url.clone();
    options
}

/// Assemble every shell dependency.
/// 组装所有外壳依赖。
pub fn wire_dependencies(
    config: &ShellConfig,
    window_layer: WindowLayer,
    collaborators: Collaborators,
) -> WiringResult<(ShellDeps, ShellOptions)> {
    let settings_path = config.resolved_settings_path().ok_or_else(|| {
        WiringError::SettingsInit("no settings path configured and no OS config dir".into())
    })?;
    let (clipboard, clipboard_monitor) = create_clipboard_layer()?;

    let os_theme: Arc<dyn OsThemePort> = Arc::new(DarkLightProbe);
    let theme_watcher = Arc::new(OsThemeWatcher::new(
        os_theme.clone(),
        config.theme_poll_interval(),
    ));

    let deps = ShellDeps {
        window: window_layer.window,
        compositor: window_layer.compositor,
        os_theme,
        theme_watcher,
        clipboard,
        clipboard_monitor,
        link_validator: create_link_validator(config),
        task_manager: collaborators.task_manager,
        settings: Arc::new(FileSettingsRepository::new(settings_path)),
        dialog: collaborators.dialog,
        opener: Arc::new(SystemOpener),
        tray: collaborators.tray,
        splash: collaborators.splash,
        update_checker: collaborators.update_checker,
    };

    Ok((deps, create_options(config, window_layer.capabilities)))
}
