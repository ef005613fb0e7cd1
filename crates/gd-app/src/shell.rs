//! Shell controller
//! 外壳控制器
//!
//! Composition root of the shell. Owns window lifecycle and the settings
//! snapshot, wires the theme reconciler, clipboard pipeline and ingestion
//! unifier together, and is the only place that talks to the task manager.
//!
//! All methods run on the shell runtime task.

use std::sync::Arc;
use std::time::Duration;

use gd_core::geometry::{default_window_rect, system_title_bar_rect};
use gd_core::ports::{
    AppearanceSlot, ChangeSink, ClipboardError, CompositorError, CompositorPort, DialogPort, Headers,
    OpenerPort, SettingsPort, SplashPort, TaskManagerPort, TrayPort, UpdateCheckerPort, WindowError,
    WindowFlags, WindowPort,
};
use gd_core::{
    CandidateRequest, DropPayload, DropVerdict, GeometrySetting, KeyChord, OsPlatform, Rect,
    ResolvedAppearance, SettingsChange, ShellSettings,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, info_span, trace, warn, Instrument};

use crate::clipboard::ClipboardIngestionPipeline;
use crate::deps::{ShellDeps, ShellOptions};
use crate::effects::BackgroundEffectApplier;
use crate::events::{ShellCommand, ShellEvent};
use crate::ingest::{IngestionUnifier, KeyOutcome};
use crate::theme::ThemeReconciler;

pub const WINDOW_TITLE: &str = "Ghost Downloader";

/// Leading title-bar space reserved for the macOS traffic lights.
pub const MACOS_TITLE_BAR_SPACING: u32 = 58;

pub const ERROR_DIALOG_TITLE: &str = "Unexpected error!";
pub const ERROR_DIALOG_CONTENT: &str =
    "The error message has been copied to the clipboard and written to the log. Report it?";

/// Error type for shell operations.
/// 外壳操作的错误类型。
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Failed to load settings: {0}")]
    LoadSettings(String),

    #[error("Failed to save settings: {0}")]
    SaveSettings(String),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error("Shell runtime is not running")]
    RuntimeClosed,
}

pub struct ShellController {
    window: Arc<dyn WindowPort>,
    compositor: Arc<dyn CompositorPort>,
    settings_store: Arc<dyn SettingsPort>,
    task_manager: Arc<dyn TaskManagerPort>,
    dialog: Arc<dyn DialogPort>,
    opener: Arc<dyn OpenerPort>,
    tray: Arc<dyn TrayPort>,
    splash: Arc<dyn SplashPort>,
    update_checker: Arc<dyn UpdateCheckerPort>,

    theme: ThemeReconciler,
    clipboard: ClipboardIngestionPipeline,
    unifier: IngestionUnifier,

    options: ShellOptions,
    settings: ShellSettings,
    /// Weak so the runtime stops once every [`ShellHandle`](crate::runtime::ShellHandle) is gone.
    events: mpsc::WeakSender<ShellEvent>,
    commands: mpsc::Sender<ShellCommand>,
}

impl ShellController {
    pub fn new(
        deps: ShellDeps,
        options: ShellOptions,
        events: mpsc::Sender<ShellEvent>,
        commands: mpsc::Sender<ShellCommand>,
        appearance_slot: AppearanceSlot,
    ) -> Self {
        let applier = BackgroundEffectApplier::new(
            deps.compositor.clone(),
            deps.window.clone(),
            options.capabilities.clone(),
        );
        let theme = ThemeReconciler::new(
            applier,
            deps.window.clone(),
            deps.os_theme,
            deps.theme_watcher,
            appearance_slot,
            options.mica_retry_delay,
        );
        let clipboard =
            ClipboardIngestionPipeline::new(deps.clipboard, deps.clipboard_monitor, deps.link_validator);

        Self {
            window: deps.window,
            compositor: deps.compositor,
            settings_store: deps.settings,
            task_manager: deps.task_manager,
            dialog: deps.dialog,
            opener: deps.opener,
            tray: deps.tray,
            splash: deps.splash,
            update_checker: deps.update_checker,
            theme,
            clipboard,
            unifier: IngestionUnifier::new(options.platform),
            options,
            settings: ShellSettings::default(),
            events: events.downgrade(),
            commands,
        }
    }

    pub fn settings(&self) -> &ShellSettings {
        &self.settings
    }

    pub fn theme(&self) -> &ThemeReconciler {
        &self.theme
    }

    pub fn clipboard(&self) -> &ClipboardIngestionPipeline {
        &self.clipboard
    }

    /// Startup sequence. `silent` keeps the window hidden (autostart).
    pub async fn start(&mut self, silent: bool) {
        let span = info_span!("shell.start", silent);
        async {
            self.settings = match self.load_settings().await {
                Ok(settings) => settings,
                Err(e) => {
                    error!(error = %e, "Falling back to default settings");
                    ShellSettings::default()
                }
            };

            self.init_window().await;
            if !silent {
                self.window.show();
            }
            self.window.set_accept_drops(true);

            self.theme
                .restore(self.settings.theme_mode, self.settings.background_effect);

            if self.settings.enable_clipboard_listener {
                self.start_clipboard_listener();
            }

            self.tray.show();

            if self.settings.check_update_at_start_up {
                let checker = self.update_checker.clone();
                tokio::spawn(async move {
                    if let Err(e) = checker.check_for_update().await {
                        warn!(error = %e, "Update check failed");
                    }
                });
            }

            self.splash.finish();
            info!("Shell started");
        }
        .instrument(span)
        .await
    }

    /// Title, platform chrome and geometry restoration.
    ///
    /// Geometry that cannot be restored is replaced by the centered default
    /// and the persisted value is overwritten with `"Default"`.
    pub async fn init_window(&mut self) {
        self.window.set_title(WINDOW_TITLE);

        if self.options.platform == OsPlatform::MacOs {
            self.window.insert_title_bar_spacing(MACOS_TITLE_BAR_SPACING);
        }
        self.update_frameless();

        let screen = self.window.available_screen();
        let restored = match &self.settings.geometry {
            GeometrySetting::Default => {
                self.place_default(screen);
                return;
            }
            GeometrySetting::Saved(rect) => self.restore_geometry(*rect, screen),
            GeometrySetting::Unrecognized(raw) => Err(WindowError::InvalidGeometry(raw.clone())),
        };

        if let Err(e) = restored {
            error!(error = %e, geometry = %self.settings.geometry, "Failed to restore window geometry");
            self.place_default(screen);
            self.settings.geometry = GeometrySetting::Default;
            if let Err(e) = self.persist().await {
                error!(error = %e, "Failed to reset persisted geometry");
            }
        }
    }

    fn restore_geometry(&self, rect: Rect, screen: Rect) -> Result<(), WindowError> {
        if rect.is_empty() {
            return Err(WindowError::InvalidGeometry(format!(
                "{}x{}",
                rect.width, rect.height
            )));
        }
        if !screen.intersects(&rect) {
            return Err(WindowError::OffScreen);
        }
        self.window.set_geometry(rect)
    }

    fn place_default(&self, screen: Rect) {
        if let Err(e) = self.window.set_geometry(default_window_rect(screen)) {
            warn!(error = %e, "Failed to place window at default geometry");
        }
    }

    /// macOS traffic-light placement for a title bar of `height`.
    pub fn system_title_bar_rect(&self, height: u32) -> Rect {
        system_title_bar_rect(height, self.window.is_full_screen())
    }

    /// Frameless chrome from Windows 10 on; stay-on-top survives the toggle.
    pub fn update_frameless(&self) {
        if !self.options.capabilities.frameless_decorations() {
            return;
        }

        let stay_on_top = self.window.flags().stay_on_top;
        self.window.set_flags(WindowFlags {
            frameless: true,
            stay_on_top,
        });

        let calls: [(&str, Result<(), CompositorError>); 3] = [
            ("enable_blur_behind", self.compositor.enable_blur_behind()),
            ("add_window_animation", self.compositor.add_window_animation()),
            ("add_shadow", self.compositor.add_shadow()),
        ];
        for (call, result) in calls {
            if let Err(e) = result {
                warn!(call, error = %e, "Frameless decoration failed");
            }
        }
    }

    /// Close button: persist geometry unless maximized, then hide.
    pub async fn close_requested(&mut self) {
        if !self.window.is_maximized() {
            self.settings.geometry = GeometrySetting::Saved(self.window.geometry());
            if let Err(e) = self.persist().await {
                error!(error = %e, "Failed to save window geometry");
            }
        }
        self.window.hide();
    }

    pub fn show_main_window(&self) {
        self.window.show();
        self.window.bring_to_front();
    }

    pub fn on_settings_changed(&mut self, change: SettingsChange) {
        debug!(?change, "Settings changed");
        self.settings.apply(&change);

        match change {
            SettingsChange::ThemeMode(mode) => self.theme.set_mode(mode),
            SettingsChange::BackgroundEffect(effect) => self.theme.set_effect(effect),
            SettingsChange::ClipboardListener(true) => self.start_clipboard_listener(),
            SettingsChange::ClipboardListener(false) => self.clipboard.stop(),
            SettingsChange::CheckUpdateAtStartUp(_) => {}
        }
    }

    pub fn on_os_theme_changed(&mut self, appearance: ResolvedAppearance) {
        if let Some(delay) = self.theme.on_os_theme_changed(appearance) {
            self.schedule(delay, ShellCommand::ReapplyEffect);
        }
    }

    pub fn reapply_effect(&self) {
        self.theme.reapply();
    }

    pub fn start_clipboard_listener(&self) {
        if let Err(e) = self.clipboard.start(self.change_sink()) {
            error!(error = %e, "Failed to start clipboard listener");
        }
    }

    pub fn stop_clipboard_listener(&self) {
        self.clipboard.stop();
    }

    fn change_sink(&self) -> ChangeSink {
        let events = self.events.clone();
        Arc::new(move || {
            let Some(events) = events.upgrade() else {
                trace!("Shell runtime gone, clipboard notification dropped");
                return;
            };
            if let Err(e) = events.try_send(ShellEvent::ClipboardChanged) {
                trace!(error = %e, "Clipboard notification dropped");
            }
        })
    }

    pub async fn on_clipboard_changed(&self) {
        if !self.clipboard.is_running() {
            trace!("Stale clipboard notification after listener stop");
            return;
        }

        if let Some(request) = self.clipboard.handle_change().await {
            self.window.bring_to_front();
            self.schedule_proposal(request);
        }
    }

    pub fn on_drag_enter(&self, payload: &DropPayload) -> DropVerdict {
        self.unifier.drag_enter(payload)
    }

    pub fn on_drop(&self, payload: &DropPayload) {
        match self.unifier.drop(payload) {
            Some(request) => self.schedule_proposal(request),
            None => debug!("Drop carried no http urls or text"),
        }
    }

    /// `true` when the key press was consumed.
    pub fn on_key_pressed(&self, chord: &KeyChord) -> bool {
        let outcome = self
            .unifier
            .paste(chord, self.clipboard.is_running(), || self.clipboard.read_text());

        let handled = outcome.is_handled();
        if let KeyOutcome::Paste(Some(request)) = outcome {
            self.schedule_proposal(request);
        }
        handled
    }

    /// `true` when `code` was the reactivation message.
    pub fn on_native_message(&self, code: u32) -> bool {
        if !self.unifier.reactivate(code) {
            return false;
        }
        info!("Reactivated by a second instance");
        self.show_main_window();
        true
    }

    /// Queue a proposal behind the staging delay.
    pub fn schedule_proposal(&self, request: CandidateRequest) {
        self.schedule(self.options.propose_delay, ShellCommand::ProposeTask(request));
    }

    pub async fn propose_task(&self, request: CandidateRequest) {
        debug!(source = request.source.as_str(), "Proposing task");
        if let Err(e) = self
            .task_manager
            .propose_task(request.raw_text, Headers::new())
            .await
        {
            error!(error = %e, "Task manager rejected proposal");
            let report = ShellEvent::AppError {
                message: format!("{e:#}"),
            };
            match self.events.upgrade() {
                Some(events) => {
                    if let Err(e) = events.try_send(report) {
                        warn!(error = %e, "Failed to route error report");
                    }
                }
                None => warn!("Shell runtime gone, error report dropped"),
            }
        }
    }

    /// Error-report channel: copy, ask, open the feedback page.
    pub async fn on_app_error(&self, message: &str) {
        if let Err(e) = self.clipboard.write_tagged(message) {
            warn!(error = %e, "Failed to copy error message");
        }

        if self.dialog.confirm(ERROR_DIALOG_TITLE, ERROR_DIALOG_CONTENT).await {
            if let Err(e) = self.opener.open_url(&self.options.feedback_url) {
                warn!(error = %e, url = %self.options.feedback_url, "Failed to open feedback page");
            }
        }
    }

    pub fn shutdown(&mut self) {
        self.clipboard.stop();
        self.theme.shutdown();
        info!("Shell stopped");
    }

    fn schedule(&self, delay: Duration, command: ShellCommand) {
        let commands = self.commands.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if commands.send(command).await.is_err() {
                debug!("Shell runtime gone, dropping deferred command");
            }
        });
    }

    async fn load_settings(&self) -> Result<ShellSettings, ShellError> {
        self.settings_store
            .load()
            .await
            .map_err(|e| ShellError::LoadSettings(format!("{e:#}")))
    }

    async fn persist(&self) -> Result<(), ShellError> {
        self.settings_store
            .save(&self.settings)
            .await
            .map_err(|e| ShellError::SaveSettings(format!("{e:#}")))
    }
}
