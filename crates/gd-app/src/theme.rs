//! Theme reconciler
//! 主题协调器
//!
//! Owns the theme mode, the lifecycle of the OS theme watcher and the
//! current background effect. Every mode or effect change ends with a full
//! re-application through [`BackgroundEffectApplier`].
//!
//! ## States / 状态
//! - `Idle`: mode is `Light` or `Dark`, no watcher.
//! - `Watching`: mode is `System`, exactly one watcher running.

use std::sync::Arc;
use std::time::Duration;

use gd_core::ports::{AppearanceSlot, OsThemePort, RunningThemeWatcher, ThemeWatcherPort, WindowPort};
use gd_core::{BackgroundEffectKind, ResolvedAppearance, ThemeMode};
use tracing::{debug, error, info};

use crate::effects::{normal_background_color, BackgroundEffectApplier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilerState {
    Idle,
    Watching,
}

pub struct ThemeReconciler {
    applier: BackgroundEffectApplier,
    window: Arc<dyn WindowPort>,
    os_theme: Arc<dyn OsThemePort>,
    watcher_factory: Arc<dyn ThemeWatcherPort>,
    slot: AppearanceSlot,
    watcher: Option<Box<dyn RunningThemeWatcher>>,
    mode: ThemeMode,
    effect: BackgroundEffectKind,
    /// Latest appearance reported by the watcher while `Watching`.
    os_appearance: Option<ResolvedAppearance>,
    mica_retry_delay: Duration,
}

impl ThemeReconciler {
    pub fn new(
        applier: BackgroundEffectApplier,
        window: Arc<dyn WindowPort>,
        os_theme: Arc<dyn OsThemePort>,
        watcher_factory: Arc<dyn ThemeWatcherPort>,
        slot: AppearanceSlot,
        mica_retry_delay: Duration,
    ) -> Self {
        Self {
            applier,
            window,
            os_theme,
            watcher_factory,
            slot,
            watcher: None,
            mode: ThemeMode::System,
            effect: BackgroundEffectKind::default(),
            os_appearance: None,
            mica_retry_delay,
        }
    }

    pub fn state(&self) -> ReconcilerState {
        if self.watcher.is_some() {
            ReconcilerState::Watching
        } else {
            ReconcilerState::Idle
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn effect(&self) -> BackgroundEffectKind {
        self.effect
    }

    /// Restore the persisted pair at startup with a single application.
    pub fn restore(&mut self, mode: ThemeMode, effect: BackgroundEffectKind) {
        self.effect = effect;
        self.set_mode(mode);
    }

    /// Switch theme mode.
    ///
    /// Idempotent with respect to the watcher: it is started only on entry
    /// to `System` and stopped only on exit. The effect is re-applied on
    /// every call, including when the mode is unchanged.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        match (mode.follows_system(), self.state()) {
            (true, ReconcilerState::Idle) => self.start_watcher(),
            (false, ReconcilerState::Watching) => self.stop_watcher(),
            _ => {}
        }

        if self.mode != mode {
            info!(from = %self.mode, to = %mode, "theme mode changed");
        }
        self.mode = mode;
        self.window.apply_widget_theme(mode.widget_theme());
        self.reapply();
    }

    pub fn set_effect(&mut self, effect: BackgroundEffectKind) {
        self.effect = effect;
        self.reapply();
    }

    /// Handle an appearance drained from the watcher slot.
    ///
    /// Returns the delay after which the effect must be applied a second
    /// time: the compositor rejects Mica right after a switch to dark.
    pub fn on_os_theme_changed(&mut self, appearance: ResolvedAppearance) -> Option<Duration> {
        if self.state() == ReconcilerState::Idle {
            debug!(?appearance, "os theme change ignored outside system mode");
            return None;
        }

        debug!(is_dark = appearance.is_dark, "os theme changed");
        self.os_appearance = Some(appearance);
        self.window.apply_widget_theme(appearance.widget_theme());

        let retry = (appearance.is_dark && self.effect.is_mica_family()).then_some(self.mica_retry_delay);
        self.reapply();
        retry
    }

    /// Apply the current effect for the current appearance.
    pub fn reapply(&self) -> ResolvedAppearance {
        let appearance = self.resolve();
        let rendered = self.applier.apply(self.effect, appearance.is_dark);
        debug!(effect = %rendered, is_dark = appearance.is_dark, "background effect applied");

        self.window.set_background_color(normal_background_color(
            self.window.is_transparent_background(),
            appearance.is_dark,
        ));
        appearance
    }

    pub fn resolve(&self) -> ResolvedAppearance {
        self.mode.resolve(|| match self.os_appearance {
            Some(appearance) => appearance.is_dark,
            None => self.os_theme.is_dark().unwrap_or(false),
        })
    }

    /// Stop the watcher, if any. Called on shutdown.
    pub fn shutdown(&mut self) {
        if self.watcher.is_some() {
            self.stop_watcher();
        }
    }

    fn start_watcher(&mut self) {
        self.os_appearance = None;
        match self.watcher_factory.spawn(self.slot.clone()) {
            Ok(watcher) => {
                info!("os theme watcher started");
                self.watcher = Some(watcher);
            }
            Err(e) => error!(error = %e, "failed to start os theme watcher"),
        }
    }

    fn stop_watcher(&mut self) {
        // Release the reference before the blocking stop.
        if let Some(watcher) = self.watcher.take() {
            watcher.stop();
            info!("os theme watcher stopped");
        }
        // A value published just before the stop must not reach the next watcher.
        self.slot.send_replace(None);
        self.os_appearance = None;
    }
}

impl Drop for ThemeReconciler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
