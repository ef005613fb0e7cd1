use tokio::sync::watch;

use crate::appearance::ResolvedAppearance;
use crate::ports::errors::WatcherError;

/// Single-slot handoff from the watcher thread to the shell runtime.
///
/// Only the latest appearance is kept; intermediate values may be
/// overwritten before the runtime drains the slot.
pub type AppearanceSlot = watch::Sender<Option<ResolvedAppearance>>;

/// Synchronous OS light/dark query.
pub trait OsThemePort: Send + Sync {
    /// `None` when the platform does not report a preference.
    fn is_dark(&self) -> Option<bool>;
}

/// Factory for the background OS theme watcher.
pub trait ThemeWatcherPort: Send + Sync {
    /// Start a watcher thread that publishes OS transitions into `slot`.
    fn spawn(&self, slot: AppearanceSlot) -> Result<Box<dyn RunningThemeWatcher>, WatcherError>;
}

/// Handle to a running watcher thread.
///
/// `Sync` because the controller owning it is borrowed across awaits.
pub trait RunningThemeWatcher: Send + Sync {
    /// Terminate the watcher and wait for its thread to exit.
    fn stop(self: Box<Self>);
}
