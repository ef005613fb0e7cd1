//! Port interfaces for the shell
//!
//! Ports define the contract between the shell orchestration (`gd-app`)
//! and the platform / infrastructure implementations. Every collaborator
//! the shell talks to is handed in as one of these traits at construction
//! time; nothing is looked up from global state.
//!
//! ## Threading
//!
//! Window, compositor and clipboard ports are only called from the shell
//! runtime task. The theme watcher is the single port that owns a
//! background thread, and it only ever writes to the `watch` slot it was
//! given.

pub mod clipboard;
pub mod compositor;
pub mod errors;
pub mod link;
pub mod settings;
pub mod task_manager;
pub mod theme;
pub mod ui;
pub mod window;

pub use clipboard::{ChangeSink, ClipboardMonitorPort, SystemClipboardPort};
pub use compositor::{CompositorPort, MicaVariant, Rgba};
pub use errors::{ClipboardError, CompositorError, WatcherError, WindowError};
pub use link::LinkValidatorPort;
pub use settings::SettingsPort;
pub use task_manager::{Headers, TaskManagerPort};
pub use theme::{AppearanceSlot, OsThemePort, RunningThemeWatcher, ThemeWatcherPort};
pub use ui::{DialogPort, OpenerPort, SplashPort, TrayPort, UpdateCheckerPort};
pub use window::{CaptionButton, WindowFlags, WindowPort};
