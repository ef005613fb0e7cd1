//! # gd-app
//!
//! Shell orchestration for Ghost Downloader.
//! Ghost Downloader 外壳编排层。
//!
//! The [`ShellRuntime`] owns a [`ShellController`] on a single task and
//! feeds it window events, deferred commands and OS theme transitions.

pub mod clipboard;
pub mod deps;
pub mod effects;
pub mod events;
pub mod ingest;
pub mod runtime;
pub mod shell;
pub mod theme;

pub use clipboard::ClipboardIngestionPipeline;
pub use deps::{ShellDeps, ShellOptions};
pub use effects::BackgroundEffectApplier;
pub use events::{ShellCommand, ShellEvent};
pub use ingest::{IngestionUnifier, KeyOutcome};
pub use runtime::{ShellHandle, ShellRuntime};
pub use shell::{ShellController, ShellError};
pub use theme::{ReconcilerState, ThemeReconciler};
