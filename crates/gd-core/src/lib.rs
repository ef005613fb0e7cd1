//! # gd-core
//!
//! Core domain models and ports for the Ghost Downloader shell.
//!
//! This crate contains pure shell logic (appearance, capability table,
//! ingestion rules, window geometry) without any platform dependencies.

// Public module exports
pub mod appearance;
pub mod capability;
pub mod clipboard;
pub mod geometry;
pub mod ingest;
pub mod ports;
pub mod settings;

// Re-export commonly used types at the crate root
pub use appearance::{BackgroundEffectKind, ResolvedAppearance, ThemeMode, WidgetTheme};
pub use capability::{EffectCapabilities, OsPlatform, OsVersion};
pub use clipboard::{ClipboardPayload, OriginTag, Tagged, ORIGIN_TAG_FORMAT};
pub use geometry::{GeometrySetting, Rect};
pub use ingest::{CandidateRequest, DropPayload, DropVerdict, KeyChord, SourceKind};
pub use settings::{SettingsChange, ShellSettings};
