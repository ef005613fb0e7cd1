//! # gd-platform
//!
//! Platform-specific implementations for the Ghost Downloader shell.
//!
//! This crate contains the adapters that talk to the operating system:
//! the clipboard (via `clipboard-rs`), the OS light/dark signal (via
//! `dark-light`), the Windows compositor and OS version detection.

pub mod clipboard;
pub mod compositor;
pub mod opener;
pub mod os_version;
pub mod theme;
pub mod window;

pub use clipboard::{ClipboardRsClipboard, ClipboardRsMonitor};
pub use compositor::{native_compositor, NoopCompositor};
pub use opener::SystemOpener;
pub use os_version::detect_os_version;
pub use theme::{DarkLightProbe, OsThemeWatcher, DEFAULT_POLL_INTERVAL};
pub use window::HeadlessWindow;
