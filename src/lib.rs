//! Ghost Downloader shell bootstrap.
//!
//! Loads configuration, installs tracing and assembles the shell runtime
//! from the workspace crates. GUI hosts call [`bootstrap::wire_dependencies`]
//! with their own window; the `shell-probe` binary uses a headless one.

pub mod adapters;
pub mod bootstrap;
