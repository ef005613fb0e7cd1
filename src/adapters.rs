//! Console stand-ins for the GUI collaborators.
//!
//! The probe has no download manager, dialogs, tray or splash screen; these
//! adapters print or log what the real collaborators would have been asked
//! to do.

use async_trait::async_trait;
use gd_core::ports::{DialogPort, Headers, SplashPort, TaskManagerPort, TrayPort, UpdateCheckerPort};
use tracing::info;

/// Prints every proposed download block to stdout.
#[derive(Debug, Default, Clone)]
pub struct ConsoleTaskManager;

#[async_trait]
impl TaskManagerPort for ConsoleTaskManager {
    async fn propose_task(&self, candidate_text: String, headers: Headers) -> anyhow::Result<()> {
        info!(lines = candidate_text.lines().count(), headers = headers.len(), "task proposed");
        println!("--- proposed task ---\n{candidate_text}\n---------------------");
        Ok(())
    }
}

/// Confirms every dialog after printing it.
#[derive(Debug, Default, Clone)]
pub struct ConsoleDialog;

#[async_trait]
impl DialogPort for ConsoleDialog {
    async fn confirm(&self, title: &str, content: &str) -> bool {
        println!("[{title}] {content}");
        true
    }
}

#[derive(Debug, Default, Clone)]
pub struct LoggingTray;

impl TrayPort for LoggingTray {
    fn show(&self) {
        info!("tray icon shown");
    }
}

#[derive(Debug, Default, Clone)]
pub struct LoggingSplash;

impl SplashPort for LoggingSplash {
    fn finish(&self) {
        info!("splash screen finished");
    }
}

/// Update checks are out of the probe's reach; only the request is logged.
#[derive(Debug, Default, Clone)]
pub struct LoggingUpdateChecker;

#[async_trait]
impl UpdateCheckerPort for LoggingUpdateChecker {
    async fn check_for_update(&self) -> anyhow::Result<()> {
        info!("update check requested");
        Ok(())
    }
}
