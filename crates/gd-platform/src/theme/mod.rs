//! OS light/dark detection and the background theme watcher.
//!
//! `dark-light` has no change notification we can cancel, so the watcher
//! polls on its own thread and only publishes transitions into the
//! appearance slot. Stopping it wakes the poll immediately and joins.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use gd_core::ports::{AppearanceSlot, OsThemePort, RunningThemeWatcher, ThemeWatcherPort, WatcherError};
use gd_core::ResolvedAppearance;
use tracing::{debug, info, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// `dark_light::detect()` as an [`OsThemePort`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DarkLightProbe;

impl OsThemePort for DarkLightProbe {
    fn is_dark(&self) -> Option<bool> {
        match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => Some(true),
            Ok(dark_light::Mode::Light) => Some(false),
            Ok(dark_light::Mode::Unspecified) => None,
            Err(e) => {
                debug!(error = %e, "OS theme detection failed");
                None
            }
        }
    }
}

/// Spawns polling watcher threads over any [`OsThemePort`].
pub struct OsThemeWatcher {
    probe: Arc<dyn OsThemePort>,
    interval: Duration,
}

impl OsThemeWatcher {
    pub fn new(probe: Arc<dyn OsThemePort>, interval: Duration) -> Self {
        Self { probe, interval }
    }

    pub fn dark_light(interval: Duration) -> Self {
        Self::new(Arc::new(DarkLightProbe), interval)
    }
}

impl ThemeWatcherPort for OsThemeWatcher {
    fn spawn(&self, slot: AppearanceSlot) -> Result<Box<dyn RunningThemeWatcher>, WatcherError> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let probe = self.probe.clone();
        let interval = self.interval;

        let thread = thread::Builder::new()
            .name("os-theme-watcher".into())
            .spawn(move || poll(probe.as_ref(), interval, &stop_rx, &slot))
            .map_err(|e| WatcherError::Spawn(e.to_string()))?;

        info!(interval_ms = interval.as_millis() as u64, "OS theme watcher thread started");
        Ok(Box::new(PollingWatcher {
            stop_tx: Some(stop_tx),
            thread: Some(thread),
        }))
    }
}

fn poll(probe: &dyn OsThemePort, interval: Duration, stop: &mpsc::Receiver<()>, slot: &AppearanceSlot) {
    let mut last = probe.is_dark();

    loop {
        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }

        let Some(is_dark) = probe.is_dark() else {
            continue;
        };
        if last == Some(is_dark) {
            continue;
        }

        last = Some(is_dark);
        debug!(is_dark, "OS theme transition");
        slot.send_replace(Some(ResolvedAppearance::from_is_dark(is_dark)));
    }
}

struct PollingWatcher {
    stop_tx: Option<mpsc::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl PollingWatcher {
    fn shutdown(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("OS theme watcher thread panicked");
            }
        }
    }
}

impl RunningThemeWatcher for PollingWatcher {
    fn stop(mut self: Box<Self>) {
        self.shutdown();
        info!("OS theme watcher thread joined");
    }
}

impl Drop for PollingWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
