use std::sync::{mpsc, Mutex};
use std::thread::{self, JoinHandle};

use clipboard_rs::{ClipboardHandler, ClipboardWatcher, ClipboardWatcherContext, WatcherShutdown};
use gd_core::ports::{ChangeSink, ClipboardError, ClipboardMonitorPort};
use tracing::{info, warn};

/// Forwards OS change notifications to the sink without touching the clipboard.
struct SinkHandler {
    sink: ChangeSink,
}

impl ClipboardHandler for SinkHandler {
    fn on_clipboard_change(&mut self) {
        (self.sink)();
    }
}

struct RunningMonitor {
    shutdown: WatcherShutdown,
    thread: JoinHandle<()>,
}

/// Clipboard-change subscription on a dedicated thread.
///
/// The watcher context is created on the watch thread itself; only the
/// shutdown channel crosses back to the caller.
#[derive(Default)]
pub struct ClipboardRsMonitor {
    running: Mutex<Option<RunningMonitor>>,
}

impl ClipboardRsMonitor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardMonitorPort for ClipboardRsMonitor {
    fn start(&self, sink: ChangeSink) -> Result<(), ClipboardError> {
        let mut running = self
            .running
            .lock()
            .map_err(|_| ClipboardError::Unavailable("monitor mutex poisoned".into()))?;
        if running.is_some() {
            return Ok(());
        }

        let (ready_tx, ready_rx) = mpsc::channel::<Result<WatcherShutdown, String>>();
        let thread = thread::Builder::new()
            .name("clipboard-monitor".into())
            .spawn(move || {
                let mut ctx = match ClipboardWatcherContext::new() {
                    Ok(ctx) => ctx,
                    Err(e) => {
                        let _ = ready_tx.send(Err(format!("Failed to create watcher context: {e}")));
                        return;
                    }
                };
                let shutdown = ctx.add_handler(SinkHandler { sink }).get_shutdown_channel();
                if ready_tx.send(Ok(shutdown)).is_err() {
                    return;
                }

                info!("start clipboard watch");
                ctx.start_watch();
                info!("clipboard watch stopped");
            })
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

        let shutdown = ready_rx
            .recv()
            .map_err(|_| ClipboardError::Unavailable("clipboard monitor thread exited".into()))?
            .map_err(ClipboardError::Unavailable)?;

        *running = Some(RunningMonitor { shutdown, thread });
        Ok(())
    }

    fn stop(&self) {
        let monitor = match self.running.lock() {
            Ok(mut running) => running.take(),
            Err(_) => return,
        };

        if let Some(RunningMonitor { shutdown, thread }) = monitor {
            shutdown.stop();
            if thread.join().is_err() {
                warn!("clipboard monitor thread panicked");
            }
        }
    }

    fn is_running(&self) -> bool {
        self.running.lock().map(|r| r.is_some()).unwrap_or(false)
    }
}

impl Drop for ClipboardRsMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}
