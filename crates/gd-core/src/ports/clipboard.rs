use std::sync::Arc;

use crate::clipboard::{ClipboardPayload, Tagged};
use crate::ports::errors::ClipboardError;

/// Callback invoked by a clipboard monitor on every change notification.
///
/// Implementations must not read the clipboard inside the sink; the sink
/// only hands the notification over to the shell runtime.
pub type ChangeSink = Arc<dyn Fn() + Send + Sync>;

/// Process-wide system clipboard.
///
/// The clipboard is a single exclusive resource: implementations acquire it
/// per call and release it before returning, on success and on error.
pub trait SystemClipboardPort: Send + Sync {
    /// Read the current payload, including any self-origin marker.
    fn read(&self) -> Result<ClipboardPayload, ClipboardError>;

    /// Write text together with its origin marker in one clipboard transaction.
    fn write_text(&self, content: Tagged<String>) -> Result<(), ClipboardError>;
}

/// Subscription to clipboard-change notifications.
///
/// # Behavior
/// - `start()` is idempotent while running.
/// - `stop()` unsubscribes and does not return until the sink can no
///   longer be invoked.
pub trait ClipboardMonitorPort: Send + Sync {
    fn start(&self, sink: ChangeSink) -> Result<(), ClipboardError>;

    fn stop(&self);

    fn is_running(&self) -> bool;
}
