//! Messages drained by the shell runtime.
//! 外壳运行时处理的消息。

use gd_core::{CandidateRequest, DropPayload, DropVerdict, KeyChord, SettingsChange};
use tokio::sync::oneshot;

/// Inbound events from the windowing layer, the clipboard monitor and the
/// rest of the application.
#[derive(Debug)]
pub enum ShellEvent {
    /// Clipboard content changed. Carries no data; the runtime reads it.
    ClipboardChanged,
    DragEnter {
        payload: DropPayload,
        reply: Option<oneshot::Sender<DropVerdict>>,
    },
    Drop {
        payload: DropPayload,
    },
    /// `reply` receives whether the shell consumed the key press.
    KeyPressed {
        chord: KeyChord,
        reply: Option<oneshot::Sender<bool>>,
    },
    /// Native window message; `reply` receives whether it was handled.
    NativeMessage {
        code: u32,
        reply: Option<oneshot::Sender<bool>>,
    },
    CloseRequested,
    ShowMainWindow,
    SettingsChanged(SettingsChange),
    AppError {
        message: String,
    },
    Shutdown,
}

/// Deferred work the runtime schedules for itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    ProposeTask(CandidateRequest),
    ReapplyEffect,
}
