use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompositorError {
    #[error("no native window handle available")]
    NoWindowHandle,

    #[error("compositor call {call} failed: {message}")]
    CallFailed { call: &'static str, message: String },

    #[error("effect not supported on this platform")]
    Unsupported,
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("geometry is off every screen")]
    OffScreen,

    #[error("window backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard is unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read clipboard: {0}")]
    Read(String),

    #[error("failed to write clipboard: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("failed to spawn watcher thread: {0}")]
    Spawn(String),

    #[error("watcher backend error: {0}")]
    Backend(String),
}
