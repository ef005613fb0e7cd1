mod monitor;
mod system;

pub use monitor::ClipboardRsMonitor;
pub use system::ClipboardRsClipboard;
