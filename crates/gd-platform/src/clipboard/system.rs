use std::sync::{Mutex, MutexGuard};

use clipboard_rs::{Clipboard, ClipboardContent, ClipboardContext, ContentFormat};
use gd_core::ports::{ClipboardError, SystemClipboardPort};
use gd_core::{ClipboardPayload, OriginTag, Tagged, ORIGIN_TAG_FORMAT};
use tracing::debug;

/// System clipboard backed by clipboard-rs.
///
/// The origin marker lives under [`ORIGIN_TAG_FORMAT`] in the same
/// clipboard transaction as the text it tags.
pub struct ClipboardRsClipboard {
    inner: Mutex<ClipboardContext>,
}

impl ClipboardRsClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let context = ClipboardContext::new()
            .map_err(|e| ClipboardError::Unavailable(format!("Failed to create clipboard context: {e}")))?;
        Ok(Self {
            inner: Mutex::new(context),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, ClipboardContext>, ClipboardError> {
        self.inner
            .lock()
            .map_err(|_| ClipboardError::Unavailable("clipboard mutex poisoned".into()))
    }
}

impl SystemClipboardPort for ClipboardRsClipboard {
    fn read(&self) -> Result<ClipboardPayload, ClipboardError> {
        let ctx = self.lock()?;

        let origin = if ctx.has(ContentFormat::Other(ORIGIN_TAG_FORMAT.to_string())) {
            match ctx.get_buffer(ORIGIN_TAG_FORMAT) {
                Ok(bytes) => Some(OriginTag::from_bytes(bytes)),
                Err(e) => {
                    debug!(error = %e, "origin marker unreadable");
                    None
                }
            }
        } else {
            None
        };

        let text = if ctx.has(ContentFormat::Text) {
            Some(ctx.get_text().map_err(|e| ClipboardError::Read(e.to_string()))?)
        } else {
            None
        };

        let urls = if ctx.has(ContentFormat::Files) {
            ctx.get_files().map_err(|e| ClipboardError::Read(e.to_string()))?
        } else {
            Vec::new()
        };

        Ok(ClipboardPayload { origin, text, urls })
    }

    fn write_text(&self, content: Tagged<String>) -> Result<(), ClipboardError> {
        let (text, origin) = content.into_parts();
        let ctx = self.lock()?;
        ctx.set(vec![
            ClipboardContent::Text(text),
            ClipboardContent::Other(ORIGIN_TAG_FORMAT.to_string(), origin.as_bytes().to_vec()),
        ])
        .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}
