//! Clipboard ingestion pipeline
//! 剪贴板摄取管道
//!
//! Turns clipboard-change notifications into validated candidate requests.
//! The monitor only signals; reading, provenance checks and validation run
//! on the shell runtime.

use std::sync::Arc;

use gd_core::ingest::split_candidate_lines;
use gd_core::ports::{ChangeSink, ClipboardError, ClipboardMonitorPort, LinkValidatorPort, SystemClipboardPort};
use gd_core::{CandidateRequest, SourceKind, Tagged};
use tracing::{debug, info, info_span, warn, Instrument};

pub struct ClipboardIngestionPipeline {
    clipboard: Arc<dyn SystemClipboardPort>,
    monitor: Arc<dyn ClipboardMonitorPort>,
    validator: Arc<dyn LinkValidatorPort>,
}

impl ClipboardIngestionPipeline {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        monitor: Arc<dyn ClipboardMonitorPort>,
        validator: Arc<dyn LinkValidatorPort>,
    ) -> Self {
        Self {
            clipboard,
            monitor,
            validator,
        }
    }

    /// Subscribe to change notifications. No-op while already running.
    pub fn start(&self, sink: ChangeSink) -> Result<(), ClipboardError> {
        if self.monitor.is_running() {
            debug!("clipboard listener already running");
            return Ok(());
        }
        self.monitor.start(sink)?;
        info!("clipboard listener started");
        Ok(())
    }

    /// Unsubscribe. Returns once the sink can no longer fire.
    pub fn stop(&self) {
        if self.monitor.is_running() {
            self.monitor.stop();
            info!("clipboard listener stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.monitor.is_running()
    }

    /// Process one change notification.
    ///
    /// Never fails: any error is logged and yields no candidates.
    pub async fn handle_change(&self) -> Option<CandidateRequest> {
        let span = info_span!("clipboard.handle_change");
        match self.collect().instrument(span).await {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "failed to check clipboard");
                None
            }
        }
    }

    async fn collect(&self) -> Result<Option<CandidateRequest>, ClipboardError> {
        let payload = self.clipboard.read()?;

        if payload.is_self_origin() {
            debug!("clipboard changed by the shell itself");
            return Ok(None);
        }

        let lines = match (&payload.text, payload.has_urls()) {
            (Some(text), _) => split_candidate_lines(text),
            (None, true) => split_candidate_lines(&payload.urls.join("\n")),
            (None, false) => return Ok(None),
        };

        let mut valid = Vec::with_capacity(lines.len());
        for line in lines {
            match self.validator.validate(&line).await {
                Ok(true) => valid.push(line),
                Ok(false) => debug!(line = %line, "invalid url"),
                Err(e) => debug!(line = %line, error = %e, "link validation failed"),
            }
        }

        let request = CandidateRequest::from_lines(&valid, SourceKind::ClipboardWatch);
        match &request {
            Some(request) => debug!(lines = valid.len(), text = %request.raw_text, "clipboard candidates"),
            None => debug!("no valid clipboard candidates"),
        }
        Ok(request)
    }

    /// Raw clipboard text for the paste shortcut.
    pub fn read_text(&self) -> Option<String> {
        match self.clipboard.read() {
            Ok(payload) => payload.text,
            Err(e) => {
                debug!(error = %e, "failed to read clipboard text");
                None
            }
        }
    }

    /// Write text marked as self-origin so the listener skips it.
    pub fn write_tagged(&self, text: impl Into<String>) -> Result<(), ClipboardError> {
        self.clipboard.write_text(Tagged::fresh(text.into()))
    }
}
