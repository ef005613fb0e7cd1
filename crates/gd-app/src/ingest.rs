//! Drop / paste / reactivation unifier.
//!
//! Normalizes the three window-level triggers into candidate requests. The
//! unifier decides; the shell controller performs the side effects.

use gd_core::ingest::REACTIVATION_MESSAGE;
use gd_core::{CandidateRequest, DropPayload, DropVerdict, KeyChord, OsPlatform, SourceKind};
use tracing::debug;

/// Result of offering a key press to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The paste chord was consumed; carries the request to propose, if any.
    Paste(Option<CandidateRequest>),
    /// Not ours, let the widget layer handle it.
    PassThrough,
}

impl KeyOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, KeyOutcome::Paste(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IngestionUnifier {
    platform: OsPlatform,
}

impl IngestionUnifier {
    pub fn new(platform: OsPlatform) -> Self {
        Self { platform }
    }

    pub fn drag_enter(&self, payload: &DropPayload) -> DropVerdict {
        let verdict = payload.verdict();
        debug!(?verdict, urls = payload.urls.len(), has_text = payload.has_text(), "drag enter");
        verdict
    }

    /// `None` when the drop carried nothing forwardable, e.g. only `ftp://` URLs.
    pub fn drop(&self, payload: &DropPayload) -> Option<CandidateRequest> {
        payload
            .candidate_text()
            .map(|text| CandidateRequest::new(text, SourceKind::Drop))
    }

    /// Paste shortcut. `clipboard_text` is only read for the paste chord and
    /// only while clipboard monitoring is enabled.
    pub fn paste(
        &self,
        chord: &KeyChord,
        monitoring_enabled: bool,
        clipboard_text: impl FnOnce() -> Option<String>,
    ) -> KeyOutcome {
        if !chord.is_standard_paste(self.platform) {
            return KeyOutcome::PassThrough;
        }

        if !monitoring_enabled {
            debug!("paste ignored while clipboard listener is off");
            return KeyOutcome::Paste(None);
        }

        KeyOutcome::Paste(clipboard_text().map(|text| CandidateRequest::new(text, SourceKind::Paste)))
    }

    /// Whether `code` is the second-instance wake message.
    pub fn reactivate(&self, code: u32) -> bool {
        code == REACTIVATION_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gd_core::ingest::Key;

    #[test]
    fn paste_forwards_raw_text_unfiltered() {
        let unifier = IngestionUnifier::new(OsPlatform::Windows);
        let chord = KeyChord::new(Key::Char('v')).ctrl();

        let outcome = unifier.paste(&chord, true, || Some("  not a url \n\n".to_string()));

        assert_eq!(
            outcome,
            KeyOutcome::Paste(Some(CandidateRequest::new("  not a url \n\n", SourceKind::Paste)))
        );
    }

    #[test]
    fn paste_is_consumed_but_inert_when_listener_is_off() {
        let unifier = IngestionUnifier::new(OsPlatform::Windows);
        let chord = KeyChord::new(Key::Char('v')).ctrl();

        let outcome = unifier.paste(&chord, false, || panic!("clipboard must not be read"));

        assert_eq!(outcome, KeyOutcome::Paste(None));
    }

    #[test]
    fn other_keys_pass_through() {
        let unifier = IngestionUnifier::new(OsPlatform::MacOs);
        let chord = KeyChord::new(Key::Char('v')).ctrl();

        assert_eq!(unifier.paste(&chord, true, || None), KeyOutcome::PassThrough);
    }

    #[test]
    fn only_wm_user_plus_one_reactivates() {
        let unifier = IngestionUnifier::new(OsPlatform::Windows);
        assert!(unifier.reactivate(1025));
        assert!(!unifier.reactivate(1024));
    }
}
