//! Candidate requests and the rules shared by every ingestion entry point.

use std::collections::HashSet;

use crate::capability::OsPlatform;

/// Prefix a dropped URL must carry to be forwarded.
pub const HTTP_PREFIX: &str = "http";

/// Windows `WM_USER`.
pub const WM_USER: u32 = 0x0400;

/// Private message a second instance posts to wake the running one.
pub const REACTIVATION_MESSAGE: u32 = WM_USER + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Paste,
    Drop,
    ClipboardWatch,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Paste => "paste",
            SourceKind::Drop => "drop",
            SourceKind::ClipboardWatch => "clipboard_watch",
        }
    }
}

/// Raw, not yet validated text proposed as new download tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRequest {
    pub raw_text: String,
    pub source: SourceKind,
}

impl CandidateRequest {
    pub fn new(raw_text: impl Into<String>, source: SourceKind) -> Self {
        Self {
            raw_text: raw_text.into(),
            source,
        }
    }

    /// Build a request from already-cleaned lines, joined with `\n`.
    ///
    /// Returns `None` when there is nothing to propose.
    pub fn from_lines<I, S>(lines: I, source: SourceKind) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");

        if joined.is_empty() {
            None
        } else {
            Some(Self::new(joined, source))
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.raw_text.split('\n')
    }
}

/// Split clipboard text into candidate lines.
///
/// Lines are trimmed, empty lines dropped, and repeated lines collapsed to
/// their first occurrence.
pub fn split_candidate_lines(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(*line))
        .map(str::to_string)
        .collect()
}

/// Keep only URLs whose string form starts with `http`.
pub fn filter_http_urls<'a, I>(urls: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    urls.into_iter()
        .map(String::as_str)
        .filter(|url| url.starts_with(HTTP_PREFIX))
        .collect()
}

/// Data carried by a drag-and-drop gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropPayload {
    pub urls: Vec<String>,
    pub text: Option<String>,
}

impl DropPayload {
    pub fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
            text: None,
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            urls: Vec::new(),
            text: Some(text.into()),
        }
    }

    pub fn has_urls(&self) -> bool {
        !self.urls.is_empty()
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Drag-enter decision.
    pub fn verdict(&self) -> DropVerdict {
        if self.has_urls() || self.has_text() {
            DropVerdict::Accept
        } else {
            DropVerdict::Reject
        }
    }

    /// Text to propose for this drop; `None` when nothing survives filtering.
    ///
    /// URLs take precedence over text and are filtered by [`HTTP_PREFIX`].
    pub fn candidate_text(&self) -> Option<String> {
        let text = if self.has_urls() {
            filter_http_urls(&self.urls).join("\n")
        } else {
            self.text.clone()?
        };

        (!text.is_empty()).then_some(text)
    }
}

/// Answer given to the OS drag cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropVerdict {
    Accept,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Insert,
    Other(u32),
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyChord {
    pub key: Option<Key>,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyChord {
    pub fn new(key: Key) -> Self {
        Self {
            key: Some(key),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Whether this chord is the platform's standard paste shortcut.
    pub fn is_standard_paste(&self, platform: OsPlatform) -> bool {
        let v = matches!(self.key, Some(Key::Char('v' | 'V')));
        let insert = matches!(self.key, Some(Key::Insert));

        match platform {
            OsPlatform::MacOs => v && self.meta && !self.ctrl && !self.alt,
            _ => {
                (v && self.ctrl && !self.alt && !self.meta)
                    || (insert && self.shift && !self.ctrl && !self.alt)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_dropped() {
        assert_eq!(
            split_candidate_lines("http://a.test\n\nhttp://b.test"),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn lines_are_trimmed_and_deduplicated() {
        assert_eq!(
            split_candidate_lines("  http://a.test \r\n\thttp://a.test\nhttp://c.test  \n   "),
            vec!["http://a.test", "http://c.test"]
        );
    }

    #[test]
    fn drop_keeps_only_http_urls() {
        let payload = DropPayload::from_urls(["http://x.test", "ftp://y.test"]);
        assert_eq!(payload.candidate_text().as_deref(), Some("http://x.test"));
    }

    #[test]
    fn drop_with_only_foreign_schemes_yields_nothing() {
        let payload = DropPayload::from_urls(["file:///tmp/a.zip", "ftp://y.test"]);
        assert_eq!(payload.verdict(), DropVerdict::Accept);
        assert_eq!(payload.candidate_text(), None);
    }

    #[test]
    fn drop_text_is_forwarded_verbatim() {
        let payload = DropPayload::from_text("magnet-ish text\nhttp://z.test");
        assert_eq!(
            payload.candidate_text().as_deref(),
            Some("magnet-ish text\nhttp://z.test")
        );
    }

    #[test]
    fn empty_drop_is_rejected() {
        assert_eq!(DropPayload::default().verdict(), DropVerdict::Reject);
    }

    #[test]
    fn paste_chord_is_platform_specific() {
        let ctrl_v = KeyChord::new(Key::Char('v')).ctrl();
        let cmd_v = KeyChord::new(Key::Char('v')).meta();
        let shift_insert = KeyChord::new(Key::Insert).shift();

        assert!(ctrl_v.is_standard_paste(OsPlatform::Windows));
        assert!(shift_insert.is_standard_paste(OsPlatform::Linux));
        assert!(!cmd_v.is_standard_paste(OsPlatform::Windows));
        assert!(cmd_v.is_standard_paste(OsPlatform::MacOs));
        assert!(!ctrl_v.is_standard_paste(OsPlatform::MacOs));
        assert!(!KeyChord::new(Key::Char('c')).ctrl().is_standard_paste(OsPlatform::Windows));
    }

    #[test]
    fn request_from_lines_joins_with_newline() {
        let request = CandidateRequest::from_lines(["a", "b"], SourceKind::ClipboardWatch).unwrap();
        assert_eq!(request.raw_text, "a\nb");
        assert_eq!(request.lines().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(CandidateRequest::from_lines(Vec::<String>::new(), SourceKind::Drop).is_none());
    }

    #[test]
    fn reactivation_code_is_wm_user_plus_one() {
        assert_eq!(REACTIVATION_MESSAGE, 1025);
    }
}
