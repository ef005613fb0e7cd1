//! Provenance-tagged clipboard payloads.
//!
//! Every clipboard write the shell performs goes out as a [`Tagged`] value;
//! the platform adapter stores the tag under [`ORIGIN_TAG_FORMAT`] next to
//! the content. Every read comes back as a [`ClipboardPayload`] and is
//! checked with [`ClipboardPayload::is_self_origin`] before anything acts on
//! it.

use uuid::Uuid;

/// Private clipboard format carrying the self-origin marker.
pub const ORIGIN_TAG_FORMAT: &str = "application/x-gd3-copy";

/// Opaque self-origin marker. Never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OriginTag(Vec<u8>);

impl OriginTag {
    /// Fresh marker for one clipboard write.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string().into_bytes())
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outbound value paired with the marker that identifies its writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagged<T> {
    pub origin: OriginTag,
    pub value: T,
}

impl<T> Tagged<T> {
    pub fn new(value: T, origin: OriginTag) -> Self {
        Self { origin, value }
    }

    /// Tag `value` with a freshly generated marker.
    pub fn fresh(value: T) -> Self {
        Self::new(value, OriginTag::generate())
    }

    pub fn into_parts(self) -> (T, OriginTag) {
        (self.value, self.origin)
    }
}

/// Inbound clipboard snapshot as seen by the ingestion pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardPayload {
    /// Marker found under [`ORIGIN_TAG_FORMAT`], if any.
    pub origin: Option<OriginTag>,
    /// Plain-text representation.
    pub text: Option<String>,
    /// URL-list representation.
    pub urls: Vec<String>,
}

impl ClipboardPayload {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, origin: OriginTag) -> Self {
        self.origin = Some(origin);
        self
    }

    /// A present, non-empty marker means the shell wrote this content itself.
    pub fn is_self_origin(&self) -> bool {
        self.origin.as_ref().is_some_and(|tag| !tag.is_empty())
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    pub fn has_urls(&self) -> bool {
        !self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_marker_is_not_self_origin() {
        let payload = ClipboardPayload::from_text("http://a.test").with_origin(OriginTag::from_bytes(""));
        assert!(!payload.is_self_origin());
    }

    #[test]
    fn generated_marker_is_self_origin() {
        let tagged = Tagged::fresh("copied".to_string());
        let (text, origin) = tagged.into_parts();
        let payload = ClipboardPayload::from_text(text).with_origin(origin);
        assert!(payload.is_self_origin());
    }

    #[test]
    fn generated_markers_are_unique() {
        assert_ne!(OriginTag::generate(), OriginTag::generate());
    }
}
