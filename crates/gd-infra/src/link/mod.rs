//! Local link vetting for clipboard candidates.
//!
//! A line is a candidate download when it parses as an absolute `http` or
//! `https` URL with a host. When an attachment filter is configured, the
//! last path segment must also end with one of the listed extensions.

use async_trait::async_trait;
use gd_core::ports::LinkValidatorPort;
use url::Url;

const ACCEPTED_SCHEMES: [&str; 2] = ["http", "https"];

#[derive(Debug, Default, Clone)]
pub struct UrlLinkValidator {
    /// Lower-cased extensions including the leading dot; empty accepts any file.
    attachment_types: Vec<String>,
}

impl UrlLinkValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict candidates to file names ending in one of `types`.
    ///
    /// `types` is whitespace separated, e.g. `".zip .exe .iso"`. 扩展名不区分大小写。
    pub fn with_attachment_types(types: &str) -> Self {
        let attachment_types = types
            .split_whitespace()
            .map(|t| {
                let t = t.to_ascii_lowercase();
                if t.starts_with('.') {
                    t
                } else {
                    format!(".{t}")
                }
            })
            .collect();
        Self { attachment_types }
    }

    pub fn accepts(&self, candidate: &str) -> anyhow::Result<bool> {
        let url = Url::parse(candidate.trim())?;

        if !ACCEPTED_SCHEMES.contains(&url.scheme()) || url.host_str().is_none() {
            return Ok(false);
        }
        if self.attachment_types.is_empty() {
            return Ok(true);
        }

        let file_name = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_ascii_lowercase();
        Ok(self
            .attachment_types
            .iter()
            .any(|ext| file_name.ends_with(ext.as_str())))
    }
}

#[async_trait]
impl LinkValidatorPort for UrlLinkValidator {
    async fn validate(&self, candidate: &str) -> anyhow::Result<bool> {
        self.accepts(candidate)
    }
}
