//! # gd-infra
//!
//! Infrastructure adapters for the Ghost Downloader shell.
//!
//! - [`settings::FileSettingsRepository`]: JSON settings file behind [`gd_core::ports::SettingsPort`]
//! - [`link::UrlLinkValidator`]: local URL vetting behind [`gd_core::ports::LinkValidatorPort`]

pub mod link;
pub mod settings;

pub use link::UrlLinkValidator;
pub use settings::FileSettingsRepository;
