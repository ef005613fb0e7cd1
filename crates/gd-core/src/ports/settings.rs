use async_trait::async_trait;

use crate::settings::ShellSettings;

/// Configuration store collaborator. Writes are persisted immediately by the
/// implementation.
#[async_trait]
pub trait SettingsPort: Send + Sync {
    async fn load(&self) -> anyhow::Result<ShellSettings>;
    async fn save(&self, settings: &ShellSettings) -> anyhow::Result<()>;
}
