use async_trait::async_trait;

/// Link-resolution collaborator used to vet clipboard lines.
///
/// `Ok(false)` and `Err(_)` both exclude the line; the error is only logged.
#[async_trait]
pub trait LinkValidatorPort: Send + Sync {
    async fn validate(&self, candidate: &str) -> anyhow::Result<bool>;
}
