use std::collections::HashMap;

use async_trait::async_trait;

/// Extra request headers attached to a proposal.
pub type Headers = HashMap<String, String>;

/// Download task manager collaborator.
///
/// Receives a newline-joined block of raw lines and owns everything after
/// that: URL validation, the add-task dialog and queuing. The shell never
/// interprets the outcome beyond logging a failure.
#[async_trait]
pub trait TaskManagerPort: Send + Sync {
    async fn propose_task(&self, candidate_text: String, headers: Headers) -> anyhow::Result<()>;
}
