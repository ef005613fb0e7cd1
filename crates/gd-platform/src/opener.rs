use anyhow::Context;
use gd_core::ports::OpenerPort;
use tracing::info;

/// Opens URLs with the desktop's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl OpenerPort for SystemOpener {
    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        open::that(url).with_context(|| format!("Failed to open {url}"))?;
        info!(url, "opened in default browser");
        Ok(())
    }
}
