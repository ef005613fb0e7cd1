use async_trait::async_trait;

/// Modal message box.
#[async_trait]
pub trait DialogPort: Send + Sync {
    /// `true` when the user accepts.
    async fn confirm(&self, title: &str, content: &str) -> bool;
}

pub trait OpenerPort: Send + Sync {
    fn open_url(&self, url: &str) -> anyhow::Result<()>;
}

pub trait TrayPort: Send + Sync {
    fn show(&self);
}

pub trait SplashPort: Send + Sync {
    fn finish(&self);
}

#[async_trait]
pub trait UpdateCheckerPort: Send + Sync {
    async fn check_for_update(&self) -> anyhow::Result<()>;
}
