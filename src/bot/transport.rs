use anyhow::Result;
use async_trait::async_trait;

/// Outbound side of the voice server connection.
///
/// The dispatcher only ever uses it to deliver replies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `text` to a single user.
    async fn send_private(&self, recipient: &str, text: &str) -> Result<()>;

    /// Sends `text` to everyone in `channel`.
    async fn broadcast(&self, channel: &str, text: &str) -> Result<()>;
}
