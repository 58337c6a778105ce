use async_trait::async_trait;
use reqwest::Url;

/// Failure reaching an upstream or reading what it sent back
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// A response whose body has not been read yet
#[async_trait]
pub trait UpstreamResponse: Send {
    fn status(&self) -> u16;

    /// Read the whole body. Consumes the response so the connection is
    /// released whether or not the read succeeds.
    async fn bytes(self: Box<Self>) -> Result<Vec<u8>, UpstreamError>;
}

/// Outbound HTTP capability shared by the providers
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Perform a single GET
    async fn get(&self, url: &Url) -> Result<Box<dyn UpstreamResponse>, UpstreamError>;
}
