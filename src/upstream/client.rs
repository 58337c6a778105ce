use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, info};

use super::interface::{UpstreamClient, UpstreamError, UpstreamResponse};
use crate::config::UpstreamConfig;

/// reqwest-backed upstream client
#[derive(Debug, Clone)]
pub struct HttpUpstreamClient {
    client: Client,
}

struct HttpResponse(reqwest::Response);

impl HttpUpstreamClient {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        info!(
            "Initialized HttpUpstreamClient: request_timeout={}s, connect_timeout={}s",
            config.request_timeout_secs, config.connect_timeout_secs
        );

        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn get(&self, url: &Url) -> Result<Box<dyn UpstreamResponse>, UpstreamError> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        Ok(Box::new(HttpResponse(response)))
    }
}

#[async_trait]
impl UpstreamResponse for HttpResponse {
    fn status(&self) -> u16 {
        self.0.status().as_u16()
    }

    async fn bytes(self: Box<Self>) -> Result<Vec<u8>, UpstreamError> {
        let bytes = self.0.bytes().await?;
        Ok(bytes.to_vec())
    }
}
