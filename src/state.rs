use std::sync::Arc;

use uuid::Uuid;

use crate::config::Config;
use crate::description::PokeApiDescriptionProvider;
use crate::transform::ShakespeareTransformProvider;
use crate::translation::TranslationService;
use crate::upstream::{HttpUpstreamClient, UpstreamClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<TranslationService>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Arc::new(HttpUpstreamClient::new(&config.upstream_config)?);
        Self::with_client(config, client)
    }

    /// Build the state around any upstream client, real or fake
    pub fn with_client(config: Config, client: Arc<dyn UpstreamClient>) -> anyhow::Result<Self> {
        let descriptions = Arc::new(PokeApiDescriptionProvider::new(
            client.clone(),
            config.upstream_config.description_url()?,
        ));
        let transforms = Arc::new(ShakespeareTransformProvider::new(
            client,
            config.upstream_config.transform_url()?,
        ));

        Ok(Self {
            config: Arc::new(config),
            translator: Arc::new(TranslationService::new(descriptions, transforms)),
        })
    }

    pub fn generate_request_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
