use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info};

use super::interface::{DescriptionProvider, DescriptionSet, DescriptionVariant};
use crate::error::{ApiError, Envelope};
use crate::upstream::fetch::{decode, get_results, UpstreamDomain};
use crate::upstream::UpstreamClient;

const DOMAIN: UpstreamDomain = UpstreamDomain {
    label: "pokemon info",
    error_envelope: Envelope::Flat,
};

/// Description provider backed by a PokeAPI-style species endpoint
pub struct PokeApiDescriptionProvider {
    client: Arc<dyn UpstreamClient>,
    base_url: Url,
}

/// Species payload, e.g.
///
/// ```json
/// {
///   "name": "charizard",
///   "flavor_text_entries": [
///     {
///       "flavor_text": "Spits fire that\nis hot enough to\nmelt boulders.",
///       "language": { "name": "en", "url": "https://pokeapi.co/api/v2/language/9/" }
///     }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
struct SpeciesResponse {
    #[serde(default)]
    name: String,
    #[serde(default)]
    flavor_text_entries: Vec<FlavorTextEntry>,
}

/// Missing keys decode to empty values; only wrong types are rejected
#[derive(Debug, Deserialize)]
struct FlavorTextEntry {
    #[serde(default)]
    flavor_text: String,
    #[serde(default)]
    language: Language,
}

#[derive(Debug, Default, Deserialize)]
struct Language {
    #[serde(default)]
    name: String,
}

impl From<SpeciesResponse> for DescriptionSet {
    fn from(response: SpeciesResponse) -> Self {
        Self {
            name: response.name,
            variants: response
                .flavor_text_entries
                .into_iter()
                .map(|entry| DescriptionVariant {
                    text: entry.flavor_text,
                    language: entry.language.name,
                })
                .collect(),
        }
    }
}

impl PokeApiDescriptionProvider {
    pub fn new(client: Arc<dyn UpstreamClient>, base_url: Url) -> Self {
        info!("Initialized PokeApiDescriptionProvider: base_url={}", base_url);
        Self { client, base_url }
    }

    /// `<base_url>/<name>`, with `name` percent-encoded as a single segment
    fn species_url(&self, name: &str) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::internal(format!("invalid pokemon info url: {}", self.base_url)))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }
}

#[async_trait]
impl DescriptionProvider for PokeApiDescriptionProvider {
    async fn fetch(&self, name: &str) -> Result<DescriptionSet, ApiError> {
        let url = self.species_url(name)?;
        let body = get_results(self.client.as_ref(), &url, DOMAIN).await?;
        let species: SpeciesResponse = decode(&body, DOMAIN)?;

        debug!(
            "Fetched {} descriptions for {}",
            species.flavor_text_entries.len(),
            name
        );
        Ok(species.into())
    }
}
