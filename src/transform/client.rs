use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::info;

use super::interface::{TransformProvider, TransformResult};
use crate::error::{ApiError, Envelope};
use crate::upstream::fetch::{decode, get_results, UpstreamDomain};
use crate::upstream::UpstreamClient;

const DOMAIN: UpstreamDomain = UpstreamDomain {
    label: "translation",
    error_envelope: Envelope::Nested,
};

/// Transform provider backed by the funtranslations Shakespeare endpoint
pub struct ShakespeareTransformProvider {
    client: Arc<dyn UpstreamClient>,
    base_url: Url,
}

/// Translation payload, e.g.
///
/// ```json
/// {
///   "success": { "total": 1 },
///   "contents": {
///     "translated": "Charizard flies 'round the sky...",
///     "text": "Charizard flies around the sky...",
///     "translation": "shakespeare"
///   }
/// }
/// ```
#[derive(Debug, Deserialize)]
struct TranslationResponse {
    contents: Contents,
}

#[derive(Debug, Deserialize)]
struct Contents {
    translated: String,
}

impl ShakespeareTransformProvider {
    pub fn new(client: Arc<dyn UpstreamClient>, base_url: Url) -> Self {
        info!("Initialized ShakespeareTransformProvider: base_url={}", base_url);
        Self { client, base_url }
    }

    /// `<base_url>?text=<form-urlencoded text>`, keeping any query already on the base
    fn translate_url(&self, text: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("text", text);
        url
    }
}

#[async_trait]
impl TransformProvider for ShakespeareTransformProvider {
    async fn fetch(&self, text: &str) -> Result<TransformResult, ApiError> {
        let url = self.translate_url(text);
        let body = get_results(self.client.as_ref(), &url, DOMAIN).await?;
        let response: TranslationResponse = decode(&body, DOMAIN)?;

        Ok(TransformResult {
            transformed_text: response.contents.translated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, GENERIC_UPSTREAM_MESSAGE};
    use crate::upstream::testing::ScriptedClient;

    fn provider(client: ScriptedClient) -> (Arc<ScriptedClient>, ShakespeareTransformProvider) {
        let client = Arc::new(client);
        let base_url = Url::parse("https://translate.test/translate/shakespeare.json").unwrap();
        let provider = ShakespeareTransformProvider::new(client.clone(), base_url);
        (client, provider)
    }

    #[tokio::test]
    async fn returns_translated_contents() {
        let (_, provider) = provider(ScriptedClient::respond(
            200,
            r#"{
                "success": {"total": 1},
                "contents": {
                    "translated": "Lorem ipsum dolor sit amet, thee consectetur.",
                    "text": "Lorem ipsum dolor sit amet, consectetur.",
                    "translation": "shakespeare"
                }
            }"#,
        ));

        let result = provider.fetch("Lorem ipsum dolor sit amet, consectetur.").await.unwrap();

        assert_eq!(result.transformed_text, "Lorem ipsum dolor sit amet, thee consectetur.");
    }

    #[tokio::test]
    async fn text_is_sent_url_encoded() {
        let (client, provider) = provider(ScriptedClient::respond(200, r#"{"contents": {"translated": ""}}"#));
        let text = "It spits \"fire\" & melts\nboulders?";

        provider.fetch(text).await.unwrap();

        let url = &client.requested()[0];
        assert_eq!(url.path(), "/translate/shakespeare.json");
        assert!(!url.query().unwrap().contains(' '));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, [("text".to_string(), text.to_string())]);
    }

    #[tokio::test]
    async fn transport_failure_is_a_400() {
        let (_, provider) = provider(ScriptedClient::unreachable("operation timed out"));

        let error = provider.fetch("text").await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Transport);
        assert_eq!(error.status(), 400);
        assert_eq!(error.message(), "error when trying to get translation results: operation timed out");
    }

    #[tokio::test]
    async fn body_read_failure_is_a_400() {
        let (_, provider) = provider(ScriptedClient::broken_body(400, "invalid argument"));

        let error = provider.fetch("text").await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::BodyRead);
        assert_eq!(error.status(), 400);
        assert_eq!(error.message(), "error when parsing the translation response body: invalid argument");
    }

    #[tokio::test]
    async fn nested_error_envelope_is_preserved() {
        let body = r#"{"error": {"code": 429, "message": "Too Many Requests: Rate limit of 5 requests per hour exceeded."}}"#;
        let (_, provider) = provider(ScriptedClient::respond(429, body));

        let error = provider.fetch("text").await.unwrap_err();

        assert_eq!(error.status(), 429);
        let expected: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(error.to_json(Envelope::Nested), expected);
    }

    #[tokio::test]
    async fn unexpected_error_shape_falls_back_to_generic_500() {
        let (_, provider) = provider(ScriptedClient::respond(400, r#"{"random'": 2020}"#));

        let error = provider.fetch("text").await.unwrap_err();

        assert_eq!(error.status(), 500);
        assert_eq!(error.message(), GENERIC_UPSTREAM_MESSAGE);
    }

    #[tokio::test]
    async fn wrong_typed_success_body_is_a_decode_error() {
        let body = r#"{"success": {"total": 1}, "contents": {"translated": ["wrong", "type"]}}"#;
        let (_, provider) = provider(ScriptedClient::respond(200, body));

        let error = provider.fetch("text").await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Decode);
        assert_eq!(error.status(), 400);
        assert!(error
            .message()
            .starts_with("error when trying to unmarshal translation response from API: invalid type"));
    }
}
