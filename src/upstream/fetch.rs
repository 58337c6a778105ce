//! Response handling shared by the description and transform providers.
//!
//! Both upstreams are wrapped the same way: transport and body-read
//! failures become 400s, a non-2xx status surfaces the upstream's own
//! error envelope, and an undecodable success body becomes a 400 carrying
//! the decoder's message.

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::interface::UpstreamClient;
use crate::error::{ApiError, Envelope, ErrorKind, GENERIC_UPSTREAM_MESSAGE};

/// How one upstream names itself in error messages and encodes its errors
#[derive(Debug, Clone, Copy)]
pub struct UpstreamDomain {
    pub label: &'static str,
    pub error_envelope: Envelope,
}

/// GET `url` and return the body of a successful response
pub async fn get_results(
    client: &dyn UpstreamClient,
    url: &Url,
    domain: UpstreamDomain,
) -> Result<Vec<u8>, ApiError> {
    debug!("Requesting {} from {}", domain.label, url);

    let response = client.get(url).await.map_err(|e| {
        let context = format!("error when trying to get {} results", domain.label);
        log_error(ApiError::wrap(ErrorKind::Transport, &context, e))
    })?;

    let status = response.status();
    let body = response.bytes().await.map_err(|e| {
        let context = format!("error when parsing the {} response body", domain.label);
        log_error(ApiError::wrap(ErrorKind::BodyRead, &context, e))
    })?;

    if status > 299 {
        return Err(log_error(status_error(&body, domain)));
    }

    Ok(body)
}

/// Decode a successful response body
pub fn decode<T: DeserializeOwned>(body: &[u8], domain: UpstreamDomain) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        let context = format!("error when trying to unmarshal {} response from API", domain.label);
        log_error(ApiError::wrap(ErrorKind::Decode, &context, e))
    })
}

fn status_error(body: &[u8], domain: UpstreamDomain) -> ApiError {
    ApiError::from_json(domain.error_envelope, body).unwrap_or_else(|e| {
        debug!("Could not decode {} error body: {}", domain.label, e);
        ApiError::new(ErrorKind::UpstreamStatus, 500, GENERIC_UPSTREAM_MESSAGE)
    })
}

fn log_error(error: ApiError) -> ApiError {
    warn!("{} (status {})", error.message(), error.status());
    error
}
