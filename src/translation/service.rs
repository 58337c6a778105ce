use std::sync::Arc;

use tracing::debug;

use super::types::{TranslationRequest, TranslationResponse};
use crate::description::{DescriptionProvider, DescriptionSet};
use crate::error::ApiError;
use crate::transform::TransformProvider;

/// Language tag of the description that gets transformed
pub const DESCRIPTION_LANGUAGE: &str = "en";

/// Sequences the description and transform lookups for one entity.
///
/// Stateless: every call runs validate, fetch description, select variant,
/// fetch transform and assemble, stopping at the first error. Provider
/// errors are returned with their status and message untouched.
pub struct TranslationService {
    descriptions: Arc<dyn DescriptionProvider>,
    transforms: Arc<dyn TransformProvider>,
}

impl TranslationService {
    pub fn new(
        descriptions: Arc<dyn DescriptionProvider>,
        transforms: Arc<dyn TransformProvider>,
    ) -> Self {
        Self {
            descriptions,
            transforms,
        }
    }

    pub async fn translate(
        &self,
        request: TranslationRequest,
    ) -> Result<TranslationResponse, ApiError> {
        let request = validate_request(request)?;

        let descriptions = self.descriptions.fetch(&request.name).await?;
        let text = select_description(&descriptions, DESCRIPTION_LANGUAGE);

        let transformed = self.transforms.fetch(&text).await?;

        Ok(TranslationResponse {
            name: request.name,
            translation: transformed.transformed_text,
        })
    }
}

fn validate_request(request: TranslationRequest) -> Result<TranslationRequest, ApiError> {
    if request.name.is_empty() {
        debug!("Rejecting translation request with empty name");
        return Err(ApiError::validation("name field cannot be empty"));
    }
    Ok(request)
}

/// The most recently listed variant in `language`, or an empty string when
/// there is none. The empty string is forwarded as-is; the transform
/// upstream decides whether it is acceptable.
pub fn select_description(set: &DescriptionSet, language: &str) -> String {
    match set.variants.iter().rev().find(|v| v.language == language) {
        Some(variant) => variant.text.clone(),
        None => {
            debug!("No '{}' description for {}, forwarding empty text", language, set.name);
            String::new()
        }
    }
}
