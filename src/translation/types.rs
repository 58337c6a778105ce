use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub name: String,
}

/// Response body sent to the caller:
///
/// ```json
/// { "name": "charizard", "description": "Charizard flies 'round the sky..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub name: String,
    #[serde(rename = "description")]
    pub translation: String,
}
