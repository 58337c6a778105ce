use async_trait::async_trait;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    pub transformed_text: String,
}

/// Rewrites free-form text in a different style
#[async_trait]
pub trait TransformProvider: Send + Sync {
    async fn fetch(&self, text: &str) -> Result<TransformResult, ApiError>;
}
