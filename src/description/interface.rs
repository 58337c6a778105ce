use async_trait::async_trait;

use crate::error::ApiError;

/// One description of an entity in one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionVariant {
    pub text: String,
    pub language: String,
}

/// Every description the upstream lists for an entity, in upstream order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionSet {
    pub name: String,
    pub variants: Vec<DescriptionVariant>,
}

/// Fetches the descriptions of a named entity
#[async_trait]
pub trait DescriptionProvider: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<DescriptionSet, ApiError>;
}
