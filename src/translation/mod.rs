pub mod service;
pub mod types;

pub use service::TranslationService;
pub use types::{TranslationRequest, TranslationResponse};
