pub mod client;
pub mod interface;

pub use client::ShakespeareTransformProvider;
pub use interface::{TransformProvider, TransformResult};
