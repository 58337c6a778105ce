pub mod client;
pub mod interface;

pub use client::PokeApiDescriptionProvider;
pub use interface::{DescriptionProvider, DescriptionSet, DescriptionVariant};
