pub mod client;
pub mod fetch;
pub mod interface;

#[cfg(test)]
pub(crate) mod testing;

pub use client::HttpUpstreamClient;
pub use interface::{UpstreamClient, UpstreamError, UpstreamResponse};
