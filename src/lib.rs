pub mod config;
pub mod description;
pub mod error;
pub mod routes;
pub mod state;
pub mod transform;
pub mod translation;
pub mod upstream;

pub use error::{ApiError, Envelope, ErrorKind};
