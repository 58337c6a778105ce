//! Scripted upstream client for unit tests

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Url;

use super::interface::{UpstreamClient, UpstreamError, UpstreamResponse};

#[derive(Debug, Clone)]
enum Script {
    Respond { status: u16, body: Result<Vec<u8>, String> },
    Unreachable(String),
}

/// Answers every GET with the same scripted outcome and records the URLs
#[derive(Debug)]
pub(crate) struct ScriptedClient {
    script: Script,
    requested: Mutex<Vec<Url>>,
}

struct ScriptedResponse {
    status: u16,
    body: Result<Vec<u8>, String>,
}

impl ScriptedClient {
    fn new(script: Script) -> Self {
        Self {
            script,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn respond(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(Script::Respond {
            status,
            body: Ok(body.into()),
        })
    }

    pub(crate) fn broken_body(status: u16, cause: &str) -> Self {
        Self::new(Script::Respond {
            status,
            body: Err(cause.to_string()),
        })
    }

    pub(crate) fn unreachable(cause: &str) -> Self {
        Self::new(Script::Unreachable(cause.to_string()))
    }

    pub(crate) fn requested(&self) -> Vec<Url> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamClient for ScriptedClient {
    async fn get(&self, url: &Url) -> Result<Box<dyn UpstreamResponse>, UpstreamError> {
        self.requested.lock().unwrap().push(url.clone());
        match &self.script {
            Script::Respond { status, body } => Ok(Box::new(ScriptedResponse {
                status: *status,
                body: body.clone(),
            })),
            Script::Unreachable(cause) => Err(io_error(cause).into()),
        }
    }
}

#[async_trait]
impl UpstreamResponse for ScriptedResponse {
    fn status(&self) -> u16 {
        self.status
    }

    async fn bytes(self: Box<Self>) -> Result<Vec<u8>, UpstreamError> {
        self.body.map_err(|cause| io_error(&cause).into())
    }
}

fn io_error(cause: &str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, cause.to_string())
}
