use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Message used when an upstream fails without a usable error body
pub const GENERIC_UPSTREAM_MESSAGE: &str = "error from external api";

/// Where in the pipeline an error was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local request validation, no upstream involved
    Validation,
    /// No route matches the request
    NotFound,
    /// The upstream could not be reached
    Transport,
    /// The upstream response body could not be read
    BodyRead,
    /// The upstream answered with a non-2xx status
    UpstreamStatus,
    /// The upstream answered 2xx with a body we could not decode
    Decode,
    /// Local failure unrelated to the caller's input
    Internal,
}

/// JSON shape an error is written in or read from.
///
/// `Nested` is `{"error": {"code": .., "message": ..}}`, used by the
/// translation API and by this service's own error responses.
/// `Flat` is `{"Code": .., "ErrorMessage": ..}`, used by the species API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    Nested,
    Flat,
}

/// The single error type every layer returns.
///
/// Once constructed, `status` and `message` travel unchanged up to the
/// HTTP boundary where they become the response status and body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    status: u16,
    message: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct NestedEnvelope {
    #[serde(default)]
    error: NestedFields,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct NestedFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FlatEnvelope {
    #[serde(rename = "Code", alias = "code", default, skip_serializing_if = "Option::is_none")]
    code: Option<i64>,
    #[serde(
        rename = "ErrorMessage",
        alias = "errorMessage",
        alias = "error_message",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    error_message: String,
}

impl ApiError {
    /// Status codes outside 100..=599 are replaced with 500 and an empty
    /// message with the generic upstream message.
    pub fn new(kind: ErrorKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: normalize_status(Some(i64::from(status))),
            message: normalize_message(message.into()),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, 400, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, 404, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, 500, message)
    }

    /// Wrap a lower-level failure as `<context>: <cause>` with status 400
    pub fn wrap(kind: ErrorKind, context: &str, cause: impl std::fmt::Display) -> Self {
        Self::new(kind, 400, format!("{}: {}", context, cause))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn to_json(&self, envelope: Envelope) -> serde_json::Value {
        let value = match envelope {
            Envelope::Nested => serde_json::to_value(NestedEnvelope {
                error: NestedFields {
                    code: Some(i64::from(self.status)),
                    message: self.message.clone(),
                },
            }),
            Envelope::Flat => serde_json::to_value(FlatEnvelope {
                code: Some(i64::from(self.status)),
                error_message: self.message.clone(),
            }),
        };
        // Both envelopes are plain structs of integers and strings
        value.unwrap_or(serde_json::Value::Null)
    }

    /// Decode an upstream error body.
    ///
    /// A missing or invalid code becomes 500 and a missing message becomes
    /// [`GENERIC_UPSTREAM_MESSAGE`]. Fails only when the body is not JSON
    /// of the expected shape.
    pub fn from_json(envelope: Envelope, body: &[u8]) -> Result<Self, serde_json::Error> {
        let (code, message) = match envelope {
            Envelope::Nested => {
                let decoded: NestedEnvelope = serde_json::from_slice(body)?;
                (decoded.error.code, decoded.error.message)
            }
            Envelope::Flat => {
                let decoded: FlatEnvelope = serde_json::from_slice(body)?;
                (decoded.code, decoded.error_message)
            }
        };

        Ok(Self {
            kind: ErrorKind::UpstreamStatus,
            status: normalize_status(code),
            message: normalize_message(message),
        })
    }
}

fn normalize_status(code: Option<i64>) -> u16 {
    code.and_then(|c| u16::try_from(c).ok())
        .filter(|c| (100..=599).contains(c))
        .unwrap_or(500)
}

fn normalize_message(message: String) -> String {
    if message.is_empty() {
        GENERIC_UPSTREAM_MESSAGE.to_string()
    } else {
        message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_json(Envelope::Nested))).into_response()
    }
}
