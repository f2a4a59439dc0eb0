/// The commonly occurring provider error codes and their messages.
const STATUS_MESSAGES: &[(u16, &str)] = &[
    (400, "Invalid request made"),
    (401, "Invalid access token"),
    (403, "Not enough permissions"),
    (404, "Resource not found"),
    (405, "Method not allowed"),
    (429, "You are being rate limited"),
    (502, "Server busy, retry after a while"),
];

/// Human-readable message for a provider HTTP status code.
/// Unlisted codes fall back to a generic message.
pub fn status_message(status: u16) -> &'static str {
    STATUS_MESSAGES
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, message)| *message)
        .unwrap_or("An error occurred")
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or invalid caller input (no scopes configured, empty
    /// authorization code).
    #[error("configuration error: {0}")]
    Configuration(&'static str),

    /// Provider returned a non-2xx status with no structured error body.
    #[error("HTTP {status}: {}", status_message(*status))]
    Provider { status: u16 },

    /// Provider returned a structured error description.
    #[error("provider rejected the request: {description}")]
    ProviderValidation { description: String },

    /// Token envelope failed verification: bad signature, malformed
    /// payload, or expired.
    #[error("invalid token envelope")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// Network-level failure. `status` is the response status when one
    /// was received before the failure, otherwise `None`.
    #[error("transport failure")]
    Transport {
        status: Option<u16>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Provider returned a success status but the body is not the
    /// expected JSON.
    #[error("unparseable provider response (HTTP {status})")]
    UnexpectedBody { status: u16, body: String },

    /// A required field is missing from the token response JSON.
    #[error("missing or invalid field: {field}")]
    MissingField { field: &'static str },
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Error {
    fn from(source: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Error::Transport {
            status: None,
            source,
        }
    }
}
