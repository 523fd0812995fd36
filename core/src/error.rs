//! Error types for the timer API client.
//!
//! # Design
//! `ClientError::NullArgument` is raised locally before anything is sent.
//! Every failure originating in the transport is carried unchanged inside
//! `ClientError::Transport`; the client never inspects or retries it.
//! `TransportError::NotFound` gets a dedicated variant because callers
//! frequently distinguish "the resource does not exist" from "the server
//! returned an unexpected status."

use thiserror::Error;

/// Errors returned by `TimerClient` operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required request field was absent. `field` is the wire name.
    #[error("required argument `{field}` is missing")]
    NullArgument { field: &'static str },

    /// The transport collaborator failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Encode(String),

    /// The transport's JSON value did not match the expected result record.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// Errors raised by a `Transport` implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// A 2xx response body was not valid JSON.
    #[error("response body is not JSON: {0}")]
    Decode(String),

    /// The resolved endpoint or path did not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
