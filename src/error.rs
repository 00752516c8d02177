// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `syno_homemode` library.
//!
//! The hierarchy separates transport failures, malformed responses, errors
//! reported by the Synology Web API itself, and configuration problems.

use std::sync::Arc;

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during HTTP communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The Web API answered with an error envelope.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The accessory configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A shared setup lookup (API discovery or login) failed earlier.
    ///
    /// The failure is cached for the lifetime of the accessory, so every
    /// later call observes the same underlying error.
    #[error("setup lookup failed: {0}")]
    Lookup(Arc<Error>),

    /// A setup lookup ended without producing a value.
    #[error("setup lookup was aborted")]
    LookupAborted,
}

/// Errors related to HTTP communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing Web API responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),
}

/// Errors reported by the Synology Web API in its response envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request was rejected with an error code.
    #[error("request rejected with code {code}: {description}")]
    Rejected {
        /// The Synology error code.
        code: i64,
        /// Description of the code, see [`describe_code`].
        description: &'static str,
    },
}

impl ApiError {
    /// Creates a rejection error for the given Synology error code.
    #[must_use]
    pub fn rejected(code: i64) -> Self {
        Self::Rejected {
            code,
            description: describe_code(code),
        }
    }

    /// Returns the Synology error code.
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            Self::Rejected { code, .. } => *code,
        }
    }

    /// Returns whether the code means the session id is no longer accepted.
    #[must_use]
    pub fn is_session_error(&self) -> bool {
        matches!(self.code(), 106 | 107 | 119)
    }
}

/// Returns a human-readable description of a Synology error code.
///
/// Codes below 400 are shared by every Web API; 400-410 are specific to
/// `SYNO.API.Auth`.
#[must_use]
pub fn describe_code(code: i64) -> &'static str {
    match code {
        100 => "unknown error",
        101 => "invalid parameter",
        102 => "the requested API does not exist",
        103 => "the requested method does not exist",
        104 => "the requested version does not support the functionality",
        105 => "the logged in session does not have permission",
        106 => "session timeout",
        107 => "session interrupted by duplicate login",
        119 => "session id not found",
        400 => "no such account or incorrect password",
        401 => "account disabled",
        402 => "permission denied",
        403 => "2-step verification code required",
        404 => "failed to authenticate 2-step verification code",
        406 => "enforce to authenticate with 2-step verification code",
        407 => "blocked IP source",
        408 => "expired password cannot change",
        409 => "expired password",
        410 => "password must be changed",
        _ => "unrecognized error code",
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
