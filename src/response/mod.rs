// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for Synology Web API JSON responses.
//!
//! Every Web API response is wrapped in the same envelope:
//!
//! ```json
//! { "success": true, "data": { ... } }
//! { "success": false, "error": { "code": 400 } }
//! ```
//!
//! [`Envelope`] deserializes that wrapper; the payload types in this module
//! describe the `data` member of each call.

mod auth;
mod home_mode;
mod info;

pub use auth::SessionResponse;
pub use home_mode::HomeModeResponse;
pub use info::{ApiInfo, ApiSpec};

use serde::Deserialize;

use crate::error::{ApiError, Error, ParseError};

/// The outer JSON envelope of every Web API response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

/// The `error` member of a failed response.
#[derive(Debug, Clone, Copy, Deserialize)]
struct ErrorBody {
    code: i64,
}

impl<T> Envelope<T> {
    /// Returns the `data` member, if present.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Returns the `success` flag, if present.
    #[must_use]
    pub fn success(&self) -> Option<bool> {
        self.success
    }

    /// Returns the error code reported by the API, if any.
    #[must_use]
    pub fn error_code(&self) -> Option<i64> {
        self.error.map(|e| e.code)
    }

    /// Consumes the envelope and returns its `data` member.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when `data` is absent and the API reported
    /// an error code, or [`ParseError::MissingField`] naming `field` otherwise.
    pub fn into_data(self, field: &str) -> Result<T, Error> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(ApiError::rejected(error.code).into()),
            (None, None) => Err(ParseError::MissingField(field.to_string()).into()),
        }
    }
}
