// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol implementations for communicating with the Synology Web API.
//!
//! [`Protocol`] is the transport seam used by the accessory; [`HttpClient`]
//! is the implementation that talks to a real NAS over HTTP(S).

mod http;

pub use http::{HttpClient, HttpConfig};

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::command::Command;
use crate::error::{ParseError, ProtocolError};
use crate::response::Envelope;

/// Raw response to a Web API command.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    /// The raw JSON response body.
    body: String,
}

impl CommandResponse {
    /// Creates a new command response with the given body.
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    /// Returns the raw JSON response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the response as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the target type.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }

    /// Parses the response as a Web API [`Envelope`] around `T`.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the envelope.
    pub fn envelope<T: DeserializeOwned>(&self) -> Result<Envelope<T>, ParseError> {
        self.parse()
    }
}

/// Trait for transports that can send commands to the Web API.
///
/// Implementations must be shareable across tasks: the accessory runs its
/// setup lookups on spawned tasks.
pub trait Protocol: Send + Sync + 'static {
    /// Sends a command and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the server answers
    /// with a non-success status.
    fn send_command<C: Command + Sync>(
        &self,
        command: &C,
    ) -> impl Future<Output = Result<CommandResponse, ProtocolError>> + Send;
}
