// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP protocol implementation for the Synology Web API.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::command::Command;
use crate::error::ProtocolError;
use crate::protocol::{CommandResponse, Protocol};

// ============================================================================
// HttpConfig
// ============================================================================

/// Connection parameters for a Synology NAS.
///
/// Every request is an independent HTTP GET; there is no persistent
/// connection state beyond what `reqwest` pools internally.
///
/// # Examples
///
/// ```
/// use syno_homemode::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("https://nas.local:5001")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.host(), "https://nas.local:5001");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    timeout: Duration,
}

impl HttpConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given base host URL.
    ///
    /// A missing scheme defaults to `http://`.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout. A zero timeout is ignored.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    /// Returns the host as configured.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Parses the configured host into a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidAddress`] if the host is empty or not
    /// a usable HTTP(S) URL.
    pub fn base_url(&self) -> Result<Url, ProtocolError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }

        let with_scheme = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{host}")
        };

        let url = Url::parse(&with_scheme)
            .map_err(|e| ProtocolError::InvalidAddress(format!("{host}: {e}")))?;
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(ProtocolError::InvalidAddress(host.to_string()));
        }
        Ok(url)
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is invalid or the HTTP client cannot be
    /// created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        let base_url = self.base_url()?;

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient { base_url, client })
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for the Synology Web API.
///
/// Requests are sent to `<host>/webapi/<path>?<query>`. Any path, query or
/// fragment on the configured host is replaced.
///
/// # Examples
///
/// ```no_run
/// use syno_homemode::command::InfoQueryCommand;
/// use syno_homemode::protocol::{HttpClient, Protocol};
///
/// # async fn example() -> syno_homemode::Result<()> {
/// let client = HttpClient::new("http://nas.local:5000")?;
/// let response = client.send_command(&InfoQueryCommand::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: Url,
    client: Client,
}

impl HttpClient {
    /// Creates a client for the given host with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the host is invalid or the HTTP client cannot be
    /// created.
    pub fn new(host: impl Into<String>) -> Result<Self, ProtocolError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the request URL for a command.
    #[must_use]
    pub fn build_url<C: Command + ?Sized>(&self, command: &C) -> String {
        let query = command
            .query()
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let mut url = self.base_url.clone();
        url.set_path(&format!("webapi/{}", command.path()));
        url.set_query(Some(&query));
        url.set_fragment(None);
        url.to_string()
    }
}

impl Protocol for HttpClient {
    async fn send_command<C: Command + Sync>(
        &self,
        command: &C,
    ) -> Result<CommandResponse, ProtocolError> {
        let url = self.build_url(command);

        // The URL may carry credentials, so only its parts are logged.
        tracing::debug!(
            api = command.api(),
            method = command.method(),
            path = command.path(),
            "Sending Web API request"
        );

        // reqwest errors embed the request URL, which may carry credentials.
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProtocolError::Http(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProtocolError::Http(e.without_url()))?;

        if !status.is_success() {
            let mut message = format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            );
            if !command.response_is_secret() && !body.trim().is_empty() {
                message.push_str(": ");
                message.push_str(body.trim());
            }
            return Err(ProtocolError::ConnectionFailed(message));
        }

        if command.response_is_secret() {
            tracing::debug!(len = body.len(), "Received Web API response");
        } else {
            tracing::debug!(body = %body, "Received Web API response");
        }

        Ok(CommandResponse::new(body))
    }
}
