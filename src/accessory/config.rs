// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};
use crate::protocol::HttpConfig;

/// Configuration of a Home Mode accessory.
///
/// Deserializes from the accessory block a host hands over, e.g.
///
/// ```json
/// { "name": "Home Mode", "host": "http://nas.local:5000",
///   "username": "homebridge", "password": "secret" }
/// ```
///
/// Missing or empty `name` falls back to `"Home Mode"`; missing credentials
/// fall back to empty strings. `timeout_ms` sets the request timeout in
/// milliseconds; a missing or zero value keeps the default.
///
/// # Examples
///
/// ```
/// use syno_homemode::HomeModeConfig;
///
/// let config = HomeModeConfig::from_json(r#"{"host": "http://nas.local:5000"}"#).unwrap();
/// assert_eq!(config.name(), "Home Mode");
/// assert_eq!(config.credentials().username, "");
///
/// let config = HomeModeConfig::new("http://nas.local:5000")
///     .with_name("Away")
///     .with_credentials("admin", "secret");
/// assert_eq!(config.name(), "Away");
/// ```
#[derive(Clone, Deserialize)]
pub struct HomeModeConfig {
    #[serde(default)]
    name: Option<String>,
    host: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default, rename = "timeout_ms", deserialize_with = "millis")]
    timeout: Option<Duration>,
}

fn millis<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
}

impl HomeModeConfig {
    /// Accessory name used when none is configured.
    pub const DEFAULT_NAME: &'static str = "Home Mode";

    /// Creates a configuration for the given host with default name and
    /// empty credentials.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            name: None,
            host: host.into(),
            username: None,
            password: None,
            timeout: None,
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the JSON is malformed or `host` is missing.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the login credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets the HTTP request timeout. A zero timeout keeps the default.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => Self::DEFAULT_NAME,
        }
    }

    /// Returns the host URL.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the login credentials.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone().unwrap_or_default(),
            password: self.password.clone().unwrap_or_default(),
        }
    }

    /// Returns the HTTP connection configuration.
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        let config = HttpConfig::new(self.host.clone());
        match self.timeout {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }
}

impl std::fmt::Debug for HomeModeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeModeConfig")
            .field("name", &self.name())
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Login credentials.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
