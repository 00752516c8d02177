// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! API discovery response parsing.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ParseError;

/// Location and supported versions of a single Web API.
///
/// # Examples
///
/// ```
/// use syno_homemode::response::ApiSpec;
///
/// let json = r#"{"path": "entry.cgi", "minVersion": 1, "maxVersion": 6}"#;
/// let spec: ApiSpec = serde_json::from_str(json).unwrap();
/// assert_eq!(spec.path(), "entry.cgi");
/// assert_eq!(spec.max_version(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSpec {
    path: String,
    max_version: u32,
    #[serde(default)]
    min_version: Option<u32>,
    #[serde(default)]
    request_format: Option<String>,
}

impl ApiSpec {
    /// Creates a spec with the given path and maximum version.
    #[must_use]
    pub fn new(path: impl Into<String>, max_version: u32) -> Self {
        Self {
            path: path.into(),
            max_version,
            min_version: None,
            request_format: None,
        }
    }

    /// Returns the CGI path relative to `webapi/`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the highest supported version.
    #[must_use]
    pub fn max_version(&self) -> u32 {
        self.max_version
    }

    /// Returns the lowest supported version, if reported.
    #[must_use]
    pub fn min_version(&self) -> Option<u32> {
        self.min_version
    }

    /// Returns the request format (e.g. `"JSON"`), if reported.
    #[must_use]
    pub fn request_format(&self) -> Option<&str> {
        self.request_format.as_deref()
    }
}

/// The `data` member of an `SYNO.API.Info` `Query` response.
///
/// Maps each queried API name to its [`ApiSpec`]. The remote only lists APIs
/// it knows about, so lookups of absent names fail instead of panicking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiInfo {
    apis: HashMap<String, ApiSpec>,
}

impl ApiInfo {
    /// Returns the spec for `api`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingField`] if the API was not listed.
    pub fn spec(&self, api: &str) -> Result<&ApiSpec, ParseError> {
        self.apis
            .get(api)
            .ok_or_else(|| ParseError::MissingField(format!("data.{api}")))
    }

    /// Returns whether the API was listed.
    #[must_use]
    pub fn contains(&self, api: &str) -> bool {
        self.apis.contains_key(api)
    }

    /// Returns the number of listed APIs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.apis.len()
    }

    /// Returns whether no API was listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.apis.is_empty()
    }

    /// Iterates over the listed API names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.apis.keys().map(String::as_str)
    }
}

impl FromIterator<(String, ApiSpec)> for ApiInfo {
    fn from_iter<I: IntoIterator<Item = (String, ApiSpec)>>(iter: I) -> Self {
        Self {
            apis: iter.into_iter().collect(),
        }
    }
}
