// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! API discovery command.

use crate::command::{AUTH_API, Command, HOME_MODE_API, INFO_API};

/// Queries the path and supported versions of a set of APIs.
///
/// The discovery endpoint itself always lives at `query.cgi` and is always
/// called with version 1.
///
/// # Examples
///
/// ```
/// use syno_homemode::command::{Command, InfoQueryCommand};
///
/// let cmd = InfoQueryCommand::new(["SYNO.API.Auth"]);
/// assert_eq!(cmd.method(), "Query");
/// assert_eq!(cmd.version(), 1);
/// assert_eq!(cmd.params(), vec![("query", "SYNO.API.Auth".to_string())]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoQueryCommand {
    apis: Vec<String>,
}

impl InfoQueryCommand {
    /// Path of the discovery endpoint.
    pub const PATH: &'static str = "query.cgi";

    /// Creates a discovery query for the given API names.
    #[must_use]
    pub fn new<I, S>(apis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            apis: apis.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the queried API names.
    #[must_use]
    pub fn apis(&self) -> &[String] {
        &self.apis
    }
}

impl Default for InfoQueryCommand {
    /// Queries the authentication and Home Mode APIs.
    fn default() -> Self {
        Self::new([AUTH_API, HOME_MODE_API])
    }
}

impl Command for InfoQueryCommand {
    fn path(&self) -> &str {
        Self::PATH
    }

    fn api(&self) -> &'static str {
        INFO_API
    }

    fn method(&self) -> &'static str {
        "Query"
    }

    fn version(&self) -> u32 {
        1
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![("query", self.apis.join(","))]
    }
}
