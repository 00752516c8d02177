// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authentication command.

use crate::command::{AUTH_API, Command};
use crate::response::ApiSpec;

/// Session name requested at login.
pub const SESSION_NAME: &str = "SurveillanceStation";

/// Logs in and asks for the session id to be returned in the body.
///
/// # Examples
///
/// ```
/// use syno_homemode::command::{Command, LoginCommand};
/// use syno_homemode::response::ApiSpec;
///
/// let spec = ApiSpec::new("auth.cgi", 3);
/// let cmd = LoginCommand::new(&spec, "admin", "secret");
/// assert_eq!(cmd.path(), "auth.cgi");
/// assert_eq!(cmd.version(), 3);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCommand {
    path: String,
    version: u32,
    account: String,
    passwd: String,
}

impl LoginCommand {
    /// Creates a login request against the discovered auth API.
    #[must_use]
    pub fn new(spec: &ApiSpec, account: impl Into<String>, passwd: impl Into<String>) -> Self {
        Self {
            path: spec.path().to_string(),
            version: spec.max_version(),
            account: account.into(),
            passwd: passwd.into(),
        }
    }

    /// Returns the account name.
    #[must_use]
    pub fn account(&self) -> &str {
        &self.account
    }
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("path", &self.path)
            .field("version", &self.version)
            .field("account", &self.account)
            .field("passwd", &"<redacted>")
            .finish()
    }
}

impl Command for LoginCommand {
    fn path(&self) -> &str {
        &self.path
    }

    fn api(&self) -> &'static str {
        AUTH_API
    }

    fn method(&self) -> &'static str {
        "login"
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("account", self.account.clone()),
            ("passwd", self.passwd.clone()),
            ("session", SESSION_NAME.to_string()),
            ("format", "sid".to_string()),
        ]
    }

    fn response_is_secret(&self) -> bool {
        true
    }
}
