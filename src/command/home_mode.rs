// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Home Mode commands.

use crate::command::{Command, HOME_MODE_API};
use crate::response::ApiSpec;

/// Command to read or switch Surveillance Station Home Mode.
///
/// # Examples
///
/// ```
/// use syno_homemode::command::{Command, HomeModeCommand};
/// use syno_homemode::response::ApiSpec;
///
/// let spec = ApiSpec::new("entry.cgi", 1);
///
/// let query = HomeModeCommand::get_info(&spec, "abc123");
/// assert_eq!(query.method(), "GetInfo");
///
/// let switch = HomeModeCommand::switch(&spec, "abc123", true);
/// assert_eq!(switch.method(), "Switch");
/// assert_eq!(switch.params()[0], ("on", "true".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeModeCommand {
    /// Query the current Home Mode state.
    GetInfo {
        /// Discovered CGI path.
        path: String,
        /// Discovered maximum version.
        version: u32,
        /// Session id.
        sid: String,
    },
    /// Turn Home Mode on or off.
    Switch {
        /// Discovered CGI path.
        path: String,
        /// Discovered maximum version.
        version: u32,
        /// Session id.
        sid: String,
        /// Desired state.
        on: bool,
    },
}

impl HomeModeCommand {
    /// Creates a state query.
    #[must_use]
    pub fn get_info(spec: &ApiSpec, sid: impl Into<String>) -> Self {
        Self::GetInfo {
            path: spec.path().to_string(),
            version: spec.max_version(),
            sid: sid.into(),
        }
    }

    /// Creates a switch request.
    #[must_use]
    pub fn switch(spec: &ApiSpec, sid: impl Into<String>, on: bool) -> Self {
        Self::Switch {
            path: spec.path().to_string(),
            version: spec.max_version(),
            sid: sid.into(),
            on,
        }
    }

    fn sid(&self) -> &str {
        match self {
            Self::GetInfo { sid, .. } | Self::Switch { sid, .. } => sid,
        }
    }
}

impl Command for HomeModeCommand {
    fn path(&self) -> &str {
        match self {
            Self::GetInfo { path, .. } | Self::Switch { path, .. } => path,
        }
    }

    fn api(&self) -> &'static str {
        HOME_MODE_API
    }

    fn method(&self) -> &'static str {
        match self {
            Self::GetInfo { .. } => "GetInfo",
            Self::Switch { .. } => "Switch",
        }
    }

    fn version(&self) -> u32 {
        match self {
            Self::GetInfo { version, .. } | Self::Switch { version, .. } => *version,
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if let Self::Switch { on, .. } = self {
            params.push(("on", on.to_string()));
        }
        params.push(("_sid", self.sid().to_string()));
        params
    }
}
