// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Synology Web API request definitions.
//!
//! Every request to the Web API is an HTTP GET against
//! `<host>/webapi/<path>` whose query string names the API, the method and
//! the protocol version, followed by method-specific parameters.
//!
//! # Available Commands
//!
//! | Command Type | API | Method |
//! |-------------|-----|--------|
//! | [`InfoQueryCommand`] | `SYNO.API.Info` | `Query` |
//! | [`LoginCommand`] | `SYNO.API.Auth` | `login` |
//! | [`HomeModeCommand`] | `SYNO.SurveillanceStation.HomeMode` | `GetInfo`, `Switch` |
//!
//! # Examples
//!
//! ```
//! use syno_homemode::command::{Command, InfoQueryCommand};
//!
//! let cmd = InfoQueryCommand::default();
//! assert_eq!(cmd.path(), "query.cgi");
//! assert_eq!(
//!     cmd.query()[3],
//!     ("query", "SYNO.API.Auth,SYNO.SurveillanceStation.HomeMode".to_string())
//! );
//! ```

mod auth;
mod home_mode;
mod info;

pub use auth::{LoginCommand, SESSION_NAME};
pub use home_mode::HomeModeCommand;
pub use info::InfoQueryCommand;

/// Name of the API discovery API.
pub const INFO_API: &str = "SYNO.API.Info";
/// Name of the authentication API.
pub const AUTH_API: &str = "SYNO.API.Auth";
/// Name of the Surveillance Station Home Mode API.
pub const HOME_MODE_API: &str = "SYNO.SurveillanceStation.HomeMode";

/// A request that can be sent to the Synology Web API.
pub trait Command {
    /// Returns the CGI path relative to `webapi/`, e.g. `"query.cgi"`.
    fn path(&self) -> &str;

    /// Returns the API name, e.g. `"SYNO.API.Auth"`.
    fn api(&self) -> &'static str;

    /// Returns the method name, e.g. `"login"`.
    fn method(&self) -> &'static str;

    /// Returns the protocol version to request.
    fn version(&self) -> u32;

    /// Returns the method-specific parameters in request order.
    fn params(&self) -> Vec<(&'static str, String)>;

    /// Returns whether the response body carries a secret, such as a
    /// session id, and must stay out of logs and errors.
    fn response_is_secret(&self) -> bool {
        false
    }

    /// Returns the full ordered query: `api`, `method`, `version`, then
    /// [`params`](Self::params).
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("api", self.api().to_string()),
            ("method", self.method().to_string()),
            ("version", self.version().to_string()),
        ];
        query.extend(self.params());
        query
    }
}
