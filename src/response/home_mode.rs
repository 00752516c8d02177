// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Home Mode response parsing.

use serde::Deserialize;

use crate::error::ParseError;

/// The `data` member of a Home Mode `GetInfo` or `Switch` response.
///
/// Only the `on` flag is of interest; `GetInfo` carries many more members
/// which are ignored.
///
/// # Examples
///
/// ```
/// use syno_homemode::response::HomeModeResponse;
///
/// let response: HomeModeResponse = serde_json::from_str(r#"{"on": true}"#).unwrap();
/// assert!(response.on().unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HomeModeResponse {
    #[serde(default)]
    on: Option<bool>,
}

impl HomeModeResponse {
    /// Returns the reported Home Mode state.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingField`] if the response has no `on` flag.
    pub fn on(&self) -> Result<bool, ParseError> {
        self.on
            .ok_or_else(|| ParseError::MissingField("data.on".to_string()))
    }
}
