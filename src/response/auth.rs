// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login response parsing.

use serde::Deserialize;

/// The `data` member of a successful `SYNO.API.Auth` `login` response.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SessionResponse {
    sid: String,
}

impl SessionResponse {
    /// Returns the session id.
    #[must_use]
    pub fn sid(&self) -> &str {
        &self.sid
    }

    /// Consumes the response and returns the session id.
    #[must_use]
    pub fn into_sid(self) -> String {
        self.sid
    }
}

impl std::fmt::Debug for SessionResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionResponse")
            .field("sid", &"<redacted>")
            .finish()
    }
}
