// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! API discovery and login.

use crate::accessory::Credentials;
use crate::command::{AUTH_API, InfoQueryCommand, LoginCommand};
use crate::error::Result;
use crate::protocol::Protocol;
use crate::response::{ApiInfo, SessionResponse};

/// Discovers the path and maximum version of the auth and Home Mode APIs.
///
/// # Errors
///
/// Returns error if the request fails, the body is not JSON, or the response
/// carries no `data` member. The latter is logged with the raw body.
pub async fn query_info<P: Protocol>(protocol: &P) -> Result<ApiInfo> {
    let response = protocol.send_command(&InfoQueryCommand::default()).await?;
    let envelope = response.envelope::<ApiInfo>()?;

    if envelope.data().is_none() {
        tracing::error!(
            body = %response.body(),
            "Unable to fetch info from Synology API"
        );
    }

    envelope.into_data("data")
}

/// Logs in with the discovered auth API and returns the session id.
///
/// # Errors
///
/// Returns error if the auth API was not discovered, the request fails, or
/// the response carries no session id.
pub async fn login<P: Protocol>(
    protocol: &P,
    info: &ApiInfo,
    credentials: &Credentials,
) -> Result<String> {
    let spec = info.spec(AUTH_API)?;
    let command = LoginCommand::new(spec, &credentials.username, &credentials.password);

    tracing::debug!(account = command.account(), "Logging in");

    let response = protocol.send_command(&command).await?;
    let session = response
        .envelope::<SessionResponse>()?
        .into_data("data")?;

    Ok(session.into_sid())
}
