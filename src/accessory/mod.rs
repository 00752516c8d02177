// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surveillance Station Home Mode exposed as an on/off switch accessory.
//!
//! # Lifecycle
//!
//! Creating a [`HomeMode`] immediately starts two background lookups: API
//! discovery, and login (which waits for discovery). Both run at most once
//! and their outcome, success or failure, is shared by every later call.
//! Until they settle the accessory is [`LookupState::Pending`]; state reads
//! and writes issued meanwhile simply wait.
//!
//! The session id is never renewed. If the NAS invalidates it, every later
//! call fails until a new accessory is created.
//!
//! # Failure policy
//!
//! [`HomeMode::get_state`] and [`HomeMode::set_state`] never fail: any
//! error is logged once and reported as `false`. Hosts that need to tell
//! "off" from "unknown" use [`HomeMode::try_get_state`] and
//! [`HomeMode::try_set_state`].
//!
//! # Examples
//!
//! ```no_run
//! use syno_homemode::{HomeMode, HomeModeConfig};
//!
//! # async fn example() -> syno_homemode::Result<()> {
//! let config = HomeModeConfig::new("http://nas.local:5000")
//!     .with_credentials("homebridge", "secret");
//! let home_mode = HomeMode::new(&config)?;
//!
//! if !home_mode.get_state().await {
//!     let now = home_mode.set_state(true).await;
//!     println!("Home Mode is now {}", if now { "on" } else { "off" });
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod lookup;
mod service;

pub use config::{Credentials, HomeModeConfig};
pub use lookup::{login, query_info};
pub use service::{Accessory, Characteristic, OnOffAccessory, Service, ServiceKind};

use std::sync::Arc;

use crate::command::{HOME_MODE_API, HomeModeCommand};
use crate::deferred::{Deferred, LookupState};
use crate::error::{Error, Result};
use crate::protocol::{HttpClient, Protocol};
use crate::response::{ApiInfo, HomeModeResponse};

/// The Home Mode switch accessory.
///
/// The type parameter `P` is the transport; it defaults to [`HttpClient`].
#[derive(Debug)]
pub struct HomeMode<P: Protocol = HttpClient> {
    name: String,
    protocol: Arc<P>,
    info: Deferred<ApiInfo>,
    sid: Deferred<String>,
}

impl HomeMode<HttpClient> {
    /// Creates an accessory talking HTTP to the configured host.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns error if the host is invalid, the HTTP client cannot be
    /// created, or no Tokio runtime is running.
    pub fn new(config: &HomeModeConfig) -> Result<Self> {
        let client = config.http_config().into_client()?;
        Self::with_protocol(config.name(), client, config.credentials())
    }
}

impl<P: Protocol> HomeMode<P> {
    /// Creates an accessory on top of an arbitrary transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no Tokio runtime is running.
    pub fn with_protocol(
        name: impl Into<String>,
        protocol: P,
        credentials: Credentials,
    ) -> Result<Self> {
        tokio::runtime::Handle::try_current().map_err(|e| Error::Config(e.to_string()))?;

        let name = name.into();
        let protocol = Arc::new(protocol);

        let info = Deferred::spawn({
            let protocol = Arc::clone(&protocol);
            async move { query_info(&*protocol).await }
        });

        let sid = Deferred::spawn({
            let protocol = Arc::clone(&protocol);
            let info = info.clone();
            async move {
                let info = info.get().await?;
                login(&*protocol, &info, &credentials).await
            }
        });

        tracing::debug!(accessory = %name, "Home Mode accessory created");

        Ok(Self {
            name,
            protocol,
            info,
            sid,
        })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the combined state of the discovery and login lookups.
    #[must_use]
    pub fn lookup_state(&self) -> LookupState {
        match (self.info.state(), self.sid.state()) {
            (LookupState::Ready, LookupState::Ready) => LookupState::Ready,
            (LookupState::Failed, _) | (_, LookupState::Failed) => LookupState::Failed,
            _ => LookupState::Pending,
        }
    }

    /// Returns the discovered API map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if discovery failed.
    pub async fn info(&self) -> Result<ApiInfo> {
        self.info.get().await
    }

    /// Returns the session id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] if discovery or login failed.
    pub async fn sid(&self) -> Result<String> {
        self.sid.get().await
    }

    /// Reads Home Mode, reporting `false` on any failure.
    pub async fn get_state(&self) -> bool {
        self.try_get_state()
            .await
            .unwrap_or_else(|e| self.log_failure("read", &e))
    }

    /// Switches Home Mode and returns the state reported by the NAS,
    /// which is `false` on any failure.
    pub async fn set_state(&self, on: bool) -> bool {
        self.try_set_state(on)
            .await
            .unwrap_or_else(|e| self.log_failure("switch", &e))
    }

    /// Reads Home Mode.
    ///
    /// # Errors
    ///
    /// Returns error if a lookup failed, the request fails, or the response
    /// has no `data.on` flag.
    pub async fn try_get_state(&self) -> Result<bool> {
        let info = self.info.get().await?;
        let spec = info.spec(HOME_MODE_API)?;
        let sid = self.sid.get().await?;

        self.send(&HomeModeCommand::get_info(spec, sid)).await
    }

    /// Switches Home Mode and returns the state reported by the NAS.
    ///
    /// The result reflects the remote state, which differs from `on` when
    /// the NAS refuses the change.
    ///
    /// # Errors
    ///
    /// Returns error if a lookup failed, the request fails, or the response
    /// has no `data.on` flag.
    pub async fn try_set_state(&self, on: bool) -> Result<bool> {
        let info = self.info.get().await?;
        let spec = info.spec(HOME_MODE_API)?;
        let sid = self.sid.get().await?;

        self.send(&HomeModeCommand::switch(spec, sid, on)).await
    }

    async fn send(&self, command: &HomeModeCommand) -> Result<bool> {
        let response = self.protocol.send_command(command).await?;
        let data = response
            .envelope::<HomeModeResponse>()?
            .into_data("data")?;
        Ok(data.on()?)
    }

    fn log_failure(&self, action: &str, error: &Error) -> bool {
        let session_rejected = matches!(error, Error::Api(api) if api.is_session_error());
        tracing::error!(
            accessory = %self.name,
            action,
            session_rejected,
            error = %error,
            "Home Mode request failed"
        );
        false
    }
}

impl<P: Protocol> Accessory for HomeMode<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn services(&self) -> Vec<Service> {
        vec![Service::switch(self.name.clone())]
    }
}

impl<P: Protocol> OnOffAccessory for HomeMode<P> {
    async fn get_on(&self) -> bool {
        self.get_state().await
    }

    async fn set_on(&self, on: bool) -> bool {
        self.set_state(on).await
    }
}
