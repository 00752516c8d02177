// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `syno_homemode` - Synology Surveillance Station Home Mode as a switch.
//!
//! This library exposes the Home Mode flag of a Synology Surveillance
//! Station as a single on/off accessory for smart-home hosts. It talks to the
//! Synology Web API over HTTP:
//!
//! 1. `SYNO.API.Info` discovers the path and version of the other APIs.
//! 2. `SYNO.API.Auth` logs in and yields a session id.
//! 3. `SYNO.SurveillanceStation.HomeMode` reads (`GetInfo`) or changes
//!    (`Switch`) the flag.
//!
//! Discovery and login happen once per accessory, in the background, as
//! soon as it is created.
//!
//! # Quick Start
//!
//! ```no_run
//! use syno_homemode::{HomeMode, HomeModeConfig};
//!
//! #[tokio::main]
//! async fn main() -> syno_homemode::Result<()> {
//!     let config = HomeModeConfig::from_json(
//!         r#"{"host": "http://nas.local:5000", "username": "hb", "password": "secret"}"#,
//!     )?;
//!     let home_mode = HomeMode::new(&config)?;
//!
//!     // Failures are logged and read as `false`
//!     println!("Home Mode on: {}", home_mode.get_state().await);
//!
//!     // The NAS reports the state in effect after the switch
//!     let on = home_mode.set_state(true).await;
//!     println!("Home Mode on: {on}");
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! The library logs through [`tracing`]; install a subscriber to see the
//! output. Failed state reads and writes are logged at `ERROR` level.

pub mod accessory;
pub mod command;
mod deferred;
pub mod error;
pub mod protocol;
pub mod response;

pub use accessory::{
    Accessory, Characteristic, Credentials, HomeMode, HomeModeConfig, OnOffAccessory, Service,
    ServiceKind,
};
pub use command::{Command, HomeModeCommand, InfoQueryCommand, LoginCommand};
pub use deferred::LookupState;
pub use error::{ApiError, Error, ParseError, ProtocolError, Result};
pub use protocol::{CommandResponse, HttpClient, HttpConfig, Protocol};
pub use response::{ApiInfo, ApiSpec, Envelope, HomeModeResponse, SessionResponse};
