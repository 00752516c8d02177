// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-facing description of an accessory.
//!
//! A smart-home host asks an accessory for its services and then reads and
//! writes their characteristics through the accessor traits below. The
//! host never sees transport errors, only the values returned.

use std::future::Future;

/// A value exposed by a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    /// Boolean on/off state.
    On,
}

impl Characteristic {
    /// Returns the characteristic name as hosts display it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::On => "On",
        }
    }
}

/// The kind of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    /// A simple on/off switch.
    Switch,
}

/// A service exposed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    kind: ServiceKind,
    name: String,
    characteristics: Vec<Characteristic>,
}

impl Service {
    /// Creates a switch service with the `On` characteristic.
    #[must_use]
    pub fn switch(name: impl Into<String>) -> Self {
        Self {
            kind: ServiceKind::Switch,
            name: name.into(),
            characteristics: vec![Characteristic::On],
        }
    }

    /// Returns the service kind.
    #[must_use]
    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the exposed characteristics.
    #[must_use]
    pub fn characteristics(&self) -> &[Characteristic] {
        &self.characteristics
    }
}

/// An accessory that can be registered with a host.
pub trait Accessory {
    /// Returns the display name.
    fn name(&self) -> &str;

    /// Returns the services this accessory exposes.
    fn services(&self) -> Vec<Service>;
}

/// Accessor functions for an on/off [`Characteristic::On`].
pub trait OnOffAccessory: Accessory {
    /// Reads the current state.
    fn get_on(&self) -> impl Future<Output = bool> + Send;

    /// Requests a new state and returns the state actually in effect.
    fn set_on(&self, on: bool) -> impl Future<Output = bool> + Send;
}
