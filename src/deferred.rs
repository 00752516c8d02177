// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Write-once values computed in the background and shared by all callers.
//!
//! A [`Deferred`] starts its computation immediately on a spawned task.
//! Every clone observes the same outcome: callers arriving while the
//! computation is pending wait for it instead of starting another one, and
//! a failure is cached just like a success.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{Error, Result};

type Outcome<T> = Option<std::result::Result<T, Arc<Error>>>;

/// Observable state of a setup lookup.
///
/// `Pending` is the uninitialized phase of an accessory: calls made now wait
/// for the lookup to settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupState {
    /// The computation is still running.
    Pending,
    /// The computation produced a value.
    Ready,
    /// The computation failed, or ended without producing a value.
    Failed,
}

/// A lazily produced, shared, write-once value.
#[derive(Debug)]
pub(crate) struct Deferred<T> {
    rx: watch::Receiver<Outcome<T>>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T> Deferred<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawns `future` on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub(crate) fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(None);
        tokio::spawn(async move {
            let outcome = future.await.map_err(Arc::new);
            tx.send_replace(Some(outcome));
        });
        Self { rx }
    }

    /// Waits for the value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lookup`] with the cached cause if the computation
    /// failed, or [`Error::LookupAborted`] if its task ended without a result.
    /// A computation that failed on another lookup reports that lookup's
    /// cause directly.
    pub(crate) async fn get(&self) -> Result<T> {
        let mut rx = self.rx.clone();
        let outcome = rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| Error::LookupAborted)?;

        match &*outcome {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(cause)) => match &**cause {
                Error::Lookup(inner) => Err(Error::Lookup(Arc::clone(inner))),
                _ => Err(Error::Lookup(Arc::clone(cause))),
            },
            None => Err(Error::LookupAborted),
        }
    }

    /// Returns the current state without waiting.
    pub(crate) fn state(&self) -> LookupState {
        let closed = self.rx.has_changed().is_err();
        match &*self.rx.borrow() {
            Some(Ok(_)) => LookupState::Ready,
            Some(Err(_)) => LookupState::Failed,
            None if closed => LookupState::Failed,
            None => LookupState::Pending,
        }
    }
}
