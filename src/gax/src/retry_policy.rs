// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the trait for retry policies.
//!
//! Some requests fail because of a transient condition in the service, for
//! example, another long-running operation holds the resource the request
//! needs. Such requests can succeed if they are attempted again once the
//! condition clears.
//!
//! A retry policy classifies each error and decides whether the retry loop
//! should make a new attempt. The time between attempts is controlled by a
//! separate [BackoffPolicy][crate::backoff_policy::BackoffPolicy].

use crate::error::Error;
use crate::retry_result::RetryResult;

/// Controls the retry loop behavior.
///
/// A policy instance is scoped to a single retry loop. Policies may keep
/// state, such as the number of errors observed so far, and therefore
/// receive `&mut self`. Create a new instance for each operation.
pub trait RetryPolicy: Send + std::fmt::Debug {
    /// Query the retry policy after an error.
    ///
    /// # Parameters
    /// * `error` - the last error received from a request. Not all are server
    ///   errors. The client library may have been unable to send or complete
    ///   the RPC before the server returned an error.
    fn on_error(&mut self, error: Error) -> RetryResult;
}

impl<P> RetryPolicy for &mut P
where
    P: RetryPolicy + ?Sized,
{
    fn on_error(&mut self, error: Error) -> RetryResult {
        (**self).on_error(error)
    }
}
