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

//! Retry loop control types.
//!
//! Applications only need to use these types when implementing their own retry
//! policies.

use crate::error::Error;

/// The result of a retry policy decision.
///
/// All variants carry an error. For [Permanent][RetryResult::Permanent] and
/// [Exhausted][RetryResult::Exhausted] this is the error returned to the
/// application. For [Continue][RetryResult::Continue] it is the error that
/// triggered the retry, which the loop may report before waiting.
///
/// # Example
///
/// ```
/// # use google_cloud_gax::{error::Error, retry_policy::RetryPolicy};
/// # use google_cloud_gax::retry_result::RetryResult;
/// #[derive(Debug, Default)]
/// struct MyRetryPolicy { errors: u32 }
/// impl RetryPolicy for MyRetryPolicy {
///     fn on_error(&mut self, error: Error) -> RetryResult {
///         self.errors += 1;
///         if self.errors >= 42 {
///             return RetryResult::Exhausted(Error::exhausted(error));
///         }
///         RetryResult::Continue(error)
///     }
/// }
/// ```
#[derive(Debug)]
pub enum RetryResult {
    /// The error is non-retryable, stop the loop.
    Permanent(Error),

    /// The error is retryable, but the policy is stopping the loop.
    ///
    /// Loop control policies may stop the loop on retryable errors, for
    /// example, because the policy only allows a limited number of attempts.
    Exhausted(Error),

    /// The error was retryable, continue the loop.
    Continue(Error),
}

impl RetryResult {
    pub fn is_permanent(&self) -> bool {
        match &self {
            Self::Permanent(_) => true,
            Self::Exhausted(_) | Self::Continue(_) => false,
        }
    }
    pub fn is_exhausted(&self) -> bool {
        match &self {
            Self::Exhausted(_) => true,
            Self::Permanent(_) | Self::Continue(_) => false,
        }
    }
    pub fn is_continue(&self) -> bool {
        match &self {
            Self::Continue(_) => true,
            Self::Permanent(_) | Self::Exhausted(_) => false,
        }
    }

    /// Returns the error carried by any variant.
    pub fn into_error(self) -> Error {
        match self {
            Self::Permanent(e) | Self::Exhausted(e) | Self::Continue(e) => e,
        }
    }
}
