// Copyright 2025 Google LLC
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

//! Retry admin operations that conflict with pending operations.
//!
//! Spanner rejects some admin requests, such as creating or restoring a
//! backup, while another long-running operation is still in progress on the
//! same instance. The service reports these rejections with a
//! `FAILED_PRECONDITION` code and asks the caller to retry once the pending
//! operation completes.
//!
//! [PendingOperationPolicy] recognizes these errors, counts them, and tells the
//! caller to wait a fixed amount of time before trying again. After too many
//! attempts the policy gives up and produces a terminal error.
//!
//! # Example
//! ```
//! # use google_cloud_spanner_admin::retry_policy::*;
//! # use google_cloud_spanner_admin::Result;
//! # async fn sample(client: &impl google_cloud_spanner_admin::stub::DatabaseAdmin,
//! #     request: google_cloud_spanner_admin::model::CreateBackupRequest) -> Result<()> {
//! let backup = retry_pending_operations(
//!     async || client.create_backup(request.clone()).await,
//!     async |d| tokio::time::sleep(d).await,
//! )
//! .await?;
//! println!("created {}", backup.name);
//! # Ok(()) }
//! ```

use gax::backoff_policy::FixedBackoff;
use gax::error::Error;
use gax::error::rpc::Code;
use gax::retry_policy::RetryPolicy;
use gax::retry_result::RetryResult;
use std::time::Duration;

/// The default number of conflicting errors before the policy gives up.
pub const DEFAULT_MAXIMUM_ATTEMPTS: u32 = 20;

/// The default wait between attempts.
///
/// Conflicting backup and restore operations typically settle within a
/// minute.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(60);

const PENDING_OPERATION_MESSAGE: &str = "Please retry the operation once the pending";

/// Returns true if `error` reports a conflict with a pending operation.
///
/// The service does not include structured retry information with these
/// errors, the only signal is the message text.
pub fn is_pending_operation_conflict(error: &Error) -> bool {
    error.status().is_some_and(|s| {
        s.code == Code::FailedPrecondition && s.message.contains(PENDING_OPERATION_MESSAGE)
    })
}

/// The terminal error produced when [PendingOperationPolicy] gives up.
///
/// The [source][std::error::Error::source] of this error is the last error
/// received from the service.
#[derive(Debug, thiserror::Error)]
#[error(
    "Operation failed {attempts} times because of other pending operations. Giving up operation."
)]
pub struct PendingOperationsExhausted {
    attempts: u32,
    source: Error,
}

impl PendingOperationsExhausted {
    /// The number of conflicting errors observed before giving up.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The last error received from the service.
    pub fn last_error(&self) -> &Error {
        &self.source
    }
}

/// The classification of one error by [PendingOperationPolicy].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Wait and retry the operation.
    Retryable,
    /// Propagate the original error, do not wait.
    NotRetryable,
    /// Stop retrying, propagate the terminal error.
    Exhausted,
}

/// The outcome of [PendingOperationPolicy::evaluate].
#[derive(Debug)]
pub struct RetryDecision {
    attempt_count: u32,
    wait: Option<Duration>,
    result: RetryResult,
}

impl RetryDecision {
    /// The number of conflicting errors observed by the policy, including
    /// this one.
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// How long to wait before the next attempt.
    ///
    /// Only retryable decisions have a wait.
    pub fn wait(&self) -> Option<Duration> {
        self.wait
    }

    /// How the policy classified the error.
    pub fn classification(&self) -> Classification {
        match &self.result {
            RetryResult::Continue(_) => Classification::Retryable,
            RetryResult::Permanent(_) => Classification::NotRetryable,
            RetryResult::Exhausted(_) => Classification::Exhausted,
        }
    }

    /// Consumes the decision, returning the loop control value.
    ///
    /// For `NotRetryable` decisions the error is the original error,
    /// unchanged. For `Exhausted` decisions it is the terminal error.
    pub fn into_result(self) -> RetryResult {
        self.result
    }
}

/// Retries admin operations rejected because of other pending operations.
///
/// Create a new policy for each logical operation, and discard it once the
/// operation succeeds or the policy returns a non-retryable or exhausted
/// decision. The policy is not designed for use from multiple concurrent
/// attempts, `evaluate()` requires exclusive access.
///
/// # Example
/// ```
/// # use google_cloud_spanner_admin::retry_policy::*;
/// use google_cloud_spanner_admin::{Error, rpc::{Code, Status}};
/// use std::time::Duration;
/// let mut policy = PendingOperationPolicy::new()
///     .with_maximum_attempts(3)
///     .with_wait(Duration::from_secs(5));
/// let conflict = || Error::service(
///     Status::default()
///         .set_code(Code::FailedPrecondition)
///         .set_message("Please retry the operation once the pending operation completes"));
/// let decision = policy.evaluate(conflict());
/// assert_eq!(decision.classification(), Classification::Retryable);
/// assert_eq!(decision.wait(), Some(Duration::from_secs(5)));
/// ```
#[derive(Clone, Debug)]
pub struct PendingOperationPolicy {
    maximum_attempts: u32,
    wait: Duration,
    attempt_count: u32,
    exhausted: bool,
}

impl PendingOperationPolicy {
    /// Creates a policy with the default limits.
    pub fn new() -> Self {
        Self {
            maximum_attempts: DEFAULT_MAXIMUM_ATTEMPTS,
            wait: DEFAULT_WAIT,
            attempt_count: 0,
            exhausted: false,
        }
    }

    /// Changes the maximum number of conflicting errors.
    ///
    /// The policy gives up on the error that makes the count reach this
    /// value. Values smaller than 1 are treated as 1.
    pub fn with_maximum_attempts(mut self, v: u32) -> Self {
        self.maximum_attempts = v.max(1);
        self
    }

    /// Changes the wait between attempts.
    ///
    /// The policy always waits before retrying. A zero wait is ignored and
    /// the previous value is kept.
    pub fn with_wait(mut self, v: Duration) -> Self {
        if !v.is_zero() {
            self.wait = v;
        }
        self
    }

    /// The maximum number of conflicting errors before giving up.
    pub fn maximum_attempts(&self) -> u32 {
        self.maximum_attempts
    }

    /// The fixed wait between attempts.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// The number of conflicting errors observed so far.
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// The backoff policy matching this retry policy.
    pub fn backoff(&self) -> FixedBackoff {
        FixedBackoff::new(self.wait)
    }

    /// Classifies `error` and updates the attempt count.
    ///
    /// Only errors reporting a conflict with a pending operation count as
    /// attempts. The count is incremented before it is compared against the
    /// maximum, so the N-th conflict (N = maximum) produces an exhausted
    /// decision.
    ///
    /// This function never sleeps. The caller is responsible for waiting
    /// [RetryDecision::wait] before the next attempt.
    pub fn evaluate(&mut self, error: Error) -> RetryDecision {
        if !is_pending_operation_conflict(&error) {
            tracing::debug!("not a pending operation conflict: {error}");
            return self.decision(None, RetryResult::Permanent(error));
        }
        if self.exhausted {
            // The caller should have discarded this policy.
            return self.decision(None, RetryResult::Exhausted(self.terminal_error(error)));
        }
        self.attempt_count += 1;
        if self.attempt_count >= self.maximum_attempts {
            self.exhausted = true;
            let error = self.terminal_error(error);
            tracing::error!(attempt_count = self.attempt_count, "{error}");
            return self.decision(None, RetryResult::Exhausted(error));
        }
        tracing::debug!(
            attempt_count = self.attempt_count,
            "pending operation conflict: {error}"
        );
        self.decision(Some(self.wait), RetryResult::Continue(error))
    }

    fn decision(&self, wait: Option<Duration>, result: RetryResult) -> RetryDecision {
        RetryDecision {
            attempt_count: self.attempt_count,
            wait,
            result,
        }
    }

    fn terminal_error(&self, source: Error) -> Error {
        Error::exhausted(PendingOperationsExhausted {
            attempts: self.attempt_count,
            source,
        })
    }
}

impl Default for PendingOperationPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryPolicy for PendingOperationPolicy {
    fn on_error(&mut self, error: Error) -> RetryResult {
        self.evaluate(error).into_result()
    }
}

/// Runs `inner` until it succeeds, using `policy` to handle errors.
///
/// Between attempts this function awaits `sleep` with the policy's wait. The
/// policy's [attempt count][PendingOperationPolicy::attempt_count] remains
/// available to the caller once this function returns.
pub async fn run_with_retry<F, S, T>(
    policy: &mut PendingOperationPolicy,
    inner: F,
    sleep: S,
) -> crate::Result<T>
where
    F: AsyncFnMut() -> crate::Result<T> + Send,
    S: AsyncFn(Duration) -> () + Send,
{
    let backoff = policy.backoff();
    gax::retry_loop_internal::retry_loop_with_callback(
        inner,
        sleep,
        policy,
        &backoff,
        |attempt_count, error, delay| {
            tracing::warn!(
                attempt_count,
                ?delay,
                "operation blocked by other pending operations, retrying: {error}"
            );
        },
    )
    .await
}

/// Runs `inner` with a new [PendingOperationPolicy] using the default limits.
pub async fn retry_pending_operations<F, S, T>(inner: F, sleep: S) -> crate::Result<T>
where
    F: AsyncFnMut() -> crate::Result<T> + Send,
    S: AsyncFn(Duration) -> () + Send,
{
    let mut policy = PendingOperationPolicy::new();
    run_with_retry(&mut policy, inner, sleep).await
}
