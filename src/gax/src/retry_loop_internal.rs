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

use super::Result;
use super::backoff_policy::BackoffPolicy;
use super::error::Error;
use super::retry_policy::RetryPolicy;
use super::retry_result::RetryResult;
use std::time::Duration;

/// Runs the retry loop for a given function.
///
/// This functions calls an inner function as long as (1) the inner function
/// has not returned a successful response, and (2) the retry policy classifies
/// the last error as retryable.
///
/// In between calls the function waits the amount of time prescribed by the
/// backoff policy, using `sleep` to implement any sleep. Attempts never
/// overlap, and there is no deadline other than what the retry policy
/// enforces.
pub async fn retry_loop<F, S, P, Response>(
    inner: F,
    sleep: S,
    retry_policy: P,
    backoff_policy: &dyn BackoffPolicy,
) -> Result<Response>
where
    F: AsyncFnMut() -> Result<Response> + Send,
    S: AsyncFn(Duration) -> () + Send,
    P: RetryPolicy,
{
    retry_loop_with_callback(inner, sleep, retry_policy, backoff_policy, |_, _, _| {}).await
}

/// Runs the retry loop for a given function with a callback for retries.
///
/// Behaves like [retry_loop], and calls `on_retry` before sleeping, with the
/// attempt count, the error, and the delay.
pub async fn retry_loop_with_callback<F, S, P, OnRetry, Response>(
    mut inner: F,
    sleep: S,
    mut retry_policy: P,
    backoff_policy: &dyn BackoffPolicy,
    mut on_retry: OnRetry,
) -> Result<Response>
where
    F: AsyncFnMut() -> Result<Response> + Send,
    S: AsyncFn(Duration) -> () + Send,
    P: RetryPolicy,
    OnRetry: FnMut(u32, &Error, Duration) + Send,
{
    let mut attempt_count = 0_u32;
    loop {
        attempt_count = attempt_count.saturating_add(1);
        let error = match inner().await {
            Ok(r) => return Ok(r),
            Err(e) => e,
        };
        match retry_policy.on_error(error) {
            RetryResult::Permanent(e) | RetryResult::Exhausted(e) => return Err(e),
            RetryResult::Continue(e) => {
                let delay = backoff_policy.on_failure(attempt_count);
                on_retry(attempt_count, &e, delay);
                sleep(delay).await;
            }
        }
    }
}
