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

//! Defines the trait for backoff policies and a fixed delay implementation.
//!
//! Retry strategies should avoid immediately retrying an RPC, as the service
//! may need time to recover. When the expected recovery time is known, such as
//! the time it takes for a conflicting long-running operation to settle, a
//! fixed delay is simpler and more predictable than an adaptive algorithm.
//!
//! # Example
//! ```
//! # use google_cloud_gax::backoff_policy::*;
//! use std::time::Duration;
//! let policy = FixedBackoff::new(Duration::from_secs(60));
//! assert_eq!(policy.on_failure(1), Duration::from_secs(60));
//! assert_eq!(policy.on_failure(7), Duration::from_secs(60));
//! ```

use std::time::Duration;

/// Defines the trait implemented by all backoff strategies.
pub trait BackoffPolicy: Send + Sync + std::fmt::Debug {
    /// Returns the backoff delay on a failure.
    ///
    /// # Parameters
    /// * `attempt_count` - the number of attempts. This method is always called
    ///   after the first attempt.
    fn on_failure(&self, attempt_count: u32) -> Duration;
}

/// A backoff policy that waits the same amount of time after every failure.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBackoff {
    delay: Duration,
}

impl FixedBackoff {
    /// Creates a policy that always waits `delay`.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The delay applied after each failure.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl BackoffPolicy for FixedBackoff {
    fn on_failure(&self, _attempt_count: u32) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1)]
    #[test_case(2)]
    #[test_case(19)]
    #[test_case(u32::MAX)]
    fn fixed_ignores_attempt_count(attempt_count: u32) {
        let policy = FixedBackoff::new(Duration::from_secs(60));
        assert_eq!(policy.on_failure(attempt_count), Duration::from_secs(60));
        assert_eq!(policy.delay(), Duration::from_secs(60));
    }

    #[test]
    fn fixed_as_trait_object() {
        let policy: Box<dyn BackoffPolicy> = Box::new(FixedBackoff::new(Duration::from_millis(5)));
        assert_eq!(policy.on_failure(3), Duration::from_millis(5));
    }
}
