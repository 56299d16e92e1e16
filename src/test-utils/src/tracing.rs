// Copyright 2026 Google LLC
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

//! Enable logging in tests.
//!
//! The retry loops log each scheduled retry at `WARN` and each sample result
//! at `INFO`. The `log-integration-tests` feature raises the default level so
//! the sample output is visible in the test logs. `RUST_LOG` overrides the
//! default level.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

#[cfg(feature = "log-integration-tests")]
const DEFAULT_LEVEL: tracing::Level = tracing::Level::INFO;
#[cfg(not(feature = "log-integration-tests"))]
const DEFAULT_LEVEL: tracing::Level = tracing::Level::WARN;

/// Enables tracing for the current thread, until the guard is dropped.
pub fn enable_tracing() -> ::tracing::subscriber::DefaultGuard {
    let filter = EnvFilter::builder()
        .with_default_directive(DEFAULT_LEVEL.into())
        .from_env_lossy();
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_default(subscriber)
}
