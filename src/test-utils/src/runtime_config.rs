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

//! Configuration for integration tests, read from the environment.

use anyhow::{Context, Result};

const PROJECT_VAR: &str = "GOOGLE_CLOUD_PROJECT";
const INSTANCE_VAR: &str = "GOOGLE_CLOUD_RUST_TEST_SPANNER_INSTANCE";
const KEY_LOCATION_VAR: &str = "GOOGLE_CLOUD_RUST_TEST_KEY_LOCATION";
const KEY_RING_VAR: &str = "GOOGLE_CLOUD_RUST_TEST_KEY_RING";
const KEY_NAME_VAR: &str = "GOOGLE_CLOUD_RUST_TEST_KEY_NAME";
const DEFAULT_INSTANCE: &str = "test-instance";

pub fn project_id() -> Result<String> {
    std::env::var(PROJECT_VAR).map_err(anyhow::Error::from)
}

/// The Spanner instance hosting the test databases.
pub fn instance_id() -> String {
    std::env::var(INSTANCE_VAR)
        .ok()
        .unwrap_or(DEFAULT_INSTANCE.to_string())
}

/// The full name of the Cloud KMS key used to encrypt test databases.
///
/// All of the key location, key ring, and key name variables are required.
pub fn kms_key_name(project_id: &str) -> Result<String> {
    let location = required(KEY_LOCATION_VAR)?;
    let key_ring = required(KEY_RING_VAR)?;
    let key_name = required(KEY_NAME_VAR)?;
    Ok(format!(
        "projects/{project_id}/locations/{location}/keyRings/{key_ring}/cryptoKeys/{key_name}"
    ))
}

fn required(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}
