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

//! Helper functions and types to generate random resource names.

use rand::{
    Rng,
    distr::{Distribution, Uniform},
};

/// All test resources start with this prefix.
///
/// Cleanup jobs use the prefix to find and remove stale resources.
pub const PREFIX: &str = "rust-sdk-testing-";

/// Spanner database ids are limited to 30 characters.
const DATABASE_ID_LENGTH: usize = 30;

/// Backup ids share the database id limits for these tests, which makes it
/// possible to restore a backup into a database with the same id.
const BACKUP_ID_LENGTH: usize = 30;

/// A random Spanner database id.
///
/// The id starts with a letter, contains only lowercase letters, digits and
/// hyphens, and does not end with a hyphen.
pub fn random_database_id() -> String {
    let id = LowercaseAlphanumeric.random_string(DATABASE_ID_LENGTH - PREFIX.len());
    format!("{PREFIX}{id}")
}

/// A random Spanner backup id, see [random_database_id].
pub fn random_backup_id() -> String {
    let id = LowercaseAlphanumeric.random_string(BACKUP_ID_LENGTH - PREFIX.len());
    format!("{PREFIX}{id}")
}

const LOWERCASE_ALPHANUMERIC_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Sample lowercase ASCII letters and digits.
///
/// # Example
/// ```
/// # use google_cloud_test_utils::resource_names::LowercaseAlphanumeric;
/// use rand::Rng;
/// let id: String = rand::rng()
///     .sample_iter(&LowercaseAlphanumeric)
///     .take(8)
///     .map(char::from)
///     .collect();
/// assert_eq!(id.len(), 8);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseAlphanumeric;

impl LowercaseAlphanumeric {
    /// Create a string with `n` characters from the character set.
    pub fn random_string(&self, n: usize) -> String {
        rand::rng()
            .sample_iter(self)
            .take(n)
            .map(char::from)
            .collect()
    }
}

impl Distribution<u8> for LowercaseAlphanumeric {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        let u = Uniform::new(0, LOWERCASE_ALPHANUMERIC_CHARSET.len())
            .expect("hard-coded uniform distribution is initialized successfully")
            .sample(rng);
        LOWERCASE_ALPHANUMERIC_CHARSET[u]
    }
}
