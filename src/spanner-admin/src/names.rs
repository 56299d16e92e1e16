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

//! Resource names used by the Database Admin API and Cloud KMS.
//!
//! # Example
//! ```
//! # use google_cloud_spanner_admin::names::*;
//! let instance = InstanceName::new("my-project", "my-instance");
//! let database = instance.database("my-database");
//! assert_eq!(
//!     database.to_string(),
//!     "projects/my-project/instances/my-instance/databases/my-database"
//! );
//! let parsed = database.to_string().parse::<DatabaseName>()?;
//! assert_eq!(parsed, database);
//! # Ok::<(), ResourceNameError>(())
//! ```

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Errors parsing a resource name.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ResourceNameError {
    #[error("`{name}` is not a valid {kind} name, expected `{pattern}`")]
    Format {
        kind: &'static str,
        pattern: &'static str,
        name: String,
    },
    #[error("the `{segment}` segment is empty in {kind} name `{name}`")]
    EmptySegment {
        kind: &'static str,
        segment: &'static str,
        name: String,
    },
}

/// Splits `name` into the values following each of the `collections`.
fn parse<'a, const N: usize>(
    name: &'a str,
    kind: &'static str,
    pattern: &'static str,
    collections: [&'static str; N],
) -> Result<[&'a str; N], ResourceNameError> {
    let format = || ResourceNameError::Format {
        kind,
        pattern,
        name: name.to_string(),
    };
    let mut segments = name.split('/');
    let mut values = [""; N];
    for (value, collection) in values.iter_mut().zip(collections) {
        match (segments.next(), segments.next()) {
            (Some(c), Some(v)) if c == collection => *value = v,
            _ => return Err(format()),
        }
        if value.is_empty() {
            return Err(ResourceNameError::EmptySegment {
                kind,
                segment: collection,
                name: name.to_string(),
            });
        }
    }
    match segments.next() {
        None => Ok(values),
        Some(_) => Err(format()),
    }
}

/// The name of a Cloud Spanner instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InstanceName {
    project: String,
    instance: String,
}

impl InstanceName {
    pub fn new<P: Into<String>, I: Into<String>>(project: P, instance: I) -> Self {
        Self {
            project: project.into(),
            instance: instance.into(),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// The name of a database in this instance.
    pub fn database<T: Into<String>>(&self, id: T) -> DatabaseName {
        DatabaseName {
            instance: self.clone(),
            database: id.into(),
        }
    }

    /// The name of a backup in this instance.
    pub fn backup<T: Into<String>>(&self, id: T) -> BackupName {
        BackupName {
            instance: self.clone(),
            backup: id.into(),
        }
    }
}

impl Display for InstanceName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "projects/{}/instances/{}", self.project, self.instance)
    }
}

impl FromStr for InstanceName {
    type Err = ResourceNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [project, instance] = parse(
            s,
            "instance",
            "projects/{project}/instances/{instance}",
            ["projects", "instances"],
        )?;
        Ok(Self::new(project, instance))
    }
}

/// The name of a Cloud Spanner database.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DatabaseName {
    instance: InstanceName,
    database: String,
}

impl DatabaseName {
    pub fn instance(&self) -> &InstanceName {
        &self.instance
    }

    /// The database id.
    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Display for DatabaseName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/databases/{}", self.instance, self.database)
    }
}

impl FromStr for DatabaseName {
    type Err = ResourceNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [project, instance, database] = parse(
            s,
            "database",
            "projects/{project}/instances/{instance}/databases/{database}",
            ["projects", "instances", "databases"],
        )?;
        Ok(InstanceName::new(project, instance).database(database))
    }
}

/// The name of a Cloud Spanner backup.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BackupName {
    instance: InstanceName,
    backup: String,
}

impl BackupName {
    pub fn instance(&self) -> &InstanceName {
        &self.instance
    }

    /// The backup id.
    pub fn backup(&self) -> &str {
        &self.backup
    }
}

impl Display for BackupName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/backups/{}", self.instance, self.backup)
    }
}

impl FromStr for BackupName {
    type Err = ResourceNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [project, instance, backup] = parse(
            s,
            "backup",
            "projects/{project}/instances/{instance}/backups/{backup}",
            ["projects", "instances", "backups"],
        )?;
        Ok(InstanceName::new(project, instance).backup(backup))
    }
}

/// The name of a Cloud KMS crypto key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KmsKeyName {
    project: String,
    location: String,
    key_ring: String,
    crypto_key: String,
}

impl KmsKeyName {
    pub fn new<P, L, R, K>(project: P, location: L, key_ring: R, crypto_key: K) -> Self
    where
        P: Into<String>,
        L: Into<String>,
        R: Into<String>,
        K: Into<String>,
    {
        Self {
            project: project.into(),
            location: location.into(),
            key_ring: key_ring.into(),
            crypto_key: crypto_key.into(),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn key_ring(&self) -> &str {
        &self.key_ring
    }

    pub fn crypto_key(&self) -> &str {
        &self.crypto_key
    }
}

impl Display for KmsKeyName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "projects/{}/locations/{}/keyRings/{}/cryptoKeys/{}",
            self.project, self.location, self.key_ring, self.crypto_key
        )
    }
}

impl FromStr for KmsKeyName {
    type Err = ResourceNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [project, location, key_ring, crypto_key] = parse(
            s,
            "crypto key",
            "projects/{project}/locations/{location}/keyRings/{key_ring}/cryptoKeys/{crypto_key}",
            ["projects", "locations", "keyRings", "cryptoKeys"],
        )?;
        Ok(Self::new(project, location, key_ring, crypto_key))
    }
}
