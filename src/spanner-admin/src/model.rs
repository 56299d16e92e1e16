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

//! The subset of the Database Admin API types used by the samples.
//!
//! Field names follow the JSON representation of the service.

use chrono::{DateTime, Utc};

/// Encryption configuration for a database, backup, or restored database.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct EncryptionConfig {
    /// The Cloud KMS key used to encrypt and decrypt the resource, in the
    /// `projects/*/locations/*/keyRings/*/cryptoKeys/*` format.
    pub kms_key_name: String,
}

impl EncryptionConfig {
    /// Sets the [kms_key_name][EncryptionConfig::kms_key_name] field.
    pub fn set_kms_key_name<T: Into<String>>(mut self, v: T) -> Self {
        self.kms_key_name = v.into();
        self
    }
}

/// Encryption information for a backup.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct EncryptionInfo {
    /// The Cloud KMS key version used to encrypt the data.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kms_key_version: String,
}

impl EncryptionInfo {
    /// Sets the [kms_key_version][EncryptionInfo::kms_key_version] field.
    pub fn set_kms_key_version<T: Into<String>>(mut self, v: T) -> Self {
        self.kms_key_version = v.into();
        self
    }

    /// The key name, without the `/cryptoKeyVersions/*` suffix.
    pub fn kms_key_name(&self) -> &str {
        match self.kms_key_version.split_once("/cryptoKeyVersions/") {
            Some((key, _)) => key,
            None => &self.kms_key_version,
        }
    }
}

/// A Cloud Spanner database.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Database {
    /// The database name, in the
    /// `projects/*/instances/*/databases/*` format.
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_config: Option<EncryptionConfig>,

    /// Set only if the database was restored from a backup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_info: Option<RestoreInfo>,
}

impl Database {
    /// Sets the [name][Database::name] field.
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    /// Sets the [encryption_config][Database::encryption_config] field.
    pub fn set_encryption_config(mut self, v: EncryptionConfig) -> Self {
        self.encryption_config = Some(v);
        self
    }

    /// Sets the [encryption_config][Database::encryption_config] field.
    pub fn set_or_clear_encryption_config(mut self, v: Option<EncryptionConfig>) -> Self {
        self.encryption_config = v;
        self
    }

    /// Sets the [restore_info][Database::restore_info] field.
    pub fn set_restore_info(mut self, v: RestoreInfo) -> Self {
        self.restore_info = Some(v);
        self
    }
}

/// Information about a database restore.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct RestoreInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_info: Option<BackupInfo>,
}

impl RestoreInfo {
    /// Sets the [backup_info][RestoreInfo::backup_info] field.
    pub fn set_backup_info(mut self, v: BackupInfo) -> Self {
        self.backup_info = Some(v);
        self
    }
}

/// Information about the backup used to restore a database.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct BackupInfo {
    /// The backup name.
    pub backup: String,
    /// The database the backup was created from.
    pub source_database: String,
}

impl BackupInfo {
    /// Sets the [backup][BackupInfo::backup] field.
    pub fn set_backup<T: Into<String>>(mut self, v: T) -> Self {
        self.backup = v.into();
        self
    }

    /// Sets the [source_database][BackupInfo::source_database] field.
    pub fn set_source_database<T: Into<String>>(mut self, v: T) -> Self {
        self.source_database = v.into();
        self
    }
}

/// A backup of a Cloud Spanner database.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Backup {
    /// The backup name, in the `projects/*/instances/*/backups/*` format.
    ///
    /// Output only. Ignored when creating a backup.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The database to back up, in the same instance as the backup.
    pub database: String,

    /// Output only. The size of the backup.
    pub size_bytes: i64,

    /// Output only. When the backup operation started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,

    /// The service deletes the backup after this time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<DateTime<Utc>>,

    /// Output only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_info: Option<EncryptionInfo>,
}

impl Backup {
    /// Sets the [name][Backup::name] field.
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    /// Sets the [database][Backup::database] field.
    pub fn set_database<T: Into<String>>(mut self, v: T) -> Self {
        self.database = v.into();
        self
    }

    /// Sets the [size_bytes][Backup::size_bytes] field.
    pub fn set_size_bytes(mut self, v: i64) -> Self {
        self.size_bytes = v;
        self
    }

    /// Sets the [create_time][Backup::create_time] field.
    pub fn set_create_time(mut self, v: DateTime<Utc>) -> Self {
        self.create_time = Some(v);
        self
    }

    /// Sets the [expire_time][Backup::expire_time] field.
    pub fn set_expire_time(mut self, v: DateTime<Utc>) -> Self {
        self.expire_time = Some(v);
        self
    }

    /// Sets the [expire_time][Backup::expire_time] field.
    pub fn set_or_clear_expire_time(mut self, v: Option<DateTime<Utc>>) -> Self {
        self.expire_time = v;
        self
    }

    /// Sets the [encryption_info][Backup::encryption_info] field.
    pub fn set_encryption_info(mut self, v: EncryptionInfo) -> Self {
        self.encryption_info = Some(v);
        self
    }
}

/// The request for [create_database][crate::stub::DatabaseAdmin::create_database].
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct CreateDatabaseRequest {
    /// The instance that will host the database.
    pub parent: String,

    /// A `CREATE DATABASE` statement.
    pub create_statement: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_config: Option<EncryptionConfig>,
}

impl CreateDatabaseRequest {
    /// Sets the [parent][CreateDatabaseRequest::parent] field.
    pub fn set_parent<T: Into<String>>(mut self, v: T) -> Self {
        self.parent = v.into();
        self
    }

    /// Sets the [create_statement][CreateDatabaseRequest::create_statement] field.
    pub fn set_create_statement<T: Into<String>>(mut self, v: T) -> Self {
        self.create_statement = v.into();
        self
    }

    /// Sets the [encryption_config][CreateDatabaseRequest::encryption_config] field.
    pub fn set_encryption_config(mut self, v: EncryptionConfig) -> Self {
        self.encryption_config = Some(v);
        self
    }

    /// The database id in the `CREATE DATABASE` statement, if any.
    ///
    /// The id may be quoted with backticks.
    pub fn database_id(&self) -> Option<&str> {
        let mut tokens = self.create_statement.split_whitespace();
        let create = tokens.next()?;
        let database = tokens.next()?;
        if !create.eq_ignore_ascii_case("CREATE") || !database.eq_ignore_ascii_case("DATABASE") {
            return None;
        }
        let id = tokens.next()?.trim_matches('`');
        (!id.is_empty()).then_some(id)
    }
}

/// The request for [create_backup][crate::stub::DatabaseAdmin::create_backup].
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct CreateBackupRequest {
    /// The instance that will host the backup.
    pub parent: String,

    pub backup_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<Backup>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_config: Option<EncryptionConfig>,
}

impl CreateBackupRequest {
    /// Sets the [parent][CreateBackupRequest::parent] field.
    pub fn set_parent<T: Into<String>>(mut self, v: T) -> Self {
        self.parent = v.into();
        self
    }

    /// Sets the [backup_id][CreateBackupRequest::backup_id] field.
    pub fn set_backup_id<T: Into<String>>(mut self, v: T) -> Self {
        self.backup_id = v.into();
        self
    }

    /// Sets the [backup][CreateBackupRequest::backup] field.
    pub fn set_backup(mut self, v: Backup) -> Self {
        self.backup = Some(v);
        self
    }

    /// Sets the [encryption_config][CreateBackupRequest::encryption_config] field.
    pub fn set_encryption_config(mut self, v: EncryptionConfig) -> Self {
        self.encryption_config = Some(v);
        self
    }
}

/// The request for [restore_database][crate::stub::DatabaseAdmin::restore_database].
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct RestoreDatabaseRequest {
    /// The instance that will host the restored database.
    pub parent: String,

    pub database_id: String,

    /// The backup to restore from, in the `projects/*/instances/*/backups/*`
    /// format.
    pub backup: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_config: Option<EncryptionConfig>,
}

impl RestoreDatabaseRequest {
    /// Sets the [parent][RestoreDatabaseRequest::parent] field.
    pub fn set_parent<T: Into<String>>(mut self, v: T) -> Self {
        self.parent = v.into();
        self
    }

    /// Sets the [database_id][RestoreDatabaseRequest::database_id] field.
    pub fn set_database_id<T: Into<String>>(mut self, v: T) -> Self {
        self.database_id = v.into();
        self
    }

    /// Sets the [backup][RestoreDatabaseRequest::backup] field.
    pub fn set_backup<T: Into<String>>(mut self, v: T) -> Self {
        self.backup = v.into();
        self
    }

    /// Sets the [encryption_config][RestoreDatabaseRequest::encryption_config] field.
    pub fn set_encryption_config(mut self, v: EncryptionConfig) -> Self {
        self.encryption_config = Some(v);
        self
    }
}
