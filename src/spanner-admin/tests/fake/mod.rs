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

//! An in-memory implementation of the Database Admin service.

use google_cloud_spanner_admin::rpc::{Code, Status};
use google_cloud_spanner_admin::{Error, Result};
use google_cloud_spanner_admin::model::*;
use google_cloud_spanner_admin::names::{BackupName, DatabaseName, InstanceName};
use google_cloud_spanner_admin::stub::DatabaseAdmin;
use std::collections::BTreeMap;
use std::sync::Mutex;

pub const PENDING_BACKUP_MESSAGE: &str = "Cannot create a backup while other backup operations are pending on the database. Please retry the operation once the pending backup operations complete.";
pub const PENDING_RESTORE_MESSAGE: &str = "Cannot restore a backup while other restore operations are pending on the instance. Please retry the operation once the pending restore operations complete.";

/// The size reported for every backup.
pub const BACKUP_SIZE: i64 = 4096;

#[derive(Debug, Default)]
struct State {
    databases: BTreeMap<String, Database>,
    backups: BTreeMap<String, Backup>,
    pending_backups: u32,
    pending_restores: u32,
    backup_calls: u32,
    restore_calls: u32,
}

#[derive(Debug, Default)]
pub struct FakeDatabaseAdmin {
    state: Mutex<State>,
}

impl FakeDatabaseAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the next `n` backup requests as if other backups were pending.
    pub fn with_pending_backups(self, n: u32) -> Self {
        self.lock().pending_backups = n;
        self
    }

    /// Rejects the next `n` restore requests as if other restores were pending.
    pub fn with_pending_restores(self, n: u32) -> Self {
        self.lock().pending_restores = n;
        self
    }

    pub fn backup_calls(&self) -> u32 {
        self.lock().backup_calls
    }

    pub fn restore_calls(&self) -> u32 {
        self.lock().restore_calls
    }

    pub fn database(&self, name: &str) -> Option<Database> {
        self.lock().databases.get(name).cloned()
    }

    pub fn backup(&self, name: &str) -> Option<Backup> {
        self.lock().backups.get(name).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("fake state is poisoned")
    }
}

impl DatabaseAdmin for FakeDatabaseAdmin {
    async fn create_database(&self, req: CreateDatabaseRequest) -> Result<Database> {
        let instance = req.parent.parse::<InstanceName>().map_err(invalid_argument)?;
        let id = req
            .database_id()
            .ok_or_else(|| invalid_argument(format!("bad statement: {}", req.create_statement)))?;
        let name = instance.database(id).to_string();

        let mut state = self.lock();
        if state.databases.contains_key(&name) {
            return Err(status(Code::AlreadyExists, format!("{name} already exists")));
        }
        let database = Database::default()
            .set_name(&name)
            .set_or_clear_encryption_config(req.encryption_config);
        state.databases.insert(name, database.clone());
        Ok(database)
    }

    async fn create_backup(&self, req: CreateBackupRequest) -> Result<Backup> {
        let mut state = self.lock();
        state.backup_calls += 1;
        if state.pending_backups > 0 {
            state.pending_backups -= 1;
            return Err(status(Code::FailedPrecondition, PENDING_BACKUP_MESSAGE));
        }

        let instance = req.parent.parse::<InstanceName>().map_err(invalid_argument)?;
        let backup = req
            .backup
            .ok_or_else(|| invalid_argument("missing backup"))?;
        let database = backup
            .database
            .parse::<DatabaseName>()
            .map_err(invalid_argument)?;
        if database.instance() != &instance {
            return Err(invalid_argument(format!(
                "{database} is not in instance {instance}"
            )));
        }
        if !state.databases.contains_key(&backup.database) {
            return Err(status(Code::NotFound, format!("{database} not found")));
        }
        let name = instance.backup(&req.backup_id).to_string();
        if state.backups.contains_key(&name) {
            return Err(status(Code::AlreadyExists, format!("{name} already exists")));
        }

        let mut created = backup
            .set_name(&name)
            .set_size_bytes(BACKUP_SIZE)
            .set_create_time(chrono::Utc::now());
        if let Some(config) = req.encryption_config {
            created = created.set_encryption_info(
                EncryptionInfo::default()
                    .set_kms_key_version(format!("{}/cryptoKeyVersions/1", config.kms_key_name)),
            );
        }
        state.backups.insert(name, created.clone());
        Ok(created)
    }

    async fn restore_database(&self, req: RestoreDatabaseRequest) -> Result<Database> {
        let mut state = self.lock();
        state.restore_calls += 1;
        if state.pending_restores > 0 {
            state.pending_restores -= 1;
            return Err(status(Code::FailedPrecondition, PENDING_RESTORE_MESSAGE));
        }

        let instance = req.parent.parse::<InstanceName>().map_err(invalid_argument)?;
        let backup_name = req.backup.parse::<BackupName>().map_err(invalid_argument)?;
        let backup = state
            .backups
            .get(&req.backup)
            .ok_or_else(|| status(Code::NotFound, format!("{backup_name} not found")))?;
        let name = instance.database(&req.database_id).to_string();
        if state.databases.contains_key(&name) {
            return Err(status(Code::AlreadyExists, format!("{name} already exists")));
        }

        let database = Database::default()
            .set_name(&name)
            .set_or_clear_encryption_config(req.encryption_config)
            .set_restore_info(
                RestoreInfo::default().set_backup_info(
                    BackupInfo::default()
                        .set_backup(&backup.name)
                        .set_source_database(&backup.database),
                ),
            );
        state.databases.insert(name, database.clone());
        Ok(database)
    }
}

fn status<T: Into<String>>(code: Code, message: T) -> Error {
    Error::service(Status::default().set_code(code).set_message(message))
}

fn invalid_argument<T: std::fmt::Display>(e: T) -> Error {
    status(Code::InvalidArgument, e.to_string())
}
