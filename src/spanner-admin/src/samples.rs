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

//! Create, back up, and restore databases encrypted with a Cloud KMS key.
//!
//! Each sample returns a human-readable summary of the result. The backup and
//! restore samples retry requests rejected because of other pending
//! operations, see [PendingOperationPolicy].

use crate::Result;
use crate::model::{
    Backup, CreateBackupRequest, CreateDatabaseRequest, EncryptionConfig, RestoreDatabaseRequest,
};
use crate::names::InstanceName;
use crate::retry_policy::{PendingOperationPolicy, run_with_retry};
use crate::stub::DatabaseAdmin;
use std::time::Duration;

/// How long the service keeps backups created by the samples.
pub const BACKUP_RETENTION: chrono::TimeDelta = chrono::TimeDelta::days(14);

/// Creates a database encrypted with `kms_key_name`.
#[tracing::instrument(skip(client))]
pub async fn create_database_with_encryption_key<C>(
    client: &C,
    project_id: &str,
    instance_id: &str,
    database_id: &str,
    kms_key_name: &str,
) -> Result<String>
where
    C: DatabaseAdmin,
{
    let request = CreateDatabaseRequest::default()
        .set_parent(InstanceName::new(project_id, instance_id).to_string())
        .set_create_statement(format!("CREATE DATABASE `{database_id}`"))
        .set_encryption_config(EncryptionConfig::default().set_kms_key_name(kms_key_name));
    let database = client.create_database(request).await?;

    let key = database
        .encryption_config
        .map(|c| c.kms_key_name)
        .unwrap_or_default();
    let message = format!("Database {} created with encryption key {key}", database.name);
    tracing::info!("{message}");
    Ok(message)
}

/// Creates a backup of `database_id` encrypted with `kms_key_name`.
///
/// Retries with a new [PendingOperationPolicy] while other backup operations
/// are pending.
pub async fn create_backup_with_encryption_key<C>(
    client: &C,
    project_id: &str,
    instance_id: &str,
    database_id: &str,
    backup_id: &str,
    kms_key_name: &str,
) -> Result<String>
where
    C: DatabaseAdmin,
{
    let mut policy = PendingOperationPolicy::new();
    create_backup_with_encryption_key_and_retry(
        client,
        project_id,
        instance_id,
        database_id,
        backup_id,
        kms_key_name,
        &mut policy,
        async |d| tokio::time::sleep(d).await,
    )
    .await
}

/// Like [create_backup_with_encryption_key], with a caller-provided policy
/// and sleep function.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(skip(client, policy, sleep))]
pub async fn create_backup_with_encryption_key_and_retry<C, S>(
    client: &C,
    project_id: &str,
    instance_id: &str,
    database_id: &str,
    backup_id: &str,
    kms_key_name: &str,
    policy: &mut PendingOperationPolicy,
    sleep: S,
) -> Result<String>
where
    C: DatabaseAdmin,
    S: AsyncFn(Duration) -> () + Send,
{
    let instance = InstanceName::new(project_id, instance_id);
    let request = CreateBackupRequest::default()
        .set_parent(instance.to_string())
        .set_backup_id(backup_id)
        .set_backup(
            Backup::default()
                .set_database(instance.database(database_id).to_string())
                .set_expire_time(chrono::Utc::now() + BACKUP_RETENTION),
        )
        .set_encryption_config(EncryptionConfig::default().set_kms_key_name(kms_key_name));
    let backup = run_with_retry(
        policy,
        async || client.create_backup(request.clone()).await,
        sleep,
    )
    .await?;

    let create_time = backup
        .create_time
        .map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default();
    let key_version = backup
        .encryption_info
        .map(|i| i.kms_key_version)
        .unwrap_or_default();
    let message = format!(
        "Backup {} of size {} bytes was created at {create_time} using encryption key {key_version}",
        backup.name, backup.size_bytes
    );
    tracing::info!("{message}");
    Ok(message)
}

/// Restores `backup_id` into a new database encrypted with `kms_key_name`.
///
/// Retries with a new [PendingOperationPolicy] while other restore operations
/// are pending.
pub async fn restore_backup_with_encryption_key<C>(
    client: &C,
    project_id: &str,
    instance_id: &str,
    backup_id: &str,
    restore_id: &str,
    kms_key_name: &str,
) -> Result<String>
where
    C: DatabaseAdmin,
{
    let mut policy = PendingOperationPolicy::new();
    restore_backup_with_encryption_key_and_retry(
        client,
        project_id,
        instance_id,
        backup_id,
        restore_id,
        kms_key_name,
        &mut policy,
        async |d| tokio::time::sleep(d).await,
    )
    .await
}

/// Like [restore_backup_with_encryption_key], with a caller-provided policy
/// and sleep function.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(skip(client, policy, sleep))]
pub async fn restore_backup_with_encryption_key_and_retry<C, S>(
    client: &C,
    project_id: &str,
    instance_id: &str,
    backup_id: &str,
    restore_id: &str,
    kms_key_name: &str,
    policy: &mut PendingOperationPolicy,
    sleep: S,
) -> Result<String>
where
    C: DatabaseAdmin,
    S: AsyncFn(Duration) -> () + Send,
{
    let instance = InstanceName::new(project_id, instance_id);
    let request = RestoreDatabaseRequest::default()
        .set_parent(instance.to_string())
        .set_database_id(restore_id)
        .set_backup(instance.backup(backup_id).to_string())
        .set_encryption_config(EncryptionConfig::default().set_kms_key_name(kms_key_name));
    let database = run_with_retry(
        policy,
        async || client.restore_database(request.clone()).await,
        sleep,
    )
    .await?;

    let backup_info = database
        .restore_info
        .and_then(|r| r.backup_info)
        .unwrap_or_default();
    let key = database
        .encryption_config
        .map(|c| c.kms_key_name)
        .unwrap_or_default();
    let message = format!(
        "Database {} restored to {} from backup {} using encryption key {key}",
        backup_info.source_database, database.name, backup_info.backup
    );
    tracing::info!("{message}");
    Ok(message)
}
