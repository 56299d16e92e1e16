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

mod fake;

#[cfg(test)]
mod tests {
    use super::fake::{
        BACKUP_SIZE, FakeDatabaseAdmin, PENDING_BACKUP_MESSAGE, PENDING_RESTORE_MESSAGE,
    };
    use google_cloud_spanner_admin::names::{InstanceName, KmsKeyName};
    use google_cloud_spanner_admin::retry_policy::{PendingOperationPolicy, PendingOperationsExhausted};
    use google_cloud_spanner_admin::rpc::Code;
    use google_cloud_spanner_admin::samples::*;
    use google_cloud_test_utils::resource_names::{random_backup_id, random_database_id};
    use google_cloud_test_utils::runtime_config;
    use google_cloud_test_utils::runtime_config::instance_id;
    use google_cloud_test_utils::tracing::enable_tracing;
    use std::error::Error as _;
    use std::sync::Mutex;
    use std::time::Duration;

    const PROJECT_ID: &str = "test-project";

    /// The project from the environment, or a fixed value for the fake service.
    fn project_id() -> String {
        runtime_config::project_id().unwrap_or_else(|_| PROJECT_ID.to_string())
    }

    /// The key from the environment, or a fixed key in `project_id`.
    fn kms_key_name(project_id: &str) -> String {
        runtime_config::kms_key_name(project_id).unwrap_or_else(|_| {
            KmsKeyName::new(project_id, "us-central1", "test-ring", "test-key").to_string()
        })
    }

    /// Records the waits requested by the retry loop, without waiting.
    #[derive(Debug, Default)]
    struct Waits(Mutex<Vec<Duration>>);

    impl Waits {
        async fn sleep(&self, d: Duration) {
            self.0.lock().expect("waits mutex is poisoned").push(d);
        }

        fn take(&self) -> Vec<Duration> {
            std::mem::take(&mut *self.0.lock().expect("waits mutex is poisoned"))
        }
    }

    #[tokio::test]
    async fn encrypted_database_backup_and_restore() -> anyhow::Result<()> {
        let _guard = enable_tracing();
        let client = FakeDatabaseAdmin::new()
            .with_pending_backups(2)
            .with_pending_restores(3);
        let project_id = project_id();
        let instance_id = instance_id();
        let instance = InstanceName::new(&project_id, &instance_id);
        let database_id = random_database_id();
        let backup_id = random_backup_id();
        let restore_id = random_database_id();
        let key = kms_key_name(&project_id);

        let out = create_database_with_encryption_key(
            &client,
            &project_id,
            &instance_id,
            &database_id,
            &key,
        )
        .await?;
        assert!(
            out.contains(&format!(
                "Database {} created with encryption key {key}",
                instance.database(&database_id)
            )),
            "{out}"
        );

        let waits = Waits::default();
        let mut policy = PendingOperationPolicy::new();
        let out = create_backup_with_encryption_key_and_retry(
            &client,
            &project_id,
            &instance_id,
            &database_id,
            &backup_id,
            &key,
            &mut policy,
            async |d| waits.sleep(d).await,
        )
        .await?;
        let pattern = format!(
            "Backup {} of size \\d+ bytes was created at (.*) using encryption key {}",
            regex::escape(&instance.backup(&backup_id).to_string()),
            regex::escape(&key)
        );
        let re = regex::Regex::new(&pattern)?;
        assert!(re.is_match(&out), "{out} does not match {pattern}");
        assert!(out.contains(&format!("of size {BACKUP_SIZE} bytes")), "{out}");
        assert_eq!(policy.attempt_count(), 2);
        assert_eq!(waits.take(), vec![Duration::from_secs(60); 2]);
        assert_eq!(client.backup_calls(), 3);

        // Use a fresh policy for each operation.
        let mut policy = PendingOperationPolicy::new();
        let out = restore_backup_with_encryption_key_and_retry(
            &client,
            &project_id,
            &instance_id,
            &backup_id,
            &restore_id,
            &key,
            &mut policy,
            async |d| waits.sleep(d).await,
        )
        .await?;
        assert!(
            out.contains(&format!(
                "Database {} restored to {} from backup {} using encryption key {key}",
                instance.database(&database_id),
                instance.database(&restore_id),
                instance.backup(&backup_id),
            )),
            "{out}"
        );
        assert_eq!(policy.attempt_count(), 3);
        assert_eq!(waits.take(), vec![Duration::from_secs(60); 3]);
        assert_eq!(client.restore_calls(), 4);

        let restored = client.database(&instance.database(&restore_id).to_string());
        let config = restored.and_then(|d| d.encryption_config);
        assert_eq!(config.map(|c| c.kms_key_name), Some(key.clone()));
        let backup = client.backup(&instance.backup(&backup_id).to_string());
        let info = backup.and_then(|b| b.encryption_info);
        assert_eq!(info.as_ref().map(|i| i.kms_key_name()), Some(key.as_str()));
        Ok(())
    }

    #[tokio::test]
    async fn backup_gives_up() -> anyhow::Result<()> {
        let _guard = enable_tracing();
        let client = FakeDatabaseAdmin::new().with_pending_backups(25);
        let database_id = random_database_id();
        let key = kms_key_name(PROJECT_ID);
        create_database_with_encryption_key(&client, PROJECT_ID, "i", &database_id, &key).await?;

        let waits = Waits::default();
        let mut policy = PendingOperationPolicy::new();
        let err = create_backup_with_encryption_key_and_retry(
            &client,
            PROJECT_ID,
            "i",
            &database_id,
            &random_backup_id(),
            &key,
            &mut policy,
            async |d| waits.sleep(d).await,
        )
        .await
        .unwrap_err();

        assert!(err.is_exhausted(), "{err:?}");
        assert_eq!(err.code(), Some(Code::DeadlineExceeded), "{err:?}");
        assert_eq!(
            err.to_string(),
            "Operation failed 20 times because of other pending operations. Giving up operation."
        );
        let details = err
            .source()
            .and_then(|e| e.downcast_ref::<PendingOperationsExhausted>());
        let last = details.map(|d| d.last_error());
        assert_eq!(
            last.and_then(|e| e.status()).map(|s| s.message.as_str()),
            Some(PENDING_BACKUP_MESSAGE)
        );
        assert_eq!(policy.attempt_count(), 20);
        assert_eq!(client.backup_calls(), 20);
        assert_eq!(waits.take(), vec![Duration::from_secs(60); 19]);
        Ok(())
    }

    #[tokio::test]
    async fn restore_missing_backup() {
        let _guard = enable_tracing();
        let client = FakeDatabaseAdmin::new();
        let waits = Waits::default();
        let mut policy = PendingOperationPolicy::new();
        let err = restore_backup_with_encryption_key_and_retry(
            &client,
            PROJECT_ID,
            "i",
            &random_backup_id(),
            &random_database_id(),
            &kms_key_name(PROJECT_ID),
            &mut policy,
            async |d| waits.sleep(d).await,
        )
        .await
        .unwrap_err();

        assert_eq!(err.code(), Some(Code::NotFound), "{err:?}");
        assert_eq!(policy.attempt_count(), 0);
        assert_eq!(client.restore_calls(), 1);
        assert!(waits.take().is_empty());
    }

    #[tokio::test]
    async fn restore_conflict_then_missing_backup() {
        let _guard = enable_tracing();
        let client = FakeDatabaseAdmin::new().with_pending_restores(1);
        let waits = Waits::default();
        let mut policy = PendingOperationPolicy::new();
        let err = restore_backup_with_encryption_key_and_retry(
            &client,
            PROJECT_ID,
            "i",
            "missing",
            &random_database_id(),
            &kms_key_name(PROJECT_ID),
            &mut policy,
            async |d| waits.sleep(d).await,
        )
        .await
        .unwrap_err();

        // The conflict is retried, the second error is not.
        assert_eq!(err.code(), Some(Code::NotFound), "{err:?}");
        assert_eq!(policy.attempt_count(), 1);
        assert_eq!(client.restore_calls(), 2);
        assert_eq!(waits.take(), vec![Duration::from_secs(60)]);
        assert!(!err.to_string().contains(PENDING_RESTORE_MESSAGE), "{err}");
    }

    #[tokio::test]
    async fn database_already_exists() -> anyhow::Result<()> {
        let client = FakeDatabaseAdmin::new();
        let database_id = random_database_id();
        let key = kms_key_name(PROJECT_ID);
        create_database_with_encryption_key(&client, PROJECT_ID, "i", &database_id, &key).await?;
        let err = create_database_with_encryption_key(&client, PROJECT_ID, "i", &database_id, &key)
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(Code::AlreadyExists), "{err:?}");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn default_backup_waits_one_minute() -> anyhow::Result<()> {
        let client = FakeDatabaseAdmin::new().with_pending_backups(1);
        let database_id = random_database_id();
        let key = kms_key_name(PROJECT_ID);
        create_database_with_encryption_key(&client, PROJECT_ID, "i", &database_id, &key).await?;

        let start = tokio::time::Instant::now();
        let out = create_backup_with_encryption_key(
            &client,
            PROJECT_ID,
            "i",
            &database_id,
            &random_backup_id(),
            &key,
        )
        .await?;
        assert!(out.contains(&key), "{out}");
        assert_eq!(start.elapsed(), Duration::from_secs(60));
        assert_eq!(client.backup_calls(), 2);
        Ok(())
    }
}
