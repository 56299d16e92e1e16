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

//! Traits to mock or replace the Database Admin service.
//!
//! The samples in this crate only depend on these traits. Applications
//! provide an implementation backed by their client of choice, and tests use
//! mocks or in-memory fakes.

use crate::Result;
use crate::model::{
    Backup, CreateBackupRequest, CreateDatabaseRequest, Database, RestoreDatabaseRequest,
};
use gax::error::Error;
use gax::error::rpc::{Code, Status};

/// Defines the trait used by the samples to call the Database Admin service.
///
/// Each method starts a long-running operation and waits for it to complete.
/// The result is the final resource, or the error reported by the service,
/// either when starting the operation or when the operation fails.
///
/// Services gain new RPCs routinely. Consequently, this trait gains new methods
/// too. To avoid breaking applications the trait provides a default
/// implementation of each method. These implementations return an
/// `UNIMPLEMENTED` error.
pub trait DatabaseAdmin: std::fmt::Debug + Send + Sync {
    /// Creates a database and waits until it is ready.
    fn create_database(
        &self,
        _req: CreateDatabaseRequest,
    ) -> impl std::future::Future<Output = Result<Database>> + Send {
        unimplemented_stub::<Database>("create_database")
    }

    /// Creates a backup and waits until the backup operation completes.
    ///
    /// The service rejects this request with `FAILED_PRECONDITION` while other
    /// backup operations on the same database are pending.
    fn create_backup(
        &self,
        _req: CreateBackupRequest,
    ) -> impl std::future::Future<Output = Result<Backup>> + Send {
        unimplemented_stub::<Backup>("create_backup")
    }

    /// Restores a backup into a new database and waits until the restore
    /// operation completes.
    ///
    /// The service rejects this request with `FAILED_PRECONDITION` while other
    /// restore operations on the same instance are pending.
    fn restore_database(
        &self,
        _req: RestoreDatabaseRequest,
    ) -> impl std::future::Future<Output = Result<Database>> + Send {
        unimplemented_stub::<Database>("restore_database")
    }
}

async fn unimplemented_stub<T>(method: &'static str) -> Result<T> {
    Err(Error::service(
        Status::default()
            .set_code(Code::Unimplemented)
            .set_message(format!("{method} is not implemented by this stub")),
    ))
}
