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

//! Samples for the Cloud Spanner Database Admin API using customer-managed
//! encryption keys.
//!
//! The samples create a database, back it up, and restore the backup, always
//! using a Cloud KMS key to encrypt the data. Creating and restoring backups
//! may fail while other long-running operations on the same instance are
//! pending. The [retry_policy] module retries these operations.
//!
//! The service is abstracted by the [stub::DatabaseAdmin] trait.
//! Applications provide an implementation that waits for each long-running
//! operation to complete.

pub use gax::Result;
pub use gax::error::Error;
pub use gax::error::rpc;

pub mod model;
pub mod names;
pub mod retry_policy;
pub mod samples;
pub mod stub;
