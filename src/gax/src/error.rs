// Copyright 2024 Google LLC
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

mod core_error;
pub use core_error::*;

/// Errors and error details returned by Service RPCs.
///
/// The client libraries distinguish between errors detected while trying to
/// send a RPC (e.g. cannot open a connection), errors generated by the client
/// library itself (e.g. the retry policy is exhausted), and errors returned by
/// the service.
///
/// The types in this module represent the information returned by the
/// service.
///
/// # Examples
///
/// ```
/// # use google_cloud_gax::error;
/// use error::Error;
/// use error::rpc::Code;
/// fn handle_error(e: Error) {
///     if let Some(status) = e.status() {
///         if status.code == Code::FailedPrecondition {
///             println!("the resource is not ready: {}", status.message);
///         }
///     }
/// }
/// ```
pub mod rpc;
