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

//! Google APIs helpers.
//!
//! This crate contains the error model and the retry loop building blocks
//! used in the implementation of the Google Cloud Client Libraries for Rust.
//!
//! The retry loop does not depend on any clock. Callers provide the function
//! used to wait between attempts.

/// An alias of [std::result::Result] where the error is always [crate::error::Error].
///
/// This is the result type used by all functions wrapping RPCs.
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The core error types used by the client libraries.
pub mod error;

pub mod backoff_policy;
pub mod retry_policy;
pub mod retry_result;

#[doc(hidden)]
pub mod retry_loop_internal;
