// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Every endpoint is guarded by a shared secret.
//!
//! ## Auth Flow
//!
//! 1. The caller (typically a cron job) sends `x-api-secret: <secret>`
//! 2. The server compares it with `API_SECRET`:
//!    - exact, case-sensitive match, no trimming
//!    - comparison is done on SHA-256 digests so it does not short-circuit
//!      on the first differing byte
//! 3. Anything else is rejected with 401 before configuration is consulted
//!    or any RPC call is made
//!
//! When `API_SECRET` is unset every request is rejected.

pub mod error;
pub mod extractor;
pub mod secret;

pub use error::AuthError;
pub use extractor::{ApiKey, API_SECRET_HEADER};
pub use secret::ApiSecret;
