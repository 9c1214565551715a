// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token Sweeper - threshold-triggered ERC-20 sweep service
//!
//! Holds the key of a single custodial wallet on Base and, when triggered,
//! moves its whole USDC balance to a fixed destination once the balance
//! reaches the threshold.
//!
//! ## Modules
//!
//! - `api` - HTTP handlers (Axum)
//! - `auth` - Shared-secret authentication (`x-api-secret`)
//! - `blockchain` - Base RPC client, ERC-20 calls and signing
//! - `sweep` - Threshold check and serialized transfer
//! - `config` - Environment configuration

pub mod api;
pub mod auth;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;
pub mod sweep;
