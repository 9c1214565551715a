// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration for Base (and other EVM chains).
//!
//! This module provides functionality for:
//! - Network profiles for the supported chains
//! - Querying native and ERC-20 balances
//! - Signing and broadcasting ERC-20 transfers

pub mod client;
pub mod erc20;
#[cfg(test)]
pub mod mock;
pub mod signing;
pub mod types;

pub use client::{AlloyChainClient, ChainClient, ChainClientError};
pub use signing::SignerCredential;
pub use types::*;
