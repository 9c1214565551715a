// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults, and the validated [`SweepConfig`]
//! built from them. Configuration is read once at startup and is immutable
//! afterwards.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `NETWORK` | Network key (`base`, `base-sepolia`) | `base` |
//! | `WALLET_PRIVATE_KEY` | Signing key, hex or PEM | Required |
//! | `RPC_URL` | RPC endpoint override | Network default |
//! | `DESTINATION_WALLET` | Address receiving swept funds | Required |
//! | `API_SECRET` | Shared secret expected in `x-api-secret` | Required |
//! | `ALLOW_CHAIN_ID_MISMATCH` | Only warn when the RPC reports another chain | `false` |
//! | `RPC_TIMEOUT_SECS` | Budget for each RPC read or submission | `30` |
//! | `CONFIRMATION_TIMEOUT_SECS` | Budget for waiting on a receipt | `180` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{net::SocketAddr, time::Duration};

use alloy::primitives::Address;
use url::Url;

use crate::blockchain::{NetworkProfile, SignerCredential, DEFAULT_NETWORK};

pub const NETWORK_ENV: &str = "NETWORK";
pub const WALLET_PRIVATE_KEY_ENV: &str = "WALLET_PRIVATE_KEY";
pub const RPC_URL_ENV: &str = "RPC_URL";
pub const DESTINATION_WALLET_ENV: &str = "DESTINATION_WALLET";
pub const API_SECRET_ENV: &str = "API_SECRET";
pub const ALLOW_CHAIN_ID_MISMATCH_ENV: &str = "ALLOW_CHAIN_ID_MISMATCH";
pub const RPC_TIMEOUT_SECS_ENV: &str = "RPC_TIMEOUT_SECS";
pub const CONFIRMATION_TIMEOUT_SECS_ENV: &str = "CONFIRMATION_TIMEOUT_SECS";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Whole tokens the wallet must hold before a sweep runs.
///
/// Scaled by the decimals the token contract reports at sweep time.
pub const THRESHOLD_WHOLE_TOKENS: u64 = 100;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(180);

/// Validated configuration for balance checks and sweeps.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub network: &'static NetworkProfile,
    pub token_address: Address,
    pub rpc_url: Url,
    pub credential: SignerCredential,
    pub destination: Address,
    /// Downgrade a chain ID mismatch from an error to a warning.
    pub allow_chain_id_mismatch: bool,
    pub rpc_timeout: Duration,
    pub confirmation_timeout: Duration,
}

impl SweepConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let network_key = var(NETWORK_ENV).unwrap_or_else(|| DEFAULT_NETWORK.to_string());
        let network = NetworkProfile::by_key(&network_key)
            .ok_or_else(|| ConfigError::UnsupportedNetwork(network_key.clone()))?;

        let credential = var(WALLET_PRIVATE_KEY_ENV)
            .ok_or(ConfigError::Missing(WALLET_PRIVATE_KEY_ENV))
            .and_then(|raw| {
                SignerCredential::parse(&raw).map_err(|e| ConfigError::Invalid {
                    name: WALLET_PRIVATE_KEY_ENV,
                    reason: e.to_string(),
                })
            })?;

        let rpc_url = resolve_rpc_url(var(RPC_URL_ENV).as_deref(), network)?;

        let destination = var(DESTINATION_WALLET_ENV)
            .ok_or(ConfigError::Missing(DESTINATION_WALLET_ENV))
            .and_then(|raw| parse_destination(&raw))?;

        let token_address = parse_address("token contract address", network.token_address)?;

        let allow_chain_id_mismatch = match var(ALLOW_CHAIN_ID_MISMATCH_ENV) {
            Some(raw) => parse_bool(ALLOW_CHAIN_ID_MISMATCH_ENV, &raw)?,
            None => false,
        };

        let rpc_timeout = parse_timeout(RPC_TIMEOUT_SECS_ENV, var(RPC_TIMEOUT_SECS_ENV))?
            .unwrap_or(DEFAULT_RPC_TIMEOUT);
        let confirmation_timeout = parse_timeout(
            CONFIRMATION_TIMEOUT_SECS_ENV,
            var(CONFIRMATION_TIMEOUT_SECS_ENV),
        )?
        .unwrap_or(DEFAULT_CONFIRMATION_TIMEOUT);

        Ok(Self {
            network,
            token_address,
            rpc_url,
            credential,
            destination,
            allow_chain_id_mismatch,
            rpc_timeout,
            confirmation_timeout,
        })
    }
}

/// Listen address from `HOST` / `PORT`.
pub fn bind_address_from_env() -> Result<SocketAddr, ConfigError> {
    bind_address_from_lookup(|name| std::env::var(name).ok())
}

/// Same as [`bind_address_from_env`] over an arbitrary lookup. An unparsable
/// `PORT` is an error, never a silent fallback.
pub fn bind_address_from_lookup<F>(lookup: F) -> Result<SocketAddr, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    let host = var(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = match var(PORT_ENV) {
        Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
            name: PORT_ENV,
            reason: format!("expected a port number, got `{raw}`"),
        })?,
        None => DEFAULT_PORT,
    };

    format!("{}:{port}", host.trim())
        .parse()
        .map_err(|e| ConfigError::Invalid {
            name: HOST_ENV,
            reason: format!("{e}"),
        })
}

/// Pick the RPC endpoint: explicit override first, then the network default.
pub fn resolve_rpc_url(
    override_url: Option<&str>,
    network: &NetworkProfile,
) -> Result<Url, ConfigError> {
    let raw = override_url
        .or(network.default_rpc_url)
        .ok_or(ConfigError::Missing(RPC_URL_ENV))?;

    raw.trim().parse().map_err(|e: url::ParseError| ConfigError::Invalid {
        name: RPC_URL_ENV,
        reason: e.to_string(),
    })
}

fn parse_address(name: &'static str, raw: &str) -> Result<Address, ConfigError> {
    raw.trim().parse().map_err(|e| ConfigError::Invalid {
        name,
        reason: format!("{e}"),
    })
}

/// Mixed-case input must carry a valid EIP-55 checksum. All-lowercase or
/// all-uppercase hex carries none and is accepted as is.
fn parse_destination(raw: &str) -> Result<Address, ConfigError> {
    let raw = raw.trim();
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    let mixed_case = digits.bytes().any(|b| b.is_ascii_uppercase())
        && digits.bytes().any(|b| b.is_ascii_lowercase());

    if !mixed_case {
        return parse_address(DESTINATION_WALLET_ENV, raw);
    }

    Address::parse_checksummed(format!("0x{digits}"), None).map_err(|e| ConfigError::Invalid {
        name: DESTINATION_WALLET_ENV,
        reason: format!("{e}"),
    })
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            name,
            reason: format!("expected a boolean, got `{other}`"),
        }),
    }
}

fn parse_timeout(name: &'static str, raw: Option<String>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(ConfigError::Invalid {
            name,
            reason: format!("expected a positive number of seconds, got `{raw}`"),
        }),
    }
}

/// Configuration problems detected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not configured")]
    Missing(&'static str),

    #[error("Unsupported network `{0}` (expected `base` or `base-sepolia`)")]
    UnsupportedNetwork(String),

    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
