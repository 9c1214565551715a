// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use alloy::primitives::{Address, U256};

/// Static description of a supported network and the token swept on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    /// Key used in the `NETWORK` environment variable
    pub key: &'static str,
    /// Network name for display
    pub name: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// Swept ERC-20 contract (checksummed)
    pub token_address: &'static str,
    /// Swept token symbol
    pub token_symbol: &'static str,
    /// Native currency symbol
    pub native_symbol: &'static str,
    /// Public RPC endpoint used when no override is configured
    pub default_rpc_url: Option<&'static str>,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

/// Base Mainnet configuration.
pub const BASE_MAINNET: NetworkProfile = NetworkProfile {
    key: "base",
    name: "Base",
    chain_id: 8453,
    token_address: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
    token_symbol: "USDC",
    native_symbol: "ETH",
    default_rpc_url: Some("https://mainnet.base.org"),
    explorer_url: "https://basescan.org",
};

/// Base Sepolia Testnet configuration.
pub const BASE_SEPOLIA: NetworkProfile = NetworkProfile {
    key: "base-sepolia",
    name: "Base Sepolia",
    chain_id: 84532,
    token_address: "0x036CbD53842c5426634e7929541eC2318f3dCF7e",
    token_symbol: "USDC",
    native_symbol: "ETH",
    default_rpc_url: Some("https://sepolia.base.org"),
    explorer_url: "https://sepolia.basescan.org",
};

/// Network used when `NETWORK` is unset.
pub const DEFAULT_NETWORK: &str = "base";

/// All networks this build can sweep on.
pub static SUPPORTED_NETWORKS: [NetworkProfile; 2] = [BASE_MAINNET, BASE_SEPOLIA];

impl NetworkProfile {
    /// Look up a profile by its key (case-insensitive, surrounding whitespace ignored).
    pub fn by_key(key: &str) -> Option<&'static NetworkProfile> {
        let key = key.trim().to_ascii_lowercase();
        SUPPORTED_NETWORKS.iter().find(|profile| profile.key == key)
    }

    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }
}

/// A token balance observed on-chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReading {
    /// Balance in the token's smallest unit
    pub raw: U256,
    /// Decimals reported by the token contract
    pub decimals: u8,
}

impl BalanceReading {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Balance as a human-readable decimal string.
    pub fn formatted(&self) -> String {
        format_units(self.raw, self.decimals)
    }
}

/// Transaction receipt after confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// Transaction hash
    pub tx_hash: String,
    /// Block number where transaction was included
    pub block_number: u64,
    /// Whether the transaction was successful
    pub success: bool,
}

/// Outcome of a confirmed sweep transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepResult {
    pub tx_hash: String,
    pub block_number: u64,
    pub amount: BalanceReading,
    pub from: Address,
    pub to: Address,
}

/// `amount × 10^decimals`, or `None` on overflow.
pub fn whole_tokens(amount: u64, decimals: u8) -> Option<U256> {
    U256::from(10u64)
        .checked_pow(U256::from(decimals))
        .and_then(|unit| unit.checked_mul(U256::from(amount)))
}

/// Format token units to a decimal string.
///
/// Trailing zeros are trimmed but at least one fractional digit is kept, so
/// 50 whole tokens render as `50.0`.
pub fn format_units(amount: U256, decimals: u8) -> String {
    if decimals == 0 {
        return format!("{amount}.0");
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    let decimal_str = format!("{:0>width$}", remainder.to_string(), width = decimals as usize);
    let trimmed = decimal_str.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_units_whole_amounts_keep_one_decimal() {
        assert_eq!(format_units(U256::from(50_000_000u64), 6), "50.0");
        assert_eq!(format_units(U256::ZERO, 6), "0.0");
        assert_eq!(format_units(U256::from(7u64), 0), "7.0");
    }

    #[test]
    fn test_format_units_fractions() {
        assert_eq!(format_units(U256::from(150_500_000u64), 6), "150.5");
        assert_eq!(format_units(U256::from(1u64), 6), "0.000001");

        let eth = U256::from(1_234_567_890_000_000_000u64);
        assert_eq!(format_units(eth, 18), "1.23456789");
    }

    #[test]
    fn test_whole_tokens_scales_by_decimals() {
        assert_eq!(whole_tokens(100, 6), Some(U256::from(100_000_000u64)));
        assert_eq!(
            whole_tokens(100, 18),
            Some(U256::from(100_000_000_000_000_000_000u128))
        );
        assert_eq!(whole_tokens(100, 0), Some(U256::from(100u64)));
        assert_eq!(whole_tokens(1, 255), None);
    }

    #[test]
    fn test_profile_lookup() {
        assert_eq!(NetworkProfile::by_key("base"), Some(&BASE_MAINNET));
        assert_eq!(NetworkProfile::by_key(" Base-Sepolia "), Some(&BASE_SEPOLIA));
        assert!(NetworkProfile::by_key("avalanche").is_none());
    }

    #[test]
    fn test_profile_token_addresses_parse() {
        for profile in SUPPORTED_NETWORKS.iter() {
            let parsed: Address = profile.token_address.parse().unwrap();
            assert_eq!(parsed.to_checksum(None), profile.token_address);
        }
    }

    #[test]
    fn test_tx_url() {
        assert_eq!(
            BASE_SEPOLIA.tx_url("0xabc"),
            "https://sepolia.basescan.org/tx/0xabc"
        );
    }
}
