// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signer credential parsing.
//!
//! `WALLET_PRIVATE_KEY` may hold a raw secp256k1 key as hex (with or without
//! `0x`) or a PEM document (SEC1 `EC PRIVATE KEY` or PKCS#8 `PRIVATE KEY`).
//! Parsed keys are wrapped in [`SignerCredential`], whose `Debug` output never
//! contains key material.

use std::fmt;

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    signers::local::PrivateKeySigner,
};
use k256::SecretKey;

use super::client::ChainClientError;

/// A parsed signing key.
#[derive(Clone)]
pub struct SignerCredential {
    signer: PrivateKeySigner,
}

impl SignerCredential {
    /// Parse a credential from its configured string form.
    pub fn parse(raw: &str) -> Result<Self, ChainClientError> {
        let raw = raw.trim();
        let key_bytes = if raw.starts_with("-----BEGIN") {
            pem_to_bytes(raw.as_bytes())?
        } else {
            let hex = raw.strip_prefix("0x").unwrap_or(raw);
            alloy::hex::decode(hex)
                .map_err(|e| ChainClientError::InvalidPrivateKey(e.to_string()))?
        };

        let signer = PrivateKeySigner::from_slice(&key_bytes)
            .map_err(|e| ChainClientError::InvalidPrivateKey(e.to_string()))?;

        Ok(Self { signer })
    }

    /// Address derived from the key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Wallet for a signing provider.
    pub fn wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}

impl fmt::Debug for SignerCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerCredential")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// Extract raw secret key bytes from a PEM-encoded private key.
fn pem_to_bytes(pem_bytes: &[u8]) -> Result<Vec<u8>, ChainClientError> {
    let pem_str = std::str::from_utf8(pem_bytes)
        .map_err(|e| ChainClientError::InvalidPrivateKey(format!("Invalid UTF-8: {}", e)))?;

    let pem = pem::parse(pem_str)
        .map_err(|e| ChainClientError::InvalidPrivateKey(format!("Invalid PEM: {}", e)))?;

    let secret_key = SecretKey::from_sec1_der(pem.contents())
        .or_else(|_| parse_pkcs8_to_secret_key(pem.contents()))
        .map_err(|e| ChainClientError::InvalidPrivateKey(format!("Invalid key format: {}", e)))?;

    Ok(secret_key.to_bytes().to_vec())
}

fn parse_pkcs8_to_secret_key(der: &[u8]) -> Result<SecretKey, String> {
    use k256::pkcs8::DecodePrivateKey;
    SecretKey::from_pkcs8_der(der).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Hardhat/Anvil development account #0.
    const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_parse_hex_with_and_without_prefix() {
        let plain = SignerCredential::parse(DEV_KEY).unwrap();
        let prefixed = SignerCredential::parse(&format!("0x{DEV_KEY}\n")).unwrap();

        let expected: Address = DEV_ADDRESS.parse().unwrap();
        assert_eq!(plain.address(), expected);
        assert_eq!(prefixed.address(), expected);
    }

    #[test]
    fn test_parse_pem_matches_hex() {
        let secret = SecretKey::from_slice(&alloy::hex::decode(DEV_KEY).unwrap()).unwrap();
        let pem = secret
            .to_sec1_pem(k256::pkcs8::LineEnding::LF)
            .unwrap();

        let credential = SignerCredential::parse(&pem).unwrap();
        assert_eq!(credential.address(), DEV_ADDRESS.parse::<Address>().unwrap());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            SignerCredential::parse("not-a-key"),
            Err(ChainClientError::InvalidPrivateKey(_))
        ));
        assert!(matches!(
            SignerCredential::parse("0x1234"),
            Err(ChainClientError::InvalidPrivateKey(_))
        ));
    }

    #[test]
    fn test_debug_hides_key_material() {
        let credential = SignerCredential::parse(DEV_KEY).unwrap();
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains(DEV_KEY));
        assert!(!rendered.contains(&DEV_KEY[..16]));
    }
}
