// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared secret storage and comparison.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::config::API_SECRET_ENV;

/// The configured API secret. Only its digest is kept in memory.
#[derive(Clone)]
pub struct ApiSecret {
    digest: [u8; 32],
}

impl ApiSecret {
    /// Wrap a secret. Empty secrets are refused.
    pub fn new(secret: &str) -> Option<Self> {
        if secret.is_empty() {
            return None;
        }
        Some(Self {
            digest: Sha256::digest(secret.as_bytes()).into(),
        })
    }

    /// Read `API_SECRET` from the environment.
    pub fn from_env() -> Option<Self> {
        std::env::var(API_SECRET_ENV)
            .ok()
            .and_then(|value| Self::new(&value))
    }

    /// Exact byte-for-byte match against the presented value.
    pub fn matches(&self, presented: &[u8]) -> bool {
        let presented: [u8; 32] = Sha256::digest(presented).into();
        presented
            .iter()
            .zip(self.digest.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_exact_value_only() {
        let secret = ApiSecret::new("s3cret-Token").unwrap();

        assert!(secret.matches(b"s3cret-Token"));
        assert!(!secret.matches(b"s3cret-token"));
        assert!(!secret.matches(b" s3cret-Token"));
        assert!(!secret.matches(b"s3cret-Token "));
        assert!(!secret.matches(b""));
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(ApiSecret::new("").is_none());
    }

    #[test]
    fn debug_is_redacted() {
        let secret = ApiSecret::new("hunter2").unwrap();
        assert!(!format!("{secret:?}").contains("hunter2"));
    }
}
