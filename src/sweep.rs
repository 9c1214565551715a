// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Balance Gate and Sweeper
//!
//! A sweep reads the signer's token balance and, if it is at least
//! [`THRESHOLD_WHOLE_TOKENS`] whole tokens, transfers all of it to the
//! configured destination and waits for the receipt.
//!
//! ## Guarantees
//!
//! - The threshold is scaled by the decimals the token contract reports at
//!   sweep time, never by an assumed constant.
//! - Sweeps are serialized: the lock is held from the balance read until the
//!   transfer is confirmed, so the snapshot that is transferred cannot be
//!   moved by another sweep in between. A second trigger arriving during a
//!   sweep waits, then sees the drained balance and reports below threshold.
//! - The connected chain must report the profile's chain ID unless
//!   `ALLOW_CHAIN_ID_MISMATCH` is set.
//! - Every RPC call runs under a timeout. Nothing is retried.

use std::{future::Future, sync::Arc, time::Duration};

use alloy::primitives::{Address, TxHash, U256};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    blockchain::{
        whole_tokens, BalanceReading, ChainClient, ChainClientError, NetworkProfile,
        SweepResult,
    },
    config::{SweepConfig, THRESHOLD_WHOLE_TOKENS},
};

/// Balance compared against the threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceCheck {
    pub balance: BalanceReading,
    /// Threshold in the token's smallest unit
    pub threshold: U256,
}

impl BalanceCheck {
    pub fn above_threshold(&self) -> bool {
        self.balance.raw >= self.threshold
    }
}

/// Result of a sweep trigger that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
    /// Nothing was sent.
    BelowThreshold {
        balance: BalanceReading,
        wallet: Address,
    },
    /// The whole balance was transferred and confirmed.
    Swept(SweepResult),
}

/// Read-only snapshot for the status endpoint.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub network: &'static NetworkProfile,
    /// Chain ID reported by the RPC endpoint
    pub chain_id: u64,
    pub wallet: Address,
    pub token_balance: BalanceReading,
    /// Native balance in wei
    pub native_balance: U256,
    pub destination: Address,
    pub token_address: Address,
}

/// Sweep failures, grouped by the class reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Chain ID mismatch: expected {expected}, RPC reports {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    #[error("Transaction error: {message}")]
    Transaction {
        message: String,
        code: Option<i64>,
        reason: Option<String>,
    },
}

impl SweepError {
    fn network(what: &str, err: ChainClientError) -> Self {
        SweepError::Network(format!("{what}: {err}"))
    }

    fn transaction(err: ChainClientError) -> Self {
        match err {
            ChainClientError::TransactionFailed {
                message,
                code,
                reason,
            } => SweepError::Transaction {
                message,
                code,
                reason,
            },
            other => SweepError::Transaction {
                message: other.to_string(),
                code: None,
                reason: None,
            },
        }
    }
}

/// Executes balance checks and sweeps for one signer.
pub struct Sweeper {
    config: SweepConfig,
    client: Arc<dyn ChainClient>,
    lock: Mutex<()>,
}

impl Sweeper {
    pub fn new(config: SweepConfig, client: Arc<dyn ChainClient>) -> Self {
        Self {
            config,
            client,
            lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Address whose balance is swept.
    pub fn wallet(&self) -> Address {
        self.client.signer_address()
    }

    /// Read the token balance and compare it to the threshold.
    pub async fn check_balance(&self) -> Result<BalanceCheck, SweepError> {
        let token = self.config.token_address;
        let wallet = self.wallet();

        let decimals = self
            .read("token decimals", self.client.token_decimals(token))
            .await?;
        let raw = self
            .read("token balance", self.client.token_balance(token, wallet))
            .await?;

        let threshold = whole_tokens(THRESHOLD_WHOLE_TOKENS, decimals).ok_or_else(|| {
            SweepError::Configuration(format!(
                "token reports {decimals} decimals, threshold does not fit in 256 bits"
            ))
        })?;

        Ok(BalanceCheck {
            balance: BalanceReading::new(raw, decimals),
            threshold,
        })
    }

    /// Run the check-then-sweep flow.
    pub async fn execute(&self) -> Result<SweepOutcome, SweepError> {
        let _guard = self.lock.lock().await;
        let wallet = self.wallet();

        info!(
            network = self.config.network.key,
            wallet = %wallet,
            destination = %self.config.destination,
            "Sweep triggered"
        );

        self.verify_chain().await?;
        let check = self.check_balance().await?;

        info!(
            balance = %check.balance.formatted(),
            threshold = THRESHOLD_WHOLE_TOKENS,
            "Balance read"
        );

        if !check.above_threshold() {
            info!(balance = %check.balance.formatted(), "Balance below threshold, nothing to sweep");
            return Ok(SweepOutcome::BelowThreshold {
                balance: check.balance,
                wallet,
            });
        }

        let amount = check.balance;
        let tx_hash = self.submit(amount.raw).await?;
        info!(
            tx_hash = %tx_hash,
            amount = %amount.formatted(),
            "Sweep transaction submitted"
        );

        let receipt = self.confirm(tx_hash).await?;
        if !receipt.success {
            warn!(tx_hash = %tx_hash, block_number = receipt.block_number, "Sweep transaction reverted");
            return Err(SweepError::Transaction {
                message: format!("Transaction {} reverted in block {}", receipt.tx_hash, receipt.block_number),
                code: None,
                reason: None,
            });
        }

        info!(
            tx_hash = %receipt.tx_hash,
            block_number = receipt.block_number,
            "Sweep confirmed"
        );

        Ok(SweepOutcome::Swept(SweepResult {
            tx_hash: receipt.tx_hash,
            block_number: receipt.block_number,
            amount,
            from: wallet,
            to: self.config.destination,
        }))
    }

    /// Collect balances and chain identity without moving funds.
    ///
    /// A chain ID mismatch is only logged here; the reported `chain_id`
    /// shows the caller which chain the RPC endpoint is actually on.
    pub async fn status(&self) -> Result<StatusReport, SweepError> {
        let wallet = self.wallet();
        let chain_id = self.read("chain id", self.client.chain_id()).await?;
        if chain_id != self.config.network.chain_id {
            warn!(
                expected = self.config.network.chain_id,
                actual = chain_id,
                "RPC endpoint reports a different chain"
            );
        }

        let check = self.check_balance().await?;
        let native_balance = self
            .read("native balance", self.client.native_balance(wallet))
            .await?;

        Ok(StatusReport {
            network: self.config.network,
            chain_id,
            wallet,
            token_balance: check.balance,
            native_balance,
            destination: self.config.destination,
            token_address: self.config.token_address,
        })
    }

    async fn verify_chain(&self) -> Result<(), SweepError> {
        let expected = self.config.network.chain_id;
        let actual = self.read("chain id", self.client.chain_id()).await?;
        if actual == expected {
            return Ok(());
        }

        if self.config.allow_chain_id_mismatch {
            warn!(expected, actual, "Chain ID mismatch ignored (ALLOW_CHAIN_ID_MISMATCH)");
            Ok(())
        } else {
            Err(SweepError::ChainMismatch { expected, actual })
        }
    }

    async fn submit(&self, amount: U256) -> Result<TxHash, SweepError> {
        let send = self.client.send_token_transfer(
            self.config.token_address,
            self.config.destination,
            amount,
        );

        bounded(self.config.rpc_timeout, send)
            .await
            .ok_or_else(|| SweepError::Transaction {
                message: format!(
                    "Submission timed out after {}s",
                    self.config.rpc_timeout.as_secs()
                ),
                code: None,
                reason: None,
            })?
            .map_err(SweepError::transaction)
    }

    async fn confirm(&self, tx_hash: TxHash) -> Result<crate::blockchain::TxReceipt, SweepError> {
        bounded(
            self.config.confirmation_timeout,
            self.client.wait_for_receipt(tx_hash),
        )
        .await
        .ok_or_else(|| SweepError::Transaction {
            message: format!(
                "Transaction {tx_hash:?} not confirmed within {}s",
                self.config.confirmation_timeout.as_secs()
            ),
            code: None,
            reason: None,
        })?
        .map_err(SweepError::transaction)
    }

    async fn read<T>(
        &self,
        what: &str,
        call: impl Future<Output = Result<T, ChainClientError>>,
    ) -> Result<T, SweepError> {
        bounded(self.config.rpc_timeout, call)
            .await
            .ok_or_else(|| {
                SweepError::Network(format!(
                    "{what}: timed out after {}s",
                    self.config.rpc_timeout.as_secs()
                ))
            })?
            .map_err(|e| SweepError::network(what, e))
    }
}

/// `None` when the budget runs out.
async fn bounded<F: Future>(budget: Duration, fut: F) -> Option<F::Output> {
    tokio::time::timeout(budget, fut).await.ok()
}
