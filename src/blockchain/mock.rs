// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory [`ChainClient`] for tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use alloy::primitives::{keccak256, Address, TxHash, U256};
use async_trait::async_trait;

use super::client::{ChainClient, ChainClientError};
use super::types::TxReceipt;

pub const MOCK_SIGNER: Address = Address::repeat_byte(0x11);

/// A single-token chain that moves balances when transfers are submitted.
pub struct MockChain {
    pub chain_id: u64,
    pub decimals: u8,
    pub native: U256,
    balance: Mutex<U256>,
    transfers: Mutex<Vec<(Address, Address, U256)>>,
    calls: AtomicUsize,
    pub fail_reads: bool,
    pub fail_submission: bool,
    pub revert: bool,
    /// Never answer `send_token_transfer`.
    pub stall_submission: bool,
    /// Accept transfers but never produce a receipt.
    pub stall_receipt: bool,
}

impl MockChain {
    pub fn new(chain_id: u64, decimals: u8, balance: U256) -> Self {
        Self {
            chain_id,
            decimals,
            native: U256::from(5_000_000_000_000_000u64),
            balance: Mutex::new(balance),
            transfers: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail_reads: false,
            fail_submission: false,
            revert: false,
            stall_submission: false,
            stall_receipt: false,
        }
    }

    /// Number of RPC-equivalent calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Submitted transfers as `(token, to, amount)`.
    pub fn transfers(&self) -> Vec<(Address, Address, U256)> {
        self.transfers.lock().unwrap().clone()
    }

    pub fn balance(&self) -> U256 {
        *self.balance.lock().unwrap()
    }

    async fn enter(&self) -> Result<(), ChainClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Give concurrently running callers a chance to interleave.
        tokio::task::yield_now().await;
        if self.fail_reads {
            return Err(ChainClientError::RpcError("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ChainClient for MockChain {
    fn signer_address(&self) -> Address {
        MOCK_SIGNER
    }

    async fn chain_id(&self) -> Result<u64, ChainClientError> {
        self.enter().await?;
        Ok(self.chain_id)
    }

    async fn native_balance(&self, _owner: Address) -> Result<U256, ChainClientError> {
        self.enter().await?;
        Ok(self.native)
    }

    async fn token_balance(
        &self,
        _token: Address,
        _owner: Address,
    ) -> Result<U256, ChainClientError> {
        self.enter().await?;
        Ok(self.balance())
    }

    async fn token_decimals(&self, _token: Address) -> Result<u8, ChainClientError> {
        self.enter().await?;
        Ok(self.decimals)
    }

    async fn send_token_transfer(
        &self,
        token: Address,
        to: Address,
        amount: U256,
    ) -> Result<TxHash, ChainClientError> {
        self.enter().await?;
        if self.stall_submission {
            std::future::pending::<()>().await;
        }
        if self.fail_submission {
            return Err(ChainClientError::TransactionFailed {
                message: "Failed to send: insufficient funds for gas".to_string(),
                code: Some(-32000),
                reason: None,
            });
        }

        let mut balance = self.balance.lock().unwrap();
        if amount > *balance {
            return Err(ChainClientError::TransactionFailed {
                message: "Failed to send: execution reverted".to_string(),
                code: Some(3),
                reason: Some("ERC20: transfer amount exceeds balance".to_string()),
            });
        }
        if !self.revert {
            *balance -= amount;
        }

        let mut transfers = self.transfers.lock().unwrap();
        transfers.push((token, to, amount));
        Ok(keccak256(transfers.len().to_be_bytes()))
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TxReceipt, ChainClientError> {
        self.enter().await?;
        if self.stall_receipt {
            std::future::pending::<()>().await;
        }
        Ok(TxReceipt {
            tx_hash: format!("{tx_hash:?}"),
            block_number: 1_000 + self.transfers.lock().unwrap().len() as u64,
            success: !self.revert,
        })
    }
}
