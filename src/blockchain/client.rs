// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! EVM client for blockchain interactions.
//!
//! [`ChainClient`] is the narrow surface the sweeper needs from a chain:
//! a few reads, one transfer submission, and a receipt wait. Connection
//! handling, gas, nonce and signing all live behind it.

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::{Address, TxHash, U256},
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, PendingTransactionBuilder, Provider, ProviderBuilder, RootProvider,
    },
};
use async_trait::async_trait;
use url::Url;

use super::erc20::Erc20Contract;
use super::signing::SignerCredential;
use super::types::TxReceipt;

/// HTTP provider type with all fillers and a local wallet.
type HttpProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
>;

/// Chain operations consumed by the sweeper.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address of the signing key.
    fn signer_address(&self) -> Address;

    /// Chain ID reported by the connected node.
    async fn chain_id(&self) -> Result<u64, ChainClientError>;

    /// Native currency balance in wei.
    async fn native_balance(&self, owner: Address) -> Result<U256, ChainClientError>;

    /// ERC-20 balance in the token's smallest unit.
    async fn token_balance(&self, token: Address, owner: Address)
        -> Result<U256, ChainClientError>;

    /// ERC-20 `decimals()`.
    async fn token_decimals(&self, token: Address) -> Result<u8, ChainClientError>;

    /// Sign and broadcast an ERC-20 `transfer`, returning the transaction hash.
    async fn send_token_transfer(
        &self,
        token: Address,
        to: Address,
        amount: U256,
    ) -> Result<TxHash, ChainClientError>;

    /// Block until the transaction is mined and return its receipt.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TxReceipt, ChainClientError>;
}

/// [`ChainClient`] backed by an alloy HTTP provider.
pub struct AlloyChainClient {
    provider: HttpProvider,
    signer: Address,
}

impl AlloyChainClient {
    /// Build a signing client. No network I/O happens until the first call.
    pub fn new(rpc_url: &Url, credential: &SignerCredential) -> Self {
        let provider = ProviderBuilder::new()
            .wallet(credential.wallet())
            .connect_http(rpc_url.clone());

        Self {
            provider,
            signer: credential.address(),
        }
    }
}

#[async_trait]
impl ChainClient for AlloyChainClient {
    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn chain_id(&self) -> Result<u64, ChainClientError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| ChainClientError::RpcError(e.to_string()))
    }

    async fn native_balance(&self, owner: Address) -> Result<U256, ChainClientError> {
        self.provider
            .get_balance(owner)
            .await
            .map_err(|e| ChainClientError::RpcError(e.to_string()))
    }

    async fn token_balance(
        &self,
        token: Address,
        owner: Address,
    ) -> Result<U256, ChainClientError> {
        Erc20Contract::new(&self.provider, token).balance_of(owner).await
    }

    async fn token_decimals(&self, token: Address) -> Result<u8, ChainClientError> {
        Erc20Contract::new(&self.provider, token).decimals().await
    }

    async fn send_token_transfer(
        &self,
        token: Address,
        to: Address,
        amount: U256,
    ) -> Result<TxHash, ChainClientError> {
        Erc20Contract::new(&self.provider, token)
            .transfer(to, amount)
            .await
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TxReceipt, ChainClientError> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .get_receipt()
            .await
            .map_err(|e| ChainClientError::TransactionFailed {
                message: format!("Failed to confirm: {e}"),
                code: None,
                reason: None,
            })?;

        Ok(TxReceipt {
            tx_hash: format!("{:?}", receipt.transaction_hash),
            block_number: receipt.block_number.unwrap_or(0),
            success: receipt.status(),
        })
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, thiserror::Error)]
pub enum ChainClientError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Contract error: {0}")]
    ContractError(String),

    /// Submission or confirmation failed. `code` and `reason` come from the
    /// node's JSON-RPC error payload when one was returned.
    #[error("Transaction failed: {message}")]
    TransactionFailed {
        message: String,
        code: Option<i64>,
        reason: Option<String>,
    },
}

impl ChainClientError {
    /// Classify an error from a read-only contract call.
    pub fn from_contract(err: alloy::contract::Error) -> Self {
        match err {
            alloy::contract::Error::TransportError(e) => Self::RpcError(e.to_string()),
            other => Self::ContractError(other.to_string()),
        }
    }

    /// Classify an error from a transaction submission, keeping the node's
    /// error code and revert data.
    pub fn from_submission(err: alloy::contract::Error) -> Self {
        let payload = match &err {
            alloy::contract::Error::TransportError(e) => e.as_error_resp(),
            _ => None,
        };

        match payload {
            Some(payload) => Self::TransactionFailed {
                message: format!("Failed to send: {}", payload.message),
                code: Some(payload.code),
                reason: payload.data.as_ref().map(|data| revert_reason(data.get())),
            },
            None => Self::TransactionFailed {
                message: format!("Failed to send: {err}"),
                code: None,
                reason: None,
            },
        }
    }
}

/// JSON string payloads are unquoted; anything else is kept as raw JSON.
fn revert_reason(raw: &str) -> String {
    serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw.to_string())
}
