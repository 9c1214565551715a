// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ERC-20 token contract interactions.

use alloy::{
    network::Ethereum,
    primitives::{Address, TxHash, U256},
    providers::Provider,
    sol,
};

use super::client::ChainClientError;

// Only the parts of the ERC-20 interface the sweeper touches.
sol! {
    #[sol(rpc)]
    interface IERC20 {
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

/// ERC-20 contract wrapper.
pub struct Erc20Contract<P> {
    contract: IERC20::IERC20Instance<P>,
}

impl<P: Provider<Ethereum> + Clone> Erc20Contract<P> {
    /// Create a new ERC-20 contract instance.
    pub fn new(provider: &P, address: Address) -> Self {
        Self {
            contract: IERC20::new(address, provider.clone()),
        }
    }

    /// Get the token decimals.
    pub async fn decimals(&self) -> Result<u8, ChainClientError> {
        self.contract
            .decimals()
            .call()
            .await
            .map_err(ChainClientError::from_contract)
    }

    /// Get the raw balance of an address.
    pub async fn balance_of(&self, owner: Address) -> Result<U256, ChainClientError> {
        self.contract
            .balanceOf(owner)
            .call()
            .await
            .map_err(ChainClientError::from_contract)
    }

    /// Sign and broadcast `transfer(to, amount)`, returning the transaction hash.
    ///
    /// The provider must carry a wallet filler; gas, nonce and chain ID are
    /// filled in by the provider.
    pub async fn transfer(&self, to: Address, amount: U256) -> Result<TxHash, ChainClientError> {
        let pending = self
            .contract
            .transfer(to, amount)
            .send()
            .await
            .map_err(ChainClientError::from_submission)?;

        Ok(*pending.tx_hash())
    }
}
