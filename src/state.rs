// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    auth::ApiSecret,
    blockchain::{AlloyChainClient, ChainClient},
    config::{ConfigError, SweepConfig},
    sweep::Sweeper,
};

/// Authentication settings.
#[derive(Clone, Debug, Default)]
pub struct AuthConfig {
    /// Expected `x-api-secret` value. `None` rejects every request.
    pub api_secret: Option<ApiSecret>,
}

impl AuthConfig {
    pub fn new(secret: Option<&str>) -> Self {
        Self {
            api_secret: secret.and_then(ApiSecret::new),
        }
    }

    pub fn from_env() -> Self {
        Self {
            api_secret: ApiSecret::from_env(),
        }
    }
}

/// Shared, read-only application state.
///
/// The sweep configuration is validated once at startup. If validation
/// failed the error is kept here and reported by every authenticated
/// request instead of taking the process down.
#[derive(Clone)]
pub struct AppState {
    pub auth_config: AuthConfig,
    sweeper: Arc<Result<Sweeper, ConfigError>>,
}

impl AppState {
    pub fn new(sweeper: Result<Sweeper, ConfigError>) -> Self {
        Self {
            auth_config: AuthConfig::default(),
            sweeper: Arc::new(sweeper),
        }
    }

    /// Build the production state: an alloy-backed client for a valid config.
    pub fn from_config(config: Result<SweepConfig, ConfigError>) -> Self {
        Self::new(config.map(|config| {
            let client: Arc<dyn ChainClient> =
                Arc::new(AlloyChainClient::new(&config.rpc_url, &config.credential));
            Sweeper::new(config, client)
        }))
    }

    /// Set the authentication configuration.
    pub fn with_auth_config(mut self, auth_config: AuthConfig) -> Self {
        self.auth_config = auth_config;
        self
    }

    /// The sweeper, or the configuration error that prevented building it.
    pub fn sweeper(&self) -> Result<&Sweeper, &ConfigError> {
        self.sweeper.as_ref().as_ref()
    }

    #[cfg(test)]
    pub fn unconfigured() -> Self {
        Self::new(Err(ConfigError::Missing(
            crate::config::WALLET_PRIVATE_KEY_ENV,
        )))
    }
}
