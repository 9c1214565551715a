// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sweep trigger and status endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::{
    auth::ApiKey,
    blockchain::format_units,
    config::THRESHOLD_WHOLE_TOKENS,
    error::{ApiError, ErrorBody},
    state::AppState,
    sweep::{StatusReport, SweepOutcome},
};

/// Message returned when the wallet holds less than the threshold.
pub const BELOW_THRESHOLD_MESSAGE: &str = "Balance below threshold";

/// Native balances are always 18 decimals on EVM chains.
const NATIVE_DECIMALS: u8 = 18;

/// Status report for the configured wallet.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Always `"ok"`
    pub status: String,
    /// Network name
    pub network: String,
    /// Chain ID reported by the RPC endpoint
    pub chain_id: u64,
    /// Address whose balance is swept
    pub wallet_address: String,
    /// Token balance, formatted
    pub usdc_balance: String,
    /// Native balance, formatted
    pub eth_balance: String,
    /// Threshold in whole tokens
    pub threshold: String,
    pub destination_wallet: String,
    pub usdc_contract_address: String,
}

/// Status failure body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusErrorResponse {
    /// Always `"error"`
    pub status: String,
    pub error: String,
}

/// Sweep trigger response. Both variants are returned with status 200.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum SweepResponse {
    Swept(SweptResponse),
    BelowThreshold(BelowThresholdResponse),
}

/// The whole balance was transferred.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SweptResponse {
    /// Always `true`
    pub success: bool,
    pub message: String,
    /// Amount transferred, formatted
    pub amount: String,
    pub transaction_hash: String,
    pub block_number: u64,
    pub from: String,
    pub to: String,
    /// Block explorer link for the transaction
    pub explorer_url: String,
}

/// Balance was under the threshold; nothing was sent.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BelowThresholdResponse {
    /// Always `false`
    pub success: bool,
    pub message: String,
    /// Current balance, formatted
    pub balance: String,
    /// Threshold in whole tokens
    pub threshold: String,
    pub wallet_address: String,
}

impl StatusResponse {
    fn from_report(report: StatusReport) -> Self {
        Self {
            status: "ok".to_string(),
            network: report.network.name.to_string(),
            chain_id: report.chain_id,
            wallet_address: report.wallet.to_checksum(None),
            usdc_balance: report.token_balance.formatted(),
            eth_balance: format_units(report.native_balance, NATIVE_DECIMALS),
            threshold: THRESHOLD_WHOLE_TOKENS.to_string(),
            destination_wallet: report.destination.to_checksum(None),
            usdc_contract_address: report.token_address.to_checksum(None),
        }
    }
}

fn status_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(StatusErrorResponse {
            status: "error".to_string(),
            error: message,
        }),
    )
        .into_response()
}

/// Report the wallet's balances and the active configuration.
///
/// Never moves funds.
#[utoipa::path(
    get,
    path = "/sweep",
    tag = "Sweep",
    security(("api_secret" = [])),
    responses(
        (status = 200, description = "Current balances and configuration", body = StatusResponse),
        (status = 401, description = "Missing or invalid x-api-secret"),
        (status = 500, description = "Configuration or RPC failure", body = StatusErrorResponse)
    )
)]
pub async fn sweep_status(_: ApiKey, State(state): State<AppState>) -> Response {
    let sweeper = match state.sweeper() {
        Ok(sweeper) => sweeper,
        Err(e) => return status_error(e.to_string()),
    };

    match sweeper.status().await {
        Ok(report) => Json(StatusResponse::from_report(report)).into_response(),
        Err(e) => {
            error!(error = %e, "Status check failed");
            status_error(e.to_string())
        }
    }
}

/// Sweep the whole token balance to the destination if it meets the threshold.
///
/// Blocks until the transfer is confirmed.
#[utoipa::path(
    post,
    path = "/sweep",
    tag = "Sweep",
    security(("api_secret" = [])),
    responses(
        (status = 200, description = "Swept, or balance below threshold", body = SweepResponse),
        (status = 401, description = "Missing or invalid x-api-secret"),
        (status = 500, description = "Configuration, RPC or transaction failure", body = ErrorBody)
    )
)]
pub async fn trigger_sweep(
    _: ApiKey,
    State(state): State<AppState>,
) -> Result<Json<SweepResponse>, ApiError> {
    let sweeper = state.sweeper().map_err(ApiError::from)?;

    let outcome = sweeper.execute().await.map_err(|e| {
        error!(error = %e, "Sweep failed");
        ApiError::from(e)
    })?;

    let response = match outcome {
        SweepOutcome::BelowThreshold { balance, wallet } => {
            SweepResponse::BelowThreshold(BelowThresholdResponse {
                success: false,
                message: BELOW_THRESHOLD_MESSAGE.to_string(),
                balance: balance.formatted(),
                threshold: THRESHOLD_WHOLE_TOKENS.to_string(),
                wallet_address: wallet.to_checksum(None),
            })
        }
        SweepOutcome::Swept(result) => {
            let network = sweeper.config().network;
            let amount = result.amount.formatted();
            let to = result.to.to_checksum(None);
            SweepResponse::Swept(SweptResponse {
                success: true,
                message: format!("Swept {amount} {} to {to}", network.token_symbol),
                amount,
                explorer_url: network.tx_url(&result.tx_hash),
                transaction_hash: result.tx_hash,
                block_number: result.block_number,
                from: result.from.to_checksum(None),
                to,
            })
        }
    };

    Ok(Json(response))
}
