// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet endpoints: balances, address validation and explorer links.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    blockchain::{BalanceOptions, TokenBalance},
    error::ApiError,
    state::AppState,
};

/// Query parameters for balance request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase")]
pub struct BalanceQuery {
    /// ESDT token identifier (e.g. `TOKEN-abc123`). Omit for EGLD.
    pub token_identifier: Option<String>,
    /// Token decimals, required with `tokenIdentifier`
    pub decimals: Option<u8>,
}

/// Address validation response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidateAddressResponse {
    pub address: String,
    pub valid: bool,
}

/// Explorer link response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LinkResponse {
    pub link: String,
}

/// Get the EGLD or ESDT balance of a wallet.
#[utoipa::path(
    get,
    path = "/v1/networks/{network}/wallets/{address}/balance",
    tag = "Wallets",
    params(
        ("network" = String, Path, description = "Network name (`main` or `testnet`)"),
        ("address" = String, Path, description = "Bech32 `erd1` address"),
        BalanceQuery
    ),
    responses(
        (status = 200, description = "Balance retrieved successfully", body = TokenBalance),
        (status = 400, description = "Invalid request"),
        (status = 503, description = "Blockchain network unavailable")
    )
)]
pub async fn get_wallet_balance(
    State(state): State<AppState>,
    Path((network, address)): Path<(String, String)>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<TokenBalance>, ApiError> {
    let options = BalanceOptions {
        token_identifier: query.token_identifier,
        decimals: query.decimals,
    };

    state
        .client
        .get_balance(&address, Some(&network), &options)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::service_unavailable("Failed to query balance"))
}

/// Check whether an address is a well-formed Elrond address.
#[utoipa::path(
    get,
    path = "/v1/networks/{network}/wallets/{address}/validate",
    tag = "Wallets",
    params(
        ("network" = String, Path, description = "Network name (`main` or `testnet`)"),
        ("address" = String, Path, description = "Address to validate")
    ),
    responses(
        (status = 200, description = "Validation result", body = ValidateAddressResponse)
    )
)]
pub async fn validate_wallet_address(
    State(state): State<AppState>,
    Path((network, address)): Path<(String, String)>,
) -> Json<ValidateAddressResponse> {
    let valid = state.client.is_valid_wallet_address(&address, Some(&network));
    Json(ValidateAddressResponse { address, valid })
}

/// Explorer link of a wallet.
#[utoipa::path(
    get,
    path = "/v1/networks/{network}/wallets/{address}/link",
    tag = "Wallets",
    params(
        ("network" = String, Path, description = "Network name (`main` or `testnet`)"),
        ("address" = String, Path, description = "Bech32 `erd1` address")
    ),
    responses(
        (status = 200, description = "Explorer link", body = LinkResponse)
    )
)]
pub async fn get_wallet_link(
    State(state): State<AppState>,
    Path((network, address)): Path<(String, String)>,
) -> Json<LinkResponse> {
    Json(LinkResponse {
        link: state.client.get_wallet_link(&address, Some(&network)),
    })
}
