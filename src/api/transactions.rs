// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction endpoints: lookup, explorer links, broadcast and fee estimates.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::balance::LinkResponse;
use crate::{
    blockchain::{
        GasCost, GasCostRequest, Receipt, SendOutcome, SendTransactionRequest, TransactionLookup,
    },
    error::ApiError,
    state::AppState,
};

/// Query parameters for transaction lookup.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct TransactionQuery {
    /// Decimals used to scale the transferred amount (default 18)
    pub decimals: Option<u8>,
}

/// Request to sign and broadcast a transfer.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendTransferRequest {
    /// Recipient `erd1` address
    pub to: String,
    /// Amount in human-readable units (e.g. "0.5")
    pub amount: String,
    /// Network name (`main` or `testnet`)
    pub network: String,
    /// Contents of the sender's PEM wallet file
    pub key_store: String,
    pub password: String,
    /// ESDT token identifier. Omit for EGLD.
    #[serde(default)]
    pub token_identifier: Option<String>,
    /// Token decimals, required with `tokenIdentifier`
    #[serde(default)]
    pub decimals: Option<u8>,
}

/// Request to estimate the fee of a transfer.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GasCostQuery {
    #[serde(default)]
    pub network: Option<String>,
    pub amount: String,
    #[serde(default)]
    pub token_identifier: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
}

/// Fetch a transaction and return its normalized receipt.
#[utoipa::path(
    get,
    path = "/v1/networks/{network}/transactions/{hash}",
    tag = "Transactions",
    params(
        ("network" = String, Path, description = "Network name (`main` or `testnet`)"),
        ("hash" = String, Path, description = "Transaction hash"),
        TransactionQuery
    ),
    responses(
        (status = 200, description = "Transaction receipt", body = Receipt),
        (status = 404, description = "No transaction hash supplied"),
        (status = 503, description = "Transaction could not be retrieved")
    )
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    Path((network, hash)): Path<(String, String)>,
    Query(query): Query<TransactionQuery>,
) -> Result<Json<Receipt>, ApiError> {
    match state
        .client
        .get_transaction(&hash, Some(&network), query.decimals)
        .await
    {
        TransactionLookup::Found(receipt) => Ok(Json(*receipt)),
        TransactionLookup::MissingHash => Err(ApiError::not_found("Transaction hash is required")),
        TransactionLookup::Unavailable => Err(ApiError::service_unavailable(
            "Failed to retrieve transaction",
        )),
    }
}

/// Explorer link of a transaction.
#[utoipa::path(
    get,
    path = "/v1/networks/{network}/transactions/{hash}/link",
    tag = "Transactions",
    params(
        ("network" = String, Path, description = "Network name (`main` or `testnet`)"),
        ("hash" = String, Path, description = "Transaction hash")
    ),
    responses(
        (status = 200, description = "Explorer link", body = LinkResponse)
    )
)]
pub async fn get_transaction_link(
    State(state): State<AppState>,
    Path((network, hash)): Path<(String, String)>,
) -> Json<LinkResponse> {
    Json(LinkResponse {
        link: state.client.get_transaction_link(&hash, Some(&network)),
    })
}

/// Sign and broadcast an EGLD or ESDT transfer.
#[utoipa::path(
    post,
    path = "/v1/transactions",
    tag = "Transactions",
    request_body = SendTransferRequest,
    responses(
        (status = 200, description = "Transaction submitted", body = SendOutcome),
        (status = 400, description = "Invalid request or key store"),
        (status = 422, description = "Insufficient balance"),
        (status = 503, description = "Blockchain network unavailable")
    )
)]
pub async fn send_transaction(
    State(state): State<AppState>,
    Json(request): Json<SendTransferRequest>,
) -> Result<Json<SendOutcome>, ApiError> {
    let outcome = state
        .client
        .send_transaction(SendTransactionRequest {
            to: request.to,
            amount: request.amount,
            network: request.network,
            key_store: request.key_store.into_bytes(),
            password: request.password,
            token_identifier: request.token_identifier,
            decimals: request.decimals,
        })
        .await?;

    Ok(Json(outcome))
}

/// Estimate the gas limit and fee of a transfer.
#[utoipa::path(
    post,
    path = "/v1/transactions/gas-cost",
    tag = "Transactions",
    request_body = GasCostQuery,
    responses(
        (status = 200, description = "Gas estimate calculated", body = GasCost),
        (status = 400, description = "Invalid request"),
        (status = 503, description = "Blockchain network unavailable")
    )
)]
pub async fn get_gas_cost(
    State(state): State<AppState>,
    Json(request): Json<GasCostQuery>,
) -> Result<Json<GasCost>, ApiError> {
    let cost = state
        .client
        .get_gas_cost(GasCostRequest {
            network: request.network,
            amount: request.amount,
            token_identifier: request.token_identifier,
            decimals: request.decimals,
        })
        .await?;

    Ok(Json(cost))
}
