// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    blockchain::{GasCost, Network, Receipt, SendOutcome, TokenBalance, TransactionRecord},
    state::AppState,
};

pub mod balance;
pub mod health;
pub mod transactions;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route(
            "/networks/{network}/wallets/{address}/balance",
            get(balance::get_wallet_balance),
        )
        .route(
            "/networks/{network}/wallets/{address}/validate",
            get(balance::validate_wallet_address),
        )
        .route(
            "/networks/{network}/wallets/{address}/link",
            get(balance::get_wallet_link),
        )
        .route(
            "/networks/{network}/transactions/{hash}",
            get(transactions::get_transaction),
        )
        .route(
            "/networks/{network}/transactions/{hash}/link",
            get(transactions::get_transaction_link),
        )
        .route("/transactions", post(transactions::send_transaction))
        .route("/transactions/gas-cost", post(transactions::get_gas_cost))
        .with_state(state);

    Router::new()
        .route("/health", get(health::liveness))
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::liveness,
        balance::get_wallet_balance,
        balance::validate_wallet_address,
        balance::get_wallet_link,
        transactions::get_transaction,
        transactions::get_transaction_link,
        transactions::send_transaction,
        transactions::get_gas_cost
    ),
    components(
        schemas(
            Network,
            TokenBalance,
            Receipt,
            TransactionRecord,
            SendOutcome,
            GasCost,
            health::HealthResponse,
            balance::ValidateAddressResponse,
            balance::LinkResponse,
            transactions::SendTransferRequest,
            transactions::GasCostQuery
        )
    ),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Wallets", description = "Balances, address validation and explorer links"),
        (name = "Transactions", description = "Transaction lookup, broadcast and fee estimates")
    )
)]
struct ApiDoc;

/// Router backed by an in-memory provider and the PEM signer.
#[cfg(test)]
pub(crate) fn test_router(provider: crate::blockchain::testing::MockProvider) -> Router {
    use std::sync::Arc;

    use crate::blockchain::{
        signing::PemSignerFactory, testing::MockProviderFactory, ElrondClient,
    };
    use crate::config::ClientConfig;

    let client = ElrondClient::new(
        ClientConfig::default(),
        Arc::new(MockProviderFactory::new(provider)),
        Arc::new(PemSignerFactory),
    );
    router(AppState::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{Request, StatusCode}};
    use tower::ServiceExt;

    use crate::blockchain::testing::MockProvider;

    #[tokio::test]
    async fn health_is_ok() {
        let response = test_router(MockProvider::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let response = router(AppState::default())
            .oneshot(Request::get("/api-doc/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
