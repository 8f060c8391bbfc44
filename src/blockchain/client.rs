// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Elrond client facade.
//!
//! [`ElrondClient`] resolves the network, connects a fresh provider for every
//! call and runs the encoder, decoder and receipt assembler in sequence. It
//! holds no mutable state and can be shared freely between tasks.

use std::{future::Future, sync::Arc};

use alloy::primitives::U256;
use serde::Serialize;
use tracing::instrument::WithSubscriber;
use tracing::Dispatch;
use utoipa::ToSchema;

use super::address::Address;
use super::amount::{format_amount, to_decimal};
use super::decoder::decode_transfer;
use super::esdt::{build_transfer, require_positive_amount, TransferIntent};
use super::provider::{ChainProvider, ProviderError, ProviderFactory};
use super::proxy::ProxyProviderFactory;
use super::receipt::{build_receipt, build_submission_receipt, gas_cost_in_egld, Receipt};
use super::signing::{PemSignerFactory, SignerFactory};
use super::transactions::{Transaction, TRANSACTION_VERSION};
use super::types::{
    Network, NetworkProfile, TokenBalance, TransactionRecord, EGLD_DECIMALS, EGLD_SYMBOL,
};
use crate::config::ClientConfig;

/// Errors that can occur during client operations.
#[derive(Debug, thiserror::Error)]
pub enum ElrondClientError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("decimals is required when a token identifier is supplied")]
    MissingDecimals,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Invalid key store: {0}")]
    InvalidKeyStore(String),

    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance { available: String, requested: String },

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Token selection for balance queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceOptions {
    pub token_identifier: Option<String>,
    pub decimals: Option<u8>,
}

/// Outcome of a sentinel-style transaction lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionLookup {
    Found(Box<Receipt>),
    /// No hash was supplied; nothing was queried
    MissingHash,
    /// The lookup failed; details were logged
    Unavailable,
}

/// Parameters of [`ElrondClient::send_transaction`].
#[derive(Debug, Clone, Default)]
pub struct SendTransactionRequest {
    pub to: String,
    /// Human-readable amount (e.g. "0.5")
    pub amount: String,
    pub network: String,
    /// Key store file contents
    pub key_store: Vec<u8>,
    pub password: String,
    pub token_identifier: Option<String>,
    pub decimals: Option<u8>,
}

/// Result of a successful broadcast.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendOutcome {
    pub transaction_data: TransactionRecord,
    pub receipt: Receipt,
}

/// Parameters of [`ElrondClient::get_gas_cost`].
#[derive(Debug, Clone, Default)]
pub struct GasCostRequest {
    pub network: Option<String>,
    pub amount: String,
    pub token_identifier: Option<String>,
    pub decimals: Option<u8>,
}

/// Estimated fee of a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GasCost {
    pub gas_limit: u64,
    pub gas_cost_in_crypto: String,
    pub gas_cost_crypto_currency: String,
}

/// Network-agnostic Elrond client.
pub struct ElrondClient {
    config: ClientConfig,
    providers: Arc<dyn ProviderFactory>,
    signers: Arc<dyn SignerFactory>,
    log_dispatch: Option<Dispatch>,
}

impl ElrondClient {
    pub fn new(
        config: ClientConfig,
        providers: Arc<dyn ProviderFactory>,
        signers: Arc<dyn SignerFactory>,
    ) -> Self {
        Self {
            config,
            providers,
            signers,
            log_dispatch: None,
        }
    }

    /// Client talking to the configured gateways and accepting PEM wallets.
    pub fn from_config(config: ClientConfig) -> Self {
        Self::new(
            config,
            Arc::new(ProxyProviderFactory),
            Arc::new(PemSignerFactory),
        )
    }

    /// Route this client's log events to `dispatch` instead of the global
    /// subscriber.
    pub fn with_log_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.log_dispatch = Some(dispatch);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn logged<F: Future>(&self, operation: F) -> F::Output {
        match &self.log_dispatch {
            Some(dispatch) => operation.with_subscriber(dispatch.clone()).await,
            None => operation.await,
        }
    }

    /// Resolve a network name, logging any fallback through the injected dispatch.
    fn profile(&self, network: Option<&str>) -> &NetworkProfile {
        match &self.log_dispatch {
            Some(dispatch) => {
                tracing::dispatcher::with_default(dispatch, || self.config.networks.resolve(network))
            }
            None => self.config.networks.resolve(network),
        }
    }

    fn connect(&self, profile: &NetworkProfile) -> Result<Box<dyn ChainProvider>, ProviderError> {
        self.providers.connect(profile, self.config.request_timeout)
    }

    /// Explorer link of a transaction.
    pub fn get_transaction_link(&self, hash: &str, network: Option<&str>) -> String {
        self.profile(network).transaction_link(hash)
    }

    /// Explorer link of a wallet.
    pub fn get_wallet_link(&self, address: &str, network: Option<&str>) -> String {
        self.profile(network).wallet_link(address)
    }

    /// Whether `address` is a well-formed `erd1` address.
    pub fn is_valid_wallet_address(&self, address: &str, _network: Option<&str>) -> bool {
        address.parse::<Address>().is_ok()
    }

    /// Balance of `address` in EGLD, or in the requested ESDT token.
    pub async fn try_get_balance(
        &self,
        address: &str,
        network: Option<&str>,
        options: &BalanceOptions,
    ) -> Result<TokenBalance, ElrondClientError> {
        let token = validate_token_selection(options)?;
        let address: Address = address.parse()?;
        let profile = self.profile(network);

        self.logged(async {
            let provider = self.connect(profile)?;
            fetch_balance(provider.as_ref(), &address, token).await
        })
        .await
    }

    /// Balance lookup that reports read failures as `Ok(None)`.
    ///
    /// Invalid options are still returned as errors since they fail before
    /// any network call. Provider and address failures are logged.
    pub async fn get_balance(
        &self,
        address: &str,
        network: Option<&str>,
        options: &BalanceOptions,
    ) -> Result<Option<TokenBalance>, ElrondClientError> {
        validate_token_selection(options)?;

        match self.try_get_balance(address, network, options).await {
            Ok(balance) => Ok(Some(balance)),
            Err(e) => {
                self.logged(async {
                    tracing::error!(
                        blockchain = "elrond",
                        network = network_label(network),
                        address,
                        error = %e,
                        "Balance query failed"
                    );
                })
                .await;
                Ok(None)
            }
        }
    }

    /// Fetch a transaction and normalize it into a [`Receipt`].
    pub async fn try_get_transaction(
        &self,
        hash: &str,
        network: Option<&str>,
        decimals: Option<u8>,
    ) -> Result<Receipt, ElrondClientError> {
        let hash = hash.trim();
        if hash.is_empty() {
            return Err(ElrondClientError::Validation("hash is required".to_string()));
        }
        let decimals = decimals.unwrap_or(EGLD_DECIMALS);
        let profile = self.profile(network);

        self.logged(async {
            let provider = self.connect(profile)?;
            let record = provider.get_transaction(hash).await?;
            let decoded = decode_transfer(&record, decimals)?;
            tracing::debug!(
                blockchain = "elrond",
                network = profile.name(),
                tx_hash = hash,
                token = %decoded.token_identifier,
                "Fetched transaction"
            );
            Ok::<_, ElrondClientError>(build_receipt(&record, profile, &decoded))
        })
        .await
    }

    /// Transaction lookup that reports failures as sentinels.
    pub async fn get_transaction(
        &self,
        hash: &str,
        network: Option<&str>,
        decimals: Option<u8>,
    ) -> TransactionLookup {
        if hash.trim().is_empty() {
            return TransactionLookup::MissingHash;
        }

        match self.try_get_transaction(hash, network, decimals).await {
            Ok(receipt) => TransactionLookup::Found(Box::new(receipt)),
            Err(e) => {
                self.logged(async {
                    tracing::error!(
                        blockchain = "elrond",
                        network = network_label(network),
                        tx_hash = hash,
                        error = %e,
                        "Transaction lookup failed"
                    );
                })
                .await;
                TransactionLookup::Unavailable
            }
        }
    }

    /// Build, sign and broadcast a transfer.
    ///
    /// The balance check is a pre-flight estimate: it is not atomic with the
    /// broadcast and does not account for fees.
    pub async fn send_transaction(
        &self,
        request: SendTransactionRequest,
    ) -> Result<SendOutcome, ElrondClientError> {
        let intent = validate_send_request(&request)?;
        let receiver: Address = request.to.parse()?;
        let profile = self.profile(Some(&request.network));
        let decimals = if intent.identifier.is_some() {
            intent.decimals.unwrap_or(EGLD_DECIMALS)
        } else {
            EGLD_DECIMALS
        };
        let requested = require_positive_amount(&intent.amount, decimals)?;

        let result = self
            .logged(async {
                let provider = self.connect(profile)?;
                let network_config = provider.get_network_config().await?;

                let signer = self
                    .signers
                    .from_key_store(&request.key_store, &request.password)?;
                let sender = provider.get_account(signer.address()).await?;

                let available =
                    fetch_balance(provider.as_ref(), signer.address(), token_of(&intent)).await?;
                let available_raw = U256::from_str_radix(&available.balance_raw, 10)
                    .map_err(|e| ElrondClientError::InvalidAmount(e.to_string()))?;
                if available_raw < requested {
                    return Err(ElrondClientError::InsufficientBalance {
                        available: available.balance_formatted,
                        requested: format_amount(requested, decimals),
                    });
                }

                let prepared = build_transfer(&intent, &self.config.gas)?;

                let mut transaction = Transaction {
                    nonce: sender.nonce,
                    value: prepared.native_value.unwrap_or(U256::ZERO),
                    receiver,
                    sender: *signer.address(),
                    gas_price: network_config.min_gas_price,
                    gas_limit: prepared.gas_limit,
                    data: prepared.payload,
                    chain_id: network_config.chain_id,
                    version: TRANSACTION_VERSION,
                    signature: None,
                };
                signer.sign(&mut transaction)?;

                let hash = provider.send_transaction(&transaction).await?;
                tracing::info!(
                    blockchain = "elrond",
                    network = profile.name(),
                    tx_hash = %hash,
                    nonce = transaction.nonce,
                    gas_limit = transaction.gas_limit,
                    "Transaction broadcast"
                );

                let record = transaction.to_record(&hash);
                let decoded = decode_transfer(&record, decimals)?;
                let receipt = build_submission_receipt(&record, profile, &decoded);

                Ok::<_, ElrondClientError>(SendOutcome {
                    transaction_data: record,
                    receipt,
                })
            })
            .await;

        if let Err(e) = &result {
            self.logged(async {
                tracing::error!(
                    blockchain = "elrond",
                    network = profile.name(),
                    to = %request.to,
                    error = %e,
                    "Send transaction failed"
                );
            })
            .await;
        }

        result
    }

    /// Gas limit and fee of a transfer priced at the network's minimum gas price.
    pub async fn get_gas_cost(&self, request: GasCostRequest) -> Result<GasCost, ElrondClientError> {
        let intent = TransferIntent {
            identifier: request.token_identifier.clone(),
            amount: request.amount.clone(),
            decimals: request.decimals,
        };
        let prepared = build_transfer(&intent, &self.config.gas)?;
        let profile = self.profile(request.network.as_deref());

        self.logged(async {
            let provider = self.connect(profile)?;
            let network_config = provider.get_network_config().await?;

            Ok::<_, ElrondClientError>(GasCost {
                gas_limit: prepared.gas_limit,
                gas_cost_in_crypto: gas_cost_in_egld(network_config.min_gas_price, prepared.gas_limit),
                gas_cost_crypto_currency: EGLD_SYMBOL.to_string(),
            })
        })
        .await
    }
}

/// Network name used in log fields, without the fallback warning.
fn network_label(raw: Option<&str>) -> &'static str {
    raw.and_then(|name| name.parse::<Network>().ok())
        .unwrap_or(Network::Testnet)
        .as_str()
}

/// Token to query: `Some((identifier, decimals))` or `None` for EGLD.
type TokenSelection<'a> = Option<(&'a str, u8)>;

fn validate_token_selection(options: &BalanceOptions) -> Result<TokenSelection<'_>, ElrondClientError> {
    match options
        .token_identifier
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    {
        Some(identifier) => {
            let decimals = options.decimals.ok_or(ElrondClientError::MissingDecimals)?;
            Ok(Some((identifier, decimals)))
        }
        None => Ok(None),
    }
}

fn token_of(intent: &TransferIntent) -> TokenSelection<'_> {
    intent
        .identifier
        .as_deref()
        .zip(intent.decimals)
}

async fn fetch_balance(
    provider: &dyn ChainProvider,
    address: &Address,
    token: TokenSelection<'_>,
) -> Result<TokenBalance, ElrondClientError> {
    match token {
        Some((identifier, decimals)) => {
            let balance = provider.get_fungible_token_balance(address, identifier).await?;
            Ok(TokenBalance {
                symbol: balance.identifier.clone(),
                balance_raw: balance.balance.to_string(),
                balance_formatted: to_decimal(&balance.balance.to_string(), decimals)?,
                decimals,
                identifier: Some(balance.identifier),
            })
        }
        None => {
            let account = provider.get_account(address).await?;
            Ok(TokenBalance {
                symbol: EGLD_SYMBOL.to_string(),
                balance_raw: account.balance.to_string(),
                balance_formatted: format_amount(account.balance, EGLD_DECIMALS),
                decimals: EGLD_DECIMALS,
                identifier: None,
            })
        }
    }
}

fn validate_send_request(request: &SendTransactionRequest) -> Result<TransferIntent, ElrondClientError> {
    let required = [
        ("to", request.to.trim().is_empty()),
        ("amount", request.amount.trim().is_empty()),
        ("network", request.network.trim().is_empty()),
        ("keyStore", request.key_store.is_empty()),
        ("password", request.password.is_empty()),
    ];
    if let Some((field, _)) = required.iter().find(|(_, missing)| *missing) {
        return Err(ElrondClientError::Validation(format!("{} is required", field)));
    }

    let identifier = request
        .token_identifier
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    if identifier.is_some() && request.decimals.is_none() {
        return Err(ElrondClientError::MissingDecimals);
    }

    Ok(TransferIntent {
        identifier,
        amount: request.amount.trim().to_string(),
        decimals: request.decimals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    use crate::blockchain::signing::tests::test_pem;
    use crate::blockchain::signing::{Ed25519Signer, Signer};
    use crate::blockchain::testing::{MockProvider, MockProviderFactory};
    use crate::blockchain::types::TransactionStatus;

    const SEED: [u8; 32] = [5u8; 32];
    const BOB: Address = Address::from_bytes([2u8; 32]);

    fn sender() -> Address {
        *Ed25519Signer::from_seed(SEED).address()
    }

    fn client(provider: MockProvider) -> (ElrondClient, MockProviderFactory) {
        let factory = MockProviderFactory::new(provider);
        let client = ElrondClient::new(
            ClientConfig::default(),
            Arc::new(factory.clone()),
            Arc::new(PemSignerFactory),
        );
        (client, factory)
    }

    fn send_request(amount: &str) -> SendTransactionRequest {
        SendTransactionRequest {
            to: BOB.to_bech32(),
            amount: amount.to_string(),
            network: "testnet".to_string(),
            key_store: test_pem(SEED).into_bytes(),
            password: "secret".to_string(),
            token_identifier: None,
            decimals: None,
        }
    }

    #[test]
    fn test_links_and_address_validation() {
        let (client, _) = client(MockProvider::default());
        assert_eq!(
            client.get_transaction_link("abc", Some("main")),
            "https://explorer.elrond.com/transactions/abc"
        );
        assert_eq!(
            client.get_wallet_link("erd1x", Some("typo")),
            "https://testnet-explorer.elrond.com/address/erd1x"
        );
        assert!(client.is_valid_wallet_address(&BOB.to_bech32(), Some("main")));
        assert!(!client.is_valid_wallet_address("0x1234", Some("main")));
    }

    #[tokio::test]
    async fn test_native_balance() {
        let provider = MockProvider::default().with_account(BOB, U256::from(2_500_000_000_000_000_000u64), 1);
        let (client, _) = client(provider);

        let balance = client
            .get_balance(&BOB.to_bech32(), Some("main"), &BalanceOptions::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(balance.symbol, "EGLD");
        assert_eq!(balance.balance_formatted, "2.5");
    }

    #[tokio::test]
    async fn test_token_balance_requires_decimals() {
        let (client, factory) = client(MockProvider::default());
        let options = BalanceOptions {
            token_identifier: Some("TOKEN-abc123".to_string()),
            decimals: None,
        };
        let err = client
            .get_balance(&BOB.to_bech32(), None, &options)
            .await
            .unwrap_err();
        assert!(matches!(err, ElrondClientError::MissingDecimals));
        assert_eq!(factory.connections(), 0);
    }

    #[tokio::test]
    async fn test_token_balance() {
        let provider = MockProvider::default().with_token(BOB, "TOKEN-abc123", U256::from(1_234_500u64));
        let (client, _) = client(provider);
        let options = BalanceOptions {
            token_identifier: Some("TOKEN-abc123".to_string()),
            decimals: Some(6),
        };

        let balance = client
            .try_get_balance(&BOB.to_bech32(), None, &options)
            .await
            .unwrap();
        assert_eq!(balance.balance_formatted, "1.2345");
        assert_eq!(balance.identifier.as_deref(), Some("TOKEN-abc123"));
    }

    #[tokio::test]
    async fn test_balance_failure_is_sentinel() {
        let (client, _) = client(MockProvider::default());
        let result = client
            .get_balance(&BOB.to_bech32(), None, &BalanceOptions::default())
            .await
            .unwrap();
        assert!(result.is_none());

        let result = client
            .get_balance("not-an-address", None, &BalanceOptions::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_transaction_found() {
        let record = TransactionRecord {
            hash: "abcd".to_string(),
            nonce: 9,
            value: U256::ZERO,
            sender: BOB,
            receiver: sender(),
            gas_price: 1_000_000_000,
            gas_limit: 500_000,
            data: b"ESDTTransfer@544f4b454e2d616263313233@4c4b40".to_vec(),
            chain_id: "D".to_string(),
            version: 1,
            signature: None,
            status: Some(TransactionStatus::new("success")),
        };
        let (client, _) = client(MockProvider::default().with_transaction(record));

        match client.get_transaction("abcd", Some("main"), Some(6)).await {
            TransactionLookup::Found(receipt) => {
                assert_eq!(receipt.amount, "5");
                assert_eq!(receipt.token_identifier.as_deref(), Some("TOKEN-abc123"));
                assert_eq!(receipt.is_successful, Some(true));
                assert_eq!(receipt.network, "main");
                assert_eq!(receipt.gas_cost_in_crypto, "0.0005");
            }
            other => panic!("unexpected lookup result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_transaction_sentinels() {
        let (client, factory) = client(MockProvider::default());
        assert_eq!(
            client.get_transaction("", None, None).await,
            TransactionLookup::MissingHash
        );
        assert_eq!(factory.connections(), 0);

        assert_eq!(
            client.get_transaction("unknown", None, None).await,
            TransactionLookup::Unavailable
        );
        assert!(matches!(
            client.try_get_transaction("unknown", None, None).await,
            Err(ElrondClientError::Provider(_))
        ));
    }

    #[tokio::test]
    async fn test_insufficient_balance_does_not_broadcast() {
        // 0.0001 EGLD available, 0.001 requested
        let provider = MockProvider::default().with_account(sender(), U256::from(100_000_000_000_000u64), 3);
        let (client, factory) = client(provider);

        let err = client.send_transaction(send_request("0.001")).await.unwrap_err();
        assert!(matches!(err, ElrondClientError::InsufficientBalance { .. }));
        assert!(factory.provider().sent().is_empty());
    }

    #[tokio::test]
    async fn test_send_native_transaction() {
        let provider = MockProvider::default().with_account(sender(), U256::from(10u64).pow(U256::from(18u64)), 3);
        let (client, factory) = client(provider);

        let outcome = client.send_transaction(send_request("0.25")).await.unwrap();

        let sent = factory.provider().sent();
        assert_eq!(sent.len(), 1);
        let tx = &sent[0];
        assert_eq!(tx.nonce, 3);
        assert_eq!(tx.sender, sender());
        assert_eq!(tx.receiver, BOB);
        assert_eq!(tx.gas_limit, 70_000);
        assert_eq!(tx.value, U256::from(250_000_000_000_000_000u64));
        assert!(tx.signature.is_some());

        let receipt = &outcome.receipt;
        assert_eq!(receipt.transaction_hash, outcome.transaction_data.hash);
        assert_eq!(receipt.amount, "0.25");
        assert_eq!(receipt.from, sender().to_bech32());
        assert!(receipt.is_pending.is_none());
        assert!(receipt.token_identifier.is_none());
    }

    #[tokio::test]
    async fn test_send_token_transaction() {
        let provider = MockProvider::default()
            .with_account(sender(), U256::ZERO, 0)
            .with_token(sender(), "TOKEN-abc123", U256::from(10_000_000u64));
        let (client, factory) = client(provider);

        let mut request = send_request("5");
        request.token_identifier = Some("TOKEN-abc123".to_string());
        request.decimals = Some(6);

        let outcome = client.send_transaction(request).await.unwrap();
        let sent = factory.provider().sent();
        let tx = &sent[0];
        assert_eq!(tx.value, U256::ZERO);
        assert_eq!(
            tx.gas_limit,
            50_000 + 1_500 * tx.data.len() as u64 + 300_000
        );
        assert_eq!(outcome.receipt.amount, "5");
    }

    #[tokio::test]
    async fn test_send_validation_happens_before_network() {
        let (client, factory) = client(MockProvider::default());

        let mut request = send_request("1");
        request.password.clear();
        assert!(matches!(
            client.send_transaction(request).await,
            Err(ElrondClientError::Validation(_))
        ));

        let mut request = send_request("1");
        request.token_identifier = Some("TOKEN-abc123".to_string());
        assert!(matches!(
            client.send_transaction(request).await,
            Err(ElrondClientError::MissingDecimals)
        ));

        assert_eq!(factory.connections(), 0);
    }

    #[tokio::test]
    async fn test_send_rejects_bad_amounts_before_network() {
        let (client, factory) = client(MockProvider::default());

        for amount in ["0", "0.000"] {
            assert!(matches!(
                client.send_transaction(send_request(amount)).await,
                Err(ElrondClientError::Validation(_))
            ));
        }
        for amount in ["abc", "0.0000000000000000001", "-1"] {
            assert!(matches!(
                client.send_transaction(send_request(amount)).await,
                Err(ElrondClientError::InvalidAmount(_))
            ));
        }

        assert_eq!(factory.connections(), 0);
    }

    #[tokio::test]
    async fn test_send_with_bad_key_store() {
        let provider = MockProvider::default().with_account(sender(), U256::from(1u64), 0);
        let (client, factory) = client(provider);

        let mut request = send_request("1");
        request.key_store = b"{}".to_vec();
        assert!(matches!(
            client.send_transaction(request).await,
            Err(ElrondClientError::InvalidKeyStore(_))
        ));
        assert!(factory.provider().sent().is_empty());
    }

    #[tokio::test]
    async fn test_gas_cost() {
        let (client, _) = client(MockProvider::default());

        let native = client
            .get_gas_cost(GasCostRequest {
                network: Some("main".to_string()),
                amount: "1".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(native.gas_limit, 70_000);
        assert_eq!(native.gas_cost_in_crypto, "0.00007");
        assert_eq!(native.gas_cost_crypto_currency, "EGLD");

        let err = client
            .get_gas_cost(GasCostRequest {
                amount: "1".to_string(),
                token_identifier: Some("TOKEN-abc123".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ElrondClientError::MissingDecimals));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn output(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capturing_client() -> (ElrondClient, CapturedLogs) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let (client, _) = client(MockProvider::default());
        (client.with_log_dispatch(Dispatch::new(subscriber)), logs)
    }

    #[tokio::test]
    async fn test_injected_log_dispatch_receives_read_failures() {
        let (client, logs) = capturing_client();

        assert_eq!(
            client.get_transaction("deadbeef", Some("main"), None).await,
            TransactionLookup::Unavailable
        );

        let output = logs.output();
        assert!(output.contains("Transaction lookup failed"));
        assert!(output.contains("deadbeef"));
    }

    #[test]
    fn test_injected_log_dispatch_receives_network_fallback() {
        let (client, logs) = capturing_client();

        assert_eq!(
            client.get_transaction_link("abc", Some("mainnet")),
            "https://testnet-explorer.elrond.com/transactions/abc"
        );
        assert!(logs.output().contains("falling back to testnet"));
    }

    #[tokio::test]
    async fn test_network_fallback_is_logged_for_async_operations() {
        let (client, logs) = capturing_client();

        let cost = client
            .get_gas_cost(GasCostRequest {
                network: Some("mian".to_string()),
                amount: "1".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(cost.gas_limit, 70_000);

        let output = logs.output();
        assert!(output.contains("falling back to testnet"));
        assert!(output.contains("mian"));
    }
}
