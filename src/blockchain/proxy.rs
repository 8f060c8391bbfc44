// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Elrond gateway (proxy) provider over HTTP.
//!
//! Every gateway response is wrapped in `{ "data": ..., "error": "", "code": "successful" }`.

use std::time::Duration;

use alloy::primitives::U256;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};

use super::address::Address;
use super::provider::{ChainProvider, ProviderError, ProviderFactory};
use super::transactions::Transaction;
use super::types::{
    base64_bytes, u256_string, AccountOnNetwork, FungibleTokenBalance, NetworkConfig,
    NetworkProfile, TransactionRecord, TransactionStatus,
};

const SUCCESS_CODE: &str = "successful";

#[derive(Debug, Deserialize)]
struct GatewayResponse<T> {
    data: Option<T>,
    #[serde(default)]
    error: String,
    #[serde(default)]
    code: String,
}

#[derive(Debug, Deserialize)]
struct AccountData {
    account: GatewayAccount,
}

#[derive(Debug, Deserialize)]
struct GatewayAccount {
    address: Address,
    #[serde(with = "u256_string")]
    balance: U256,
    nonce: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenData {
    token_data: GatewayTokenData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GatewayTokenData {
    #[serde(default)]
    token_identifier: String,
    #[serde(with = "u256_string")]
    balance: U256,
}

#[derive(Debug, Deserialize)]
struct TransactionData {
    transaction: GatewayTransaction,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GatewayTransaction {
    #[serde(default)]
    hash: Option<String>,
    nonce: u64,
    #[serde(with = "u256_string")]
    value: U256,
    receiver: Address,
    sender: Address,
    gas_price: u64,
    gas_limit: u64,
    #[serde(default, with = "base64_bytes")]
    data: Vec<u8>,
    #[serde(default)]
    signature: Option<String>,
    #[serde(default, rename = "chainID")]
    chain_id: Option<String>,
    #[serde(default)]
    version: Option<u32>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendData {
    tx_hash: String,
}

#[derive(Debug, Deserialize)]
struct NetworkConfigData {
    config: GatewayNetworkConfig,
}

#[derive(Debug, Deserialize)]
struct GatewayNetworkConfig {
    erd_chain_id: String,
    erd_min_gas_price: u64,
    #[serde(default)]
    erd_min_gas_limit: u64,
    #[serde(default)]
    erd_gas_per_data_byte: u64,
}

/// HTTP client for an Elrond gateway.
pub struct ProxyProvider {
    base_url: url::Url,
    http: reqwest::Client,
    timeout: Duration,
}

impl ProxyProvider {
    /// Create a new provider for the gateway at `endpoint_url`.
    pub fn new(endpoint_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let normalized = format!("{}/", endpoint_url.trim_end_matches('/'));
        let base_url: url::Url = normalized
            .parse()
            .map_err(|e: url::ParseError| ProviderError::InvalidEndpoint(e.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            base_url,
            http,
            timeout,
        })
    }

    /// Gateway URL for `segments`, each percent-encoded as a single path segment.
    fn url(&self, segments: &[&str]) -> Result<url::Url, ProviderError> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(ProviderError::InvalidEndpoint(format!(
                "Invalid path segment `{}`",
                bad
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: url::Url) -> Result<T, ProviderError> {
        self.execute(self.http.get(url)).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ProviderError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        let envelope: GatewayResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ProviderError::Node {
                    code: status.as_u16().to_string(),
                    message: body,
                })
            }
            Err(e) => return Err(ProviderError::MalformedResponse(e.to_string())),
        };

        if !status.is_success() || (!envelope.code.is_empty() && envelope.code != SUCCESS_CODE) {
            return Err(ProviderError::Node {
                code: if envelope.code.is_empty() {
                    status.as_u16().to_string()
                } else {
                    envelope.code
                },
                message: envelope.error,
            });
        }

        envelope
            .data
            .ok_or_else(|| ProviderError::MalformedResponse("Missing `data` field".to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl ChainProvider for ProxyProvider {
    async fn get_account(&self, address: &Address) -> Result<AccountOnNetwork, ProviderError> {
        let address = address.to_bech32();
        let data: AccountData = self.get(self.url(&["address", &address])?).await?;
        Ok(AccountOnNetwork {
            address: data.account.address,
            balance: data.account.balance,
            nonce: data.account.nonce,
        })
    }

    async fn get_fungible_token_balance(
        &self,
        address: &Address,
        identifier: &str,
    ) -> Result<FungibleTokenBalance, ProviderError> {
        let address = address.to_bech32();
        let data: TokenData = self
            .get(self.url(&["address", &address, "esdt", identifier])?)
            .await?;
        let token_identifier = if data.token_data.token_identifier.is_empty() {
            identifier.to_string()
        } else {
            data.token_data.token_identifier
        };
        Ok(FungibleTokenBalance {
            identifier: token_identifier,
            balance: data.token_data.balance,
        })
    }

    async fn get_transaction(&self, hash: &str) -> Result<TransactionRecord, ProviderError> {
        let mut url = self.url(&["transaction", hash])?;
        url.query_pairs_mut().append_pair("withResults", "true");
        let data: TransactionData = self.get(url).await?;
        let tx = data.transaction;

        Ok(TransactionRecord {
            hash: tx.hash.unwrap_or_else(|| hash.to_string()),
            nonce: tx.nonce,
            value: tx.value,
            sender: tx.sender,
            receiver: tx.receiver,
            gas_price: tx.gas_price,
            gas_limit: tx.gas_limit,
            data: tx.data,
            chain_id: tx.chain_id.unwrap_or_default(),
            version: tx.version.unwrap_or(1),
            signature: tx.signature,
            status: tx.status.map(TransactionStatus::new),
        })
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<String, ProviderError> {
        let wire = transaction
            .to_wire()
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        let request = self.http.post(self.url(&["transaction", "send"])?).json(&wire);
        let data: SendData = self.execute(request).await?;
        Ok(data.tx_hash)
    }

    async fn get_network_config(&self) -> Result<NetworkConfig, ProviderError> {
        let data: NetworkConfigData = self.get(self.url(&["network", "config"])?).await?;
        Ok(NetworkConfig {
            chain_id: data.config.erd_chain_id,
            min_gas_price: data.config.erd_min_gas_price,
            min_gas_limit: data.config.erd_min_gas_limit,
            gas_per_data_byte: data.config.erd_gas_per_data_byte,
        })
    }
}

/// Factory connecting [`ProxyProvider`]s to the profile's endpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProxyProviderFactory;

impl ProviderFactory for ProxyProviderFactory {
    fn connect(
        &self,
        profile: &NetworkProfile,
        timeout: Duration,
    ) -> Result<Box<dyn ChainProvider>, ProviderError> {
        Ok(Box::new(ProxyProvider::new(&profile.endpoint_url, timeout)?))
    }
}
