// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory chain provider for unit tests.

use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use alloy::primitives::U256;
use async_trait::async_trait;

use super::address::Address;
use super::provider::{ChainProvider, ProviderError, ProviderFactory};
use super::transactions::Transaction;
use super::types::{
    AccountOnNetwork, FungibleTokenBalance, NetworkConfig, NetworkProfile, TransactionRecord,
};

#[derive(Default)]
struct MockState {
    accounts: HashMap<Address, AccountOnNetwork>,
    tokens: HashMap<(Address, String), U256>,
    transactions: HashMap<String, TransactionRecord>,
    sent: Vec<Transaction>,
}

/// Provider answering from preloaded accounts, tokens and transactions.
///
/// Unknown lookups fail with a node error. Broadcast transactions are
/// recorded and can be inspected with [`MockProvider::sent`].
#[derive(Clone, Default)]
pub(crate) struct MockProvider {
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    pub(crate) fn with_account(self, address: Address, balance: U256, nonce: u64) -> Self {
        self.state.lock().unwrap().accounts.insert(
            address,
            AccountOnNetwork {
                address,
                balance,
                nonce,
            },
        );
        self
    }

    pub(crate) fn with_token(self, address: Address, identifier: &str, balance: U256) -> Self {
        self.state
            .lock()
            .unwrap()
            .tokens
            .insert((address, identifier.to_string()), balance);
        self
    }

    pub(crate) fn with_transaction(self, record: TransactionRecord) -> Self {
        self.state
            .lock()
            .unwrap()
            .transactions
            .insert(record.hash.clone(), record);
        self
    }

    pub(crate) fn sent(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().sent.clone()
    }
}

fn not_found(what: &str) -> ProviderError {
    ProviderError::Node {
        code: "internal_issue".to_string(),
        message: format!("{} not found", what),
    }
}

#[async_trait]
impl ChainProvider for MockProvider {
    async fn get_account(&self, address: &Address) -> Result<AccountOnNetwork, ProviderError> {
        self.state
            .lock()
            .unwrap()
            .accounts
            .get(address)
            .cloned()
            .ok_or_else(|| not_found("account"))
    }

    async fn get_fungible_token_balance(
        &self,
        address: &Address,
        identifier: &str,
    ) -> Result<FungibleTokenBalance, ProviderError> {
        let state = self.state.lock().unwrap();
        let balance = state
            .tokens
            .get(&(*address, identifier.to_string()))
            .copied()
            .unwrap_or(U256::ZERO);
        Ok(FungibleTokenBalance {
            identifier: identifier.to_string(),
            balance,
        })
    }

    async fn get_transaction(&self, hash: &str) -> Result<TransactionRecord, ProviderError> {
        self.state
            .lock()
            .unwrap()
            .transactions
            .get(hash)
            .cloned()
            .ok_or_else(|| not_found("transaction"))
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<String, ProviderError> {
        let mut state = self.state.lock().unwrap();
        state.sent.push(transaction.clone());
        Ok(format!("{:064x}", state.sent.len()))
    }

    async fn get_network_config(&self) -> Result<NetworkConfig, ProviderError> {
        Ok(NetworkConfig {
            chain_id: "T".to_string(),
            min_gas_price: 1_000_000_000,
            min_gas_limit: 50_000,
            gas_per_data_byte: 1_500,
        })
    }
}

/// Factory handing out handles to one shared [`MockProvider`].
#[derive(Clone, Default)]
pub(crate) struct MockProviderFactory {
    provider: MockProvider,
    connections: Arc<AtomicUsize>,
}

impl MockProviderFactory {
    pub(crate) fn new(provider: MockProvider) -> Self {
        Self {
            provider,
            connections: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn provider(&self) -> &MockProvider {
        &self.provider
    }

    /// Number of provider handles created so far.
    pub(crate) fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

impl ProviderFactory for MockProviderFactory {
    fn connect(
        &self,
        _profile: &NetworkProfile,
        _timeout: Duration,
    ) -> Result<Box<dyn ChainProvider>, ProviderError> {
        self.connections.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.provider.clone()))
    }
}
