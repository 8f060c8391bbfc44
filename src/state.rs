// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::blockchain::ElrondClient;
use crate::config::ClientConfig;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<ElrondClient>,
}

impl AppState {
    pub fn new(client: ElrondClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ElrondClient::from_config(ClientConfig::default()))
    }
}
