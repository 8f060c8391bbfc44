// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational Elrond Client - EGLD / ESDT wallet client facade
//!
//! This crate resolves Elrond networks, queries balances and transactions,
//! builds and signs EGLD/ESDT transfers and normalizes everything into a
//! stable receipt shape.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `blockchain` - Elrond integration and the [`blockchain::ElrondClient`] facade
//! - `config` - Environment configuration

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod state;
