// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::blockchain::ElrondClientError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl From<ElrondClientError> for ApiError {
    fn from(e: ElrondClientError) -> Self {
        match e {
            ElrondClientError::Validation(_)
            | ElrondClientError::MissingDecimals
            | ElrondClientError::InvalidAmount(_)
            | ElrondClientError::InvalidAddress(_)
            | ElrondClientError::UnknownNetwork(_)
            | ElrondClientError::InvalidKeyStore(_) => Self::bad_request(e.to_string()),
            ElrondClientError::InsufficientBalance { .. } => Self::unprocessable(e.to_string()),
            ElrondClientError::Provider(_) => Self::service_unavailable(e.to_string()),
            ElrondClientError::Decode(_) => Self::bad_gateway(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
