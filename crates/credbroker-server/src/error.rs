// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use credbroker_core::BrokerError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Marketplace error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
	pub error: String,
	pub description: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	#[error("unauthorized")]
	Unauthorized,
	#[error(transparent)]
	Broker(#[from] BrokerError),
}

impl ApiError {
	pub fn status(&self) -> StatusCode {
		match self {
			ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
			ApiError::Broker(e) if e.is_validation() => StatusCode::BAD_REQUEST,
			ApiError::Broker(BrokerError::NotSupported(_)) => StatusCode::UNPROCESSABLE_ENTITY,
			ApiError::Broker(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let status = self.status();
		let body = match &self {
			ApiError::Unauthorized => ErrorBody {
				error: "Unauthorized".to_string(),
				description: "valid broker credentials are required".to_string(),
			},
			ApiError::Broker(e) => ErrorBody {
				error: e.code().to_string(),
				description: e.to_string(),
			},
		};

		if status.is_server_error() {
			error!(error = %self, code = %body.error, "request failed");
		}

		match self {
			ApiError::Unauthorized => (
				status,
				[(header::WWW_AUTHENTICATE, "Basic realm=\"credbroker\"")],
				Json(body),
			)
				.into_response(),
			ApiError::Broker(_) => (status, Json(body)).into_response(),
		}
	}
}
