// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use credbroker_common_http::EndpointError;
use credbroker_core::BrokerError;
use credbroker_identity::TokenError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
	#[error("resource not found")]
	NotFound,

	#[error("{operation}: expected status {expected}, got {status}: {body}")]
	UnexpectedStatus {
		operation: &'static str,
		expected: u16,
		status: u16,
		body: String,
	},

	#[error("failed to decode {operation} response: {source}")]
	Decode {
		operation: &'static str,
		#[source]
		source: reqwest::Error,
	},

	#[error("request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error(transparent)]
	Token(#[from] TokenError),

	#[error(transparent)]
	Endpoint(#[from] EndpointError),
}

impl PlatformError {
	pub fn is_not_found(&self) -> bool {
		matches!(self, PlatformError::NotFound)
	}
}

impl From<PlatformError> for BrokerError {
	fn from(err: PlatformError) -> Self {
		BrokerError::Platform(err.to_string())
	}
}

pub type Result<T> = std::result::Result<T, PlatformError>;
