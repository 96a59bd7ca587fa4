// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Errors surfaced by broker operations.
///
/// Variants up to and including [`BrokerError::MissingContext`] are raised
/// before any remote system is touched; see [`BrokerError::is_validation`].
#[derive(Debug, Error)]
pub enum BrokerError {
	#[error("must pass JSON configuration with field \"redirect_uri\"")]
	MissingConfiguration,

	#[error("must pass field \"redirect_uri\"")]
	MissingRedirectUri,

	#[error("invalid parameters: {0}")]
	InvalidParameters(String),

	#[error("Scope(s) not permitted: {}", .0.join(", "))]
	ForbiddenScopes(Vec<String>),

	#[error("unknown service offering: {0}")]
	UnknownService(String),

	#[error("unknown plan: {0}")]
	UnknownPlan(String),

	#[error("request is missing {0}")]
	MissingContext(&'static str),

	#[error("broker does not support {0}")]
	NotSupported(&'static str),

	#[error("identity system error: {0}")]
	Identity(String),

	#[error("platform system error: {0}")]
	Platform(String),

	#[error("credential delivery failed: {0}")]
	Delivery(String),

	#[error("password generation failed: {0}")]
	Password(String),
}

impl BrokerError {
	/// True for errors caused by the request itself, detected before any
	/// remote mutation.
	pub fn is_validation(&self) -> bool {
		matches!(
			self,
			BrokerError::MissingConfiguration
				| BrokerError::MissingRedirectUri
				| BrokerError::InvalidParameters(_)
				| BrokerError::ForbiddenScopes(_)
				| BrokerError::UnknownService(_)
				| BrokerError::UnknownPlan(_)
				| BrokerError::MissingContext(_)
		)
	}

	/// Short machine-readable code for marketplace error bodies.
	pub fn code(&self) -> &'static str {
		match self {
			BrokerError::MissingConfiguration
			| BrokerError::MissingRedirectUri
			| BrokerError::InvalidParameters(_)
			| BrokerError::MissingContext(_) => "InvalidParameters",
			BrokerError::ForbiddenScopes(_) => "ForbiddenScopes",
			BrokerError::UnknownService(_) | BrokerError::UnknownPlan(_) => "UnknownPlan",
			BrokerError::NotSupported(_) => "NotSupported",
			BrokerError::Identity(_) | BrokerError::Platform(_) => "RemoteSystemError",
			BrokerError::Delivery(_) => "DeliveryError",
			BrokerError::Password(_) => "InternalError",
		}
	}
}

pub type Result<T> = std::result::Result<T, BrokerError>;
