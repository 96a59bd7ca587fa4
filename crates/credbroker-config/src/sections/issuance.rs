// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The `[broker]` section: the broker's own basic-auth credentials and the
//! parameters applied to every credential it issues.

use credbroker_common_secret::SecretString;
use serde::Deserialize;

use super::required;
use crate::error::ConfigError;

const DEFAULT_PASSWORD_LENGTH: usize = 32;
const DEFAULT_ACCESS_TOKEN_VALIDITY: u64 = 600;
const DEFAULT_REFRESH_TOKEN_VALIDITY: u64 = 86_400;

fn default_scope_allow_list() -> Vec<String> {
	vec!["openid".to_string()]
}

#[derive(Debug, Clone)]
pub struct IssuanceConfig {
	/// Basic-auth username the platform presents to the broker.
	pub username: String,
	pub password: SecretString,
	pub password_length: usize,
	/// Address recorded on platform users created by the broker.
	pub email_address: String,
	/// Seconds.
	pub access_token_validity: u64,
	/// Seconds.
	pub refresh_token_validity: u64,
	pub allow_public_default: bool,
	pub scope_allow_list: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssuanceConfigLayer {
	#[serde(default)]
	pub username: Option<String>,
	#[serde(default)]
	pub password: Option<SecretString>,
	#[serde(default)]
	pub password_length: Option<usize>,
	#[serde(default)]
	pub email_address: Option<String>,
	#[serde(default)]
	pub access_token_validity: Option<u64>,
	#[serde(default)]
	pub refresh_token_validity: Option<u64>,
	#[serde(default)]
	pub allow_public_default: Option<bool>,
	#[serde(default)]
	pub scope_allow_list: Option<Vec<String>>,
}

impl IssuanceConfigLayer {
	pub fn merge(&mut self, other: IssuanceConfigLayer) {
		if other.username.is_some() {
			self.username = other.username;
		}
		if other.password.is_some() {
			self.password = other.password;
		}
		if other.password_length.is_some() {
			self.password_length = other.password_length;
		}
		if other.email_address.is_some() {
			self.email_address = other.email_address;
		}
		if other.access_token_validity.is_some() {
			self.access_token_validity = other.access_token_validity;
		}
		if other.refresh_token_validity.is_some() {
			self.refresh_token_validity = other.refresh_token_validity;
		}
		if other.allow_public_default.is_some() {
			self.allow_public_default = other.allow_public_default;
		}
		if other.scope_allow_list.is_some() {
			self.scope_allow_list = other.scope_allow_list;
		}
	}

	pub fn finalize(self) -> Result<IssuanceConfig, ConfigError> {
		let config = IssuanceConfig {
			username: required(self.username, "CREDBROKER_BROKER_USERNAME")?,
			password: required(self.password, "CREDBROKER_BROKER_PASSWORD")?,
			password_length: self.password_length.unwrap_or(DEFAULT_PASSWORD_LENGTH),
			email_address: required(self.email_address, "CREDBROKER_BROKER_EMAIL_ADDRESS")?,
			access_token_validity: self
				.access_token_validity
				.unwrap_or(DEFAULT_ACCESS_TOKEN_VALIDITY),
			refresh_token_validity: self
				.refresh_token_validity
				.unwrap_or(DEFAULT_REFRESH_TOKEN_VALIDITY),
			allow_public_default: self.allow_public_default.unwrap_or(false),
			scope_allow_list: self
				.scope_allow_list
				.unwrap_or_else(default_scope_allow_list),
		};
		config.validate()?;
		Ok(config)
	}
}

impl IssuanceConfig {
	fn validate(&self) -> Result<(), ConfigError> {
		if self.password_length == 0 {
			return Err(ConfigError::InvalidValue {
				key: "broker.password_length".to_string(),
				message: "must be at least 1".to_string(),
			});
		}
		if self.password.is_empty() {
			return Err(ConfigError::Validation(
				"broker password must not be empty".to_string(),
			));
		}
		if self.email_address.trim().is_empty() {
			return Err(ConfigError::Validation(
				"broker.email_address must not be empty".to_string(),
			));
		}
		if self.scope_allow_list.iter().all(|s| s.trim().is_empty()) {
			return Err(ConfigError::Validation(
				"broker.scope_allow_list must name at least one scope".to_string(),
			));
		}
		Ok(())
	}
}
