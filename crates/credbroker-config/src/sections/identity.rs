// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity system (UAA) connection.

use credbroker_common_secret::SecretString;
use serde::Deserialize;

use super::required;
use crate::error::ConfigError;

const DEFAULT_ZONE: &str = "uaa";

#[derive(Debug, Clone)]
pub struct IdentityConfig {
	pub address: String,
	pub zone: String,
	/// Client used for the broker's own client-credentials grant.
	pub client_id: String,
	pub client_secret: SecretString,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityConfigLayer {
	#[serde(default)]
	pub address: Option<String>,
	#[serde(default)]
	pub zone: Option<String>,
	#[serde(default)]
	pub client_id: Option<String>,
	#[serde(default)]
	pub client_secret: Option<SecretString>,
}

impl IdentityConfigLayer {
	pub fn merge(&mut self, other: IdentityConfigLayer) {
		if other.address.is_some() {
			self.address = other.address;
		}
		if other.zone.is_some() {
			self.zone = other.zone;
		}
		if other.client_id.is_some() {
			self.client_id = other.client_id;
		}
		if other.client_secret.is_some() {
			self.client_secret = other.client_secret;
		}
	}

	pub fn finalize(self) -> Result<IdentityConfig, ConfigError> {
		Ok(IdentityConfig {
			address: required(self.address, "CREDBROKER_IDENTITY_ADDRESS")?,
			zone: self.zone.unwrap_or_else(|| DEFAULT_ZONE.to_string()),
			client_id: required(self.client_id, "CREDBROKER_IDENTITY_CLIENT_ID")?,
			client_secret: required(self.client_secret, "CREDBROKER_IDENTITY_CLIENT_SECRET")?,
		})
	}
}
