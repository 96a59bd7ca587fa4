// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Platform system (Cloud Foundry API) connection.

use serde::Deserialize;

use super::required;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
	pub address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformConfigLayer {
	#[serde(default)]
	pub address: Option<String>,
}

impl PlatformConfigLayer {
	pub fn merge(&mut self, other: PlatformConfigLayer) {
		if other.address.is_some() {
			self.address = other.address;
		}
	}

	pub fn finalize(self) -> Result<PlatformConfig, ConfigError> {
		Ok(PlatformConfig {
			address: required(self.address, "CREDBROKER_PLATFORM_ADDRESS")?,
		})
	}
}
