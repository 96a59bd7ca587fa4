// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! One-time-link delivery of provisioned credentials.

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_HOURS: u32 = 2;
const DEFAULT_MAX_VIEWS: u32 = 2;

/// Without an `address`, provisioned credentials are not delivered anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
	pub address: Option<String>,
	pub hours: u32,
	pub max_views: u32,
}

impl Default for DeliveryConfig {
	fn default() -> Self {
		Self {
			address: None,
			hours: DEFAULT_HOURS,
			max_views: DEFAULT_MAX_VIEWS,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryConfigLayer {
	#[serde(default)]
	pub address: Option<String>,
	#[serde(default)]
	pub hours: Option<u32>,
	#[serde(default)]
	pub max_views: Option<u32>,
}

impl DeliveryConfigLayer {
	pub fn merge(&mut self, other: DeliveryConfigLayer) {
		if other.address.is_some() {
			self.address = other.address;
		}
		if other.hours.is_some() {
			self.hours = other.hours;
		}
		if other.max_views.is_some() {
			self.max_views = other.max_views;
		}
	}

	pub fn finalize(self) -> Result<DeliveryConfig, ConfigError> {
		let hours = self.hours.unwrap_or(DEFAULT_HOURS);
		let max_views = self.max_views.unwrap_or(DEFAULT_MAX_VIEWS);
		if hours == 0 {
			return Err(ConfigError::InvalidValue {
				key: "delivery.hours".to_string(),
				message: "must be greater than 0".to_string(),
			});
		}
		if max_views == 0 {
			return Err(ConfigError::InvalidValue {
				key: "delivery.max_views".to_string(),
				message: "must be greater than 0".to_string(),
			});
		}
		Ok(DeliveryConfig {
			address: self.address.filter(|a| !a.trim().is_empty()),
			hours,
			max_views,
		})
	}
}
