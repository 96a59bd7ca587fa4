// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration layer for merging from multiple sources.

use serde::Deserialize;

use crate::sections::{
	CatalogConfigLayer, DeliveryConfigLayer, HttpConfigLayer, IdentityConfigLayer,
	IssuanceConfigLayer, LoggingConfigLayer, PlatformConfigLayer,
};

/// Broker configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrokerConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub identity: Option<IdentityConfigLayer>,
	#[serde(default)]
	pub platform: Option<PlatformConfigLayer>,
	#[serde(default, rename = "broker")]
	pub issuance: Option<IssuanceConfigLayer>,
	#[serde(default)]
	pub delivery: Option<DeliveryConfigLayer>,
	#[serde(default)]
	pub catalog: Option<CatalogConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl BrokerConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: BrokerConfigLayer) {
		merge_option(&mut self.http, other.http, HttpConfigLayer::merge);
		merge_option(
			&mut self.identity,
			other.identity,
			IdentityConfigLayer::merge,
		);
		merge_option(
			&mut self.platform,
			other.platform,
			PlatformConfigLayer::merge,
		);
		merge_option(
			&mut self.issuance,
			other.issuance,
			IssuanceConfigLayer::merge,
		);
		merge_option(
			&mut self.delivery,
			other.delivery,
			DeliveryConfigLayer::merge,
		);
		merge_option(&mut self.catalog, other.catalog, CatalogConfigLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}
