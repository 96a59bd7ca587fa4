// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for the credential broker.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. Config file (`/etc/credbroker/broker.toml`, or `--config`)
//! 3. Environment variables (`CREDBROKER_*`)
//!
//! Secrets (`CREDBROKER_BROKER_PASSWORD`, `CREDBROKER_IDENTITY_CLIENT_SECRET`)
//! also accept a `*_FILE` variant pointing at a mounted secret.
//!
//! ```ignore
//! use credbroker_config::load_config;
//!
//! let config = load_config()?;
//! println!("listening on {}", config.socket_addr());
//! ```

pub mod env;
pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use env::{load_secret_env, SecretEnvError};
pub use error::ConfigError;
pub use layer::BrokerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::PathBuf;

use tracing::{debug, info};

/// Fully resolved broker configuration.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
	pub http: HttpConfig,
	pub identity: IdentityConfig,
	pub platform: PlatformConfig,
	pub issuance: IssuanceConfig,
	pub delivery: DeliveryConfig,
	pub catalog: CatalogConfig,
	pub logging: LoggingConfig,
}

impl BrokerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
pub fn load_config() -> Result<BrokerConfig, ConfigError> {
	load_from(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<BrokerConfig, ConfigError> {
	load_from(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<BrokerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = BrokerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: BrokerConfigLayer) -> Result<BrokerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let identity = layer.identity.unwrap_or_default().finalize()?;
	let platform = layer.platform.unwrap_or_default().finalize()?;
	let issuance = layer.issuance.unwrap_or_default().finalize()?;
	let delivery = layer.delivery.unwrap_or_default().finalize()?;
	let catalog = layer.catalog.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	info!(
		host = %http.host,
		port = http.port,
		identity = %identity.address,
		zone = %identity.zone,
		platform = %platform.address,
		delivery_enabled = delivery.address.is_some(),
		catalog_document = catalog.path.is_some(),
		"Broker configuration loaded"
	);

	Ok(BrokerConfig {
		http,
		identity,
		platform,
		issuance,
		delivery,
		catalog,
		logging,
	})
}
