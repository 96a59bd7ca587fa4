// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::env::load_secret_env;
use crate::error::ConfigError;
use crate::layer::BrokerConfigLayer;
use crate::sections::{
	CatalogConfigLayer, DeliveryConfigLayer, HttpConfigLayer, IdentityConfigLayer,
	IssuanceConfigLayer, LoggingConfigLayer, PlatformConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<BrokerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<BrokerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(BrokerConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is not an error.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/credbroker/broker.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<BrokerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(BrokerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: BrokerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: CREDBROKER_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<BrokerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(BrokerConfigLayer {
			http: Some(load_http_from_env()?),
			identity: Some(load_identity_from_env()?),
			platform: Some(load_platform_from_env()),
			issuance: Some(load_issuance_from_env()?),
			delivery: Some(load_delivery_from_env()?),
			catalog: Some(load_catalog_from_env()),
			logging: Some(load_logging_from_env()),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_bool(name: &str) -> Option<bool> {
	env_var(name).map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

fn env_parsed<T: std::str::FromStr>(name: &str, kind: &str) -> Result<Option<T>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid {kind} value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn env_u16(name: &str) -> Result<Option<u16>, ConfigError> {
	env_parsed(name, "u16")
}

fn env_u32(name: &str) -> Result<Option<u32>, ConfigError> {
	env_parsed(name, "u32")
}

fn env_u64(name: &str) -> Result<Option<u64>, ConfigError> {
	env_parsed(name, "u64")
}

fn env_usize(name: &str) -> Result<Option<usize>, ConfigError> {
	env_parsed(name, "usize")
}

/// Comma-separated list; blank entries are dropped.
fn env_list(name: &str) -> Option<Vec<String>> {
	env_var(name).map(|v| {
		v.split(',')
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(str::to_string)
			.collect()
	})
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var("CREDBROKER_HOST"),
		port: env_u16("CREDBROKER_PORT")?,
		client_timeout_secs: env_u64("CREDBROKER_HTTP_CLIENT_TIMEOUT_SECS")?,
	})
}

fn load_identity_from_env() -> Result<IdentityConfigLayer, ConfigError> {
	Ok(IdentityConfigLayer {
		address: env_var("CREDBROKER_IDENTITY_ADDRESS"),
		zone: env_var("CREDBROKER_IDENTITY_ZONE"),
		client_id: env_var("CREDBROKER_IDENTITY_CLIENT_ID"),
		client_secret: load_secret_env("CREDBROKER_IDENTITY_CLIENT_SECRET")
			.map_err(|e| ConfigError::Secret(e.to_string()))?,
	})
}

fn load_platform_from_env() -> PlatformConfigLayer {
	PlatformConfigLayer {
		address: env_var("CREDBROKER_PLATFORM_ADDRESS"),
	}
}

fn load_issuance_from_env() -> Result<IssuanceConfigLayer, ConfigError> {
	Ok(IssuanceConfigLayer {
		username: env_var("CREDBROKER_BROKER_USERNAME"),
		password: load_secret_env("CREDBROKER_BROKER_PASSWORD")
			.map_err(|e| ConfigError::Secret(e.to_string()))?,
		password_length: env_usize("CREDBROKER_BROKER_PASSWORD_LENGTH")?,
		email_address: env_var("CREDBROKER_BROKER_EMAIL_ADDRESS"),
		access_token_validity: env_u64("CREDBROKER_BROKER_ACCESS_TOKEN_VALIDITY")?,
		refresh_token_validity: env_u64("CREDBROKER_BROKER_REFRESH_TOKEN_VALIDITY")?,
		allow_public_default: env_bool("CREDBROKER_BROKER_ALLOW_PUBLIC_DEFAULT"),
		scope_allow_list: env_list("CREDBROKER_BROKER_SCOPE_ALLOW_LIST"),
	})
}

fn load_delivery_from_env() -> Result<DeliveryConfigLayer, ConfigError> {
	Ok(DeliveryConfigLayer {
		address: env_var("CREDBROKER_DELIVERY_ADDRESS"),
		hours: env_u32("CREDBROKER_DELIVERY_HOURS")?,
		max_views: env_u32("CREDBROKER_DELIVERY_MAX_VIEWS")?,
	})
}

fn load_catalog_from_env() -> CatalogConfigLayer {
	CatalogConfigLayer {
		path: env_var("CREDBROKER_CATALOG_PATH").map(PathBuf::from),
	}
}

fn load_logging_from_env() -> LoggingConfigLayer {
	LoggingConfigLayer {
		level: env_var("CREDBROKER_LOG_LEVEL"),
	}
}
