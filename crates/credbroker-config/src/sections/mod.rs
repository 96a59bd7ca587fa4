// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

pub mod catalog;
pub mod delivery;
pub mod http;
pub mod identity;
pub mod issuance;
pub mod logging;
pub mod platform;

pub use catalog::{CatalogConfig, CatalogConfigLayer};
pub use delivery::{DeliveryConfig, DeliveryConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use identity::{IdentityConfig, IdentityConfigLayer};
pub use issuance::{IssuanceConfig, IssuanceConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use platform::{PlatformConfig, PlatformConfigLayer};

use crate::error::ConfigError;

/// Unwrap a required value, naming the environment variable that sets it.
pub(crate) fn required<T>(value: Option<T>, env: &str) -> Result<T, ConfigError> {
	value.ok_or_else(|| ConfigError::MissingEnvVar(env.to_string()))
}
