// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Caller-supplied parameters for OAuth client issuance.

use crate::error::{BrokerError, Result};
use serde::Deserialize;

/// Options decoded from the request's raw `parameters` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BindOptions {
	#[serde(default)]
	pub redirect_uri: Vec<String>,

	#[serde(default)]
	pub scopes: Option<Vec<String>>,

	/// `None` when the caller did not say; the deployment default applies.
	/// Sending both `allowpublic` and `allow_public` is a duplicate field and
	/// fails as [`BrokerError::InvalidParameters`].
	#[serde(default, rename = "allowpublic", alias = "allow_public")]
	pub allow_public: Option<bool>,
}

/// Parse raw JSON parameters into [`BindOptions`].
///
/// Unknown fields are ignored. Only the OAuth client offering takes
/// parameters; user offerings never call this.
pub fn parse_bind_options(raw: Option<&[u8]>) -> Result<BindOptions> {
	let raw = match raw {
		Some(bytes) if !bytes.iter().all(u8::is_ascii_whitespace) => bytes,
		_ => return Err(BrokerError::MissingConfiguration),
	};

	let options: BindOptions =
		serde_json::from_slice(raw).map_err(|e| BrokerError::InvalidParameters(e.to_string()))?;

	if options.redirect_uri.is_empty() {
		return Err(BrokerError::MissingRedirectUri);
	}

	Ok(options)
}
