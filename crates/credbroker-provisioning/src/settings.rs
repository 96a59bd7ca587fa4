// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Per-deployment knobs for issued credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerSettings {
	pub password_length: usize,
	/// Primary email given to every issued platform user.
	pub email_address: String,
	/// Seconds.
	pub access_token_validity: u64,
	/// Seconds.
	pub refresh_token_validity: u64,
	/// Whether issued OAuth clients are public when the caller does not say.
	pub allow_public_default: bool,
}

impl Default for BrokerSettings {
	fn default() -> Self {
		Self {
			password_length: 32,
			email_address: String::new(),
			access_token_validity: 600,
			refresh_token_validity: 86400,
			allow_public_default: false,
		}
	}
}
