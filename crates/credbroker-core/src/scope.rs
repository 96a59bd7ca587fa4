// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Allow-list of OAuth scopes a caller may request for an issued client.

use crate::error::{BrokerError, Result};
use tracing::warn;

/// Scope granted when the caller requests none.
pub const DEFAULT_SCOPE: &str = "openid";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopePolicy {
	allowed: Vec<String>,
}

impl Default for ScopePolicy {
	fn default() -> Self {
		Self::new([DEFAULT_SCOPE])
	}
}

impl ScopePolicy {
	pub fn new<I, S>(allowed: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut list: Vec<String> = Vec::new();
		for scope in allowed {
			let scope = scope.into();
			if !list.contains(&scope) {
				list.push(scope);
			}
		}
		Self { allowed: list }
	}

	pub fn allowed(&self) -> &[String] {
		&self.allowed
	}

	pub fn is_allowed(&self, scope: &str) -> bool {
		self.allowed.iter().any(|s| s == scope)
	}

	/// The scopes to grant: the request itself, or `["openid"]` when absent
	/// or empty.
	pub fn resolve(&self, requested: Option<&[String]>) -> Vec<String> {
		match requested {
			Some(scopes) if !scopes.is_empty() => scopes.to_vec(),
			_ => vec![DEFAULT_SCOPE.to_string()],
		}
	}

	/// Requested scopes that are not on the allow-list, in input order.
	pub fn forbidden(&self, requested: &[String]) -> Vec<String> {
		requested
			.iter()
			.filter(|scope| !self.is_allowed(scope))
			.cloned()
			.collect()
	}

	/// Resolve the requested scopes and reject any outside the allow-list.
	pub fn validate(&self, requested: Option<&[String]>) -> Result<Vec<String>> {
		let scopes = self.resolve(requested);
		let forbidden = self.forbidden(&scopes);
		if !forbidden.is_empty() {
			warn!(forbidden = ?forbidden, "rejecting scopes outside allow-list");
			return Err(BrokerError::ForbiddenScopes(forbidden));
		}
		Ok(scopes)
	}
}
