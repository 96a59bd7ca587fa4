// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use axum::{
	extract::{Request, State},
	http::header::AUTHORIZATION,
	middleware::Next,
	response::Response,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use credbroker_common_secret::SecretString;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::error::ApiError;

/// The username and password the marketplace must present.
#[derive(Debug, Clone)]
pub struct BasicCredentials {
	username: String,
	password: SecretString,
}

impl BasicCredentials {
	pub fn new(username: impl Into<String>, password: SecretString) -> Self {
		Self {
			username: username.into(),
			password,
		}
	}

	/// Both halves are always compared so timing does not reveal which one
	/// was wrong.
	pub fn matches(&self, username: &str, password: &SecretString) -> bool {
		let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
		let pass_ok = self
			.password
			.expose()
			.as_bytes()
			.ct_eq(password.expose().as_bytes());
		(user_ok & pass_ok).into()
	}
}

/// Decode an `Authorization: Basic ...` header value.
pub fn parse_basic(value: &str) -> Option<(String, SecretString)> {
	let encoded = value.strip_prefix("Basic ")?.trim();
	let decoded = SecretString::new(String::from_utf8(STANDARD.decode(encoded).ok()?).ok()?);
	let (username, password) = decoded.expose().split_once(':')?;
	Some((username.to_string(), SecretString::from(password)))
}

pub async fn basic_auth_middleware(
	State(expected): State<Arc<BasicCredentials>>,
	request: Request,
	next: Next,
) -> Result<Response, ApiError> {
	let Some(auth_value) = request
		.headers()
		.get(AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
	else {
		warn!("broker auth failed: missing Authorization header");
		return Err(ApiError::Unauthorized);
	};

	let Some((username, password)) = parse_basic(auth_value) else {
		warn!("broker auth failed: invalid Authorization format");
		return Err(ApiError::Unauthorized);
	};

	if expected.matches(&username, &password) {
		Ok(next.run(request).await)
	} else {
		warn!(username = %username, "broker auth failed: invalid credentials");
		Err(ApiError::Unauthorized)
	}
}
