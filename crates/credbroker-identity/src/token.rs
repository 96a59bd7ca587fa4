// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bearer tokens for calls made on the broker's own behalf.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use credbroker_common_http::EndpointError;
use credbroker_common_secret::SecretString;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

/// Tokens are refreshed this long before the identity system says they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum TokenError {
	#[error("token request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("token endpoint rejected client credentials with status {status}: {body}")]
	Rejected { status: u16, body: String },

	#[error(transparent)]
	Endpoint(#[from] EndpointError),
}

/// Supplies the bearer token attached to outbound requests.
#[async_trait]
pub trait TokenSource: Send + Sync {
	async fn access_token(&self) -> Result<SecretString, TokenError>;
}

#[derive(Deserialize)]
struct TokenResponse {
	access_token: SecretString,
	#[serde(default)]
	expires_in: u64,
}

struct CachedToken {
	value: SecretString,
	expires_at: Instant,
}

/// OAuth2 client-credentials grant against `{identity}/oauth/token`.
///
/// The current token is cached until shortly before expiry. The cache lock is
/// held across a refresh so concurrent callers wait for one token request.
pub struct ClientCredentialsTokenSource {
	http: Client,
	token_url: Url,
	client_id: String,
	client_secret: SecretString,
	cached: Mutex<Option<CachedToken>>,
}

impl ClientCredentialsTokenSource {
	pub fn new(
		http: Client,
		identity_address: &str,
		client_id: impl Into<String>,
		client_secret: SecretString,
	) -> Result<Self, TokenError> {
		Ok(Self {
			http,
			token_url: credbroker_common_http::join(identity_address, &["oauth", "token"])?,
			client_id: client_id.into(),
			client_secret,
			cached: Mutex::new(None),
		})
	}

	#[tracing::instrument(skip(self), fields(client_id = %self.client_id))]
	async fn fetch(&self) -> Result<CachedToken, TokenError> {
		let response = self
			.http
			.post(self.token_url.clone())
			.basic_auth(&self.client_id, Some(self.client_secret.expose()))
			.header("Accept", "application/json")
			.form(&[("grant_type", "client_credentials")])
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			warn!(status = status.as_u16(), "client credentials grant rejected");
			return Err(TokenError::Rejected {
				status: status.as_u16(),
				body,
			});
		}

		let token: TokenResponse = response.json().await?;
		debug!(expires_in = token.expires_in, "obtained access token");
		Ok(CachedToken {
			value: token.access_token,
			expires_at: Instant::now() + Duration::from_secs(token.expires_in),
		})
	}
}

impl std::fmt::Debug for ClientCredentialsTokenSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ClientCredentialsTokenSource")
			.field("token_url", &self.token_url.as_str())
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.finish()
	}
}

#[async_trait]
impl TokenSource for ClientCredentialsTokenSource {
	async fn access_token(&self) -> Result<SecretString, TokenError> {
		let mut cached = self.cached.lock().await;
		if let Some(token) = cached.as_ref() {
			if token.expires_at > Instant::now() + EXPIRY_MARGIN {
				return Ok(token.value.clone());
			}
		}

		let fresh = self.fetch().await?;
		let value = fresh.value.clone();
		*cached = Some(fresh);
		Ok(value)
	}
}
