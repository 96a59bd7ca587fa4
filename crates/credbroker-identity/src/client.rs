// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, info};

use crate::error::{IdentityError, Result};
use crate::token::TokenSource;
use crate::types::{IdentityUser, NewUser, OAuthClient, UserPage};

/// Header selecting the identity zone for every request.
pub const ZONE_HEADER: &str = "X-Identity-Zone-Id";

/// Operations the broker needs from the identity system.
///
/// Deletes return [`IdentityError::NotFound`] when the resource is already
/// gone so callers can treat teardown as idempotent.
#[async_trait]
pub trait IdentityClient: Send + Sync {
	async fn create_client(&self, client: &OAuthClient) -> Result<()>;

	async fn delete_client(&self, client_id: &str) -> Result<()>;

	/// Look up a user by exact user name. `Ok(None)` when no user matches.
	async fn find_user(&self, username: &str) -> Result<Option<IdentityUser>>;

	async fn create_user(&self, user: &NewUser) -> Result<IdentityUser>;

	async fn delete_user(&self, user_id: &str) -> Result<()>;
}

/// [`IdentityClient`] for a UAA-shaped REST API.
pub struct UaaClient {
	http: Client,
	address: String,
	zone: String,
	tokens: Arc<dyn TokenSource>,
}

impl UaaClient {
	pub fn new(
		http: Client,
		address: impl Into<String>,
		zone: impl Into<String>,
		tokens: Arc<dyn TokenSource>,
	) -> Self {
		Self {
			http,
			address: address.into(),
			zone: zone.into(),
			tokens,
		}
	}

	async fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
		let url = credbroker_common_http::join(&self.address, segments)?;
		let token = self.tokens.access_token().await?;
		Ok(self
			.http
			.request(method, url)
			.bearer_auth(token.expose())
			.header(ZONE_HEADER, self.zone.as_str())
			.header("Accept", "application/json"))
	}
}

/// Escapes a value for use inside a quoted SCIM filter literal.
fn scim_string(value: &str) -> String {
	value.replace('\\', "\\\\").replace('"', "\\\"")
}

async fn expect_status(
	response: Response,
	operation: &'static str,
	expected: StatusCode,
) -> Result<Response> {
	let status = response.status();
	if status == expected {
		return Ok(response);
	}
	let body = response.text().await.unwrap_or_default();
	Err(IdentityError::UnexpectedStatus {
		operation,
		expected: expected.as_u16(),
		status: status.as_u16(),
		body,
	})
}

#[async_trait]
impl IdentityClient for UaaClient {
	#[tracing::instrument(skip(self, client), fields(client_id = %client.client_id))]
	async fn create_client(&self, client: &OAuthClient) -> Result<()> {
		let response = self
			.request(Method::POST, &["oauth", "clients"])
			.await?
			.json(client)
			.send()
			.await?;
		expect_status(response, "create client", StatusCode::CREATED).await?;
		info!(client_id = %client.client_id, scope = ?client.scope, "created oauth client");
		Ok(())
	}

	#[tracing::instrument(skip(self))]
	async fn delete_client(&self, client_id: &str) -> Result<()> {
		let response = self
			.request(Method::DELETE, &["oauth", "clients", client_id])
			.await?
			.send()
			.await?;
		if response.status() == StatusCode::NOT_FOUND {
			return Err(IdentityError::NotFound);
		}
		expect_status(response, "delete client", StatusCode::OK).await?;
		info!(client_id, "deleted oauth client");
		Ok(())
	}

	#[tracing::instrument(skip(self))]
	async fn find_user(&self, username: &str) -> Result<Option<IdentityUser>> {
		let filter = format!("userName eq \"{}\"", scim_string(username));
		let response = self
			.request(Method::GET, &["Users"])
			.await?
			.query(&[("filter", filter.as_str()), ("count", "1")])
			.send()
			.await?;
		let response = expect_status(response, "find user", StatusCode::OK).await?;
		let page: UserPage = response.json().await.map_err(|source| IdentityError::Decode {
			operation: "find user",
			source,
		})?;

		match page.total_results {
			0 => {
				debug!(username, "no matching user");
				Ok(None)
			}
			1 => Ok(page.resources.into_iter().next()),
			count => Err(IdentityError::AmbiguousUser {
				username: username.to_string(),
				count,
			}),
		}
	}

	#[tracing::instrument(skip(self, user), fields(username = %user.user_name))]
	async fn create_user(&self, user: &NewUser) -> Result<IdentityUser> {
		let response = self
			.request(Method::POST, &["Users"])
			.await?
			.json(user)
			.send()
			.await?;
		let response = expect_status(response, "create user", StatusCode::CREATED).await?;
		let created: IdentityUser = response.json().await.map_err(|source| IdentityError::Decode {
			operation: "create user",
			source,
		})?;
		info!(username = %created.user_name, user_id = %created.id, "created identity user");
		Ok(created)
	}

	#[tracing::instrument(skip(self))]
	async fn delete_user(&self, user_id: &str) -> Result<()> {
		let response = self
			.request(Method::DELETE, &["Users", user_id])
			.await?
			.send()
			.await?;
		if response.status() == StatusCode::NOT_FOUND {
			return Err(IdentityError::NotFound);
		}
		expect_status(response, "delete user", StatusCode::OK).await?;
		info!(user_id, "deleted identity user");
		Ok(())
	}
}
