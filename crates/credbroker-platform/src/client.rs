// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;
use credbroker_core::{OrgRole, SpaceRole};
use credbroker_identity::TokenSource;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use tracing::info;

use crate::error::{PlatformError, Result};
use crate::types::{CreateRole, CreateUser, ServiceInstanceResource, SpaceResource};

/// Operations the broker needs from the platform system.
#[async_trait]
pub trait PlatformClient: Send + Sync {
	/// Guid of the space that owns a service instance.
	async fn service_instance_space(&self, instance_guid: &str) -> Result<String>;

	/// Guid of the organization that owns a space.
	async fn space_organization(&self, space_guid: &str) -> Result<String>;

	/// Register an identity-system user (by its external id) with the platform.
	async fn create_user(&self, user_guid: &str) -> Result<()>;

	/// Returns [`PlatformError::NotFound`] when the user is already gone.
	async fn delete_user(&self, user_guid: &str) -> Result<()>;

	async fn associate_org_role(&self, org_guid: &str, username: &str, role: OrgRole) -> Result<()>;

	async fn associate_space_role(
		&self,
		space_guid: &str,
		username: &str,
		role: SpaceRole,
	) -> Result<()>;
}

/// [`PlatformClient`] for the Cloud Foundry v3 API.
pub struct CloudFoundryClient {
	http: Client,
	address: String,
	tokens: Arc<dyn TokenSource>,
}

impl CloudFoundryClient {
	pub fn new(http: Client, address: impl Into<String>, tokens: Arc<dyn TokenSource>) -> Self {
		Self {
			http,
			address: address.into(),
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
			.header("Accept", "application/json"))
	}

	async fn create_role(&self, body: &CreateRole<'_>) -> Result<()> {
		let response = self
			.request(Method::POST, &["v3", "roles"])
			.await?
			.json(body)
			.send()
			.await?;
		expect_status(response, "create role", StatusCode::CREATED).await?;
		Ok(())
	}
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
	Err(PlatformError::UnexpectedStatus {
		operation,
		expected: expected.as_u16(),
		status: status.as_u16(),
		body,
	})
}

#[async_trait]
impl PlatformClient for CloudFoundryClient {
	#[tracing::instrument(skip(self))]
	async fn service_instance_space(&self, instance_guid: &str) -> Result<String> {
		let response = self
			.request(Method::GET, &["v3", "service_instances", instance_guid])
			.await?
			.send()
			.await?;
		if response.status() == StatusCode::NOT_FOUND {
			return Err(PlatformError::NotFound);
		}
		let response = expect_status(response, "get service instance", StatusCode::OK).await?;
		let resource: ServiceInstanceResource =
			response.json().await.map_err(|source| PlatformError::Decode {
				operation: "get service instance",
				source,
			})?;
		Ok(resource.relationships.space.data.guid)
	}

	#[tracing::instrument(skip(self))]
	async fn space_organization(&self, space_guid: &str) -> Result<String> {
		let response = self
			.request(Method::GET, &["v3", "spaces", space_guid])
			.await?
			.send()
			.await?;
		if response.status() == StatusCode::NOT_FOUND {
			return Err(PlatformError::NotFound);
		}
		let response = expect_status(response, "get space", StatusCode::OK).await?;
		let resource: SpaceResource = response.json().await.map_err(|source| PlatformError::Decode {
			operation: "get space",
			source,
		})?;
		Ok(resource.relationships.organization.data.guid)
	}

	#[tracing::instrument(skip(self))]
	async fn create_user(&self, user_guid: &str) -> Result<()> {
		let response = self
			.request(Method::POST, &["v3", "users"])
			.await?
			.json(&CreateUser { guid: user_guid })
			.send()
			.await?;
		expect_status(response, "create user", StatusCode::CREATED).await?;
		info!(user_guid, "created platform user");
		Ok(())
	}

	#[tracing::instrument(skip(self))]
	async fn delete_user(&self, user_guid: &str) -> Result<()> {
		let response = self
			.request(Method::DELETE, &["v3", "users", user_guid])
			.await?
			.send()
			.await?;
		if response.status() == StatusCode::NOT_FOUND {
			return Err(PlatformError::NotFound);
		}
		expect_status(response, "delete user", StatusCode::ACCEPTED).await?;
		info!(user_guid, "deleted platform user");
		Ok(())
	}

	#[tracing::instrument(skip(self))]
	async fn associate_org_role(&self, org_guid: &str, username: &str, role: OrgRole) -> Result<()> {
		self.create_role(&CreateRole::organization(role.as_str(), org_guid, username))
			.await?;
		info!(org_guid, username, role = %role, "granted organization role");
		Ok(())
	}

	#[tracing::instrument(skip(self))]
	async fn associate_space_role(
		&self,
		space_guid: &str,
		username: &str,
		role: SpaceRole,
	) -> Result<()> {
		self.create_role(&CreateRole::space(role.as_str(), space_guid, username))
			.await?;
		info!(space_guid, username, role = %role, "granted space role");
		Ok(())
	}
}
