// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;
use credbroker_common_secret::SecretString;
use credbroker_core::{
	parse_bind_options, BrokerError, Credentials, OrgRole, PlanKind, Result, ScopePolicy,
};
use credbroker_identity::{IdentityClient, NewUser, OAuthClient, AUTHORIZED_GRANT_TYPES};
use credbroker_password::PasswordGenerator;
use credbroker_platform::PlatformClient;
use tracing::{debug, info, warn};

use crate::settings::BrokerSettings;

/// Where an issued platform user gets its roles.
#[derive(Debug, Clone, Copy)]
pub enum Placement<'a> {
	/// Organization and space named by the request (provisioning).
	Space {
		organization_guid: Option<&'a str>,
		space_guid: Option<&'a str>,
	},
	/// The space owning this service instance, and that space's organization
	/// (binding).
	ServiceInstance(&'a str),
}

#[derive(Debug, Clone, Copy)]
pub struct IssueRequest<'a> {
	/// Becomes the client id or user name.
	pub id: &'a str,
	pub plan: PlanKind,
	pub raw_parameters: Option<&'a [u8]>,
	pub placement: Placement<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CredentialKind {
	Client,
	User,
}

/// A freshly issued credential, not yet disclosed.
#[derive(Debug, Clone)]
pub struct IssuedCredential {
	id: String,
	secret: SecretString,
	kind: CredentialKind,
}

impl IssuedCredential {
	pub fn id(&self) -> &str {
		&self.id
	}

	/// The credentials map returned by a binding.
	pub fn into_credentials(self) -> Credentials {
		let (id_key, secret_key) = match self.kind {
			CredentialKind::Client => ("client_id", "client_secret"),
			CredentialKind::User => ("username", "password"),
		};
		let mut credentials = Credentials::new();
		credentials.insert(id_key.to_string(), self.id.clone());
		credentials.insert(secret_key.to_string(), self.secret.expose().clone());
		credentials
	}

	/// `"<id> | <secret>"`, the body handed to a credential sender.
	pub fn delivery_message(&self) -> SecretString {
		SecretString::new(format!("{} | {}", self.id, self.secret.expose()))
	}
}

/// Issues and revokes one kind of credential.
#[async_trait]
pub trait CredentialStrategy: Send + Sync {
	async fn issue(&self, request: IssueRequest<'_>) -> Result<IssuedCredential>;

	/// Remove the credential named `id`. Succeeds when it is already gone.
	async fn revoke(&self, id: &str) -> Result<()>;
}

fn generate_secret(passwords: &dyn PasswordGenerator, length: usize) -> Result<SecretString> {
	passwords
		.generate(length)
		.map_err(|e| BrokerError::Password(e.to_string()))
}

/// Log a failure that leaves resources from earlier steps in place.
fn partial_failure(id: &str, step: &'static str, err: impl Into<BrokerError>) -> BrokerError {
	let err = err.into();
	warn!(id, step, error = %err, "issuance aborted after remote changes, earlier resources remain");
	err
}

pub struct ClientStrategy {
	identity: Arc<dyn IdentityClient>,
	passwords: Arc<dyn PasswordGenerator>,
	scopes: ScopePolicy,
	settings: BrokerSettings,
}

impl ClientStrategy {
	pub fn new(
		identity: Arc<dyn IdentityClient>,
		passwords: Arc<dyn PasswordGenerator>,
		scopes: ScopePolicy,
		settings: BrokerSettings,
	) -> Self {
		Self {
			identity,
			passwords,
			scopes,
			settings,
		}
	}
}

#[async_trait]
impl CredentialStrategy for ClientStrategy {
	async fn issue(&self, request: IssueRequest<'_>) -> Result<IssuedCredential> {
		let options = parse_bind_options(request.raw_parameters)?;
		let scope = self.scopes.validate(options.scopes.as_deref())?;
		let secret = generate_secret(self.passwords.as_ref(), self.settings.password_length)?;

		let client = OAuthClient {
			client_id: request.id.to_string(),
			client_secret: secret.clone(),
			authorized_grant_types: AUTHORIZED_GRANT_TYPES.iter().map(|g| g.to_string()).collect(),
			scope,
			redirect_uri: options.redirect_uri,
			access_token_validity: self.settings.access_token_validity,
			refresh_token_validity: self.settings.refresh_token_validity,
			allowpublic: options
				.allow_public
				.unwrap_or(self.settings.allow_public_default),
		};
		self.identity.create_client(&client).await?;

		Ok(IssuedCredential {
			id: client.client_id,
			secret,
			kind: CredentialKind::Client,
		})
	}

	async fn revoke(&self, id: &str) -> Result<()> {
		match self.identity.delete_client(id).await {
			Ok(()) => Ok(()),
			Err(e) if e.is_not_found() => {
				info!(client_id = id, "oauth client already absent");
				Ok(())
			}
			Err(e) => Err(e.into()),
		}
	}
}

pub struct UserStrategy {
	identity: Arc<dyn IdentityClient>,
	platform: Arc<dyn PlatformClient>,
	passwords: Arc<dyn PasswordGenerator>,
	settings: BrokerSettings,
}

impl UserStrategy {
	pub fn new(
		identity: Arc<dyn IdentityClient>,
		platform: Arc<dyn PlatformClient>,
		passwords: Arc<dyn PasswordGenerator>,
		settings: BrokerSettings,
	) -> Self {
		Self {
			identity,
			platform,
			passwords,
			settings,
		}
	}

	/// Organization and space guids for the new user's roles.
	async fn locate(&self, id: &str, placement: Placement<'_>) -> Result<(String, String)> {
		match placement {
			Placement::Space {
				organization_guid: Some(org),
				space_guid: Some(space),
			} => Ok((org.to_string(), space.to_string())),
			Placement::Space {
				organization_guid: None,
				..
			} => Err(BrokerError::MissingContext("organization_guid")),
			Placement::Space { space_guid: None, .. } => Err(BrokerError::MissingContext("space_guid")),
			Placement::ServiceInstance(instance) => {
				let space = self
					.platform
					.service_instance_space(instance)
					.await
					.map_err(|e| partial_failure(id, "resolve service instance space", e))?;
				let org = self
					.platform
					.space_organization(&space)
					.await
					.map_err(|e| partial_failure(id, "resolve space organization", e))?;
				debug!(instance, space = %space, org = %org, "resolved service instance placement");
				Ok((org, space))
			}
		}
	}
}

#[async_trait]
impl CredentialStrategy for UserStrategy {
	async fn issue(&self, request: IssueRequest<'_>) -> Result<IssuedCredential> {
		let PlanKind::PlatformUser { space_role } = request.plan else {
			return Err(BrokerError::UnknownPlan(format!("{:?}", request.plan)));
		};
		if let Placement::Space {
			organization_guid,
			space_guid,
		} = request.placement
		{
			organization_guid.ok_or(BrokerError::MissingContext("organization_guid"))?;
			space_guid.ok_or(BrokerError::MissingContext("space_guid"))?;
		}

		let username = request.id;
		let secret = generate_secret(self.passwords.as_ref(), self.settings.password_length)?;

		let user = self
			.identity
			.create_user(&NewUser::new(
				username,
				secret.clone(),
				self.settings.email_address.as_str(),
			))
			.await?;

		self.platform
			.create_user(&user.id)
			.await
			.map_err(|e| partial_failure(username, "create platform user", e))?;

		let (org, space) = self.locate(username, request.placement).await?;

		self.platform
			.associate_org_role(&org, username, OrgRole::OrganizationUser)
			.await
			.map_err(|e| partial_failure(username, "associate organization role", e))?;
		self.platform
			.associate_space_role(&space, username, space_role)
			.await
			.map_err(|e| partial_failure(username, "associate space role", e))?;

		info!(username, user_id = %user.id, space_role = %space_role, "issued platform user");
		Ok(IssuedCredential {
			id: username.to_string(),
			secret,
			kind: CredentialKind::User,
		})
	}

	async fn revoke(&self, id: &str) -> Result<()> {
		let Some(user) = self.identity.find_user(id).await? else {
			info!(username = id, "user already absent");
			return Ok(());
		};

		match self.platform.delete_user(&user.id).await {
			Ok(()) => {}
			Err(e) if e.is_not_found() => debug!(user_id = %user.id, "platform user already absent"),
			Err(e) => return Err(e.into()),
		}

		match self.identity.delete_user(&user.id).await {
			Ok(()) => {}
			Err(e) if e.is_not_found() => debug!(user_id = %user.id, "identity user already absent"),
			Err(e) => return Err(e.into()),
		}

		info!(username = id, user_id = %user.id, "revoked platform user");
		Ok(())
	}
}
