// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use credbroker_core::{
	BindRequest, BindResponse, BrokerError, Catalog, DeprovisionRequest, DeprovisionResponse,
	LastOperationRequest, PlanKind, ProvisionRequest, ProvisionResponse, Result, ScopePolicy,
	StrategyKind, UnbindRequest, UpdateRequest,
};
use credbroker_delivery::{CredentialSender, InlineSender};
use credbroker_identity::IdentityClient;
use credbroker_password::{PasswordGenerator, SecurePasswordGenerator};
use credbroker_platform::PlatformClient;
use tracing::{info, warn};

use crate::settings::BrokerSettings;
use crate::strategy::{
	ClientStrategy, CredentialStrategy, IssueRequest, Placement, UserStrategy,
};

/// Builder for [`Broker`].
///
/// The identity and platform clients are required; everything else has a
/// production default.
pub struct BrokerBuilder {
	identity: Arc<dyn IdentityClient>,
	platform: Arc<dyn PlatformClient>,
	sender: Arc<dyn CredentialSender>,
	passwords: Arc<dyn PasswordGenerator>,
	catalog: Catalog,
	scopes: ScopePolicy,
	settings: BrokerSettings,
}

impl BrokerBuilder {
	pub fn sender(mut self, sender: Arc<dyn CredentialSender>) -> Self {
		self.sender = sender;
		self
	}

	pub fn passwords(mut self, passwords: Arc<dyn PasswordGenerator>) -> Self {
		self.passwords = passwords;
		self
	}

	pub fn catalog(mut self, catalog: Catalog) -> Self {
		self.catalog = catalog;
		self
	}

	pub fn scopes(mut self, scopes: ScopePolicy) -> Self {
		self.scopes = scopes;
		self
	}

	pub fn settings(mut self, settings: BrokerSettings) -> Self {
		self.settings = settings;
		self
	}

	pub fn build(self) -> Broker {
		let clients = ClientStrategy::new(
			Arc::clone(&self.identity),
			Arc::clone(&self.passwords),
			self.scopes,
			self.settings.clone(),
		);
		let users = UserStrategy::new(
			self.identity,
			self.platform,
			self.passwords,
			self.settings,
		);
		Broker {
			catalog: self.catalog,
			sender: self.sender,
			clients,
			users,
		}
	}
}

/// Marketplace operations over the catalog's credential strategies.
pub struct Broker {
	catalog: Catalog,
	sender: Arc<dyn CredentialSender>,
	clients: ClientStrategy,
	users: UserStrategy,
}

impl Broker {
	pub fn builder(
		identity: Arc<dyn IdentityClient>,
		platform: Arc<dyn PlatformClient>,
	) -> BrokerBuilder {
		BrokerBuilder {
			identity,
			platform,
			sender: Arc::new(InlineSender),
			passwords: Arc::new(SecurePasswordGenerator),
			catalog: Catalog::builtin(),
			scopes: ScopePolicy::default(),
			settings: BrokerSettings::default(),
		}
	}

	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	fn strategy(&self, kind: StrategyKind) -> &dyn CredentialStrategy {
		match kind {
			StrategyKind::OAuthClient => &self.clients,
			StrategyKind::PlatformUser => &self.users,
		}
	}

	fn issuer(&self, plan: PlanKind) -> &dyn CredentialStrategy {
		self.strategy(plan.strategy())
	}

	/// Issue credentials named after the instance and deliver them through the
	/// configured sender. The delivery link is the dashboard URL. Fails with
	/// `NotSupported` before any remote call when the sender never discloses.
	#[tracing::instrument(
		skip(self, request),
		fields(instance_id = %request.instance_id, service_id = %request.service_id, plan_id = %request.plan_id)
	)]
	pub async fn provision(&self, request: ProvisionRequest) -> Result<ProvisionResponse> {
		let plan = self.catalog.resolve(&request.service_id, &request.plan_id)?;
		if !self.sender.discloses() {
			warn!("no credential delivery configured, refusing to provision an undisclosable secret");
			return Err(BrokerError::NotSupported("provisioning without credential delivery"));
		}
		let issued = self
			.issuer(plan)
			.issue(IssueRequest {
				id: &request.instance_id,
				plan,
				raw_parameters: request.raw_parameters.as_deref(),
				placement: Placement::Space {
					organization_guid: request.organization_guid.as_deref(),
					space_guid: request.space_guid.as_deref(),
				},
			})
			.await?;

		let link = self
			.sender
			.send(&issued.delivery_message())
			.await
			.map_err(|e| {
				let err = BrokerError::from(e);
				warn!(id = issued.id(), error = %err, "credential delivery failed, issued credential remains");
				err
			})?;

		info!(instance_id = %request.instance_id, delivered = !link.is_empty(), "provisioned");
		Ok(ProvisionResponse {
			dashboard_url: (!link.is_empty()).then_some(link),
			is_async: false,
		})
	}

	/// Issue credentials named after the binding and return them inline.
	#[tracing::instrument(
		skip(self, request),
		fields(instance_id = %request.instance_id, binding_id = %request.binding_id, service_id = %request.service_id, plan_id = %request.plan_id)
	)]
	pub async fn bind(&self, request: BindRequest) -> Result<BindResponse> {
		let plan = self.catalog.resolve(&request.service_id, &request.plan_id)?;
		let issued = self
			.issuer(plan)
			.issue(IssueRequest {
				id: &request.binding_id,
				plan,
				raw_parameters: request.raw_parameters.as_deref(),
				placement: Placement::ServiceInstance(&request.instance_id),
			})
			.await?;

		info!(binding_id = %request.binding_id, "bound");
		Ok(BindResponse {
			credentials: issued.into_credentials(),
		})
	}

	#[tracing::instrument(
		skip(self, request),
		fields(instance_id = %request.instance_id, service_id = %request.service_id)
	)]
	pub async fn deprovision(&self, request: DeprovisionRequest) -> Result<DeprovisionResponse> {
		let kind = self.catalog.strategy(&request.service_id)?;
		self.strategy(kind).revoke(&request.instance_id).await?;
		info!(instance_id = %request.instance_id, "deprovisioned");
		Ok(DeprovisionResponse { is_async: false })
	}

	#[tracing::instrument(
		skip(self, request),
		fields(instance_id = %request.instance_id, binding_id = %request.binding_id, service_id = %request.service_id)
	)]
	pub async fn unbind(&self, request: UnbindRequest) -> Result<()> {
		let kind = self.catalog.strategy(&request.service_id)?;
		self.strategy(kind).revoke(&request.binding_id).await?;
		info!(binding_id = %request.binding_id, "unbound");
		Ok(())
	}

	pub async fn update(&self, request: UpdateRequest) -> Result<()> {
		warn!(instance_id = %request.instance_id, "rejected update");
		Err(BrokerError::NotSupported("update"))
	}

	pub async fn last_operation(&self, request: LastOperationRequest) -> Result<()> {
		warn!(instance_id = %request.instance_id, "rejected last operation poll");
		Err(BrokerError::NotSupported("last operation"))
	}
}
