// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Assembles the broker and its remote clients from configuration.

use std::sync::Arc;
use std::time::Duration;

use credbroker_config::BrokerConfig;
use credbroker_core::{Catalog, CatalogDocument, CatalogError, ScopePolicy};
use credbroker_delivery::{CredentialSender, InlineSender, OneTimeLinkSender};
use credbroker_identity::{ClientCredentialsTokenSource, TokenError, TokenSource, UaaClient};
use credbroker_platform::CloudFoundryClient;
use credbroker_provisioning::{Broker, BrokerSettings};
use tracing::{info, warn};

use crate::auth::BasicCredentials;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
	#[error("failed to build HTTP client: {0}")]
	HttpClient(#[from] reqwest::Error),

	#[error("invalid identity address: {0}")]
	Token(#[from] TokenError),

	#[error("failed to load catalog: {0}")]
	Catalog(#[from] CatalogError),
}

/// Build the broker with real identity, platform and delivery clients.
///
/// One client-credentials token source is shared by the identity and
/// platform clients.
pub fn build_broker(config: &BrokerConfig) -> Result<Broker, StartupError> {
	let timeout = Duration::from_secs(config.http.client_timeout_secs);
	let http = credbroker_common_http::new_client(timeout)?;

	let tokens: Arc<dyn TokenSource> = Arc::new(ClientCredentialsTokenSource::new(
		http.clone(),
		&config.identity.address,
		config.identity.client_id.clone(),
		config.identity.client_secret.clone(),
	)?);

	let identity = Arc::new(UaaClient::new(
		http.clone(),
		config.identity.address.clone(),
		config.identity.zone.clone(),
		Arc::clone(&tokens),
	));
	let platform = Arc::new(CloudFoundryClient::new(
		http,
		config.platform.address.clone(),
		tokens,
	));

	let sender: Arc<dyn CredentialSender> = match &config.delivery.address {
		Some(address) => {
			info!(address = %address, "delivering provisioned credentials as one-time links");
			Arc::new(OneTimeLinkSender::new(
				credbroker_common_http::new_no_redirect_client(timeout)?,
				address.clone(),
				config.delivery.hours,
				config.delivery.max_views,
			))
		}
		None => {
			warn!("no delivery address configured; provision requests will be refused");
			Arc::new(InlineSender)
		}
	};

	let catalog = match &config.catalog.path {
		Some(path) => {
			info!(path = %path.display(), "loading catalog document");
			Catalog::builtin().with_document(CatalogDocument::load(path)?)?
		}
		None => Catalog::builtin(),
	};

	let issuance = &config.issuance;
	Ok(Broker::builder(identity, platform)
		.sender(sender)
		.catalog(catalog)
		.scopes(ScopePolicy::new(issuance.scope_allow_list.iter().cloned()))
		.settings(BrokerSettings {
			password_length: issuance.password_length,
			email_address: issuance.email_address.clone(),
			access_token_validity: issuance.access_token_validity,
			refresh_token_validity: issuance.refresh_token_validity,
			allow_public_default: issuance.allow_public_default,
		})
		.build())
}

pub fn basic_credentials(config: &BrokerConfig) -> BasicCredentials {
	BasicCredentials::new(
		config.issuance.username.clone(),
		config.issuance.password.clone(),
	)
}
