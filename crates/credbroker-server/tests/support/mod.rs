// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Always-succeeding collaborators and request helpers for router tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use credbroker_common_secret::SecretString;
use credbroker_core::{OrgRole, SpaceRole};
use credbroker_delivery::{CredentialSender, DeliveryError};
use credbroker_identity::{IdentityClient, IdentityError, IdentityUser, NewUser, OAuthClient};
use credbroker_password::{PasswordGenerator, PasswordError};
use credbroker_platform::{PlatformClient, PlatformError};
use credbroker_provisioning::Broker;
use credbroker_server::{create_router, BasicCredentials};
use serde_json::Value;

pub const USERNAME: &str = "broker";
pub const PASSWORD: &str = "broker-password";
pub const FIXED_SECRET: &str = "Fixed-Secret-0123456789!";
pub const LINK: &str = "https://links.example/m/abc";

#[derive(Default)]
pub struct StubIdentity {
	pub clients: Mutex<Vec<String>>,
	pub users: Mutex<Vec<String>>,
}

#[async_trait]
impl IdentityClient for StubIdentity {
	async fn create_client(&self, client: &OAuthClient) -> Result<(), IdentityError> {
		self.clients.lock().unwrap().push(client.client_id.clone());
		Ok(())
	}

	async fn delete_client(&self, _client_id: &str) -> Result<(), IdentityError> {
		Ok(())
	}

	async fn find_user(&self, _username: &str) -> Result<Option<IdentityUser>, IdentityError> {
		Ok(None)
	}

	async fn create_user(&self, user: &NewUser) -> Result<IdentityUser, IdentityError> {
		self.users.lock().unwrap().push(user.user_name.clone());
		Ok(IdentityUser {
			id: format!("uaa-{}", user.user_name),
			user_name: user.user_name.clone(),
			active: true,
			emails: user.emails.clone(),
		})
	}

	async fn delete_user(&self, _user_id: &str) -> Result<(), IdentityError> {
		Ok(())
	}
}

pub struct StubPlatform;

#[async_trait]
impl PlatformClient for StubPlatform {
	async fn service_instance_space(&self, _instance_guid: &str) -> Result<String, PlatformError> {
		Ok("space-1".to_string())
	}

	async fn space_organization(&self, _space_guid: &str) -> Result<String, PlatformError> {
		Ok("org-1".to_string())
	}

	async fn create_user(&self, _user_guid: &str) -> Result<(), PlatformError> {
		Ok(())
	}

	async fn delete_user(&self, _user_guid: &str) -> Result<(), PlatformError> {
		Ok(())
	}

	async fn associate_org_role(
		&self,
		_org_guid: &str,
		_username: &str,
		_role: OrgRole,
	) -> Result<(), PlatformError> {
		Ok(())
	}

	async fn associate_space_role(
		&self,
		_space_guid: &str,
		_username: &str,
		_role: SpaceRole,
	) -> Result<(), PlatformError> {
		Ok(())
	}
}

pub struct FixedPasswords;

impl PasswordGenerator for FixedPasswords {
	fn generate(&self, _length: usize) -> Result<SecretString, PasswordError> {
		Ok(SecretString::from(FIXED_SECRET))
	}
}

pub struct StubSender;

#[async_trait]
impl CredentialSender for StubSender {
	async fn send(&self, _message: &SecretString) -> Result<String, DeliveryError> {
		Ok(LINK.to_string())
	}
}

/// Router over a broker with no credential delivery.
pub fn app() -> (Router, Arc<StubIdentity>) {
	router(None)
}

pub fn app_with_delivery() -> (Router, Arc<StubIdentity>) {
	router(Some(Arc::new(StubSender)))
}

fn router(sender: Option<Arc<dyn CredentialSender>>) -> (Router, Arc<StubIdentity>) {
	let identity = Arc::new(StubIdentity::default());
	let mut builder = Broker::builder(identity.clone(), Arc::new(StubPlatform))
		.passwords(Arc::new(FixedPasswords));
	if let Some(sender) = sender {
		builder = builder.sender(sender);
	}
	let broker = builder.build();
	let router = create_router(
		Arc::new(broker),
		BasicCredentials::new(USERNAME, SecretString::from(PASSWORD)),
	);
	(router, identity)
}

pub fn basic(username: &str, password: &str) -> String {
	format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

pub fn authed(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
	let builder = Request::builder()
		.method(method)
		.uri(uri)
		.header(header::AUTHORIZATION, basic(USERNAME, PASSWORD))
		.header("X-Broker-API-Version", "2.14");
	match body {
		Some(json) => builder
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(json.to_string()))
			.unwrap(),
		None => builder.body(Body::empty()).unwrap(),
	}
}

pub async fn json_body(response: axum::response::Response) -> Value {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&bytes).unwrap()
}
