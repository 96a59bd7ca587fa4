// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Recording fakes for the broker's collaborators.
//!
//! All fakes share one [`Recorder`] so tests can assert on the order of calls
//! across the identity and platform systems.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use credbroker_common_secret::SecretString;
use credbroker_core::{OrgRole, SpaceRole};
use credbroker_delivery::{CredentialSender, DeliveryError};
use credbroker_identity::{IdentityClient, IdentityError, IdentityUser, NewUser, OAuthClient};
use credbroker_password::{PasswordError, PasswordGenerator};
use credbroker_platform::{PlatformClient, PlatformError};
use credbroker_provisioning::{Broker, BrokerBuilder};

pub const FIXED_SECRET: &str = "Fixed-Secret-0123456789!";
pub const LINK: &str = "https://links.example/m/abc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
	CreateClient(String),
	DeleteClient(String),
	FindUser(String),
	CreateIdentityUser(String),
	DeleteIdentityUser(String),
	InstanceSpace(String),
	SpaceOrganization(String),
	CreatePlatformUser(String),
	DeletePlatformUser(String),
	OrgRole {
		org: String,
		username: String,
		role: OrgRole,
	},
	SpaceRole {
		space: String,
		username: String,
		role: SpaceRole,
	},
	Send,
}

impl Call {
	/// Calls that change remote state.
	pub fn is_mutation(&self) -> bool {
		!matches!(
			self,
			Call::FindUser(_) | Call::InstanceSpace(_) | Call::SpaceOrganization(_) | Call::Send
		)
	}
}

#[derive(Clone, Default)]
pub struct Recorder {
	calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
	fn record(&self, call: Call) {
		self.calls.lock().unwrap().push(call);
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.lock().unwrap().clone()
	}

	pub fn mutations(&self) -> Vec<Call> {
		self.calls().into_iter().filter(Call::is_mutation).collect()
	}
}

/// How a faked operation should fail.
#[derive(Debug, Clone, Copy)]
pub enum Fail {
	NotFound,
	Status(u16),
}

impl Fail {
	fn identity(self, operation: &'static str) -> IdentityError {
		match self {
			Fail::NotFound => IdentityError::NotFound,
			Fail::Status(status) => IdentityError::UnexpectedStatus {
				operation,
				expected: 200,
				status,
				body: String::new(),
			},
		}
	}

	fn platform(self, operation: &'static str) -> PlatformError {
		match self {
			Fail::NotFound => PlatformError::NotFound,
			Fail::Status(status) => PlatformError::UnexpectedStatus {
				operation,
				expected: 201,
				status,
				body: String::new(),
			},
		}
	}
}

pub struct FakeIdentity {
	recorder: Recorder,
	pub clients: Mutex<Vec<OAuthClient>>,
	pub new_users: Mutex<Vec<NewUser>>,
	users: Mutex<HashMap<String, IdentityUser>>,
	failures: Mutex<HashMap<&'static str, Fail>>,
}

impl FakeIdentity {
	pub fn new(recorder: Recorder) -> Self {
		Self {
			recorder,
			clients: Mutex::new(Vec::new()),
			new_users: Mutex::new(Vec::new()),
			users: Mutex::new(HashMap::new()),
			failures: Mutex::new(HashMap::new()),
		}
	}

	pub fn fail(&self, operation: &'static str, fail: Fail) {
		self.failures.lock().unwrap().insert(operation, fail);
	}

	pub fn add_user(&self, username: &str, id: &str) {
		self.users.lock().unwrap().insert(
			username.to_string(),
			IdentityUser {
				id: id.to_string(),
				user_name: username.to_string(),
				active: true,
				emails: Vec::new(),
			},
		);
	}

	fn check(&self, operation: &'static str) -> Result<(), IdentityError> {
		match self.failures.lock().unwrap().get(operation) {
			Some(fail) => Err(fail.identity(operation)),
			None => Ok(()),
		}
	}
}

#[async_trait]
impl IdentityClient for FakeIdentity {
	async fn create_client(&self, client: &OAuthClient) -> Result<(), IdentityError> {
		self.recorder.record(Call::CreateClient(client.client_id.clone()));
		self.check("create_client")?;
		self.clients.lock().unwrap().push(client.clone());
		Ok(())
	}

	async fn delete_client(&self, client_id: &str) -> Result<(), IdentityError> {
		self.recorder.record(Call::DeleteClient(client_id.to_string()));
		self.check("delete_client")
	}

	async fn find_user(&self, username: &str) -> Result<Option<IdentityUser>, IdentityError> {
		self.recorder.record(Call::FindUser(username.to_string()));
		self.check("find_user")?;
		Ok(self.users.lock().unwrap().get(username).cloned())
	}

	async fn create_user(&self, user: &NewUser) -> Result<IdentityUser, IdentityError> {
		self.recorder.record(Call::CreateIdentityUser(user.user_name.clone()));
		self.check("create_user")?;
		self.new_users.lock().unwrap().push(user.clone());
		let created = IdentityUser {
			id: format!("uaa-{}", user.user_name),
			user_name: user.user_name.clone(),
			active: true,
			emails: user.emails.clone(),
		};
		self.users
			.lock()
			.unwrap()
			.insert(user.user_name.clone(), created.clone());
		Ok(created)
	}

	async fn delete_user(&self, user_id: &str) -> Result<(), IdentityError> {
		self.recorder.record(Call::DeleteIdentityUser(user_id.to_string()));
		self.check("delete_user")
	}
}

pub struct FakePlatform {
	recorder: Recorder,
	instance_spaces: Mutex<HashMap<String, String>>,
	space_orgs: Mutex<HashMap<String, String>>,
	failures: Mutex<HashMap<&'static str, Fail>>,
}

impl FakePlatform {
	pub fn new(recorder: Recorder) -> Self {
		Self {
			recorder,
			instance_spaces: Mutex::new(HashMap::new()),
			space_orgs: Mutex::new(HashMap::new()),
			failures: Mutex::new(HashMap::new()),
		}
	}

	pub fn place_instance(&self, instance: &str, space: &str, org: &str) {
		self.instance_spaces
			.lock()
			.unwrap()
			.insert(instance.to_string(), space.to_string());
		self.space_orgs
			.lock()
			.unwrap()
			.insert(space.to_string(), org.to_string());
	}

	pub fn fail(&self, operation: &'static str, fail: Fail) {
		self.failures.lock().unwrap().insert(operation, fail);
	}

	fn check(&self, operation: &'static str) -> Result<(), PlatformError> {
		match self.failures.lock().unwrap().get(operation) {
			Some(fail) => Err(fail.platform(operation)),
			None => Ok(()),
		}
	}
}

#[async_trait]
impl PlatformClient for FakePlatform {
	async fn service_instance_space(&self, instance_guid: &str) -> Result<String, PlatformError> {
		self.recorder.record(Call::InstanceSpace(instance_guid.to_string()));
		self.check("service_instance_space")?;
		self.instance_spaces
			.lock()
			.unwrap()
			.get(instance_guid)
			.cloned()
			.ok_or(PlatformError::NotFound)
	}

	async fn space_organization(&self, space_guid: &str) -> Result<String, PlatformError> {
		self.recorder.record(Call::SpaceOrganization(space_guid.to_string()));
		self.check("space_organization")?;
		self.space_orgs
			.lock()
			.unwrap()
			.get(space_guid)
			.cloned()
			.ok_or(PlatformError::NotFound)
	}

	async fn create_user(&self, user_guid: &str) -> Result<(), PlatformError> {
		self.recorder.record(Call::CreatePlatformUser(user_guid.to_string()));
		self.check("create_user")
	}

	async fn delete_user(&self, user_guid: &str) -> Result<(), PlatformError> {
		self.recorder.record(Call::DeletePlatformUser(user_guid.to_string()));
		self.check("delete_user")
	}

	async fn associate_org_role(
		&self,
		org_guid: &str,
		username: &str,
		role: OrgRole,
	) -> Result<(), PlatformError> {
		self.recorder.record(Call::OrgRole {
			org: org_guid.to_string(),
			username: username.to_string(),
			role,
		});
		self.check("associate_org_role")
	}

	async fn associate_space_role(
		&self,
		space_guid: &str,
		username: &str,
		role: SpaceRole,
	) -> Result<(), PlatformError> {
		self.recorder.record(Call::SpaceRole {
			space: space_guid.to_string(),
			username: username.to_string(),
			role,
		});
		self.check("associate_space_role")
	}
}

pub struct FixedPasswords;

impl PasswordGenerator for FixedPasswords {
	fn generate(&self, length: usize) -> Result<SecretString, PasswordError> {
		assert_eq!(length, 32, "broker should request the configured length");
		Ok(SecretString::from(FIXED_SECRET))
	}
}

pub struct ExhaustedPasswords;

impl PasswordGenerator for ExhaustedPasswords {
	fn generate(&self, _length: usize) -> Result<SecretString, PasswordError> {
		Err(PasswordError::Exhausted(1024))
	}
}

pub struct RecordingSender {
	recorder: Recorder,
	pub messages: Mutex<Vec<String>>,
	fail: bool,
}

impl RecordingSender {
	pub fn new(recorder: Recorder) -> Self {
		Self {
			recorder,
			messages: Mutex::new(Vec::new()),
			fail: false,
		}
	}

	pub fn failing(recorder: Recorder) -> Self {
		Self {
			fail: true,
			..Self::new(recorder)
		}
	}
}

#[async_trait]
impl CredentialSender for RecordingSender {
	async fn send(&self, message: &SecretString) -> Result<String, DeliveryError> {
		self.recorder.record(Call::Send);
		if self.fail {
			return Err(DeliveryError::MissingLocation);
		}
		self.messages.lock().unwrap().push(message.expose().clone());
		Ok(LINK.to_string())
	}
}

/// A broker wired to fresh fakes.
pub struct Harness {
	pub recorder: Recorder,
	pub identity: Arc<FakeIdentity>,
	pub platform: Arc<FakePlatform>,
	pub sender: Arc<RecordingSender>,
}

impl Harness {
	pub fn new() -> Self {
		let recorder = Recorder::default();
		Self {
			identity: Arc::new(FakeIdentity::new(recorder.clone())),
			platform: Arc::new(FakePlatform::new(recorder.clone())),
			sender: Arc::new(RecordingSender::new(recorder.clone())),
			recorder,
		}
	}

	pub fn builder(&self) -> BrokerBuilder {
		Broker::builder(self.identity.clone(), self.platform.clone())
			.passwords(Arc::new(FixedPasswords))
			.sender(self.sender.clone())
	}

	pub fn broker(&self) -> Broker {
		self.builder().build()
	}
}
