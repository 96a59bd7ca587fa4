// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod support;

use std::sync::Arc;

use credbroker_common_secret::SecretString;
use credbroker_core::{
	BindRequest, BrokerError, DeprovisionRequest, LastOperationRequest, OrgRole, ProvisionRequest,
	ScopePolicy, SpaceRole, UnbindRequest, UpdateRequest, OAUTH_CLIENT_PLAN_ID,
	OAUTH_CLIENT_SERVICE_ID, SPACE_AUDITOR_PLAN_ID, SPACE_DEPLOYER_PLAN_ID,
	SPACE_DEPLOYER_SERVICE_ID,
};
use credbroker_provisioning::{Broker, BrokerSettings};
use support::{
	Call, ExhaustedPasswords, Fail, FixedPasswords, Harness, RecordingSender, FIXED_SECRET, LINK,
};

fn client_bind(binding_id: &str, parameters: &str) -> BindRequest {
	BindRequest {
		instance_id: "instance-1".to_string(),
		binding_id: binding_id.to_string(),
		service_id: OAUTH_CLIENT_SERVICE_ID.to_string(),
		plan_id: OAUTH_CLIENT_PLAN_ID.to_string(),
		raw_parameters: Some(parameters.as_bytes().to_vec()),
	}
}

fn user_bind(binding_id: &str, plan_id: &str) -> BindRequest {
	BindRequest {
		instance_id: "instance-1".to_string(),
		binding_id: binding_id.to_string(),
		service_id: SPACE_DEPLOYER_SERVICE_ID.to_string(),
		plan_id: plan_id.to_string(),
		raw_parameters: None,
	}
}

fn user_provision(instance_id: &str) -> ProvisionRequest {
	ProvisionRequest {
		instance_id: instance_id.to_string(),
		service_id: SPACE_DEPLOYER_SERVICE_ID.to_string(),
		plan_id: SPACE_DEPLOYER_PLAN_ID.to_string(),
		organization_guid: Some("org-req".to_string()),
		space_guid: Some("space-req".to_string()),
		raw_parameters: None,
	}
}

fn deprovision(service_id: &str, instance_id: &str) -> DeprovisionRequest {
	DeprovisionRequest {
		instance_id: instance_id.to_string(),
		service_id: service_id.to_string(),
		plan_id: String::new(),
	}
}

// OAuth client issuance

#[tokio::test]
async fn bind_client_plan_creates_client_with_exact_payload() {
	let harness = Harness::new();
	let broker = harness.broker();

	let response = broker
		.bind(client_bind("binding-1", r#"{"redirect_uri":["https://cloud.gov"]}"#))
		.await
		.unwrap();

	let clients = harness.identity.clients.lock().unwrap().clone();
	assert_eq!(clients.len(), 1);
	let client = &clients[0];
	assert_eq!(client.client_id, "binding-1");
	assert_eq!(client.client_secret, SecretString::from(FIXED_SECRET));
	assert_eq!(client.authorized_grant_types, vec!["authorization_code", "refresh_token"]);
	assert_eq!(client.scope, vec!["openid"]);
	assert_eq!(client.redirect_uri, vec!["https://cloud.gov"]);
	assert_eq!(client.access_token_validity, 600);
	assert_eq!(client.refresh_token_validity, 86400);
	assert!(!client.allowpublic);

	assert_eq!(response.credentials["client_id"], "binding-1");
	assert_eq!(response.credentials["client_secret"], FIXED_SECRET);
	assert_eq!(harness.recorder.calls(), vec![Call::CreateClient("binding-1".into())]);
}

#[tokio::test]
async fn forbidden_scope_fails_before_any_remote_call() {
	let harness = Harness::new();
	let broker = harness.broker();

	let err = broker
		.bind(client_bind(
			"binding-1",
			r#"{"redirect_uri":["https://a"],"scopes":["openid","cloud_controller.admin"]}"#,
		))
		.await
		.unwrap_err();

	assert!(err.is_validation());
	assert!(err.to_string().contains("cloud_controller.admin"));
	assert!(harness.recorder.calls().is_empty());
}

#[tokio::test]
async fn missing_redirect_uri_fails_before_any_remote_call() {
	let harness = Harness::new();
	let broker = harness.broker();

	let err = broker
		.bind(client_bind("binding-1", r#"{"redirect_uri":[]}"#))
		.await
		.unwrap_err();
	assert!(matches!(err, BrokerError::MissingRedirectUri));

	let mut request = client_bind("binding-1", "");
	request.raw_parameters = None;
	let err = broker.bind(request).await.unwrap_err();
	assert!(matches!(err, BrokerError::MissingConfiguration));

	assert!(harness.recorder.calls().is_empty());
}

#[tokio::test]
async fn configured_scopes_and_public_default_apply() {
	let harness = Harness::new();
	let broker = harness
		.builder()
		.scopes(ScopePolicy::new(["openid", "email"]))
		.settings(BrokerSettings {
			allow_public_default: true,
			..BrokerSettings::default()
		})
		.build();

	broker
		.bind(client_bind(
			"binding-default",
			r#"{"redirect_uri":["https://a"],"scopes":["email"]}"#,
		))
		.await
		.unwrap();
	broker
		.bind(client_bind(
			"binding-override",
			r#"{"redirect_uri":["https://a"],"allow_public":false}"#,
		))
		.await
		.unwrap();

	let clients = harness.identity.clients.lock().unwrap().clone();
	assert_eq!(clients[0].scope, vec!["email"]);
	assert!(clients[0].allowpublic);
	assert_eq!(clients[1].scope, vec!["openid"]);
	assert!(!clients[1].allowpublic);
}

#[tokio::test]
async fn provision_client_plan_delivers_through_link() {
	let harness = Harness::new();
	let broker = harness.broker();

	let response = broker
		.provision(ProvisionRequest {
			instance_id: "instance-9".to_string(),
			service_id: OAUTH_CLIENT_SERVICE_ID.to_string(),
			plan_id: OAUTH_CLIENT_PLAN_ID.to_string(),
			raw_parameters: Some(br#"{"redirect_uri":["https://a"]}"#.to_vec()),
			..Default::default()
		})
		.await
		.unwrap();

	assert_eq!(response.dashboard_url.as_deref(), Some(LINK));
	assert!(!response.is_async);
	assert_eq!(
		harness.sender.messages.lock().unwrap().clone(),
		vec![format!("instance-9 | {FIXED_SECRET}")]
	);
}

#[tokio::test]
async fn provision_without_delivery_is_rejected_before_any_call() {
	let harness = Harness::new();
	let broker = Broker::builder(harness.identity.clone(), harness.platform.clone())
		.passwords(Arc::new(FixedPasswords))
		.build();

	let err = broker
		.provision(ProvisionRequest {
			instance_id: "instance-9".to_string(),
			service_id: OAUTH_CLIENT_SERVICE_ID.to_string(),
			plan_id: OAUTH_CLIENT_PLAN_ID.to_string(),
			raw_parameters: Some(br#"{"redirect_uri":["https://a"]}"#.to_vec()),
			..Default::default()
		})
		.await
		.unwrap_err();
	assert!(matches!(err, BrokerError::NotSupported(_)));

	let err = broker.provision(user_provision("instance-10")).await.unwrap_err();
	assert!(matches!(err, BrokerError::NotSupported(_)));

	assert!(harness.recorder.calls().is_empty());
}

#[tokio::test]
async fn bind_without_delivery_still_returns_credentials() {
	let harness = Harness::new();
	let broker = Broker::builder(harness.identity.clone(), harness.platform.clone())
		.passwords(Arc::new(FixedPasswords))
		.build();

	let response = broker
		.bind(client_bind("binding-9", r#"{"redirect_uri":["https://a"]}"#))
		.await
		.unwrap();

	assert_eq!(response.credentials["client_secret"], FIXED_SECRET);
	assert_eq!(harness.recorder.calls(), vec![Call::CreateClient("binding-9".into())]);
}

#[tokio::test]
async fn deprovision_client_tolerates_not_found() {
	let harness = Harness::new();
	harness.identity.fail("delete_client", Fail::NotFound);

	harness
		.broker()
		.deprovision(deprovision(OAUTH_CLIENT_SERVICE_ID, "instance-1"))
		.await
		.unwrap();
	assert_eq!(harness.recorder.calls(), vec![Call::DeleteClient("instance-1".into())]);
}

#[tokio::test]
async fn deprovision_client_surfaces_server_error() {
	let harness = Harness::new();
	harness.identity.fail("delete_client", Fail::Status(500));

	let err = harness
		.broker()
		.deprovision(deprovision(OAUTH_CLIENT_SERVICE_ID, "instance-1"))
		.await
		.unwrap_err();
	assert!(matches!(err, BrokerError::Identity(_)));
	assert!(!err.is_validation());
}

#[tokio::test]
async fn unbind_client_deletes_by_binding_id() {
	let harness = Harness::new();
	harness
		.broker()
		.unbind(UnbindRequest {
			instance_id: "instance-1".to_string(),
			binding_id: "binding-7".to_string(),
			service_id: OAUTH_CLIENT_SERVICE_ID.to_string(),
			plan_id: OAUTH_CLIENT_PLAN_ID.to_string(),
		})
		.await
		.unwrap();
	assert_eq!(harness.recorder.calls(), vec![Call::DeleteClient("binding-7".into())]);
}

// Platform user issuance

#[tokio::test]
async fn bind_developer_plan_runs_steps_in_order() {
	let harness = Harness::new();
	harness.platform.place_instance("instance-1", "space-1", "org-1");

	let response = harness
		.broker()
		.bind(user_bind("binding-1", SPACE_DEPLOYER_PLAN_ID))
		.await
		.unwrap();

	assert_eq!(
		harness.recorder.mutations(),
		vec![
			Call::CreateIdentityUser("binding-1".into()),
			Call::CreatePlatformUser("uaa-binding-1".into()),
			Call::OrgRole {
				org: "org-1".into(),
				username: "binding-1".into(),
				role: OrgRole::OrganizationUser,
			},
			Call::SpaceRole {
				space: "space-1".into(),
				username: "binding-1".into(),
				role: SpaceRole::SpaceDeveloper,
			},
		]
	);
	assert_eq!(
		harness.recorder.calls(),
		vec![
			Call::CreateIdentityUser("binding-1".into()),
			Call::CreatePlatformUser("uaa-binding-1".into()),
			Call::InstanceSpace("instance-1".into()),
			Call::SpaceOrganization("space-1".into()),
			Call::OrgRole {
				org: "org-1".into(),
				username: "binding-1".into(),
				role: OrgRole::OrganizationUser,
			},
			Call::SpaceRole {
				space: "space-1".into(),
				username: "binding-1".into(),
				role: SpaceRole::SpaceDeveloper,
			},
		]
	);

	assert_eq!(response.credentials["username"], "binding-1");
	assert_eq!(response.credentials["password"], FIXED_SECRET);

	let new_users = harness.identity.new_users.lock().unwrap().clone();
	assert_eq!(new_users.len(), 1);
	assert_eq!(new_users[0].user_name, "binding-1");
	assert_eq!(new_users[0].emails.len(), 1);
	assert!(new_users[0].emails[0].primary);
}

#[tokio::test]
async fn bind_auditor_plan_grants_space_auditor() {
	let harness = Harness::new();
	harness.platform.place_instance("instance-1", "space-1", "org-1");

	harness
		.broker()
		.bind(user_bind("binding-2", SPACE_AUDITOR_PLAN_ID))
		.await
		.unwrap();

	assert_eq!(
		harness.recorder.mutations().last(),
		Some(&Call::SpaceRole {
			space: "space-1".into(),
			username: "binding-2".into(),
			role: SpaceRole::SpaceAuditor,
		})
	);
}

#[tokio::test]
async fn provision_user_uses_request_placement_and_delivers() {
	let harness = Harness::new();
	let settings = BrokerSettings {
		email_address: "deployer@example.gov".to_string(),
		..BrokerSettings::default()
	};
	let broker = harness.builder().settings(settings).build();

	let response = broker.provision(user_provision("instance-2")).await.unwrap();

	assert_eq!(response.dashboard_url.as_deref(), Some(LINK));
	assert_eq!(
		harness.recorder.calls(),
		vec![
			Call::CreateIdentityUser("instance-2".into()),
			Call::CreatePlatformUser("uaa-instance-2".into()),
			Call::OrgRole {
				org: "org-req".into(),
				username: "instance-2".into(),
				role: OrgRole::OrganizationUser,
			},
			Call::SpaceRole {
				space: "space-req".into(),
				username: "instance-2".into(),
				role: SpaceRole::SpaceDeveloper,
			},
			Call::Send,
		]
	);
	assert_eq!(
		harness.sender.messages.lock().unwrap().clone(),
		vec![format!("instance-2 | {FIXED_SECRET}")]
	);
	assert_eq!(
		harness.identity.new_users.lock().unwrap()[0].emails[0].value,
		"deployer@example.gov"
	);
}

#[tokio::test]
async fn provision_user_without_space_fails_before_any_remote_call() {
	let harness = Harness::new();
	let mut request = user_provision("instance-3");
	request.space_guid = None;

	let err = harness.broker().provision(request).await.unwrap_err();
	assert!(matches!(err, BrokerError::MissingContext("space_guid")));
	assert!(harness.recorder.calls().is_empty());
}

#[tokio::test]
async fn failed_role_association_is_not_rolled_back() {
	let harness = Harness::new();
	harness.platform.place_instance("instance-1", "space-1", "org-1");
	harness.platform.fail("associate_org_role", Fail::Status(422));

	let err = harness
		.broker()
		.bind(user_bind("binding-1", SPACE_DEPLOYER_PLAN_ID))
		.await
		.unwrap_err();

	assert!(matches!(err, BrokerError::Platform(_)));
	let mutations = harness.recorder.mutations();
	assert_eq!(mutations.len(), 3);
	assert!(!mutations
		.iter()
		.any(|c| matches!(c, Call::DeleteIdentityUser(_) | Call::DeletePlatformUser(_))));
}

#[tokio::test]
async fn delivery_failure_surfaces_after_issuance() {
	let harness = Harness::new();
	let broker = harness
		.builder()
		.sender(Arc::new(RecordingSender::failing(harness.recorder.clone())))
		.build();

	let err = broker.provision(user_provision("instance-4")).await.unwrap_err();
	assert!(matches!(err, BrokerError::Delivery(_)));
	assert_eq!(harness.recorder.calls().last(), Some(&Call::Send));
}

#[tokio::test]
async fn password_failure_stops_before_remote_calls() {
	let harness = Harness::new();
	let broker = harness.builder().passwords(Arc::new(ExhaustedPasswords)).build();

	let err = broker
		.bind(user_bind("binding-1", SPACE_DEPLOYER_PLAN_ID))
		.await
		.unwrap_err();
	assert!(matches!(err, BrokerError::Password(_)));
	assert!(harness.recorder.calls().is_empty());
}

// Platform user teardown

#[tokio::test]
async fn deprovision_absent_user_is_a_no_op() {
	let harness = Harness::new();
	harness
		.broker()
		.deprovision(deprovision(SPACE_DEPLOYER_SERVICE_ID, "instance-1"))
		.await
		.unwrap();
	assert_eq!(harness.recorder.calls(), vec![Call::FindUser("instance-1".into())]);
}

#[tokio::test]
async fn deprovision_user_deletes_platform_then_identity() {
	let harness = Harness::new();
	harness.identity.add_user("instance-1", "uaa-guid-1");

	harness
		.broker()
		.deprovision(deprovision(SPACE_DEPLOYER_SERVICE_ID, "instance-1"))
		.await
		.unwrap();
	assert_eq!(
		harness.recorder.calls(),
		vec![
			Call::FindUser("instance-1".into()),
			Call::DeletePlatformUser("uaa-guid-1".into()),
			Call::DeleteIdentityUser("uaa-guid-1".into()),
		]
	);
}

#[tokio::test]
async fn deprovision_resumes_after_partial_teardown() {
	let harness = Harness::new();
	harness.identity.add_user("instance-1", "uaa-guid-1");
	harness.platform.fail("delete_user", Fail::NotFound);
	harness.identity.fail("delete_user", Fail::NotFound);

	harness
		.broker()
		.deprovision(deprovision(SPACE_DEPLOYER_SERVICE_ID, "instance-1"))
		.await
		.unwrap();
	assert_eq!(harness.recorder.calls().len(), 3);
}

#[tokio::test]
async fn platform_delete_failure_aborts_teardown() {
	let harness = Harness::new();
	harness.identity.add_user("instance-1", "uaa-guid-1");
	harness.platform.fail("delete_user", Fail::Status(500));

	let err = harness
		.broker()
		.deprovision(deprovision(SPACE_DEPLOYER_SERVICE_ID, "instance-1"))
		.await
		.unwrap_err();
	assert!(matches!(err, BrokerError::Platform(_)));
	assert!(!harness
		.recorder
		.calls()
		.iter()
		.any(|c| matches!(c, Call::DeleteIdentityUser(_))));
}

#[tokio::test]
async fn unbind_user_looks_up_binding_id() {
	let harness = Harness::new();
	harness.identity.add_user("binding-5", "uaa-guid-5");

	harness
		.broker()
		.unbind(UnbindRequest {
			instance_id: "instance-1".to_string(),
			binding_id: "binding-5".to_string(),
			service_id: SPACE_DEPLOYER_SERVICE_ID.to_string(),
			plan_id: SPACE_AUDITOR_PLAN_ID.to_string(),
		})
		.await
		.unwrap();
	assert_eq!(harness.recorder.calls()[0], Call::FindUser("binding-5".into()));
	assert_eq!(harness.recorder.mutations().len(), 2);
}

// Dispatch and unsupported operations

#[tokio::test]
async fn unknown_service_and_plan_are_rejected_without_remote_calls() {
	let harness = Harness::new();
	let broker = harness.broker();

	let mut request = user_bind("binding-1", SPACE_DEPLOYER_PLAN_ID);
	request.service_id = "not-a-service".to_string();
	assert!(matches!(
		broker.bind(request).await.unwrap_err(),
		BrokerError::UnknownService(_)
	));

	let request = user_bind("binding-1", OAUTH_CLIENT_PLAN_ID);
	assert!(matches!(
		broker.bind(request).await.unwrap_err(),
		BrokerError::UnknownPlan(_)
	));

	assert!(harness.recorder.calls().is_empty());
}

#[tokio::test]
async fn update_and_last_operation_are_not_supported() {
	let harness = Harness::new();
	let broker = harness.broker();

	assert!(matches!(
		broker
			.update(UpdateRequest {
				instance_id: "instance-1".to_string(),
				..Default::default()
			})
			.await,
		Err(BrokerError::NotSupported("update"))
	));
	assert!(matches!(
		broker
			.last_operation(LastOperationRequest {
				instance_id: "instance-1".to_string(),
				operation: None,
			})
			.await,
		Err(BrokerError::NotSupported("last operation"))
	));
	assert!(harness.recorder.calls().is_empty());
}

#[test]
fn catalog_lists_builtin_offerings() {
	let harness = Harness::new();
	let broker = harness.broker();
	let ids: Vec<&str> = broker.catalog().services().iter().map(|s| s.id.as_str()).collect();
	assert_eq!(ids, vec![OAUTH_CLIENT_SERVICE_ID, SPACE_DEPLOYER_SERVICE_ID]);
}
