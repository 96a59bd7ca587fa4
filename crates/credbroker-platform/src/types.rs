// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cloud Foundry v3 request and response fragments.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct GuidRef {
	pub guid: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ToOne {
	pub data: GuidRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceInstanceRelationships {
	pub space: ToOne,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceInstanceResource {
	pub relationships: ServiceInstanceRelationships,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpaceRelationships {
	pub organization: ToOne,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpaceResource {
	pub relationships: SpaceRelationships,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateUser<'a> {
	pub guid: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UsernameRef<'a> {
	pub username: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Data<T> {
	pub data: T,
}

#[derive(Debug, Serialize)]
pub(crate) struct TargetRef<'a> {
	pub guid: &'a str,
}

/// `POST /v3/roles` body; exactly one of `organization` or `space` is set.
#[derive(Debug, Serialize)]
pub(crate) struct CreateRole<'a> {
	#[serde(rename = "type")]
	pub role_type: &'a str,
	pub relationships: RoleRelationships<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RoleRelationships<'a> {
	pub user: Data<UsernameRef<'a>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub organization: Option<Data<TargetRef<'a>>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub space: Option<Data<TargetRef<'a>>>,
}

impl<'a> CreateRole<'a> {
	pub fn organization(role_type: &'a str, org_guid: &'a str, username: &'a str) -> Self {
		Self {
			role_type,
			relationships: RoleRelationships {
				user: Data {
					data: UsernameRef { username },
				},
				organization: Some(Data {
					data: TargetRef { guid: org_guid },
				}),
				space: None,
			},
		}
	}

	pub fn space(role_type: &'a str, space_guid: &'a str, username: &'a str) -> Self {
		Self {
			role_type,
			relationships: RoleRelationships {
				user: Data {
					data: UsernameRef { username },
				},
				organization: None,
				space: Some(Data {
					data: TargetRef { guid: space_guid },
				}),
			},
		}
	}
}
