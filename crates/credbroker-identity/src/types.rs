// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire shapes for the identity system's client and SCIM user APIs.

use credbroker_common_secret::SecretString;
use serde::{Deserialize, Serialize};

/// Grant types given to every issued OAuth client.
pub const AUTHORIZED_GRANT_TYPES: [&str; 2] = ["authorization_code", "refresh_token"];

/// An OAuth client registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OAuthClient {
	pub client_id: String,
	#[serde(serialize_with = "credbroker_common_secret::serialize_exposed")]
	pub client_secret: SecretString,
	pub authorized_grant_types: Vec<String>,
	pub scope: Vec<String>,
	pub redirect_uri: Vec<String>,
	pub access_token_validity: u64,
	pub refresh_token_validity: u64,
	pub allowpublic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
	pub value: String,
	pub primary: bool,
}

/// Body of a SCIM create-user request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
	pub user_name: String,
	#[serde(serialize_with = "credbroker_common_secret::serialize_exposed")]
	pub password: SecretString,
	pub emails: Vec<Email>,
	pub active: bool,
}

impl NewUser {
	/// A user with a single primary email.
	pub fn new(user_name: impl Into<String>, password: SecretString, email: impl Into<String>) -> Self {
		Self {
			user_name: user_name.into(),
			password,
			emails: vec![Email {
				value: email.into(),
				primary: true,
			}],
			active: true,
		}
	}
}

/// A user as returned by the identity system.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityUser {
	pub id: String,
	pub user_name: String,
	#[serde(default)]
	pub active: bool,
	#[serde(default)]
	pub emails: Vec<Email>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserPage {
	#[serde(default, rename = "resources", alias = "Resources")]
	pub resources: Vec<IdentityUser>,
	#[serde(default, rename = "totalResults", alias = "TotalResults")]
	pub total_results: usize,
}
