// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Marketplace operation inputs and outputs.
//!
//! These are transient; nothing here is persisted.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct ProvisionRequest {
	pub instance_id: String,
	pub service_id: String,
	pub plan_id: String,
	pub organization_guid: Option<String>,
	pub space_guid: Option<String>,
	/// Raw JSON `parameters` document, if the caller sent one.
	pub raw_parameters: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default)]
pub struct BindRequest {
	pub instance_id: String,
	pub binding_id: String,
	pub service_id: String,
	pub plan_id: String,
	pub raw_parameters: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default)]
pub struct DeprovisionRequest {
	pub instance_id: String,
	pub service_id: String,
	pub plan_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct UnbindRequest {
	pub instance_id: String,
	pub binding_id: String,
	pub service_id: String,
	pub plan_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
	pub instance_id: String,
	pub service_id: String,
	pub plan_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LastOperationRequest {
	pub instance_id: String,
	pub operation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisionResponse {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub dashboard_url: Option<String>,
	#[serde(skip)]
	pub is_async: bool,
}

/// Disclosed credentials.
///
/// Values are plain strings: this map is the one point where a generated
/// secret leaves the process, and it is built only after every remote call
/// has succeeded.
pub type Credentials = BTreeMap<String, String>;

#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct BindResponse {
	pub credentials: Credentials,
}

impl std::fmt::Debug for BindResponse {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BindResponse")
			.field("credentials", &self.credentials.keys().collect::<Vec<_>>())
			.finish()
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeprovisionResponse {
	#[serde(skip)]
	pub is_async: bool,
}
