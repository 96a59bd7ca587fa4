// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Platform role types granted to provisioned users.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Organization-level role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgRole {
	/// Plain membership, required before any space role can be granted.
	OrganizationUser,
}

impl OrgRole {
	pub fn as_str(&self) -> &'static str {
		match self {
			OrgRole::OrganizationUser => "organization_user",
		}
	}
}

impl fmt::Display for OrgRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Space-level role, selected by plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceRole {
	SpaceDeveloper,
	SpaceAuditor,
}

impl SpaceRole {
	pub fn as_str(&self) -> &'static str {
		match self {
			SpaceRole::SpaceDeveloper => "space_developer",
			SpaceRole::SpaceAuditor => "space_auditor",
		}
	}
}

impl fmt::Display for SpaceRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
