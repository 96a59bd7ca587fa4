// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The fixed service catalog and plan-to-strategy table.
//!
//! Offering and plan ids are constants. A deployment may load a catalog
//! document to rename, re-describe or hide offerings and plans, but every id
//! in the document must already exist here and the strategy behind each plan
//! never comes from outside the binary.

use crate::error::{BrokerError, Result};
use crate::roles::SpaceRole;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const OAUTH_CLIENT_SERVICE_ID: &str = "c834bcbe-6364-409e-b397-1774135a182c";
pub const OAUTH_CLIENT_PLAN_ID: &str = "e42ab893-c245-4d1a-b721-f63b274a131c";
pub const SPACE_DEPLOYER_SERVICE_ID: &str = "964bd86d-72fa-4852-957f-e4cd802de34b";
pub const SPACE_DEPLOYER_PLAN_ID: &str = "074e652b-b77b-4ac3-8d5b-52144486b1a3";
pub const SPACE_AUDITOR_PLAN_ID: &str = "a14fff22-c0fa-4c1b-b13c-1d4f0f9ae2c1";

/// Which credential strategy serves an offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
	OAuthClient,
	PlatformUser,
}

/// What a plan issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanKind {
	OAuthClient,
	PlatformUser { space_role: SpaceRole },
}

impl PlanKind {
	pub fn strategy(&self) -> StrategyKind {
		match self {
			PlanKind::OAuthClient => StrategyKind::OAuthClient,
			PlanKind::PlatformUser { .. } => StrategyKind::PlatformUser,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServicePlan {
	pub id: String,
	pub name: String,
	pub description: String,
	#[serde(skip)]
	pub kind: PlanKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceOffering {
	pub id: String,
	pub name: String,
	pub description: String,
	pub bindable: bool,
	pub plans: Vec<ServicePlan>,
}

impl ServiceOffering {
	pub fn plan(&self, plan_id: &str) -> Option<&ServicePlan> {
		self.plans.iter().find(|p| p.id == plan_id)
	}

	/// The plan kind shared by every plan, if they all agree.
	fn uniform_kind(&self) -> Option<PlanKind> {
		let first = self.plans.first()?.kind;
		self.plans.iter().all(|p| p.kind == first).then_some(first)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
	services: Vec<ServiceOffering>,
}

impl Default for Catalog {
	fn default() -> Self {
		Self::builtin()
	}
}

impl Catalog {
	/// The compiled-in offerings.
	pub fn builtin() -> Self {
		Self {
			services: vec![
				ServiceOffering {
					id: OAUTH_CLIENT_SERVICE_ID.to_string(),
					name: "oauth-client".to_string(),
					description: "OAuth client credentials".to_string(),
					bindable: true,
					plans: vec![ServicePlan {
						id: OAUTH_CLIENT_PLAN_ID.to_string(),
						name: "oauth-client".to_string(),
						description: "OAuth client credentials".to_string(),
						kind: PlanKind::OAuthClient,
					}],
				},
				ServiceOffering {
					id: SPACE_DEPLOYER_SERVICE_ID.to_string(),
					name: "space-deployer".to_string(),
					description: "Platform user scoped to a single space".to_string(),
					bindable: true,
					plans: vec![
						ServicePlan {
							id: SPACE_DEPLOYER_PLAN_ID.to_string(),
							name: "space-deployer".to_string(),
							description: "Space developer account".to_string(),
							kind: PlanKind::PlatformUser {
								space_role: SpaceRole::SpaceDeveloper,
							},
						},
						ServicePlan {
							id: SPACE_AUDITOR_PLAN_ID.to_string(),
							name: "space-auditor".to_string(),
							description: "Space auditor account".to_string(),
							kind: PlanKind::PlatformUser {
								space_role: SpaceRole::SpaceAuditor,
							},
						},
					],
				},
			],
		}
	}

	pub fn services(&self) -> &[ServiceOffering] {
		&self.services
	}

	pub fn offering(&self, service_id: &str) -> Result<&ServiceOffering> {
		self.services
			.iter()
			.find(|s| s.id == service_id)
			.ok_or_else(|| BrokerError::UnknownService(service_id.to_string()))
	}

	/// Map a (service, plan) pair to what it issues.
	///
	/// An empty `plan_id` is accepted only when every plan of the offering
	/// issues the same kind of credential.
	pub fn resolve(&self, service_id: &str, plan_id: &str) -> Result<PlanKind> {
		let offering = self.offering(service_id)?;
		if plan_id.is_empty() {
			return offering
				.uniform_kind()
				.ok_or_else(|| BrokerError::UnknownPlan(plan_id.to_string()));
		}
		offering
			.plan(plan_id)
			.map(|p| p.kind)
			.ok_or_else(|| BrokerError::UnknownPlan(plan_id.to_string()))
	}

	/// The strategy behind an offering, for teardown where the role is
	/// irrelevant.
	pub fn strategy(&self, service_id: &str) -> Result<StrategyKind> {
		let offering = self.offering(service_id)?;
		offering
			.plans
			.first()
			.map(|p| p.kind.strategy())
			.ok_or_else(|| BrokerError::UnknownService(service_id.to_string()))
	}

	/// Restrict and relabel the builtin catalog with a deployment document.
	pub fn with_document(&self, document: CatalogDocument) -> std::result::Result<Self, CatalogError> {
		let mut services = Vec::with_capacity(document.services.len());
		for entry in document.services {
			let builtin = self
				.services
				.iter()
				.find(|s| s.id == entry.id)
				.ok_or_else(|| CatalogError::UnknownService(entry.id.clone()))?;

			if entry.plans.is_empty() {
				return Err(CatalogError::NoPlans(entry.id));
			}

			let mut plans = Vec::with_capacity(entry.plans.len());
			for plan in entry.plans {
				let known = builtin
					.plan(&plan.id)
					.ok_or_else(|| CatalogError::UnknownPlan(plan.id.clone()))?;
				plans.push(ServicePlan {
					id: known.id.clone(),
					name: plan.name,
					description: plan.description,
					kind: known.kind,
				});
			}

			debug!(service_id = %builtin.id, name = %entry.name, plans = plans.len(), "catalog entry overridden");
			services.push(ServiceOffering {
				id: builtin.id.clone(),
				name: entry.name,
				description: entry.description,
				bindable: entry.bindable.unwrap_or(builtin.bindable),
				plans,
			});
		}
		Ok(Self { services })
	}
}

/// Errors from loading a catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
	#[error("failed to read catalog {path}: {source}")]
	Read {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse catalog: {0}")]
	Parse(#[from] serde_json::Error),

	#[error("catalog names unknown service id {0}")]
	UnknownService(String),

	#[error("catalog names unknown plan id {0}")]
	UnknownPlan(String),

	#[error("catalog service {0} has no plans")]
	NoPlans(String),
}

/// A catalog document as written by operators.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDocument {
	pub services: Vec<OfferingEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OfferingEntry {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub bindable: Option<bool>,
	pub plans: Vec<PlanEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanEntry {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub description: String,
}

impl CatalogDocument {
	pub fn from_json(bytes: &[u8]) -> std::result::Result<Self, CatalogError> {
		Ok(serde_json::from_slice(bytes)?)
	}

	pub fn load(path: &Path) -> std::result::Result<Self, CatalogError> {
		let bytes = std::fs::read(path).map_err(|source| CatalogError::Read {
			path: path.display().to_string(),
			source,
		})?;
		Self::from_json(&bytes)
	}
}
