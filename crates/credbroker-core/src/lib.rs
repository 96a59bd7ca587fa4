// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the credential broker.
//!
//! Holds the fixed catalog and its plan-to-strategy mapping, the marketplace
//! request/response shapes, the scope allow-list and the parser for
//! caller-supplied bind parameters. Nothing in this crate talks to a remote
//! system.

pub mod catalog;
pub mod error;
pub mod options;
pub mod request;
pub mod roles;
pub mod scope;

pub use catalog::{
	Catalog, CatalogDocument, CatalogError, PlanKind, ServiceOffering, ServicePlan, StrategyKind,
	OAUTH_CLIENT_PLAN_ID, OAUTH_CLIENT_SERVICE_ID, SPACE_AUDITOR_PLAN_ID, SPACE_DEPLOYER_PLAN_ID,
	SPACE_DEPLOYER_SERVICE_ID,
};
pub use error::{BrokerError, Result};
pub use options::{parse_bind_options, BindOptions};
pub use request::{
	BindRequest, BindResponse, Credentials, DeprovisionRequest, DeprovisionResponse,
	LastOperationRequest, ProvisionRequest, ProvisionResponse, UnbindRequest, UpdateRequest,
};
pub use roles::{OrgRole, SpaceRole};
pub use scope::{ScopePolicy, DEFAULT_SCOPE};
