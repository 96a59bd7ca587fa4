// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Service instance routes: provision, update, deprovision, last operation.

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	Json,
};
use credbroker_core::{
	DeprovisionRequest, DeprovisionResponse, LastOperationRequest, ProvisionRequest,
	ProvisionResponse, UpdateRequest,
};
use serde::Deserialize;
use serde_json::Value;

use super::raw_parameters;
use crate::error::ApiError;
use crate::routes::BrokerState;

/// Platform context; newer marketplaces send the org and space here instead
/// of at the top level.
#[derive(Debug, Default, Deserialize)]
pub struct PlatformContext {
	#[serde(default)]
	pub organization_guid: Option<String>,
	#[serde(default)]
	pub space_guid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProvisionBody {
	pub service_id: String,
	pub plan_id: String,
	#[serde(default)]
	pub organization_guid: Option<String>,
	#[serde(default)]
	pub space_guid: Option<String>,
	#[serde(default)]
	pub context: Option<PlatformContext>,
	#[serde(default)]
	pub parameters: Option<Value>,
}

impl ProvisionBody {
	fn into_request(self, instance_id: String) -> ProvisionRequest {
		let context = self.context.unwrap_or_default();
		ProvisionRequest {
			instance_id,
			service_id: self.service_id,
			plan_id: self.plan_id,
			organization_guid: self.organization_guid.or(context.organization_guid),
			space_guid: self.space_guid.or(context.space_guid),
			raw_parameters: raw_parameters(self.parameters),
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
	#[serde(default)]
	pub service_id: String,
	#[serde(default)]
	pub plan_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ServicePlanQuery {
	pub service_id: String,
	pub plan_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LastOperationQuery {
	#[serde(default)]
	pub operation: Option<String>,
}

pub async fn provision(
	State(broker): State<BrokerState>,
	Path(instance_id): Path<String>,
	Json(body): Json<ProvisionBody>,
) -> Result<(StatusCode, Json<ProvisionResponse>), ApiError> {
	let response = broker.provision(body.into_request(instance_id)).await?;
	Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update(
	State(broker): State<BrokerState>,
	Path(instance_id): Path<String>,
	Json(body): Json<UpdateBody>,
) -> Result<Json<Value>, ApiError> {
	broker
		.update(UpdateRequest {
			instance_id,
			service_id: body.service_id,
			plan_id: body.plan_id,
		})
		.await?;
	Ok(Json(serde_json::json!({})))
}

pub async fn deprovision(
	State(broker): State<BrokerState>,
	Path(instance_id): Path<String>,
	Query(query): Query<ServicePlanQuery>,
) -> Result<Json<DeprovisionResponse>, ApiError> {
	let response = broker
		.deprovision(DeprovisionRequest {
			instance_id,
			service_id: query.service_id,
			plan_id: query.plan_id,
		})
		.await?;
	Ok(Json(response))
}

pub async fn last_operation(
	State(broker): State<BrokerState>,
	Path(instance_id): Path<String>,
	Query(query): Query<LastOperationQuery>,
) -> Result<Json<Value>, ApiError> {
	broker
		.last_operation(LastOperationRequest {
			instance_id,
			operation: query.operation,
		})
		.await?;
	Ok(Json(serde_json::json!({})))
}
