// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	Json,
};
use credbroker_core::{BindRequest, BindResponse, UnbindRequest};
use serde::Deserialize;
use serde_json::Value;

use super::instances::ServicePlanQuery;
use super::raw_parameters;
use crate::error::ApiError;
use crate::routes::BrokerState;

#[derive(Debug, Deserialize)]
pub struct BindBody {
	pub service_id: String,
	pub plan_id: String,
	#[serde(default)]
	pub parameters: Option<Value>,
}

pub async fn bind(
	State(broker): State<BrokerState>,
	Path((instance_id, binding_id)): Path<(String, String)>,
	Json(body): Json<BindBody>,
) -> Result<(StatusCode, Json<BindResponse>), ApiError> {
	let response = broker
		.bind(BindRequest {
			instance_id,
			binding_id,
			service_id: body.service_id,
			plan_id: body.plan_id,
			raw_parameters: raw_parameters(body.parameters),
		})
		.await?;
	Ok((StatusCode::CREATED, Json(response)))
}

pub async fn unbind(
	State(broker): State<BrokerState>,
	Path((instance_id, binding_id)): Path<(String, String)>,
	Query(query): Query<ServicePlanQuery>,
) -> Result<Json<Value>, ApiError> {
	broker
		.unbind(UnbindRequest {
			instance_id,
			binding_id,
			service_id: query.service_id,
			plan_id: query.plan_id,
		})
		.await?;
	Ok(Json(serde_json::json!({})))
}
