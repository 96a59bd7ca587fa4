// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use axum::{
	middleware,
	routing::{get, put},
	Router,
};
use credbroker_provisioning::Broker;

use crate::auth::{basic_auth_middleware, BasicCredentials};
use crate::handlers::{bindings, catalog, health, instances};

pub type BrokerState = Arc<Broker>;

pub fn create_router(broker: BrokerState, credentials: BasicCredentials) -> Router {
	let api = Router::new()
		.route("/v2/catalog", get(catalog::get_catalog))
		.route(
			"/v2/service_instances/{instance_id}",
			put(instances::provision)
				.patch(instances::update)
				.delete(instances::deprovision),
		)
		.route(
			"/v2/service_instances/{instance_id}/last_operation",
			get(instances::last_operation),
		)
		.route(
			"/v2/service_instances/{instance_id}/service_bindings/{binding_id}",
			put(bindings::bind).delete(bindings::unbind),
		)
		.layer(middleware::from_fn_with_state(
			Arc::new(credentials),
			basic_auth_middleware,
		))
		.with_state(broker);

	Router::new()
		.route("/health", get(health::health))
		.merge(api)
}
