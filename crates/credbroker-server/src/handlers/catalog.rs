// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{extract::State, Json};
use credbroker_core::Catalog;

use crate::routes::BrokerState;

pub async fn get_catalog(State(broker): State<BrokerState>) -> Json<Catalog> {
	Json(broker.catalog().clone())
}
