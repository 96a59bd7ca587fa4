// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Service-marketplace HTTP API.
//!
//! Every `/v2` route requires HTTP Basic credentials matching the configured
//! broker username and password. `/health` is unauthenticated.

pub mod app;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;

pub use app::{basic_credentials, build_broker, StartupError};
pub use auth::BasicCredentials;
pub use error::{ApiError, ErrorBody};
pub use routes::{create_router, BrokerState};
