// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Platform system client.
//!
//! [`PlatformClient`] covers what the broker does on the platform side: mirror
//! an identity user as a platform user, grant it an organization and a space
//! role, look up which space and organization a service instance lives in,
//! and delete the user again. [`CloudFoundryClient`] implements it against
//! the Cloud Foundry v3 API using the broker's client-credentials token.

mod client;
mod error;
mod types;

pub use client::{CloudFoundryClient, PlatformClient};
pub use error::{PlatformError, Result};
