// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for the credential broker.
//!
//! This crate provides:
//! - A pre-configured HTTP client with a consistent User-Agent and timeout
//! - A variant that never follows redirects (one-time-link delivery reads the
//!   `Location` header of a 302)
//! - Endpoint joining that tolerates trailing slashes in configured addresses

mod client;
mod endpoint;

pub use client::{builder, new_client, new_no_redirect_client, user_agent, DEFAULT_TIMEOUT};
pub use endpoint::{join, EndpointError};
