// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Timeout applied to every outbound call unless configured otherwise.
///
/// The broker performs no retries of its own, so this bounds how long a
/// single provisioning step can block.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates a new HTTP client builder with the standard broker User-Agent.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Creates a client with the given timeout.
pub fn new_client(timeout: Duration) -> reqwest::Result<Client> {
	builder().timeout(timeout).build()
}

/// Creates a client that returns 3xx responses to the caller instead of
/// following them.
pub fn new_no_redirect_client(timeout: Duration) -> reqwest::Result<Client> {
	builder()
		.timeout(timeout)
		.redirect(Policy::none())
		.build()
}

/// Returns the standard User-Agent string.
///
/// Format: `credbroker/{version}`
pub fn user_agent() -> String {
	format!("credbroker/{}", env!("CARGO_PKG_VERSION"))
}
