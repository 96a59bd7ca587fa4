// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential delivery.
//!
//! A provisioned instance has no binding response to carry its secret, so the
//! credential is handed to a one-time-link service and the resulting link is
//! returned as the instance's dashboard URL.

use async_trait::async_trait;
use credbroker_common_secret::SecretString;
use credbroker_core::BrokerError;
use reqwest::{header::LOCATION, Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum DeliveryError {
	#[error("expected status 302 or 201 from link service, got {status}: {body}")]
	UnexpectedStatus { status: u16, body: String },

	#[error("link service response has no Location header")]
	MissingLocation,

	#[error("request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error(transparent)]
	Endpoint(#[from] credbroker_common_http::EndpointError),
}

impl From<DeliveryError> for BrokerError {
	fn from(err: DeliveryError) -> Self {
		BrokerError::Delivery(err.to_string())
	}
}

pub type Result<T> = std::result::Result<T, DeliveryError>;

/// Hands a credential message to its recipient.
#[async_trait]
pub trait CredentialSender: Send + Sync {
	/// Deliver `message` and return a link to it, or an empty string when the
	/// sender produces no link.
	async fn send(&self, message: &SecretString) -> Result<String>;

	/// Whether a sent message reaches anyone. A provisioned secret is only
	/// ever shown through the sender, so provisioning requires this.
	fn discloses(&self) -> bool {
		true
	}
}

/// Discards the message and produces no link.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineSender;

#[async_trait]
impl CredentialSender for InlineSender {
	async fn send(&self, _message: &SecretString) -> Result<String> {
		Ok(String::new())
	}

	fn discloses(&self) -> bool {
		false
	}
}

#[derive(Serialize)]
struct LinkRequest<'a> {
	message: LinkMessage<'a>,
}

#[derive(Serialize)]
struct LinkMessage<'a> {
	body: &'a str,
	hours: u32,
	max_views: u32,
}

/// Posts the message to an ephemeral-link service at `{endpoint}/m`.
///
/// The service answers with a redirect to the new link; `client` must not
/// follow redirects.
pub struct OneTimeLinkSender {
	client: Client,
	endpoint: String,
	hours: u32,
	max_views: u32,
}

impl OneTimeLinkSender {
	pub fn new(client: Client, endpoint: impl Into<String>, hours: u32, max_views: u32) -> Self {
		Self {
			client,
			endpoint: endpoint.into(),
			hours,
			max_views,
		}
	}
}

#[async_trait]
impl CredentialSender for OneTimeLinkSender {
	#[tracing::instrument(skip(self, message), fields(endpoint = %self.endpoint))]
	async fn send(&self, message: &SecretString) -> Result<String> {
		let url = credbroker_common_http::join(&self.endpoint, &["m"])?;
		let request = LinkRequest {
			message: LinkMessage {
				body: message.expose(),
				hours: self.hours,
				max_views: self.max_views,
			},
		};

		let response = self
			.client
			.post(url)
			.header("Accept", "application/json")
			.json(&request)
			.send()
			.await?;

		let status = response.status();
		if status != StatusCode::FOUND && status != StatusCode::CREATED {
			let body = response.text().await.unwrap_or_default();
			warn!(status = status.as_u16(), "link service rejected message");
			return Err(DeliveryError::UnexpectedStatus {
				status: status.as_u16(),
				body,
			});
		}

		let link = response
			.headers()
			.get(LOCATION)
			.and_then(|v| v.to_str().ok())
			.map(str::to_string)
			.ok_or(DeliveryError::MissingLocation)?;

		info!(hours = self.hours, max_views = self.max_views, "created one-time credential link");
		Ok(link)
	}
}
