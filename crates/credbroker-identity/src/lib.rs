// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity system client.
//!
//! [`IdentityClient`] is the seam the provisioning orchestrator talks to.
//! [`UaaClient`] implements it against a UAA-shaped REST API: OAuth clients
//! under `/oauth/clients`, SCIM users under `/Users`. Every request carries the
//! configured `X-Identity-Zone-Id` and a bearer token obtained through the
//! client-credentials grant ([`ClientCredentialsTokenSource`]).

mod client;
mod error;
mod token;
mod types;

pub use client::{IdentityClient, UaaClient, ZONE_HEADER};
pub use error::{IdentityError, Result};
pub use token::{ClientCredentialsTokenSource, TokenError, TokenSource};
pub use types::{Email, IdentityUser, NewUser, OAuthClient, AUTHORIZED_GRANT_TYPES};
