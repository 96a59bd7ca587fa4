// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provisioning orchestrator.
//!
//! [`Broker`] maps each marketplace operation onto a credential strategy
//! chosen from the catalog:
//!
//! - [`ClientStrategy`] issues an OAuth client in the identity system
//! - [`UserStrategy`] issues an identity user, mirrors it on the platform and
//!   grants it an organization and a space role
//!
//! Remote calls within one operation run strictly in sequence. Nothing is
//! rolled back when a later step fails; the failing step is logged so the
//! orphaned resources can be found, and a repeated teardown removes them
//! because every delete tolerates an already-absent resource.

mod broker;
mod settings;
mod strategy;

pub use broker::{Broker, BrokerBuilder};
pub use settings::BrokerSettings;
pub use strategy::{
	ClientStrategy, CredentialStrategy, IssueRequest, IssuedCredential, Placement, UserStrategy,
};
