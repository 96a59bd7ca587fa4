// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod bindings;
pub mod catalog;
pub mod health;
pub mod instances;

use serde_json::Value;

/// Re-encode a `parameters` object for the option parser. An absent or null
/// value means the caller sent nothing.
pub(crate) fn raw_parameters(parameters: Option<Value>) -> Option<Vec<u8>> {
	match parameters {
		None | Some(Value::Null) => None,
		Some(value) => serde_json::to_vec(&value).ok(),
	}
}
