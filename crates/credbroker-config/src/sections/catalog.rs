// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use serde::Deserialize;

/// Optional catalog document overriding names and descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogConfig {
	pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfigLayer {
	#[serde(default)]
	pub path: Option<PathBuf>,
}

impl CatalogConfigLayer {
	pub fn merge(&mut self, other: CatalogConfigLayer) {
		if other.path.is_some() {
			self.path = other.path;
		}
	}

	pub fn finalize(self) -> CatalogConfig {
		CatalogConfig { path: self.path }
	}
}
