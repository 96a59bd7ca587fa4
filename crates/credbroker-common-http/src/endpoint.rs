// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Joining configured base addresses with API paths.

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum EndpointError {
	#[error("invalid endpoint {base}: {source}")]
	Invalid {
		base: String,
		#[source]
		source: url::ParseError,
	},
}

/// Join `segments` onto `base` as path segments.
///
/// Each segment is percent-encoded, so identifiers taken from marketplace
/// requests cannot escape the intended path.
pub fn join(base: &str, segments: &[&str]) -> Result<Url, EndpointError> {
	let invalid = |source| EndpointError::Invalid {
		base: base.to_string(),
		source,
	};
	let mut url = Url::parse(base.trim_end_matches('/')).map_err(invalid)?;
	url
		.path_segments_mut()
		.map_err(|_| invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
		.pop_if_empty()
		.extend(segments);
	Ok(url)
}
