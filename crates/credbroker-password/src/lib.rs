// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Random password and client secret generation.
//!
//! Secrets are drawn from a fixed 94-symbol alphabet (upper, lower, digits,
//! then the 32 ASCII punctuation characters, in that order). Each random byte
//! from the OS CSPRNG selects `ALPHABET[byte % 94]`. A candidate whose first
//! character is `-` is rejected and regenerated, since such a value is easily
//! mistaken for a flag when pasted into a command line.
//!
//! Regeneration is bounded by [`MAX_ATTEMPTS`]. A failure of the entropy
//! source is returned immediately as [`PasswordError::Entropy`] and never
//! retried.

use credbroker_common_secret::SecretString;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, error};

pub const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const SPECIAL: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// The full alphabet, `UPPER ++ LOWER ++ DIGITS ++ SPECIAL`.
pub const ALPHABET: &[u8; 94] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
abcdefghijklmnopqrstuvwxyz\
0123456789\
!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Upper bound on regeneration attempts for one secret.
///
/// A leading `-` occurs with probability 2/256 per attempt.
pub const MAX_ATTEMPTS: usize = 1024;

/// Errors that can occur while generating a secret.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
	#[error("password length must be at least 1")]
	InvalidLength,

	#[error("secure random source failed: {0}")]
	Entropy(#[from] rand::Error),

	#[error("no conforming password after {0} attempts")]
	Exhausted(usize),
}

pub type Result<T> = std::result::Result<T, PasswordError>;

/// Produces secrets for newly issued credentials.
pub trait PasswordGenerator: Send + Sync {
	fn generate(&self, length: usize) -> Result<SecretString>;
}

/// [`PasswordGenerator`] backed by the operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurePasswordGenerator;

impl PasswordGenerator for SecurePasswordGenerator {
	fn generate(&self, length: usize) -> Result<SecretString> {
		generate_with(&mut OsRng, length)
	}
}

/// Generate a secret of `length` characters from the OS CSPRNG.
pub fn generate(length: usize) -> Result<SecretString> {
	generate_with(&mut OsRng, length)
}

/// Generate a secret of `length` characters from `rng`.
pub fn generate_with<R: RngCore + ?Sized>(rng: &mut R, length: usize) -> Result<SecretString> {
	if length == 0 {
		return Err(PasswordError::InvalidLength);
	}

	for attempt in 1..=MAX_ATTEMPTS {
		let candidate = Candidate::from_rng(rng, length)?;
		if candidate.is_valid() {
			return Ok(candidate.into_secret());
		}
		debug!(attempt, "rejected generated password, regenerating");
	}

	error!(attempts = MAX_ATTEMPTS, "password generation exhausted");
	Err(PasswordError::Exhausted(MAX_ATTEMPTS))
}

/// A generated value plus the per-class tallies gathered while building it.
#[derive(Debug, Default)]
struct Candidate {
	value: String,
	upper: usize,
	lower: usize,
	digit: usize,
	special: usize,
}

impl Candidate {
	fn from_rng<R: RngCore + ?Sized>(rng: &mut R, length: usize) -> Result<Self> {
		let mut bytes = vec![0u8; length];
		rng.try_fill_bytes(&mut bytes)?;

		let mut candidate = Candidate {
			value: String::with_capacity(length),
			..Default::default()
		};
		for byte in &bytes {
			candidate.push(usize::from(*byte) % ALPHABET.len());
		}
		bytes.fill(0);
		Ok(candidate)
	}

	fn push(&mut self, idx: usize) {
		self.value.push(char::from(ALPHABET[idx]));
		let upper_end = UPPER.len();
		let lower_end = upper_end + LOWER.len();
		let digit_end = lower_end + DIGITS.len();
		match idx {
			i if i < upper_end => self.upper += 1,
			i if i < lower_end => self.lower += 1,
			i if i < digit_end => self.digit += 1,
			_ => self.special += 1,
		}
	}

	/// The class check always holds for a non-empty candidate; only the
	/// leading `-` rule can reject.
	fn is_valid(&self) -> bool {
		let has_any_class = self.upper + self.lower + self.digit + self.special > 0;
		!self.value.starts_with('-') && has_any_class
	}

	fn into_secret(mut self) -> SecretString {
		SecretString::new(std::mem::take(&mut self.value))
	}
}
