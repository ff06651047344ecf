//! Secure private-scalar material.
//!
//! This module provides `SecretScalar`, a wrapper around raw private-key
//! bytes that ensures the data is zeroed out when dropped and is never
//! accidentally exposed in logs or debug output. Key pairs own one of
//! these for the duration of a session and never serialize it.

use starknet_types_core::felt::Felt;
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

/// Errors that can occur when parsing private-key material.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecretScalarError {
	/// Error that occurs when the key material is malformed or out of range.
	#[error("invalid private key: {0}")]
	InvalidKey(String),
}

/// A 32-byte private scalar that zeroes its memory on drop.
#[derive(Clone)]
pub struct SecretScalar(Zeroizing<[u8; 32]>);

impl SecretScalar {
	/// Creates a secret scalar from raw big-endian bytes.
	///
	/// The all-zero scalar is rejected; it is not a valid private key on
	/// any supported curve.
	pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, SecretScalarError> {
		if bytes.iter().all(|b| *b == 0) {
			return Err(SecretScalarError::InvalidKey(
				"private key must be non-zero".to_string(),
			));
		}
		Ok(Self(Zeroizing::new(bytes)))
	}

	/// Parses a secret scalar from a hex string, with or without a `0x`
	/// prefix. Shorter input is left-padded to 32 bytes.
	pub fn from_hex(s: &str) -> Result<Self, SecretScalarError> {
		let stripped = s.strip_prefix("0x").unwrap_or(s);
		if stripped.is_empty() {
			return Err(SecretScalarError::InvalidKey(
				"empty private key".to_string(),
			));
		}
		if stripped.len() > 64 {
			return Err(SecretScalarError::InvalidKey(format!(
				"private key longer than 32 bytes: {} hex characters",
				stripped.len()
			)));
		}
		let padded = format!("{stripped:0>64}");
		let decoded = hex::decode(&padded)
			.map_err(|e| SecretScalarError::InvalidKey(format!("invalid hex: {e}")))?;
		let mut bytes = [0u8; 32];
		bytes.copy_from_slice(&decoded);
		Self::from_bytes(bytes)
	}

	/// Exposes the scalar as big-endian bytes.
	///
	/// # Security Warning
	/// This exposes the actual secret. Use it only to feed the signing
	/// primitive and never log or store the result.
	pub fn as_bytes(&self) -> &[u8; 32] {
		&self.0
	}

	/// Interprets the scalar as a field element.
	pub fn to_felt(&self) -> Felt {
		Felt::from_bytes_be(&self.0)
	}
}

impl fmt::Debug for SecretScalar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SecretScalar(***REDACTED***)")
	}
}

impl fmt::Display for SecretScalar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "***REDACTED***")
	}
}

impl PartialEq for SecretScalar {
	fn eq(&self, other: &Self) -> bool {
		*self.0 == *other.0
	}
}

impl Eq for SecretScalar {}
