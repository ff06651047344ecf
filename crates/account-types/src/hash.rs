//! Field-element hashing and encoding utilities.
//!
//! These helpers provide:
//! - Cairo short-string encoding for ASCII tags
//! - The 250-bit keccak used for entry-point selectors
//! - The Pedersen array hash the verifier applies to ordered field elements

use alloy_primitives::keccak256;
use starknet_crypto::pedersen_hash;
use starknet_types_core::felt::Felt;
use thiserror::Error;

/// Maximum byte length of a Cairo short string.
pub const SHORT_STRING_MAX_LEN: usize = 31;

/// Errors that can occur when encoding short strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShortStringError {
	/// Error that occurs when the input exceeds 31 bytes.
	#[error("short string exceeds {SHORT_STRING_MAX_LEN} bytes: {0}")]
	TooLong(String),
	/// Error that occurs when the input contains non-ASCII characters.
	#[error("short string must be ASCII: {0}")]
	NonAscii(String),
}

/// Encodes an ASCII string of at most 31 bytes as a big-endian field element.
///
/// This is the encoding the verifier uses for constant tags such as
/// `"session-token"` or `"Webauthn Signer"`.
pub fn short_string_to_felt(s: &str) -> Result<Felt, ShortStringError> {
	if !s.is_ascii() {
		return Err(ShortStringError::NonAscii(s.to_string()));
	}
	if s.len() > SHORT_STRING_MAX_LEN {
		return Err(ShortStringError::TooLong(s.to_string()));
	}
	Ok(Felt::from_bytes_be_slice(s.as_bytes()))
}

/// Encodes a compile-time tag that is known to be valid short-string input.
///
/// Callers must only pass ASCII literals of at most 31 bytes; longer input
/// silently truncates to the field size, so this is not exposed for
/// arbitrary strings.
pub(crate) fn tag_felt(tag: &str) -> Felt {
	Felt::from_bytes_be_slice(tag.as_bytes())
}

/// Computes the 250-bit keccak over raw bytes.
///
/// The top six bits of the keccak-256 digest are cleared so the result
/// always fits a field element.
pub fn starknet_keccak(data: &[u8]) -> Felt {
	let mut digest = keccak256(data).0;
	digest[0] &= 0x03;
	Felt::from_bytes_be(&digest)
}

/// Computes the selector for an entry-point name.
pub fn selector_from_name(name: &str) -> Felt {
	starknet_keccak(name.as_bytes())
}

/// Computes the Pedersen chain hash over ordered field elements.
///
/// The chain starts from zero and is finalized with the element count,
/// matching the array hash the verifier recomputes on-chain.
pub fn pedersen_hash_on_elements(elements: &[Felt]) -> Felt {
	let mut acc = Felt::ZERO;
	for element in elements {
		acc = pedersen_hash(&acc, element);
	}
	pedersen_hash(&acc, &Felt::from(elements.len() as u64))
}
