//! Signer descriptors and their GUID derivation.
//!
//! A descriptor carries a scheme tag plus the scheme-specific public
//! payload; its GUID is the domain-separated Poseidon hash the verifier
//! uses as an access-control key. GUIDs are pure functions of the
//! descriptor, and the hashed scheme tag keeps different schemes from
//! ever colliding.

use crate::hash::tag_felt;
use crate::uint::Uint256;
use alloy_primitives::Address;
use starknet_crypto::poseidon_hash_many;
use starknet_types_core::felt::Felt;
use std::fmt;
use thiserror::Error;

/// Domain tag hashed into native-curve GUIDs.
const STARKNET_SIGNER_TAG: &str = "Starknet Signer";
/// Domain tag hashed into platform-authenticator GUIDs.
const WEBAUTHN_SIGNER_TAG: &str = "Webauthn Signer";

/// Errors that can occur when deriving signer GUIDs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuidError {
	/// Error that occurs when the scheme has no canonical GUID.
	#[error("signer guid is not implemented for the {0} scheme")]
	NotImplemented(SignerScheme),
}

/// The authentication schemes the account recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerScheme {
	/// Native-curve ECDSA key.
	Starknet,
	/// secp256k1 key identified by its derived 160-bit address.
	Secp256k1,
	/// secp256r1 (P-256) key.
	Secp256r1,
	/// Platform-authenticator (biometric) key.
	Webauthn,
}

impl SignerScheme {
	/// The enum tag the verifier deserializes.
	pub fn tag(&self) -> Felt {
		match self {
			Self::Starknet => Felt::ZERO,
			Self::Secp256k1 => Felt::ONE,
			Self::Secp256r1 => Felt::TWO,
			Self::Webauthn => Felt::THREE,
		}
	}
}

impl fmt::Display for SignerScheme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Starknet => "starknet",
			Self::Secp256k1 => "secp256k1",
			Self::Secp256r1 => "secp256r1",
			Self::Webauthn => "webauthn",
		};
		write!(f, "{name}")
	}
}

/// A signer's scheme tag plus its public-identity payload.
///
/// Immutable once constructed; the owning key pair derives it from its
/// private scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerDescriptor {
	/// Native-curve public key.
	Starknet {
		/// The public key as a field element.
		public_key: Felt,
	},
	/// secp256k1 signer, identified by its Ethereum-style address.
	Secp256k1 {
		/// keccak-derived 160-bit address of the public key.
		pubkey_hash: Address,
	},
	/// secp256r1 signer.
	Secp256r1 {
		/// x-coordinate of the compressed public point.
		public_key: Uint256,
	},
	/// Platform-authenticator signer.
	Webauthn {
		/// Origin the assertion is scoped to.
		origin: String,
		/// SHA-256 hash of the relying-party identifier.
		rp_id_hash: Uint256,
		/// x-coordinate of the compressed public point.
		public_key: Uint256,
	},
}

impl SignerDescriptor {
	/// The scheme this descriptor belongs to.
	pub fn scheme(&self) -> SignerScheme {
		match self {
			Self::Starknet { .. } => SignerScheme::Starknet,
			Self::Secp256k1 { .. } => SignerScheme::Secp256k1,
			Self::Secp256r1 { .. } => SignerScheme::Secp256r1,
			Self::Webauthn { .. } => SignerScheme::Webauthn,
		}
	}

	/// Derives the domain-separated GUID the verifier keys its
	/// access-control lists on.
	///
	/// Schemes without a canonical on-chain GUID fail explicitly rather
	/// than returning a sentinel value.
	pub fn guid(&self) -> Result<Felt, GuidError> {
		match self {
			Self::Starknet { public_key } => Ok(poseidon_hash_many(&[
				tag_felt(STARKNET_SIGNER_TAG),
				*public_key,
			])),
			Self::Webauthn {
				origin,
				rp_id_hash,
				public_key,
			} => {
				let mut elements = Vec::with_capacity(origin.len() + 6);
				elements.push(tag_felt(WEBAUTHN_SIGNER_TAG));
				elements.push(Felt::from(origin.len() as u64));
				elements.extend(origin.bytes().map(|b| Felt::from(b as u64)));
				elements.push(rp_id_hash.low);
				elements.push(rp_id_hash.high);
				elements.push(public_key.low);
				elements.push(public_key.high);
				Ok(poseidon_hash_many(&elements))
			}
			Self::Secp256k1 { .. } | Self::Secp256r1 { .. } => {
				Err(GuidError::NotImplemented(self.scheme()))
			}
		}
	}

	/// Serializes the descriptor as the verifier's tagged enum.
	pub fn to_felts(&self) -> Vec<Felt> {
		let mut out = vec![self.scheme().tag()];
		match self {
			Self::Starknet { public_key } => out.push(*public_key),
			Self::Secp256k1 { pubkey_hash } => {
				out.push(Felt::from_bytes_be_slice(pubkey_hash.as_slice()));
			}
			Self::Secp256r1 { public_key } => {
				out.extend(public_key.to_felts());
			}
			Self::Webauthn {
				origin,
				rp_id_hash,
				public_key,
			} => {
				out.push(Felt::from(origin.len() as u64));
				out.extend(origin.bytes().map(|b| Felt::from(b as u64)));
				out.extend(rp_id_hash.to_felts());
				out.extend(public_key.to_felts());
			}
		}
		out
	}
}

/// Serializes an optional signer as the verifier's option encoding:
/// `[0, descriptor...]` when present, `[1]` when absent.
pub fn compile_signer_option(signer: Option<&SignerDescriptor>) -> Vec<Felt> {
	match signer {
		Some(descriptor) => {
			let mut out = vec![Felt::ZERO];
			out.extend(descriptor.to_felts());
			out
		}
		None => vec![Felt::ONE],
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn webauthn_descriptor() -> SignerDescriptor {
		SignerDescriptor::Webauthn {
			origin: "http://localhost:5173".to_string(),
			rp_id_hash: Uint256::from_u128(7),
			public_key: Uint256::from_u128(9),
		}
	}

	#[test]
	fn test_guid_is_pure() {
		let descriptor = SignerDescriptor::Starknet {
			public_key: Felt::from(42_u64),
		};
		assert_eq!(descriptor.guid().unwrap(), descriptor.guid().unwrap());

		let webauthn = webauthn_descriptor();
		assert_eq!(webauthn.guid().unwrap(), webauthn.guid().unwrap());
	}

	#[test]
	fn test_guid_separates_schemes() {
		let stark = SignerDescriptor::Starknet {
			public_key: Felt::from(42_u64),
		};
		// Different scheme tags must never produce colliding GUIDs even
		// for overlapping payloads.
		assert_ne!(stark.guid().unwrap(), webauthn_descriptor().guid().unwrap());
		assert_ne!(stark.guid().unwrap(), Felt::from(42_u64));
	}

	#[test]
	fn test_guid_not_implemented_schemes() {
		let eth = SignerDescriptor::Secp256k1 {
			pubkey_hash: Address::ZERO,
		};
		assert_eq!(
			eth.guid(),
			Err(GuidError::NotImplemented(SignerScheme::Secp256k1))
		);

		let r1 = SignerDescriptor::Secp256r1 {
			public_key: Uint256::from_u128(1),
		};
		assert_eq!(
			r1.guid(),
			Err(GuidError::NotImplemented(SignerScheme::Secp256r1))
		);
	}

	#[test]
	fn test_signer_option_encoding() {
		let descriptor = SignerDescriptor::Starknet {
			public_key: Felt::from(42_u64),
		};
		assert_eq!(
			compile_signer_option(Some(&descriptor)),
			vec![Felt::ZERO, Felt::ZERO, Felt::from(42_u64)]
		);
		assert_eq!(compile_signer_option(None), vec![Felt::ONE]);
	}

	#[test]
	fn test_descriptor_encoding_is_scheme_tagged() {
		let stark = SignerDescriptor::Starknet {
			public_key: Felt::from(42_u64),
		};
		assert_eq!(stark.to_felts(), vec![Felt::ZERO, Felt::from(42_u64)]);

		let webauthn = webauthn_descriptor();
		let felts = webauthn.to_felts();
		assert_eq!(felts[0], Felt::THREE);
		assert_eq!(felts[1], Felt::from(21_u64)); // origin length
		assert_eq!(felts[2], Felt::from(b'h' as u64));
		assert_eq!(felts.len(), 2 + 21 + 4);
	}
}
