//! Native-curve key pairs.
//!
//! Signing is deterministic ECDSA over the native field: the nonce comes
//! from RFC 6979, so the same key and hash always produce the same
//! signature.

use crate::KeyError;
use account_types::{SecretScalar, SignerDescriptor, StarkSignature};
use rand::{rngs::OsRng, RngCore};
use starknet_crypto::{get_public_key, rfc6979_generate_k, sign};
use starknet_types_core::felt::Felt;

/// Order of the native curve; private scalars must stay below it.
fn curve_order() -> Felt {
	Felt::from_hex_unchecked(
		"0x800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f",
	)
}

/// A native-curve key pair.
#[derive(Debug, Clone)]
pub struct StarkKeyPair {
	secret: SecretScalar,
}

impl StarkKeyPair {
	/// Generates a fresh random key pair.
	pub fn random() -> Self {
		let mut bytes = [0u8; 32];
		loop {
			OsRng.fill_bytes(&mut bytes);
			// Mask into the scalar range; the order is just above 2^251.
			bytes[0] &= 0x01;
			if let Ok(secret) = SecretScalar::from_bytes(bytes) {
				return Self { secret };
			}
		}
	}

	/// Builds a key pair from existing secret material.
	pub fn from_secret(secret: SecretScalar) -> Result<Self, KeyError> {
		let scalar = secret.to_felt();
		if scalar == Felt::ZERO || scalar >= curve_order() {
			return Err(KeyError::InvalidKey(
				"private key outside the curve order".to_string(),
			));
		}
		Ok(Self { secret })
	}

	/// Parses a key pair from a hex private key.
	pub fn from_hex(private_key: &str) -> Result<Self, KeyError> {
		Self::from_secret(SecretScalar::from_hex(private_key)?)
	}

	/// The public key derived from the private scalar.
	pub fn public_key(&self) -> Felt {
		get_public_key(&self.secret.to_felt())
	}

	/// The signer descriptor for this key.
	pub fn descriptor(&self) -> SignerDescriptor {
		SignerDescriptor::Starknet {
			public_key: self.public_key(),
		}
	}

	/// The domain-separated GUID for this key.
	pub fn guid(&self) -> Result<Felt, KeyError> {
		Ok(self.descriptor().guid()?)
	}

	/// Signs a raw message hash.
	pub fn sign(&self, message_hash: &Felt) -> Result<StarkSignature, KeyError> {
		let private_key = self.secret.to_felt();
		let k = rfc6979_generate_k(message_hash, &private_key, None);
		let signature = sign(&private_key, message_hash, &k)
			.map_err(|e| KeyError::SigningFailed(e.to_string()))?;
		Ok(StarkSignature {
			r: signature.r,
			s: signature.s,
		})
	}
}

/// Generates `count` fresh random key pairs.
pub fn random_stark_keypairs(count: usize) -> Vec<StarkKeyPair> {
	(0..count).map(|_| StarkKeyPair::random()).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use starknet_crypto::verify;

	#[test]
	fn test_public_key_is_deterministic() {
		let key = StarkKeyPair::from_hex("0x1234567890abcdef").unwrap();
		let again = StarkKeyPair::from_hex("0x1234567890abcdef").unwrap();
		assert_eq!(key.public_key(), again.public_key());
	}

	#[test]
	fn test_signature_verifies_against_public_key() {
		let key = StarkKeyPair::random();
		let hash = Felt::from(424242_u64);
		let signature = key.sign(&hash).unwrap();
		assert!(verify(&key.public_key(), &hash, &signature.r, &signature.s).unwrap());
	}

	#[test]
	fn test_signing_is_deterministic() {
		let key = StarkKeyPair::from_hex("0xdeadbeef").unwrap();
		let hash = Felt::from(7_u64);
		assert_eq!(key.sign(&hash).unwrap(), key.sign(&hash).unwrap());
	}

	#[test]
	fn test_malformed_private_keys_are_rejected() {
		assert!(matches!(
			StarkKeyPair::from_hex("not-hex"),
			Err(KeyError::InvalidKey(_))
		));
		assert!(matches!(
			StarkKeyPair::from_hex("0x0"),
			Err(KeyError::InvalidKey(_))
		));
		// One past the curve order.
		assert!(matches!(
			StarkKeyPair::from_hex(
				"0x800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d30"
			),
			Err(KeyError::InvalidKey(_))
		));
	}

	#[test]
	fn test_random_keys_are_distinct() {
		let keys = random_stark_keypairs(2);
		assert_ne!(keys[0].public_key(), keys[1].public_key());
	}
}
