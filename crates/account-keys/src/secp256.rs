//! Secondary-curve key pairs.
//!
//! Two curves share one signing shape: secp256k1, whose public identity
//! is the keccak-derived 160-bit address external tooling recognizes,
//! and secp256r1, whose public identity is the x-coordinate of the
//! compressed public point carried as a 256-bit pair. Both normalize the
//! hash to the fixed 32-byte big-endian representation before
//! recovery-capable signing, and both report the recovered y-parity.

use crate::KeyError;
use account_types::{RawSignature, SecretScalar, SignerDescriptor, Uint256};
use alloy_primitives::{keccak256, Address};
use rand::rngs::OsRng;
use starknet_types_core::felt::Felt;

/// A secp256k1 key pair.
#[derive(Debug, Clone)]
pub struct EthKeyPair {
	signing_key: k256::ecdsa::SigningKey,
}

impl EthKeyPair {
	/// Generates a fresh random key pair.
	pub fn random() -> Self {
		Self {
			signing_key: k256::ecdsa::SigningKey::random(&mut OsRng),
		}
	}

	/// Builds a key pair from existing secret material.
	pub fn from_secret(secret: &SecretScalar) -> Result<Self, KeyError> {
		let signing_key = k256::ecdsa::SigningKey::from_slice(secret.as_bytes())
			.map_err(|e| KeyError::InvalidKey(e.to_string()))?;
		Ok(Self { signing_key })
	}

	/// Parses a key pair from a hex private key.
	pub fn from_hex(private_key: &str) -> Result<Self, KeyError> {
		Self::from_secret(&SecretScalar::from_hex(private_key)?)
	}

	/// The address derived from the public key.
	pub fn address(&self) -> Address {
		let point = self.signing_key.verifying_key().to_encoded_point(false);
		let digest = keccak256(&point.as_bytes()[1..]);
		Address::from_slice(&digest[12..])
	}

	/// The address as a field element, the form the verifier stores.
	pub fn public_key(&self) -> Felt {
		Felt::from_bytes_be_slice(self.address().as_slice())
	}

	/// The signer descriptor for this key.
	pub fn descriptor(&self) -> SignerDescriptor {
		SignerDescriptor::Secp256k1 {
			pubkey_hash: self.address(),
		}
	}

	/// The domain-separated GUID for this key.
	///
	/// Not defined for this scheme; fails explicitly rather than
	/// returning a sentinel.
	pub fn guid(&self) -> Result<Felt, KeyError> {
		Ok(self.descriptor().guid()?)
	}

	/// Signs a raw message hash.
	pub fn sign(&self, message_hash: &Felt) -> Result<RawSignature, KeyError> {
		let prehash = message_hash.to_bytes_be();
		let (signature, recovery_id) = self
			.signing_key
			.sign_prehash_recoverable(&prehash)
			.map_err(|e| KeyError::SigningFailed(e.to_string()))?;
		let (r, s) = signature.split_bytes();
		Ok(RawSignature::Secp256k1 {
			signer: self.address(),
			r: Uint256::from_be_slice(&r),
			s: Uint256::from_be_slice(&s),
			y_parity: recovery_id.is_y_odd(),
		})
	}
}

/// A secp256r1 key pair.
#[derive(Debug, Clone)]
pub struct Secp256r1KeyPair {
	signing_key: p256::ecdsa::SigningKey,
}

impl Secp256r1KeyPair {
	/// Generates a fresh random key pair.
	pub fn random() -> Self {
		Self {
			signing_key: p256::ecdsa::SigningKey::random(&mut OsRng),
		}
	}

	/// Builds a key pair from existing secret material.
	pub fn from_secret(secret: &SecretScalar) -> Result<Self, KeyError> {
		let signing_key = p256::ecdsa::SigningKey::from_slice(secret.as_bytes())
			.map_err(|e| KeyError::InvalidKey(e.to_string()))?;
		Ok(Self { signing_key })
	}

	/// Parses a key pair from a hex private key.
	pub fn from_hex(private_key: &str) -> Result<Self, KeyError> {
		Self::from_secret(&SecretScalar::from_hex(private_key)?)
	}

	/// The x-coordinate of the compressed public point.
	pub fn public_key(&self) -> Uint256 {
		let point = self.signing_key.verifying_key().to_encoded_point(true);
		Uint256::from_be_slice(&point.as_bytes()[1..])
	}

	/// The signer descriptor for this key.
	pub fn descriptor(&self) -> SignerDescriptor {
		SignerDescriptor::Secp256r1 {
			public_key: self.public_key(),
		}
	}

	/// The domain-separated GUID for this key.
	///
	/// Not defined for this scheme; fails explicitly rather than
	/// returning a sentinel.
	pub fn guid(&self) -> Result<Felt, KeyError> {
		Ok(self.descriptor().guid()?)
	}

	/// Signs a raw message hash.
	pub fn sign(&self, message_hash: &Felt) -> Result<RawSignature, KeyError> {
		let prehash = message_hash.to_bytes_be();
		let (signature, recovery_id) = self
			.signing_key
			.sign_prehash_recoverable(&prehash)
			.map_err(|e| KeyError::SigningFailed(e.to_string()))?;
		let (r, s) = signature.split_bytes();
		Ok(RawSignature::Secp256r1 {
			public_key: self.public_key(),
			r: Uint256::from_be_slice(&r),
			s: Uint256::from_be_slice(&s),
			y_parity: recovery_id.is_y_odd(),
		})
	}
}
