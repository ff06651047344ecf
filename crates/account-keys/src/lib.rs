//! Key management module for the smart-account signing system.
//!
//! This module provides one concrete key pair per authentication scheme
//! the account recognizes: the native-curve key, the secp256k1 key
//! identified by its derived address, the secp256r1 key and the
//! platform-authenticator key that wraps a secp256r1 key behind a
//! synthesized assertion. Each key pair owns its private scalar, derives
//! its public identity and descriptor from it, and signs raw hashes.

use account_types::{GuidError, RawSignature, SecretScalarError, SignerDescriptor};
use starknet_types_core::felt::Felt;
use thiserror::Error;

/// Secondary-curve key pairs.
pub mod secp256;
/// Native-curve key pairs.
pub mod stark;
/// Platform-authenticator key pairs and assertion synthesis.
pub mod webauthn;

pub use secp256::{EthKeyPair, Secp256r1KeyPair};
pub use stark::{random_stark_keypairs, StarkKeyPair};
pub use webauthn::{WebauthnConfig, WebauthnOwner};

/// Errors that can occur during key operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("invalid key: {0}")]
	InvalidKey(String),
	/// Error that occurs when a capability is not defined for the scheme.
	#[error("not implemented: {0}")]
	NotImplemented(String),
	/// Error that occurs when the signing primitive fails.
	#[error("signing failed: {0}")]
	SigningFailed(String),
}

impl From<SecretScalarError> for KeyError {
	fn from(error: SecretScalarError) -> Self {
		Self::InvalidKey(error.to_string())
	}
}

impl From<GuidError> for KeyError {
	fn from(error: GuidError) -> Self {
		Self::NotImplemented(error.to_string())
	}
}

/// A key pair under one of the supported authentication schemes.
///
/// Scheme dispatch is an exhaustive pattern match so adding a scheme
/// forces every signature-format decision to be revisited.
#[derive(Debug, Clone)]
pub enum AccountKey {
	/// Native-curve key pair.
	Stark(StarkKeyPair),
	/// secp256k1 key pair.
	Eth(EthKeyPair),
	/// secp256r1 key pair.
	Secp256r1(Secp256r1KeyPair),
	/// Platform-authenticator key pair.
	Webauthn(WebauthnOwner),
}

impl AccountKey {
	/// The signer descriptor for this key's public identity.
	pub fn descriptor(&self) -> SignerDescriptor {
		match self {
			Self::Stark(key) => key.descriptor(),
			Self::Eth(key) => key.descriptor(),
			Self::Secp256r1(key) => key.descriptor(),
			Self::Webauthn(key) => key.descriptor(),
		}
	}

	/// The domain-separated GUID, where the scheme defines one.
	pub fn guid(&self) -> Result<Felt, KeyError> {
		Ok(self.descriptor().guid()?)
	}

	/// Signs a raw message hash under this key's scheme.
	pub fn sign(&self, message_hash: &Felt) -> Result<RawSignature, KeyError> {
		match self {
			Self::Stark(key) => {
				let signature = key.sign(message_hash)?;
				Ok(RawSignature::Starknet {
					signer: key.public_key(),
					r: signature.r,
					s: signature.s,
				})
			}
			Self::Eth(key) => key.sign(message_hash),
			Self::Secp256r1(key) => key.sign(message_hash),
			Self::Webauthn(key) => key.sign(message_hash),
		}
	}
}

impl From<StarkKeyPair> for AccountKey {
	fn from(key: StarkKeyPair) -> Self {
		Self::Stark(key)
	}
}

impl From<EthKeyPair> for AccountKey {
	fn from(key: EthKeyPair) -> Self {
		Self::Eth(key)
	}
}

impl From<Secp256r1KeyPair> for AccountKey {
	fn from(key: Secp256r1KeyPair) -> Self {
		Self::Secp256r1(key)
	}
}

impl From<WebauthnOwner> for AccountKey {
	fn from(key: WebauthnOwner) -> Self {
		Self::Webauthn(key)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_guid_not_implemented_propagates() {
		let key = AccountKey::from(EthKeyPair::random());
		assert!(matches!(key.guid(), Err(KeyError::NotImplemented(_))));

		let key = AccountKey::from(Secp256r1KeyPair::random());
		assert!(matches!(key.guid(), Err(KeyError::NotImplemented(_))));
	}

	#[test]
	fn test_guid_defined_schemes() {
		let stark = AccountKey::from(StarkKeyPair::random());
		assert!(stark.guid().is_ok());

		let webauthn = AccountKey::from(WebauthnOwner::random(WebauthnConfig::default()));
		assert!(webauthn.guid().is_ok());
	}

	#[test]
	fn test_signature_scheme_matches_key() {
		let hash = Felt::from(424242_u64);
		let stark = AccountKey::from(StarkKeyPair::random());
		assert!(matches!(
			stark.sign(&hash).unwrap(),
			RawSignature::Starknet { .. }
		));

		let eth = AccountKey::from(EthKeyPair::random());
		assert!(matches!(
			eth.sign(&hash).unwrap(),
			RawSignature::Secp256k1 { .. }
		));
	}
}
