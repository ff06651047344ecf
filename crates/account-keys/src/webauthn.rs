//! Platform-authenticator key pairs and assertion synthesis.
//!
//! Synthesizes what a platform authenticator would return for a "get
//! assertion" ceremony, deterministically and without hardware: the
//! authenticator data, the client-data JSON record, the double-hash the
//! authenticator signs, and the byte offsets the verifier needs to slice
//! the JSON without parsing it.

use crate::KeyError;
use account_types::{
	RawSignature, SecretScalar, SignerDescriptor, Uint256, WebauthnAssertion, WebauthnSignature,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use p256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use starknet_types_core::felt::Felt;

/// Authenticator flags: user present and user verified.
const FLAG_USER_PRESENT: u8 = 0b0001;
const FLAG_USER_VERIFIED: u8 = 0b0100;

/// Relying-party configuration an assertion is scoped to.
///
/// Injected into each owner rather than read from process-wide state, so
/// tests can vary origins without touching shared globals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebauthnConfig {
	/// Origin string embedded in the client data.
	pub origin: String,
	/// Relying-party identifier, hashed into the authenticator data.
	pub rp_id: String,
}

impl Default for WebauthnConfig {
	fn default() -> Self {
		Self {
			origin: "http://localhost:5173".to_string(),
			rp_id: "localhost".to_string(),
		}
	}
}

impl WebauthnConfig {
	/// SHA-256 hash of the relying-party identifier.
	pub fn rp_id_hash(&self) -> [u8; 32] {
		Sha256::digest(self.rp_id.as_bytes()).into()
	}

	/// The relying-party hash as a 256-bit pair.
	pub fn rp_id_hash_u256(&self) -> Uint256 {
		Uint256::from_bytes_be(&self.rp_id_hash())
	}
}

/// The client-data record in the exact field order the verifier slices.
#[derive(Serialize)]
struct CollectedClientData<'a> {
	#[serde(rename = "type")]
	ceremony: &'a str,
	challenge: &'a str,
	origin: &'a str,
	#[serde(rename = "crossOrigin")]
	cross_origin: bool,
}

/// A platform-authenticator key pair.
#[derive(Debug, Clone)]
pub struct WebauthnOwner {
	signing_key: SigningKey,
	config: WebauthnConfig,
}

impl WebauthnOwner {
	/// Generates a fresh random owner for the given relying party.
	pub fn random(config: WebauthnConfig) -> Self {
		Self {
			signing_key: SigningKey::random(&mut OsRng),
			config,
		}
	}

	/// Builds an owner from existing secret material.
	pub fn from_secret(secret: &SecretScalar, config: WebauthnConfig) -> Result<Self, KeyError> {
		let signing_key = SigningKey::from_slice(secret.as_bytes())
			.map_err(|e| KeyError::InvalidKey(e.to_string()))?;
		Ok(Self {
			signing_key,
			config,
		})
	}

	/// Parses an owner from a hex private key.
	pub fn from_hex(private_key: &str, config: WebauthnConfig) -> Result<Self, KeyError> {
		Self::from_secret(&SecretScalar::from_hex(private_key)?, config)
	}

	/// The relying-party configuration this owner is scoped to.
	pub fn config(&self) -> &WebauthnConfig {
		&self.config
	}

	/// The x-coordinate of the compressed public point.
	pub fn public_key(&self) -> Uint256 {
		let point = self.signing_key.verifying_key().to_encoded_point(true);
		Uint256::from_be_slice(&point.as_bytes()[1..])
	}

	/// The signer descriptor for this key.
	pub fn descriptor(&self) -> SignerDescriptor {
		SignerDescriptor::Webauthn {
			origin: self.config.origin.clone(),
			rp_id_hash: self.config.rp_id_hash_u256(),
			public_key: self.public_key(),
		}
	}

	/// The domain-separated GUID for this key.
	pub fn guid(&self) -> Result<Felt, KeyError> {
		Ok(self.descriptor().guid()?)
	}

	/// Synthesizes and signs the assertion for a transaction hash.
	pub fn assertion(&self, transaction_hash: &Felt) -> Result<WebauthnAssertion, KeyError> {
		let mut authenticator_data = Vec::with_capacity(37);
		authenticator_data.extend_from_slice(&self.config.rp_id_hash());
		authenticator_data.push(FLAG_USER_PRESENT | FLAG_USER_VERIFIED);
		authenticator_data.extend_from_slice(&[0u8; 4]); // signature counter

		// The challenge is the 32-byte hash with one trailing zero byte,
		// a fixed-width convention the verifier applies as well.
		let mut challenge_bytes = transaction_hash.to_bytes_be().to_vec();
		challenge_bytes.push(0);
		let challenge = URL_SAFE_NO_PAD.encode(&challenge_bytes);

		let client_data = CollectedClientData {
			ceremony: "webauthn.get",
			challenge: &challenge,
			origin: &self.config.origin,
			cross_origin: false,
		};
		let client_data_text = serde_json::to_string(&client_data)
			.map_err(|e| KeyError::SigningFailed(e.to_string()))?;

		let client_data_hash = Sha256::digest(client_data_text.as_bytes());
		let mut message = authenticator_data.clone();
		message.extend_from_slice(&client_data_hash);
		let message_hash: [u8; 32] = Sha256::digest(&message).into();

		let (signature, recovery_id) = self
			.signing_key
			.sign_prehash_recoverable(&message_hash)
			.map_err(|e| KeyError::SigningFailed(e.to_string()))?;
		let (r, s) = signature.split_bytes();

		tracing::trace!(
			origin = %self.config.origin,
			client_data = %client_data_text,
			"synthesized webauthn assertion"
		);

		Ok(WebauthnAssertion {
			authenticator_data,
			type_offset: value_offset(&client_data_text, "\"type\":\"")?,
			challenge_offset: value_offset(&client_data_text, "\"challenge\":\"")?,
			challenge_length: challenge.len(),
			origin_offset: value_offset(&client_data_text, "\"origin\":\"")?,
			origin_length: self.config.origin.len(),
			client_data_json: client_data_text.into_bytes(),
			r: Uint256::from_be_slice(&r),
			s: Uint256::from_be_slice(&s),
			y_parity: recovery_id.is_y_odd(),
		})
	}

	/// Signs a raw message hash, producing the full assertion payload.
	pub fn sign(&self, message_hash: &Felt) -> Result<RawSignature, KeyError> {
		let assertion = self.assertion(message_hash)?;
		Ok(RawSignature::Webauthn(Box::new(WebauthnSignature {
			origin: self.config.origin.clone(),
			rp_id_hash: self.config.rp_id_hash_u256(),
			public_key: self.public_key(),
			assertion,
		})))
	}
}

/// Locates a value by its fixed `"name":"` prefix, returning the offset
/// of the first value byte.
fn value_offset(text: &str, prefix: &str) -> Result<usize, KeyError> {
	text.find(prefix)
		.map(|index| index + prefix.len())
		.ok_or_else(|| KeyError::SigningFailed(format!("client data is missing {prefix}")))
}
