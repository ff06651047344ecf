//! Raw signature payloads and their wire encodings.
//!
//! Every scheme serializes as the verifier's tagged signature enum:
//! the scheme tag first, then the scheme-specific tuple. Arrays inside a
//! payload are length-prefixed.

use crate::signer::SignerScheme;
use crate::uint::Uint256;
use alloy_primitives::Address;
use starknet_types_core::felt::Felt;

/// A native-curve signature pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarkSignature {
	/// The r component.
	pub r: Felt,
	/// The s component.
	pub s: Felt,
}

impl StarkSignature {
	/// Serializes the pair in wire order.
	pub fn to_felts(&self) -> [Felt; 2] {
		[self.r, self.s]
	}
}

/// The synthesized authenticator assertion for one signed hash.
///
/// Offsets and lengths locate the `type`, `challenge` and `origin` values
/// inside `client_data_json` so the verifier can slice them without a
/// JSON parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebauthnAssertion {
	/// rpIdHash, flags and signature counter, as the authenticator emits them.
	pub authenticator_data: Vec<u8>,
	/// UTF-8 client-data record.
	pub client_data_json: Vec<u8>,
	/// The r component of the P-256 signature.
	pub r: Uint256,
	/// The s component of the P-256 signature.
	pub s: Uint256,
	/// Recovered y-parity of the signature.
	pub y_parity: bool,
	/// Byte offset of the `type` value inside the JSON text.
	pub type_offset: usize,
	/// Byte offset of the `challenge` value inside the JSON text.
	pub challenge_offset: usize,
	/// Byte length of the `challenge` value.
	pub challenge_length: usize,
	/// Byte offset of the `origin` value inside the JSON text.
	pub origin_offset: usize,
	/// Byte length of the `origin` value.
	pub origin_length: usize,
}

/// A full platform-authenticator signature payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebauthnSignature {
	/// Origin the assertion is scoped to.
	pub origin: String,
	/// SHA-256 hash of the relying-party identifier.
	pub rp_id_hash: Uint256,
	/// x-coordinate of the signer's compressed public point.
	pub public_key: Uint256,
	/// The synthesized assertion.
	pub assertion: WebauthnAssertion,
}

/// A scheme-tagged raw signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSignature {
	/// Native-curve signature carrying its signer's public key.
	Starknet {
		/// Public key of the signing key pair.
		signer: Felt,
		/// The r component.
		r: Felt,
		/// The s component.
		s: Felt,
	},
	/// secp256k1 signature identified by the signer's address.
	Secp256k1 {
		/// Address derived from the signing key.
		signer: Address,
		/// The r component.
		r: Uint256,
		/// The s component.
		s: Uint256,
		/// Recovered y-parity.
		y_parity: bool,
	},
	/// secp256r1 signature.
	Secp256r1 {
		/// x-coordinate of the signer's compressed public point.
		public_key: Uint256,
		/// The r component.
		r: Uint256,
		/// The s component.
		s: Uint256,
		/// Recovered y-parity.
		y_parity: bool,
	},
	/// Platform-authenticator assertion payload.
	Webauthn(Box<WebauthnSignature>),
}

impl RawSignature {
	/// The scheme this signature belongs to.
	pub fn scheme(&self) -> SignerScheme {
		match self {
			Self::Starknet { .. } => SignerScheme::Starknet,
			Self::Secp256k1 { .. } => SignerScheme::Secp256k1,
			Self::Secp256r1 { .. } => SignerScheme::Secp256r1,
			Self::Webauthn(_) => SignerScheme::Webauthn,
		}
	}

	/// Serializes the signature as the verifier's tagged enum.
	pub fn to_felts(&self) -> Vec<Felt> {
		let mut out = vec![self.scheme().tag()];
		match self {
			Self::Starknet { signer, r, s } => {
				out.push(*signer);
				out.push(*r);
				out.push(*s);
			}
			Self::Secp256k1 {
				signer,
				r,
				s,
				y_parity,
			} => {
				out.push(Felt::from_bytes_be_slice(signer.as_slice()));
				out.extend(r.to_felts());
				out.extend(s.to_felts());
				out.push(parity_felt(*y_parity));
			}
			Self::Secp256r1 {
				public_key,
				r,
				s,
				y_parity,
			} => {
				out.extend(public_key.to_felts());
				out.extend(r.to_felts());
				out.extend(s.to_felts());
				out.push(parity_felt(*y_parity));
			}
			Self::Webauthn(signature) => {
				let assertion = &signature.assertion;
				out.push(Felt::from(signature.origin.len() as u64));
				out.extend(signature.origin.bytes().map(|b| Felt::from(b as u64)));
				out.extend(signature.rp_id_hash.to_felts());
				out.extend(signature.public_key.to_felts());
				push_byte_array(&mut out, &assertion.authenticator_data);
				push_byte_array(&mut out, &assertion.client_data_json);
				out.extend(assertion.r.to_felts());
				out.extend(assertion.s.to_felts());
				out.push(parity_felt(assertion.y_parity));
				out.push(Felt::from(assertion.type_offset as u64));
				out.push(Felt::from(assertion.challenge_offset as u64));
				out.push(Felt::from(assertion.challenge_length as u64));
				out.push(Felt::from(assertion.origin_offset as u64));
				out.push(Felt::from(assertion.origin_length as u64));
			}
		}
		out
	}
}

fn parity_felt(y_parity: bool) -> Felt {
	if y_parity {
		Felt::ONE
	} else {
		Felt::ZERO
	}
}

fn push_byte_array(out: &mut Vec<Felt>, bytes: &[u8]) {
	out.push(Felt::from(bytes.len() as u64));
	out.extend(bytes.iter().map(|b| Felt::from(*b as u64)));
}
