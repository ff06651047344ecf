//! Session permission structures and the session-token wire format.
//!
//! An `OffChainSession` is the full permission set a user approves once;
//! a `CommittedSession` replaces the allowed-method list with its Merkle
//! root for on-chain submission. The assembled `SessionToken` is
//! serialized behind a fixed magic tag so the verifier can distinguish
//! session signatures from plain account signatures.

use crate::call::Call;
use crate::hash::{selector_from_name, tag_felt};
use crate::signature::StarkSignature;
use crate::uint::Uint256;
use starknet_types_core::felt::Felt;

/// Magic discriminator prefixed to every session-token payload.
pub fn session_magic() -> Felt {
	tag_felt("session-token")
}

/// One (contract, entry point) pair a session is allowed to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedMethod {
	/// Address of the allowed contract.
	pub contract_address: Felt,
	/// Selector of the allowed entry point.
	pub selector: Felt,
}

impl AllowedMethod {
	/// Creates an allowed method from an entry-point name.
	pub fn new(contract_address: Felt, entry_point: &str) -> Self {
		Self {
			contract_address,
			selector: selector_from_name(entry_point),
		}
	}

	/// Whether this method authorizes the given call.
	pub fn allows(&self, call: &Call) -> bool {
		self.contract_address == call.contract_address && self.selector == call.selector
	}
}

/// A spend allowance for one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAmount {
	/// Address of the token contract.
	pub token_address: Felt,
	/// Maximum amount the session may spend.
	pub amount: Uint256,
}

impl TokenAmount {
	fn to_felts(self) -> Vec<Felt> {
		let mut out = vec![self.token_address];
		out.extend(self.amount.to_felts());
		out
	}
}

/// The scoped, time-limited permission set a session is created with.
///
/// Immutable after creation; its typed-data hash is what the owner and
/// the backend approve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffChainSession {
	/// Unix timestamp after which the verifier rejects the session.
	pub expires_at: u64,
	/// Ordered list of callable (contract, selector) pairs.
	pub allowed_methods: Vec<AllowedMethod>,
	/// Token-spend allowances.
	pub token_amounts: Vec<TokenAmount>,
	/// NFT contracts the session may touch.
	pub nft_contracts: Vec<Felt>,
	/// Maximum fee the session may burn.
	pub max_fee_usage: TokenAmount,
	/// Public key of the co-signing backend.
	pub guardian_key: Felt,
	/// Public key of the ephemeral session key pair.
	pub session_key: Felt,
}

impl OffChainSession {
	/// Finds the position of the allowed method matching a call.
	pub fn position_of(&self, call: &Call) -> Option<usize> {
		self.allowed_methods.iter().position(|m| m.allows(call))
	}
}

/// A session with its allowed-method list replaced by the Merkle root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedSession {
	/// Unix timestamp after which the verifier rejects the session.
	pub expires_at: u64,
	/// Root of the allowed-method Merkle tree.
	pub allowed_methods_root: Felt,
	/// Token-spend allowances.
	pub token_amounts: Vec<TokenAmount>,
	/// NFT contracts the session may touch.
	pub nft_contracts: Vec<Felt>,
	/// Maximum fee the session may burn.
	pub max_fee_usage: TokenAmount,
	/// Public key of the co-signing backend.
	pub guardian_key: Felt,
	/// Public key of the ephemeral session key pair.
	pub session_key: Felt,
}

impl CommittedSession {
	/// Serializes the session fields in wire order.
	pub fn to_felts(&self) -> Vec<Felt> {
		let mut out = vec![Felt::from(self.expires_at), self.allowed_methods_root];
		out.push(Felt::from(self.token_amounts.len() as u64));
		for amount in &self.token_amounts {
			out.extend(amount.to_felts());
		}
		out.push(Felt::from(self.nft_contracts.len() as u64));
		out.extend_from_slice(&self.nft_contracts);
		out.extend(self.max_fee_usage.to_felts());
		out.push(self.guardian_key);
		out.push(self.session_key);
		out
	}
}

/// The transaction-specific authorization bundle.
///
/// Constructed fresh per transaction: the session itself is reusable, but
/// the session and backend signatures bind this transaction's hash and
/// the proofs cover exactly this transaction's calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
	/// The Merkle-committed session.
	pub session: CommittedSession,
	/// Session-key signature over the combined transaction/session hash.
	pub session_signature: StarkSignature,
	/// Owner signature over the session typed-data hash.
	pub owner_signature: StarkSignature,
	/// Backend co-signature over the combined transaction/session hash.
	pub backend_signature: StarkSignature,
	/// Backend signature over the session typed-data hash.
	pub backend_initialization_sig: StarkSignature,
	/// One Merkle inclusion proof per call, in call order.
	pub proofs: Vec<Vec<Felt>>,
}

impl SessionToken {
	/// Serializes the token, magic tag first.
	pub fn to_felts(&self) -> Vec<Felt> {
		let mut out = vec![session_magic()];
		out.extend(self.session.to_felts());
		out.extend(self.session_signature.to_felts());
		out.extend(self.owner_signature.to_felts());
		out.extend(self.backend_signature.to_felts());
		out.extend(self.backend_initialization_sig.to_felts());
		out.push(Felt::from(self.proofs.len() as u64));
		for proof in &self.proofs {
			out.push(Felt::from(proof.len() as u64));
			out.extend_from_slice(proof);
		}
		out
	}
}
