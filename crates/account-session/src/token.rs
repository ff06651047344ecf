//! Session-token assembly.
//!
//! Per transaction the signer recomputes the transaction and session
//! hashes, signs their Pedersen combination with the session key,
//! obtains the backend co-signature (whose allowed-call check gates
//! everything after it), rebuilds the Merkle tree from the full
//! allowed-method list and emits one inclusion proof per call, in call
//! order. A failure at any step returns with no partial token.

use crate::services::BackendService;
use crate::typed_data::{method_leaves, session_typed_data};
use crate::SessionError;
use account_keys::StarkKeyPair;
use account_signer::{HashingInterface, RawSigner, SignerError};
use account_types::{
	compile_execute_calldata, Call, CommittedSession, InvokeDetails, MerkleTree, OffChainSession,
	SessionToken, StarkSignature,
};
use async_trait::async_trait;
use starknet_crypto::pedersen_hash;
use starknet_types_core::felt::Felt;
use std::sync::Arc;

/// Signs transactions on behalf of an approved session.
///
/// Holds the completed session and its two per-session approvals; each
/// `sign_invoke` produces a fresh transaction-specific token.
pub struct SessionTokenSigner {
	session: OffChainSession,
	session_key: StarkKeyPair,
	owner_signature: StarkSignature,
	backend_initialization_sig: StarkSignature,
	backend: Arc<BackendService>,
	hasher: Arc<dyn HashingInterface>,
}

impl SessionTokenSigner {
	/// Creates the signer from an approved session and its signatures.
	pub fn new(
		session: OffChainSession,
		session_key: StarkKeyPair,
		owner_signature: StarkSignature,
		backend_initialization_sig: StarkSignature,
		backend: Arc<BackendService>,
		hasher: Arc<dyn HashingInterface>,
	) -> Self {
		Self {
			session,
			session_key,
			owner_signature,
			backend_initialization_sig,
			backend,
			hasher,
		}
	}

	/// Signs an invoke transaction, producing the serialized token.
	pub async fn sign_invoke(
		&self,
		calls: &[Call],
		details: &InvokeDetails,
	) -> Result<Vec<Felt>, SessionError> {
		Ok(self.build_token(calls, details).await?.to_felts())
	}

	/// Assembles the session token for one transaction.
	pub async fn build_token(
		&self,
		calls: &[Call],
		details: &InvokeDetails,
	) -> Result<SessionToken, SessionError> {
		let execute_calldata = compile_execute_calldata(calls);
		let transaction_hash = self.hasher.invoke_hash(details, &execute_calldata).await?;
		// The session hash depends on the account address, so it is
		// recomputed here rather than cached at session creation.
		let typed_data = session_typed_data(&self.session, details.chain_id());
		let session_hash = self
			.hasher
			.typed_data_hash(&typed_data, details.sender_address())
			.await?;
		let combined = pedersen_hash(&transaction_hash, &session_hash);
		let session_signature = self.session_key.sign(&combined)?;

		// The backend re-derives both hashes and checks every call
		// against the allowed methods; its approval gates the proofs.
		let backend_signature = self
			.backend
			.sign_tx_and_session(calls, details, &self.session)
			.await?;

		let tree = MerkleTree::new(method_leaves(&self.session.allowed_methods));
		let mut proofs = Vec::with_capacity(calls.len());
		for call in calls {
			let proof = self
				.session
				.position_of(call)
				.and_then(|index| tree.proof(index))
				.ok_or(SessionError::CallNotAllowed {
					contract_address: call.contract_address,
					selector: call.selector,
				})?;
			proofs.push(proof);
		}

		tracing::debug!(
			calls = calls.len(),
			root = %tree.root(),
			"assembled session token"
		);

		Ok(SessionToken {
			session: CommittedSession {
				expires_at: self.session.expires_at,
				allowed_methods_root: tree.root(),
				token_amounts: self.session.token_amounts.clone(),
				nft_contracts: self.session.nft_contracts.clone(),
				max_fee_usage: self.session.max_fee_usage,
				guardian_key: self.session.guardian_key,
				session_key: self.session.session_key,
			},
			session_signature,
			owner_signature: self.owner_signature,
			backend_signature,
			backend_initialization_sig: self.backend_initialization_sig,
			proofs,
		})
	}
}

#[async_trait]
impl RawSigner for SessionTokenSigner {
	/// Session signing is structured per transaction; there is no raw
	/// message a token could be produced for.
	async fn sign_raw(&self, _message_hash: Felt) -> Result<Vec<Felt>, SignerError> {
		Err(SignerError::NotImplemented(
			"session signer cannot sign raw messages".to_string(),
		))
	}
}
