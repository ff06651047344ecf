//! Backend, dapp and wallet services of the session protocol.
//!
//! Three independent parties produce a session's signatures: the wallet
//! owner approves the session once, the backend approves it once with
//! its own key (so a compromised dapp backend cannot forge owner
//! consent), and per transaction the backend re-checks every call
//! against the approved scope before co-signing.

use crate::typed_data::session_typed_data;
use crate::SessionError;
use account_keys::StarkKeyPair;
use account_signer::HashingInterface;
use account_types::{
	compile_execute_calldata, AllowedMethod, Call, InvokeDetails, OffChainSession, StarkSignature,
	TokenAmount, Uint256,
};
use starknet_crypto::pedersen_hash;
use starknet_types_core::felt::Felt;
use std::sync::Arc;

/// The delegated backend holding the session guardian key.
pub struct BackendService {
	guardian: StarkKeyPair,
	hasher: Arc<dyn HashingInterface>,
}

impl BackendService {
	/// Creates a backend around its guardian key.
	pub fn new(guardian: StarkKeyPair, hasher: Arc<dyn HashingInterface>) -> Self {
		Self { guardian, hasher }
	}

	/// The guardian public key embedded into session requests.
	pub fn guardian_key(&self) -> Felt {
		self.guardian.public_key()
	}

	/// Signs the session typed-data hash with the guardian key.
	///
	/// This is the backend-initialization approval: a second signature
	/// over exactly the data the owner approved, produced once per
	/// session.
	pub async fn sign_session(
		&self,
		session: &OffChainSession,
		chain_id: Felt,
		account_address: Felt,
	) -> Result<StarkSignature, SessionError> {
		let typed_data = session_typed_data(session, chain_id);
		let message_hash = self
			.hasher
			.typed_data_hash(&typed_data, account_address)
			.await?;
		Ok(self.guardian.sign(&message_hash)?)
	}

	/// Co-signs one transaction under an approved session.
	///
	/// Every call's (contract, selector) pair must appear in the
	/// session's allowed methods; one disallowed call aborts the whole
	/// signing attempt. The signature covers the Pedersen combination of
	/// the transaction hash and the session hash, binding the approval
	/// to both.
	pub async fn sign_tx_and_session(
		&self,
		calls: &[Call],
		details: &InvokeDetails,
		session: &OffChainSession,
	) -> Result<StarkSignature, SessionError> {
		for call in calls {
			if session.position_of(call).is_none() {
				tracing::debug!(
					contract = %call.contract_address,
					selector = %call.selector,
					"rejecting call outside session scope"
				);
				return Err(SessionError::CallNotAllowed {
					contract_address: call.contract_address,
					selector: call.selector,
				});
			}
		}

		let execute_calldata = compile_execute_calldata(calls);
		let transaction_hash = self.hasher.invoke_hash(details, &execute_calldata).await?;
		let typed_data = session_typed_data(session, details.chain_id());
		let session_hash = self
			.hasher
			.typed_data_hash(&typed_data, details.sender_address())
			.await?;
		let combined = pedersen_hash(&transaction_hash, &session_hash);
		Ok(self.guardian.sign(&combined)?)
	}
}

/// The dapp side of the protocol: owns the ephemeral session key and
/// assembles session requests.
pub struct DappService {
	session_key: StarkKeyPair,
	guardian_key: Felt,
}

impl DappService {
	/// Creates a dapp service with a fresh session key.
	pub fn new(guardian_key: Felt) -> Self {
		Self::with_session_key(StarkKeyPair::random(), guardian_key)
	}

	/// Creates a dapp service around an existing session key.
	pub fn with_session_key(session_key: StarkKeyPair, guardian_key: Felt) -> Self {
		Self {
			session_key,
			guardian_key,
		}
	}

	/// The ephemeral session key pair.
	pub fn session_key(&self) -> &StarkKeyPair {
		&self.session_key
	}

	/// The default fee allowance a request carries unless overridden.
	pub fn default_max_fee_usage() -> TokenAmount {
		TokenAmount {
			token_address: Felt::ZERO,
			amount: Uint256::from_u128(1_000_000),
		}
	}

	/// Builds the permission set a user will be asked to approve.
	pub fn create_session_request(
		&self,
		allowed_methods: Vec<AllowedMethod>,
		token_amounts: Vec<TokenAmount>,
		expires_at: u64,
	) -> Result<OffChainSession, SessionError> {
		self.create_session_request_with(
			allowed_methods,
			token_amounts,
			expires_at,
			Self::default_max_fee_usage(),
			vec![],
		)
	}

	/// Builds a permission set with explicit fee and NFT allowances.
	pub fn create_session_request_with(
		&self,
		allowed_methods: Vec<AllowedMethod>,
		token_amounts: Vec<TokenAmount>,
		expires_at: u64,
		max_fee_usage: TokenAmount,
		nft_contracts: Vec<Felt>,
	) -> Result<OffChainSession, SessionError> {
		if allowed_methods.is_empty() {
			return Err(SessionError::EmptyAllowedMethods);
		}
		Ok(OffChainSession {
			expires_at,
			allowed_methods,
			token_amounts,
			nft_contracts,
			max_fee_usage,
			guardian_key: self.guardian_key,
			session_key: self.session_key.public_key(),
		})
	}
}

/// The owner's wallet: approves sessions and talks to the backend.
pub struct WalletService {
	account_address: Felt,
	chain_id: Felt,
	owner: StarkKeyPair,
	backend: Arc<BackendService>,
	hasher: Arc<dyn HashingInterface>,
}

impl WalletService {
	/// Creates a wallet for one account.
	pub fn new(
		account_address: Felt,
		chain_id: Felt,
		owner: StarkKeyPair,
		backend: Arc<BackendService>,
		hasher: Arc<dyn HashingInterface>,
	) -> Self {
		Self {
			account_address,
			chain_id,
			owner,
			backend,
			hasher,
		}
	}

	/// Address of the account the wallet controls.
	pub fn account_address(&self) -> Felt {
		self.account_address
	}

	/// Chain the wallet operates on.
	pub fn chain_id(&self) -> Felt {
		self.chain_id
	}

	/// The owner's one-time approval of a session request.
	pub async fn owner_session_signature(
		&self,
		session: &OffChainSession,
	) -> Result<StarkSignature, SessionError> {
		let typed_data = session_typed_data(session, self.chain_id);
		let message_hash = self
			.hasher
			.typed_data_hash(&typed_data, self.account_address)
			.await?;
		Ok(self.owner.sign(&message_hash)?)
	}

	/// The backend's one-time approval of a session request.
	pub async fn backend_session_signature(
		&self,
		session: &OffChainSession,
	) -> Result<StarkSignature, SessionError> {
		self.backend
			.sign_session(session, self.chain_id, self.account_address)
			.await
	}
}
