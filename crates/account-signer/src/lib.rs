//! Signing protocol module for the smart-account signing system.
//!
//! This module converts structured requests (typed messages, invoke,
//! declare and deploy-account transactions) into the canonical hashes
//! the on-chain verifier recomputes, then delegates to a raw signer.
//! Hash computation is owned by the `HashingInterface` collaborator;
//! the service only selects the rule for the transaction's version
//! family and never re-detects it per call.

use account_keys::KeyError;
use account_types::{
	compile_execute_calldata, Call, DeclareDetails, DeployAccountDetails, InvokeDetails,
	TypedData, VersionError,
};
use async_trait::async_trait;
use starknet_types_core::felt::Felt;
use std::sync::Arc;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod starknet;
}

/// Multisig signature aggregation.
pub mod multisig;

pub use implementations::starknet::StarknetHasher;
pub use multisig::{AccountSigner, LegacyMultisigSigner, LegacySigner, MultisigSigner};

/// Errors that can occur during signing operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignerError {
	/// Error that occurs when a key operation fails.
	#[error(transparent)]
	Key(#[from] KeyError),
	/// Error that occurs when a transaction version is unsupported.
	#[error(transparent)]
	Version(#[from] VersionError),
	/// Error that occurs when a signer does not support an operation.
	#[error("not implemented: {0}")]
	NotImplemented(String),
	/// Error that occurs when canonical hashing fails.
	#[error("hashing failed: {0}")]
	Hashing(String),
}

/// Trait defining the canonical-hash collaborator.
///
/// The verifier recomputes these hashes on-chain; any implementation
/// must match its algorithm exactly, down to element order. The signing
/// service treats this as an oracle and never hashes transactions
/// itself.
#[async_trait]
pub trait HashingInterface: Send + Sync {
	/// Computes the invoke transaction hash for the details' version family.
	async fn invoke_hash(
		&self,
		details: &InvokeDetails,
		execute_calldata: &[Felt],
	) -> Result<Felt, SignerError>;

	/// Computes the declare transaction hash for the details' version family.
	async fn declare_hash(&self, details: &DeclareDetails) -> Result<Felt, SignerError>;

	/// Computes the deploy-account transaction hash for the details'
	/// version family.
	async fn deploy_account_hash(
		&self,
		details: &DeployAccountDetails,
	) -> Result<Felt, SignerError>;

	/// Computes the structured-message hash bound to an account address.
	async fn typed_data_hash(
		&self,
		typed_data: &TypedData,
		account_address: Felt,
	) -> Result<Felt, SignerError>;
}

/// Trait defining the raw-signing primitive.
///
/// Implementations receive the already-canonical message hash and return
/// the serialized signature payload. Everything above the hash (version
/// families, typed-data schemas) is the signing service's concern.
#[async_trait]
pub trait RawSigner: Send + Sync {
	/// Signs a canonical message hash.
	async fn sign_raw(&self, message_hash: Felt) -> Result<Vec<Felt>, SignerError>;
}

/// Service that converts structured requests into signed payloads.
///
/// Wraps a raw signer and the canonical-hash collaborator; each signing
/// method computes the hash through the collaborator and delegates to
/// the signer. No state is mutated and no network is touched.
pub struct SigningService {
	/// The raw signer producing signature payloads.
	signer: Box<dyn RawSigner>,
	/// The canonical-hash collaborator.
	hasher: Arc<dyn HashingInterface>,
}

impl SigningService {
	/// Creates a new SigningService with the specified signer and hasher.
	pub fn new(signer: Box<dyn RawSigner>, hasher: Arc<dyn HashingInterface>) -> Self {
		Self { signer, hasher }
	}

	/// Signs a structured message bound to an account address.
	pub async fn sign_message(
		&self,
		typed_data: &TypedData,
		account_address: Felt,
	) -> Result<Vec<Felt>, SignerError> {
		let message_hash = self
			.hasher
			.typed_data_hash(typed_data, account_address)
			.await?;
		tracing::debug!(%message_hash, "signing typed data");
		self.signer.sign_raw(message_hash).await
	}

	/// Signs an invoke transaction.
	pub async fn sign_invoke(
		&self,
		calls: &[Call],
		details: &InvokeDetails,
	) -> Result<Vec<Felt>, SignerError> {
		let execute_calldata = compile_execute_calldata(calls);
		let message_hash = self.hasher.invoke_hash(details, &execute_calldata).await?;
		tracing::debug!(%message_hash, "signing invoke transaction");
		self.signer.sign_raw(message_hash).await
	}

	/// Signs a declare transaction.
	pub async fn sign_declare(&self, details: &DeclareDetails) -> Result<Vec<Felt>, SignerError> {
		let message_hash = self.hasher.declare_hash(details).await?;
		tracing::debug!(%message_hash, "signing declare transaction");
		self.signer.sign_raw(message_hash).await
	}

	/// Signs a deploy-account transaction.
	pub async fn sign_deploy_account(
		&self,
		details: &DeployAccountDetails,
	) -> Result<Vec<Felt>, SignerError> {
		let message_hash = self.hasher.deploy_account_hash(details).await?;
		tracing::debug!(%message_hash, "signing deploy-account transaction");
		self.signer.sign_raw(message_hash).await
	}
}
