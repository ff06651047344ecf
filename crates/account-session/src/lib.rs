//! Session authorization module for the smart-account signing system.
//!
//! This module builds scoped, time-limited, Merkle-committed permission
//! sets and assembles the per-transaction session token: three
//! independent co-signatures (owner, delegated backend, ephemeral
//! session key), a backend-initialization signature, and one Merkle
//! inclusion proof per call. The backend's allowed-call check gates
//! proof generation, so a disallowed call can never obtain a
//! structurally valid proof.

use account_keys::KeyError;
use account_signer::SignerError;
use starknet_types_core::felt::Felt;
use thiserror::Error;

/// Backend, dapp and wallet services of the session protocol.
pub mod services;
/// Session-token assembly.
pub mod token;
/// The session typed-data schema and allowed-method commitments.
pub mod typed_data;

pub use services::{BackendService, DappService, WalletService};
pub use token::SessionTokenSigner;
pub use typed_data::{
	allowed_method_type_hash, method_leaf, method_leaves, session_typed_data,
	ALLOWED_METHOD_TYPE, SESSION_DOMAIN_NAME, SESSION_DOMAIN_VERSION,
};

/// Errors that can occur during session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
	/// Error that occurs when a call is outside the session's scope.
	#[error("call to contract {contract_address:#x} selector {selector:#x} is not allowed")]
	CallNotAllowed {
		/// Contract the rejected call targets.
		contract_address: Felt,
		/// Selector the rejected call invokes.
		selector: Felt,
	},
	/// Error that occurs when a session is created with nothing to allow.
	#[error("session has no allowed methods")]
	EmptyAllowedMethods,
	/// Error that occurs when signing or hashing fails.
	#[error(transparent)]
	Signer(#[from] SignerError),
	/// Error that occurs when a key operation fails.
	#[error(transparent)]
	Key(#[from] KeyError),
}
