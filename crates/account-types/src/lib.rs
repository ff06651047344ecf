//! Common types module for the smart-account signing system.
//!
//! This module defines the core data types and structures shared by the
//! signing crates: field-element utilities, call and transaction detail
//! types, signer descriptors, raw signature payloads, session structures
//! and the Merkle commitment used by the session protocol. It provides a
//! centralized location for shared types to ensure every crate encodes
//! payloads exactly the way the on-chain verifier decodes them.

/// Call types and `__execute__` calldata compilation.
pub mod call;
/// Field-element hashing and encoding utilities.
pub mod hash;
/// Pedersen Merkle tree used for allowed-method commitments.
pub mod merkle;
/// Secure private-scalar material.
pub mod secret;
/// Session permission structures and the session-token wire format.
pub mod session;
/// Signer descriptors and their GUID derivation.
pub mod signer;
/// Raw signature payloads and their wire encodings.
pub mod signature;
/// Structured typed-data model for off-chain message hashing.
pub mod typed_data;
/// 256-bit values split into low/high field elements.
pub mod uint;
/// Transaction version families and their classification.
pub mod version;
/// Signer-relevant transaction details per version family.
pub mod transaction;

// Re-export all types for convenient access
pub use call::{compile_execute_calldata, Call};
pub use hash::{
	pedersen_hash_on_elements, selector_from_name, short_string_to_felt, starknet_keccak,
	ShortStringError,
};
pub use merkle::{verify_proof, MerkleTree};
pub use secret::{SecretScalar, SecretScalarError};
pub use session::{
	session_magic, AllowedMethod, CommittedSession, OffChainSession, SessionToken, TokenAmount,
};
pub use signature::{RawSignature, StarkSignature, WebauthnAssertion, WebauthnSignature};
pub use signer::{compile_signer_option, GuidError, SignerDescriptor, SignerScheme};
pub use transaction::{
	DeclareDetails, DeclareDetailsV2, DeclareDetailsV3, DeployAccountDetails,
	DeployAccountDetailsV1, DeployAccountDetailsV3, InvokeDetails, InvokeDetailsV1,
	InvokeDetailsV3, V3Fees,
};
pub use typed_data::{TypeField, TypedData, TypedDataDomain, TypedValue};
pub use uint::Uint256;
pub use version::{
	query_version_offset, DataAvailabilityMode, ResourceBounds, ResourceBoundsMapping,
	VersionError, VersionFamily,
};
