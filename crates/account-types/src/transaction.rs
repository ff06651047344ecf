//! Signer-relevant transaction details per version family.
//!
//! Each detail type is a two-case sum decided at construction: the
//! deprecated arm carries a single `max_fee` scalar, the V3 arm carries
//! tip, resource bounds, paymaster data and data-availability modes.
//! Constructors validate that the supplied version felt belongs to the
//! arm's family, so a hashing rule can never be paired with the wrong
//! field set.

use crate::version::{
	DataAvailabilityMode, ResourceBoundsMapping, VersionError, VersionFamily,
};
use starknet_types_core::felt::Felt;

fn expect_family(version: Felt, family: VersionFamily) -> Result<Felt, VersionError> {
	if VersionFamily::classify(version)? == family {
		Ok(version)
	} else {
		Err(VersionError::WrongFamily(version))
	}
}

/// Signer details for a deprecated-family invoke transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeDetailsV1 {
	/// Address of the account sending the transaction.
	pub sender_address: Felt,
	/// Chain the transaction targets.
	pub chain_id: Felt,
	/// Account nonce.
	pub nonce: Felt,
	/// Maximum fee, as a single scalar.
	pub max_fee: Felt,
	version: Felt,
}

impl InvokeDetailsV1 {
	/// Builds the details, validating the version family.
	pub fn new(
		sender_address: Felt,
		chain_id: Felt,
		nonce: Felt,
		max_fee: Felt,
		version: Felt,
	) -> Result<Self, VersionError> {
		Ok(Self {
			sender_address,
			chain_id,
			nonce,
			max_fee,
			version: expect_family(version, VersionFamily::Deprecated)?,
		})
	}

	/// The validated version felt.
	pub fn version(&self) -> Felt {
		self.version
	}
}

/// Common V3 fee and data-availability fields shared by all V3 details.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct V3Fees {
	/// Transaction tip.
	pub tip: u64,
	/// Resource bounds for L1 and L2 gas.
	pub resource_bounds: ResourceBoundsMapping,
	/// Paymaster data, empty when the account pays its own fee.
	pub paymaster_data: Vec<Felt>,
	/// Data-availability mode for the nonce.
	pub nonce_data_availability_mode: DataAvailabilityMode,
	/// Data-availability mode for the fee.
	pub fee_data_availability_mode: DataAvailabilityMode,
}

/// Signer details for a V3 invoke transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeDetailsV3 {
	/// Address of the account sending the transaction.
	pub sender_address: Felt,
	/// Chain the transaction targets.
	pub chain_id: Felt,
	/// Account nonce.
	pub nonce: Felt,
	/// Fee and data-availability fields.
	pub fees: V3Fees,
	/// Deployment data for accounts deployed alongside the invoke.
	pub account_deployment_data: Vec<Felt>,
	version: Felt,
}

impl InvokeDetailsV3 {
	/// Builds the details, validating the version family.
	pub fn new(
		sender_address: Felt,
		chain_id: Felt,
		nonce: Felt,
		fees: V3Fees,
		account_deployment_data: Vec<Felt>,
		version: Felt,
	) -> Result<Self, VersionError> {
		Ok(Self {
			sender_address,
			chain_id,
			nonce,
			fees,
			account_deployment_data,
			version: expect_family(version, VersionFamily::V3)?,
		})
	}

	/// The validated version felt.
	pub fn version(&self) -> Felt {
		self.version
	}
}

/// Signer details for an invoke transaction, by version family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeDetails {
	/// Deprecated family (versions 0-2).
	V1(InvokeDetailsV1),
	/// Version 3.
	V3(InvokeDetailsV3),
}

impl InvokeDetails {
	/// Address of the account sending the transaction.
	pub fn sender_address(&self) -> Felt {
		match self {
			Self::V1(details) => details.sender_address,
			Self::V3(details) => details.sender_address,
		}
	}

	/// Chain the transaction targets.
	pub fn chain_id(&self) -> Felt {
		match self {
			Self::V1(details) => details.chain_id,
			Self::V3(details) => details.chain_id,
		}
	}

	/// Account nonce.
	pub fn nonce(&self) -> Felt {
		match self {
			Self::V1(details) => details.nonce,
			Self::V3(details) => details.nonce,
		}
	}

	/// The validated version felt.
	pub fn version(&self) -> Felt {
		match self {
			Self::V1(details) => details.version(),
			Self::V3(details) => details.version(),
		}
	}
}

/// Signer details for a deprecated-family declare transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclareDetailsV2 {
	/// Address of the declaring account.
	pub sender_address: Felt,
	/// Chain the transaction targets.
	pub chain_id: Felt,
	/// Account nonce.
	pub nonce: Felt,
	/// Maximum fee, as a single scalar.
	pub max_fee: Felt,
	/// Hash of the declared class.
	pub class_hash: Felt,
	/// Hash of the compiled class.
	pub compiled_class_hash: Felt,
	version: Felt,
}

impl DeclareDetailsV2 {
	/// Builds the details, validating the version family.
	pub fn new(
		sender_address: Felt,
		chain_id: Felt,
		nonce: Felt,
		max_fee: Felt,
		class_hash: Felt,
		compiled_class_hash: Felt,
		version: Felt,
	) -> Result<Self, VersionError> {
		Ok(Self {
			sender_address,
			chain_id,
			nonce,
			max_fee,
			class_hash,
			compiled_class_hash,
			version: expect_family(version, VersionFamily::Deprecated)?,
		})
	}

	/// The validated version felt.
	pub fn version(&self) -> Felt {
		self.version
	}
}

/// Signer details for a V3 declare transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclareDetailsV3 {
	/// Address of the declaring account.
	pub sender_address: Felt,
	/// Chain the transaction targets.
	pub chain_id: Felt,
	/// Account nonce.
	pub nonce: Felt,
	/// Fee and data-availability fields.
	pub fees: V3Fees,
	/// Deployment data for accounts deployed alongside the declare.
	pub account_deployment_data: Vec<Felt>,
	/// Hash of the declared class.
	pub class_hash: Felt,
	/// Hash of the compiled class.
	pub compiled_class_hash: Felt,
	version: Felt,
}

impl DeclareDetailsV3 {
	/// Builds the details, validating the version family.
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		sender_address: Felt,
		chain_id: Felt,
		nonce: Felt,
		fees: V3Fees,
		account_deployment_data: Vec<Felt>,
		class_hash: Felt,
		compiled_class_hash: Felt,
		version: Felt,
	) -> Result<Self, VersionError> {
		Ok(Self {
			sender_address,
			chain_id,
			nonce,
			fees,
			account_deployment_data,
			class_hash,
			compiled_class_hash,
			version: expect_family(version, VersionFamily::V3)?,
		})
	}

	/// The validated version felt.
	pub fn version(&self) -> Felt {
		self.version
	}
}

/// Signer details for a declare transaction, by version family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclareDetails {
	/// Deprecated family.
	V2(DeclareDetailsV2),
	/// Version 3.
	V3(DeclareDetailsV3),
}

/// Signer details for a deprecated-family deploy-account transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployAccountDetailsV1 {
	/// Address the account will be deployed at.
	pub contract_address: Felt,
	/// Chain the transaction targets.
	pub chain_id: Felt,
	/// Account nonce.
	pub nonce: Felt,
	/// Maximum fee, as a single scalar.
	pub max_fee: Felt,
	/// Hash of the account class.
	pub class_hash: Felt,
	/// Salt used to derive the account address.
	pub contract_address_salt: Felt,
	/// Constructor calldata.
	pub constructor_calldata: Vec<Felt>,
	version: Felt,
}

impl DeployAccountDetailsV1 {
	/// Builds the details, validating the version family.
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		contract_address: Felt,
		chain_id: Felt,
		nonce: Felt,
		max_fee: Felt,
		class_hash: Felt,
		contract_address_salt: Felt,
		constructor_calldata: Vec<Felt>,
		version: Felt,
	) -> Result<Self, VersionError> {
		Ok(Self {
			contract_address,
			chain_id,
			nonce,
			max_fee,
			class_hash,
			contract_address_salt,
			constructor_calldata,
			version: expect_family(version, VersionFamily::Deprecated)?,
		})
	}

	/// The validated version felt.
	pub fn version(&self) -> Felt {
		self.version
	}
}

/// Signer details for a V3 deploy-account transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployAccountDetailsV3 {
	/// Address the account will be deployed at.
	pub contract_address: Felt,
	/// Chain the transaction targets.
	pub chain_id: Felt,
	/// Account nonce.
	pub nonce: Felt,
	/// Fee and data-availability fields.
	pub fees: V3Fees,
	/// Hash of the account class.
	pub class_hash: Felt,
	/// Salt used to derive the account address.
	pub contract_address_salt: Felt,
	/// Constructor calldata.
	pub constructor_calldata: Vec<Felt>,
	version: Felt,
}

impl DeployAccountDetailsV3 {
	/// Builds the details, validating the version family.
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		contract_address: Felt,
		chain_id: Felt,
		nonce: Felt,
		fees: V3Fees,
		class_hash: Felt,
		contract_address_salt: Felt,
		constructor_calldata: Vec<Felt>,
		version: Felt,
	) -> Result<Self, VersionError> {
		Ok(Self {
			contract_address,
			chain_id,
			nonce,
			fees,
			class_hash,
			contract_address_salt,
			constructor_calldata,
			version: expect_family(version, VersionFamily::V3)?,
		})
	}

	/// The validated version felt.
	pub fn version(&self) -> Felt {
		self.version
	}
}

/// Signer details for a deploy-account transaction, by version family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployAccountDetails {
	/// Deprecated family.
	V1(DeployAccountDetailsV1),
	/// Version 3.
	V3(DeployAccountDetailsV3),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_invoke_details_reject_wrong_family() {
		let err = InvokeDetailsV1::new(
			Felt::ONE,
			Felt::ONE,
			Felt::ZERO,
			Felt::ZERO,
			Felt::THREE,
		)
		.unwrap_err();
		assert_eq!(err, VersionError::WrongFamily(Felt::THREE));

		let err = InvokeDetailsV3::new(
			Felt::ONE,
			Felt::ONE,
			Felt::ZERO,
			V3Fees::default(),
			vec![],
			Felt::ONE,
		)
		.unwrap_err();
		assert_eq!(err, VersionError::WrongFamily(Felt::ONE));
	}

	#[test]
	fn test_invoke_details_reject_unknown_version() {
		let err = InvokeDetailsV1::new(
			Felt::ONE,
			Felt::ONE,
			Felt::ZERO,
			Felt::ZERO,
			Felt::from(9_u64),
		)
		.unwrap_err();
		assert_eq!(err, VersionError::Unsupported(Felt::from(9_u64)));
	}

	#[test]
	fn test_invoke_details_accessors() {
		let details = InvokeDetails::V1(
			InvokeDetailsV1::new(
				Felt::from(0xabc_u64),
				Felt::ONE,
				Felt::ZERO,
				Felt::from(1000_u64),
				Felt::ONE,
			)
			.unwrap(),
		);
		assert_eq!(details.sender_address(), Felt::from(0xabc_u64));
		assert_eq!(details.version(), Felt::ONE);
	}
}
