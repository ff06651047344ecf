//! Transaction version families and their classification.
//!
//! The verifier recognizes two mutually exclusive hashing families: the
//! deprecated versions (0, 1 and 2) that carry a single `max_fee` scalar,
//! and version 3 with split resource bounds and data-availability modes.
//! Query versions (the base version plus 2^128) hash like their base
//! version and are classified the same way.

use starknet_types_core::felt::Felt;
use thiserror::Error;

/// Errors that can occur when classifying transaction versions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
	/// Error that occurs when the version belongs to no known family.
	#[error("unsupported transaction version: {0:#x}")]
	Unsupported(Felt),
	/// Error that occurs when a version is paired with the wrong detail format.
	#[error("transaction version {0:#x} does not match the detail format")]
	WrongFamily(Felt),
}

/// The two hashing families the verifier distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionFamily {
	/// Versions 0, 1 and 2: single-scalar fee, Pedersen hashing.
	Deprecated,
	/// Version 3: resource bounds, DA modes, Poseidon hashing.
	V3,
}

/// Offset added to a version to mark an estimate-only (query) transaction.
pub fn query_version_offset() -> Felt {
	Felt::from_hex_unchecked("0x100000000000000000000000000000000")
}

impl VersionFamily {
	/// Classifies a raw version felt, stripping the query offset first.
	///
	/// Classification happens once when detail structs are constructed;
	/// hashing never re-detects the family per call.
	pub fn classify(version: Felt) -> Result<Self, VersionError> {
		let offset = query_version_offset();
		let base = if version >= offset {
			version - offset
		} else {
			version
		};
		if base == Felt::ZERO || base == Felt::ONE || base == Felt::TWO {
			Ok(Self::Deprecated)
		} else if base == Felt::THREE {
			Ok(Self::V3)
		} else {
			Err(VersionError::Unsupported(version))
		}
	}
}

/// Data-availability mode for nonce or fee payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataAvailabilityMode {
	/// Data published on L1.
	#[default]
	L1,
	/// Data published on L2.
	L2,
}

impl DataAvailabilityMode {
	/// The integer the hashing rules pack for this mode.
	pub fn encoding(&self) -> u32 {
		match self {
			Self::L1 => 0,
			Self::L2 => 1,
		}
	}
}

/// Maximum amount and unit price for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceBounds {
	/// Maximum amount of the resource the transaction may consume.
	pub max_amount: u64,
	/// Maximum price per resource unit, in fri.
	pub max_price_per_unit: u128,
}

/// Resource bounds for the L1 and L2 gas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceBoundsMapping {
	/// Bounds for L1 gas.
	pub l1_gas: ResourceBounds,
	/// Bounds for L2 gas.
	pub l2_gas: ResourceBounds,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_classify_deprecated_versions() {
		for v in [Felt::ZERO, Felt::ONE, Felt::TWO] {
			assert_eq!(VersionFamily::classify(v), Ok(VersionFamily::Deprecated));
		}
	}

	#[test]
	fn test_classify_v3() {
		assert_eq!(VersionFamily::classify(Felt::THREE), Ok(VersionFamily::V3));
	}

	#[test]
	fn test_classify_query_versions() {
		let offset = query_version_offset();
		assert_eq!(
			VersionFamily::classify(Felt::ONE + offset),
			Ok(VersionFamily::Deprecated)
		);
		assert_eq!(
			VersionFamily::classify(Felt::THREE + offset),
			Ok(VersionFamily::V3)
		);
	}

	#[test]
	fn test_classify_rejects_unknown_versions() {
		let unknown = Felt::from(5_u64);
		assert_eq!(
			VersionFamily::classify(unknown),
			Err(VersionError::Unsupported(unknown))
		);
	}
}
