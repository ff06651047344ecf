//! 256-bit values split into low/high field elements.
//!
//! The verifier consumes 256-bit quantities (secondary-curve coordinates,
//! signature components, token amounts) as a pair of 128-bit field
//! elements serialized low first.

use starknet_types_core::felt::Felt;

/// A 256-bit value as two 128-bit halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uint256 {
	/// The low 128 bits.
	pub low: Felt,
	/// The high 128 bits.
	pub high: Felt,
}

impl Uint256 {
	/// Splits a 32-byte big-endian value into its halves.
	pub fn from_bytes_be(bytes: &[u8; 32]) -> Self {
		Self {
			low: Felt::from_bytes_be_slice(&bytes[16..]),
			high: Felt::from_bytes_be_slice(&bytes[..16]),
		}
	}

	/// Splits a big-endian byte slice of at most 32 bytes, left-padding
	/// shorter input with zeroes.
	pub fn from_be_slice(bytes: &[u8]) -> Self {
		let mut padded = [0u8; 32];
		let len = bytes.len().min(32);
		padded[32 - len..].copy_from_slice(&bytes[bytes.len() - len..]);
		Self::from_bytes_be(&padded)
	}

	/// Splits a field element's canonical 32-byte representation.
	pub fn from_felt(value: &Felt) -> Self {
		Self::from_bytes_be(&value.to_bytes_be())
	}

	/// Builds the value from a small integer.
	pub fn from_u128(value: u128) -> Self {
		Self {
			low: Felt::from(value),
			high: Felt::ZERO,
		}
	}

	/// Serializes the value in wire order, low half first.
	pub fn to_felts(&self) -> [Felt; 2] {
		[self.low, self.high]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_uint256_splits_halves() {
		let mut bytes = [0u8; 32];
		bytes[15] = 0x01; // lowest byte of the high half
		bytes[31] = 0x02; // lowest byte of the low half
		let value = Uint256::from_bytes_be(&bytes);
		assert_eq!(value.low, Felt::TWO);
		assert_eq!(value.high, Felt::ONE);
	}

	#[test]
	fn test_uint256_from_felt_round_trip() {
		let felt = Felt::from_hex("0xffffffffffffffffffffffffffffffff").unwrap();
		let value = Uint256::from_felt(&felt);
		assert_eq!(value.low, felt);
		assert_eq!(value.high, Felt::ZERO);
	}

	#[test]
	fn test_uint256_from_short_slice_left_pads() {
		let value = Uint256::from_be_slice(&[0xab, 0xcd]);
		assert_eq!(value.low, Felt::from(0xabcd_u64));
		assert_eq!(value.high, Felt::ZERO);
	}

	#[test]
	fn test_uint256_wire_order_is_low_first() {
		let value = Uint256::from_u128(7);
		assert_eq!(value.to_felts(), [Felt::from(7_u64), Felt::ZERO]);
	}
}
