//! Starknet canonical hashing rules.
//!
//! The hashing collaborator the on-chain verifier's companion library
//! defines: Pedersen chains for the deprecated transaction family,
//! Poseidon chains with packed resource bounds for version 3, and
//! revision-0 structured-message hashing for off-chain approvals.

use crate::{HashingInterface, SignerError};
use account_types::{
	pedersen_hash_on_elements, selector_from_name, short_string_to_felt, starknet_keccak,
	DeclareDetails, DeployAccountDetails, InvokeDetails, MerkleTree, ResourceBounds, TypedData,
	TypedValue, V3Fees,
};
use async_trait::async_trait;
use starknet_crypto::poseidon_hash_many;
use starknet_types_core::felt::Felt;

fn tag(value: &str) -> Felt {
	Felt::from_bytes_be_slice(value.as_bytes())
}

fn two_pow_128() -> Felt {
	Felt::from_hex_unchecked("0x100000000000000000000000000000000")
}

fn two_pow_192() -> Felt {
	Felt::from_hex_unchecked("0x1000000000000000000000000000000000000000000000000")
}

/// Packs one resource bound as `name << 192 | max_amount << 128 | price`.
fn pack_resource_bounds(name: &str, bounds: &ResourceBounds) -> Felt {
	tag(name) * two_pow_192()
		+ Felt::from(bounds.max_amount) * two_pow_128()
		+ Felt::from(bounds.max_price_per_unit)
}

fn v3_fee_hash(fees: &V3Fees) -> Felt {
	poseidon_hash_many(&[
		Felt::from(fees.tip),
		pack_resource_bounds("L1_GAS", &fees.resource_bounds.l1_gas),
		pack_resource_bounds("L2_GAS", &fees.resource_bounds.l2_gas),
	])
}

/// Packs the DA modes as `nonce_mode << 32 | fee_mode`.
fn da_modes_felt(fees: &V3Fees) -> Felt {
	let packed = ((fees.nonce_data_availability_mode.encoding() as u64) << 32)
		| fees.fee_data_availability_mode.encoding() as u64;
	Felt::from(packed)
}

/// The Starknet implementation of the canonical-hash collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct StarknetHasher;

impl StarknetHasher {
	/// Creates the hasher.
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl HashingInterface for StarknetHasher {
	async fn invoke_hash(
		&self,
		details: &InvokeDetails,
		execute_calldata: &[Felt],
	) -> Result<Felt, SignerError> {
		match details {
			InvokeDetails::V1(details) => Ok(pedersen_hash_on_elements(&[
				tag("invoke"),
				details.version(),
				details.sender_address,
				Felt::ZERO,
				pedersen_hash_on_elements(execute_calldata),
				details.max_fee,
				details.chain_id,
				details.nonce,
			])),
			InvokeDetails::V3(details) => Ok(poseidon_hash_many(&[
				tag("invoke"),
				details.version(),
				details.sender_address,
				v3_fee_hash(&details.fees),
				poseidon_hash_many(&details.fees.paymaster_data),
				details.chain_id,
				details.nonce,
				da_modes_felt(&details.fees),
				poseidon_hash_many(&details.account_deployment_data),
				poseidon_hash_many(execute_calldata),
			])),
		}
	}

	async fn declare_hash(&self, details: &DeclareDetails) -> Result<Felt, SignerError> {
		match details {
			DeclareDetails::V2(details) => Ok(pedersen_hash_on_elements(&[
				tag("declare"),
				details.version(),
				details.sender_address,
				Felt::ZERO,
				pedersen_hash_on_elements(&[details.class_hash]),
				details.max_fee,
				details.chain_id,
				details.nonce,
				details.compiled_class_hash,
			])),
			DeclareDetails::V3(details) => Ok(poseidon_hash_many(&[
				tag("declare"),
				details.version(),
				details.sender_address,
				v3_fee_hash(&details.fees),
				poseidon_hash_many(&details.fees.paymaster_data),
				details.chain_id,
				details.nonce,
				da_modes_felt(&details.fees),
				poseidon_hash_many(&details.account_deployment_data),
				details.class_hash,
				details.compiled_class_hash,
			])),
		}
	}

	async fn deploy_account_hash(
		&self,
		details: &DeployAccountDetails,
	) -> Result<Felt, SignerError> {
		match details {
			DeployAccountDetails::V1(details) => {
				let mut constructor_elements =
					vec![details.class_hash, details.contract_address_salt];
				constructor_elements.extend_from_slice(&details.constructor_calldata);
				Ok(pedersen_hash_on_elements(&[
					tag("deploy_account"),
					details.version(),
					details.contract_address,
					Felt::ZERO,
					pedersen_hash_on_elements(&constructor_elements),
					details.max_fee,
					details.chain_id,
					details.nonce,
				]))
			}
			DeployAccountDetails::V3(details) => Ok(poseidon_hash_many(&[
				tag("deploy_account"),
				details.version(),
				details.contract_address,
				v3_fee_hash(&details.fees),
				poseidon_hash_many(&details.fees.paymaster_data),
				details.chain_id,
				details.nonce,
				da_modes_felt(&details.fees),
				poseidon_hash_many(&details.constructor_calldata),
				details.class_hash,
				details.contract_address_salt,
			])),
		}
	}

	async fn typed_data_hash(
		&self,
		typed_data: &TypedData,
		account_address: Felt,
	) -> Result<Felt, SignerError> {
		let TypedValue::Struct(message_fields) = &typed_data.message else {
			return Err(SignerError::Hashing(
				"typed-data message must be a struct".to_string(),
			));
		};
		let domain_fields = vec![
			(
				"name".to_string(),
				TypedValue::String(typed_data.domain.name.clone()),
			),
			(
				"version".to_string(),
				TypedValue::String(typed_data.domain.version.clone()),
			),
			(
				"chainId".to_string(),
				TypedValue::Felt(typed_data.domain.chain_id),
			),
		];
		let domain_hash = struct_hash(typed_data, "StarkNetDomain", &domain_fields)?;
		let message_hash = struct_hash(typed_data, &typed_data.primary_type, message_fields)?;
		Ok(pedersen_hash_on_elements(&[
			tag("StarkNet Message"),
			domain_hash,
			account_address,
			message_hash,
		]))
	}
}

/// Hashes the encoded type string of `type_name`.
fn type_hash(typed_data: &TypedData, type_name: &str) -> Result<Felt, SignerError> {
	Ok(starknet_keccak(encode_type(typed_data, type_name)?.as_bytes()))
}

/// Encodes a type as `Name(field:type,...)` followed by its referenced
/// custom types sorted alphabetically, the form the type hash covers.
fn encode_type(typed_data: &TypedData, type_name: &str) -> Result<String, SignerError> {
	let mut dependencies = Vec::new();
	collect_dependencies(typed_data, type_name, &mut dependencies)?;
	let mut referenced: Vec<String> = dependencies
		.into_iter()
		.filter(|name| name != type_name)
		.collect();
	referenced.sort();

	let mut ordered = vec![type_name.to_string()];
	ordered.extend(referenced);

	let mut encoded = String::new();
	for name in ordered {
		let fields = definition(typed_data, &name)?;
		let joined = fields
			.iter()
			.map(|field| format!("{}:{}", field.name, field.ty))
			.collect::<Vec<_>>()
			.join(",");
		encoded.push_str(&format!("{name}({joined})"));
	}
	Ok(encoded)
}

fn collect_dependencies(
	typed_data: &TypedData,
	type_name: &str,
	out: &mut Vec<String>,
) -> Result<(), SignerError> {
	if out.iter().any(|name| name == type_name) {
		return Ok(());
	}
	out.push(type_name.to_string());
	for field in definition(typed_data, type_name)? {
		let referenced = if field.ty == "merkletree" {
			field.contains.as_deref().ok_or_else(|| {
				SignerError::Hashing(format!(
					"merkletree field {} is missing its contained type",
					field.name
				))
			})?
		} else {
			field.ty.trim_end_matches('*')
		};
		if typed_data.type_definition(referenced).is_some() {
			collect_dependencies(typed_data, referenced, out)?;
		}
	}
	Ok(())
}

fn definition<'a>(
	typed_data: &'a TypedData,
	type_name: &str,
) -> Result<&'a [account_types::TypeField], SignerError> {
	typed_data
		.type_definition(type_name)
		.ok_or_else(|| SignerError::Hashing(format!("unknown type {type_name}")))
}

/// Hashes a struct value: the type hash followed by each field encoded
/// in declaration order.
fn struct_hash(
	typed_data: &TypedData,
	type_name: &str,
	fields: &[(String, TypedValue)],
) -> Result<Felt, SignerError> {
	let mut elements = vec![type_hash(typed_data, type_name)?];
	for field in definition(typed_data, type_name)? {
		let value = fields
			.iter()
			.find(|(name, _)| name == &field.name)
			.map(|(_, value)| value)
			.ok_or_else(|| {
				SignerError::Hashing(format!(
					"message is missing field {} of {type_name}",
					field.name
				))
			})?;
		if field.ty == "merkletree" {
			let contains = field.contains.as_deref().ok_or_else(|| {
				SignerError::Hashing(format!(
					"merkletree field {} is missing its contained type",
					field.name
				))
			})?;
			elements.push(merkletree_root(typed_data, contains, value)?);
		} else {
			elements.push(encode_value(typed_data, &field.ty, value)?);
		}
	}
	Ok(pedersen_hash_on_elements(&elements))
}

/// Commits a merkletree field: leaves are the struct hashes of the
/// contained values, in their original order.
fn merkletree_root(
	typed_data: &TypedData,
	contains: &str,
	value: &TypedValue,
) -> Result<Felt, SignerError> {
	let TypedValue::Array(items) = value else {
		return Err(SignerError::Hashing(
			"merkletree field expects an array value".to_string(),
		));
	};
	let mut leaves = Vec::with_capacity(items.len());
	for item in items {
		let TypedValue::Struct(fields) = item else {
			return Err(SignerError::Hashing(format!(
				"merkletree leaves must be {contains} structs"
			)));
		};
		leaves.push(struct_hash(typed_data, contains, fields)?);
	}
	Ok(MerkleTree::new(leaves).root())
}

/// Encodes one value under its declared type.
fn encode_value(
	typed_data: &TypedData,
	declared: &str,
	value: &TypedValue,
) -> Result<Felt, SignerError> {
	if let Some(element_type) = declared.strip_suffix('*') {
		let TypedValue::Array(items) = value else {
			return Err(SignerError::Hashing(format!(
				"{declared} expects an array value"
			)));
		};
		let mut encoded = Vec::with_capacity(items.len());
		for item in items {
			encoded.push(encode_value(typed_data, element_type, item)?);
		}
		return Ok(pedersen_hash_on_elements(&encoded));
	}

	if typed_data.type_definition(declared).is_some() {
		return match value {
			TypedValue::Struct(fields) => struct_hash(typed_data, declared, fields),
			TypedValue::U256(value) => {
				// u256 values are structs of their two halves.
				let elements = vec![type_hash(typed_data, declared)?, value.low, value.high];
				Ok(pedersen_hash_on_elements(&elements))
			}
			_ => Err(SignerError::Hashing(format!(
				"{declared} expects a struct value"
			))),
		};
	}

	match value {
		TypedValue::Felt(felt) => Ok(*felt),
		TypedValue::String(text) if declared == "selector" => Ok(selector_from_name(text)),
		TypedValue::String(text) => short_string_to_felt(text)
			.map_err(|e| SignerError::Hashing(e.to_string())),
		_ => Err(SignerError::Hashing(format!(
			"cannot encode value for type {declared}"
		))),
	}
}
