//! The session typed-data schema and allowed-method commitments.
//!
//! The schema must hash identically on both sides of the protocol: the
//! merkletree leaves the typed-data hash commits to are the same
//! `h(type_hash, contract, selector)` leaves the per-transaction proofs
//! open, so one constant type string anchors both.

use account_types::{
	pedersen_hash_on_elements, starknet_keccak, AllowedMethod, OffChainSession, TypeField,
	TypedData, TypedDataDomain, TypedValue,
};
use starknet_types_core::felt::Felt;

/// Domain name bound into every session approval.
pub const SESSION_DOMAIN_NAME: &str = "SessionAccount.session";
/// Domain version bound into every session approval.
pub const SESSION_DOMAIN_VERSION: &str = "1";

/// Encoded type string of one allowed method; its hash is the constant
/// domain tag of every Merkle leaf.
pub const ALLOWED_METHOD_TYPE: &str = "Allowed Method(Contract Address:felt,selector:selector)";

/// The constant domain tag hashed into every allowed-method leaf.
pub fn allowed_method_type_hash() -> Felt {
	starknet_keccak(ALLOWED_METHOD_TYPE.as_bytes())
}

/// Hashes one allowed method into its Merkle leaf.
pub fn method_leaf(method: &AllowedMethod) -> Felt {
	pedersen_hash_on_elements(&[
		allowed_method_type_hash(),
		method.contract_address,
		method.selector,
	])
}

/// Hashes the full method list into leaves, preserving list order.
pub fn method_leaves(methods: &[AllowedMethod]) -> Vec<Felt> {
	methods.iter().map(method_leaf).collect()
}

fn session_types() -> Vec<(String, Vec<TypeField>)> {
	vec![
		(
			"StarkNetDomain".to_string(),
			vec![
				TypeField::new("name", "felt"),
				TypeField::new("version", "felt"),
				TypeField::new("chainId", "felt"),
			],
		),
		(
			"Allowed Method".to_string(),
			vec![
				TypeField::new("Contract Address", "felt"),
				TypeField::new("selector", "selector"),
			],
		),
		(
			"TokenAmount".to_string(),
			vec![
				TypeField::new("token_address", "felt"),
				TypeField::new("amount", "u256"),
			],
		),
		(
			"u256".to_string(),
			vec![
				TypeField::new("low", "u128"),
				TypeField::new("high", "u128"),
			],
		),
		(
			"Session".to_string(),
			vec![
				TypeField::new("Expires At", "felt"),
				TypeField::merkletree("Allowed Methods", "Allowed Method"),
				TypeField::new("Token Amounts", "TokenAmount*"),
				TypeField::new("NFT Contracts", "felt*"),
				TypeField::new("Max Fee Usage", "TokenAmount"),
				TypeField::new("Guardian Key", "felt"),
				TypeField::new("Session Key", "felt"),
			],
		),
	]
}

/// Builds the structured message the owner and backend approve.
///
/// Recomputed per use: the resulting hash depends on the account address
/// the collaborator binds it to, so nothing here is cached.
pub fn session_typed_data(session: &OffChainSession, chain_id: Felt) -> TypedData {
	let allowed_methods = session
		.allowed_methods
		.iter()
		.map(|method| {
			TypedValue::object(vec![
				("Contract Address", TypedValue::Felt(method.contract_address)),
				("selector", TypedValue::Felt(method.selector)),
			])
		})
		.collect();
	let token_amounts = session
		.token_amounts
		.iter()
		.map(|amount| {
			TypedValue::object(vec![
				("token_address", TypedValue::Felt(amount.token_address)),
				("amount", TypedValue::U256(amount.amount)),
			])
		})
		.collect();
	let nft_contracts = session
		.nft_contracts
		.iter()
		.map(|contract| TypedValue::Felt(*contract))
		.collect();

	TypedData {
		types: session_types(),
		primary_type: "Session".to_string(),
		domain: TypedDataDomain {
			name: SESSION_DOMAIN_NAME.to_string(),
			version: SESSION_DOMAIN_VERSION.to_string(),
			chain_id,
		},
		message: TypedValue::object(vec![
			("Expires At", TypedValue::Felt(Felt::from(session.expires_at))),
			("Allowed Methods", TypedValue::Array(allowed_methods)),
			("Token Amounts", TypedValue::Array(token_amounts)),
			("NFT Contracts", TypedValue::Array(nft_contracts)),
			(
				"Max Fee Usage",
				TypedValue::object(vec![
					(
						"token_address",
						TypedValue::Felt(session.max_fee_usage.token_address),
					),
					("amount", TypedValue::U256(session.max_fee_usage.amount)),
				]),
			),
			("Guardian Key", TypedValue::Felt(session.guardian_key)),
			("Session Key", TypedValue::Felt(session.session_key)),
		]),
	}
}
