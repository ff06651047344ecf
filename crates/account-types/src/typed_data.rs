//! Structured typed-data model for off-chain message hashing.
//!
//! A minimal representation of the structured messages accounts approve
//! off-chain: an ordered type table, a domain and a message value tree.
//! Hashing the model is the canonical-hash collaborator's job; this
//! module only fixes the shape both sides agree on.

use crate::uint::Uint256;
use starknet_types_core::felt::Felt;

/// One field of a struct type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeField {
	/// Field name as it appears in the encoded type string.
	pub name: String,
	/// Field type: `felt`, `selector`, a struct name, `Type*` for arrays
	/// or `merkletree`.
	pub ty: String,
	/// For `merkletree` fields, the contained struct type.
	pub contains: Option<String>,
}

impl TypeField {
	/// Creates a plain field.
	pub fn new(name: &str, ty: &str) -> Self {
		Self {
			name: name.to_string(),
			ty: ty.to_string(),
			contains: None,
		}
	}

	/// Creates a merkletree field over the contained type.
	pub fn merkletree(name: &str, contains: &str) -> Self {
		Self {
			name: name.to_string(),
			ty: "merkletree".to_string(),
			contains: Some(contains.to_string()),
		}
	}
}

/// The domain a structured message is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedDataDomain {
	/// Application name, encoded as a short string.
	pub name: String,
	/// Schema version, encoded as a short string.
	pub version: String,
	/// Chain the approval is valid on.
	pub chain_id: Felt,
}

/// A value in the message tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
	/// A plain field element.
	Felt(Felt),
	/// An ASCII short string.
	String(String),
	/// A 256-bit value.
	U256(Uint256),
	/// An ordered sequence of values.
	Array(Vec<TypedValue>),
	/// A struct as ordered (field name, value) pairs.
	Struct(Vec<(String, TypedValue)>),
}

impl TypedValue {
	/// Convenience constructor for struct values.
	pub fn object(fields: Vec<(&str, TypedValue)>) -> Self {
		Self::Struct(
			fields
				.into_iter()
				.map(|(name, value)| (name.to_string(), value))
				.collect(),
		)
	}
}

/// A complete structured message ready for hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedData {
	/// Ordered type table, keyed by type name.
	pub types: Vec<(String, Vec<TypeField>)>,
	/// Name of the message's root type.
	pub primary_type: String,
	/// Domain the approval is bound to.
	pub domain: TypedDataDomain,
	/// The message value tree; must be a struct of the primary type.
	pub message: TypedValue,
}

impl TypedData {
	/// Looks up a type definition by name.
	pub fn type_definition(&self, name: &str) -> Option<&[TypeField]> {
		self.types
			.iter()
			.find(|(type_name, _)| type_name == name)
			.map(|(_, fields)| fields.as_slice())
	}
}
