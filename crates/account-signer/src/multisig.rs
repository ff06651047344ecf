//! Multisig signature aggregation.
//!
//! An aggregator signs one hash with each constituent key and
//! concatenates the results in the caller-supplied order. It validates
//! nothing: set membership, thresholds and the verifier's ascending,
//! duplicate-free GUID ordering are all enforced on-chain, and a payload
//! the verifier rejects is a consumer error, not an aggregation failure.

use crate::{RawSigner, SignerError};
use account_keys::{AccountKey, StarkKeyPair};
use async_trait::async_trait;
use starknet_types_core::felt::Felt;

/// Aggregates N signer outputs into one length-prefixed payload.
///
/// Wire format: `[count, signature_0..., signature_1..., ...]` with each
/// signature in the tagged current format.
pub struct MultisigSigner {
	keys: Vec<AccountKey>,
}

impl MultisigSigner {
	/// Creates an aggregator over the given keys, preserving their order.
	pub fn new(keys: Vec<AccountKey>) -> Self {
		Self { keys }
	}
}

#[async_trait]
impl RawSigner for MultisigSigner {
	async fn sign_raw(&self, message_hash: Felt) -> Result<Vec<Felt>, SignerError> {
		let mut payload = vec![Felt::from(self.keys.len() as u64)];
		for key in &self.keys {
			payload.extend(key.sign(&message_hash)?.to_felts());
		}
		Ok(payload)
	}
}

/// The account's standard signer: an owner plus an optional guardian.
pub struct AccountSigner {
	inner: MultisigSigner,
}

impl AccountSigner {
	/// Creates the signer from an owner and an optional guardian.
	pub fn new(owner: AccountKey, guardian: Option<AccountKey>) -> Self {
		let mut keys = vec![owner];
		if let Some(guardian) = guardian {
			keys.push(guardian);
		}
		Self {
			inner: MultisigSigner::new(keys),
		}
	}
}

#[async_trait]
impl RawSigner for AccountSigner {
	async fn sign_raw(&self, message_hash: Felt) -> Result<Vec<Felt>, SignerError> {
		self.inner.sign_raw(message_hash).await
	}
}

/// The legacy dual-owner signer.
///
/// Wire format: `[r, s, guardian_r, guardian_s]` with the guardian slots
/// zero-filled when no guardian is present.
pub struct LegacySigner {
	owner: StarkKeyPair,
	guardian: Option<StarkKeyPair>,
}

impl LegacySigner {
	/// Creates the signer from an owner and an optional guardian.
	pub fn new(owner: StarkKeyPair, guardian: Option<StarkKeyPair>) -> Self {
		Self { owner, guardian }
	}
}

#[async_trait]
impl RawSigner for LegacySigner {
	async fn sign_raw(&self, message_hash: Felt) -> Result<Vec<Felt>, SignerError> {
		let owner = self.owner.sign(&message_hash)?;
		let mut payload = vec![owner.r, owner.s, Felt::ZERO, Felt::ZERO];
		if let Some(guardian) = &self.guardian {
			let guardian = guardian.sign(&message_hash)?;
			payload[2] = guardian.r;
			payload[3] = guardian.s;
		}
		Ok(payload)
	}
}

/// The legacy multisig signer.
///
/// Wire format: a flat `[public_key, r, s]` triple per key with no
/// length prefix.
pub struct LegacyMultisigSigner {
	keys: Vec<StarkKeyPair>,
}

impl LegacyMultisigSigner {
	/// Creates an aggregator over the given keys, preserving their order.
	pub fn new(keys: Vec<StarkKeyPair>) -> Self {
		Self { keys }
	}
}

#[async_trait]
impl RawSigner for LegacyMultisigSigner {
	async fn sign_raw(&self, message_hash: Felt) -> Result<Vec<Felt>, SignerError> {
		let mut payload = Vec::with_capacity(self.keys.len() * 3);
		for key in &self.keys {
			let signature = key.sign(&message_hash)?;
			payload.push(key.public_key());
			payload.push(signature.r);
			payload.push(signature.s);
		}
		Ok(payload)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use account_keys::random_stark_keypairs;
	use starknet_crypto::verify;

	#[tokio::test]
	async fn test_multisig_preserves_order_and_count() {
		let keys = random_stark_keypairs(3);
		let public_keys: Vec<Felt> = keys.iter().map(|k| k.public_key()).collect();
		let signer =
			MultisigSigner::new(keys.into_iter().map(AccountKey::from).collect());

		let hash = Felt::from(424242_u64);
		let payload = signer.sign_raw(hash).await.unwrap();

		// [count, (tag, signer, r, s) * 3]
		assert_eq!(payload.len(), 1 + 3 * 4);
		assert_eq!(payload[0], Felt::THREE);
		for (i, public_key) in public_keys.iter().enumerate() {
			let tuple = &payload[1 + i * 4..1 + (i + 1) * 4];
			assert_eq!(tuple[0], Felt::ZERO);
			assert_eq!(tuple[1], *public_key);
			assert!(verify(public_key, &hash, &tuple[2], &tuple[3]).unwrap());
		}
	}

	#[tokio::test]
	async fn test_multisig_does_not_sort_or_dedupe() {
		let keys = random_stark_keypairs(2);
		let reversed = vec![keys[1].clone(), keys[0].clone()];
		let signer =
			MultisigSigner::new(reversed.iter().cloned().map(AccountKey::from).collect());
		let payload = signer.sign_raw(Felt::ONE).await.unwrap();
		assert_eq!(payload[2], keys[1].public_key());
		assert_eq!(payload[6], keys[0].public_key());

		let duplicated = MultisigSigner::new(vec![
			AccountKey::from(keys[0].clone()),
			AccountKey::from(keys[0].clone()),
		]);
		let payload = duplicated.sign_raw(Felt::ONE).await.unwrap();
		assert_eq!(payload[2], payload[6]);
	}

	#[tokio::test]
	async fn test_multisig_empty_payload_is_well_formed() {
		let signer = MultisigSigner::new(vec![]);
		assert_eq!(signer.sign_raw(Felt::ONE).await.unwrap(), vec![Felt::ZERO]);
	}

	#[tokio::test]
	async fn test_account_signer_with_guardian() {
		let keys = random_stark_keypairs(2);
		let signer = AccountSigner::new(
			AccountKey::from(keys[0].clone()),
			Some(AccountKey::from(keys[1].clone())),
		);
		let payload = signer.sign_raw(Felt::ONE).await.unwrap();
		assert_eq!(payload[0], Felt::TWO);
		assert_eq!(payload.len(), 1 + 2 * 4);

		let solo = AccountSigner::new(AccountKey::from(keys[0].clone()), None);
		let payload = solo.sign_raw(Felt::ONE).await.unwrap();
		assert_eq!(payload[0], Felt::ONE);
		assert_eq!(payload.len(), 1 + 4);
	}

	#[tokio::test]
	async fn test_legacy_signer_zero_fills_guardian_slots() {
		let keys = random_stark_keypairs(2);
		let hash = Felt::from(424242_u64);

		let solo = LegacySigner::new(keys[0].clone(), None);
		let payload = solo.sign_raw(hash).await.unwrap();
		assert_eq!(payload.len(), 4);
		assert_eq!(payload[2], Felt::ZERO);
		assert_eq!(payload[3], Felt::ZERO);
		assert!(verify(&keys[0].public_key(), &hash, &payload[0], &payload[1]).unwrap());

		let dual = LegacySigner::new(keys[0].clone(), Some(keys[1].clone()));
		let payload = dual.sign_raw(hash).await.unwrap();
		assert_eq!(payload.len(), 4);
		assert!(verify(&keys[1].public_key(), &hash, &payload[2], &payload[3]).unwrap());
	}

	#[tokio::test]
	async fn test_legacy_multisig_is_flat_and_unprefixed() {
		let keys = random_stark_keypairs(2);
		let signer = LegacyMultisigSigner::new(keys.clone());
		let hash = Felt::from(7_u64);
		let payload = signer.sign_raw(hash).await.unwrap();
		assert_eq!(payload.len(), 6);
		assert_eq!(payload[0], keys[0].public_key());
		assert_eq!(payload[3], keys[1].public_key());
		assert!(verify(&keys[0].public_key(), &hash, &payload[1], &payload[2]).unwrap());
	}
}
