//! Pedersen Merkle tree used for allowed-method commitments.
//!
//! Leaves stay in insertion order; each parent is the Pedersen hash of
//! its children sorted numerically, and odd levels are padded with zero.
//! Because pairs are sorted before hashing, a proof is just the sibling
//! path with no direction bits.

use starknet_crypto::pedersen_hash;
use starknet_types_core::felt::Felt;

/// Hashes one sorted pair of nodes.
pub fn hash_pair(a: &Felt, b: &Felt) -> Felt {
	if a <= b {
		pedersen_hash(a, b)
	} else {
		pedersen_hash(b, a)
	}
}

/// A fixed Merkle tree over caller-ordered leaves.
///
/// The tree is rebuilt per use; method lists are small and re-derivation
/// keeps the leaf-to-index mapping identical between commitment and
/// proof time.
#[derive(Debug, Clone)]
pub struct MerkleTree {
	levels: Vec<Vec<Felt>>,
	root: Felt,
}

impl MerkleTree {
	/// Builds the tree bottom-up from the given leaves.
	///
	/// An empty leaf set produces the zero root; callers that need a
	/// meaningful commitment must reject empty sets before building.
	pub fn new(leaves: Vec<Felt>) -> Self {
		if leaves.is_empty() {
			return Self {
				levels: vec![vec![]],
				root: Felt::ZERO,
			};
		}
		let mut levels = vec![leaves];
		while levels[levels.len() - 1].len() > 1 {
			let current = &levels[levels.len() - 1];
			let mut next = Vec::with_capacity((current.len() + 1) / 2);
			for pair in current.chunks(2) {
				let right = pair.get(1).unwrap_or(&Felt::ZERO);
				next.push(hash_pair(&pair[0], right));
			}
			levels.push(next);
		}
		let root = levels[levels.len() - 1][0];
		Self { levels, root }
	}

	/// The committed root.
	pub fn root(&self) -> Felt {
		self.root
	}

	/// The leaves in their original order.
	pub fn leaves(&self) -> &[Felt] {
		&self.levels[0]
	}

	/// Builds the sibling path for the leaf at `index`.
	///
	/// Returns `None` when the index is out of range.
	pub fn proof(&self, index: usize) -> Option<Vec<Felt>> {
		if index >= self.levels[0].len() {
			return None;
		}
		let mut path = Vec::new();
		let mut position = index;
		for level in &self.levels[..self.levels.len() - 1] {
			let sibling = position ^ 1;
			path.push(*level.get(sibling).unwrap_or(&Felt::ZERO));
			position /= 2;
		}
		Some(path)
	}
}

/// Recomputes a root from a leaf and its sibling path.
pub fn verify_proof(root: &Felt, leaf: &Felt, proof: &[Felt]) -> bool {
	let mut node = *leaf;
	for sibling in proof {
		node = hash_pair(&node, sibling);
	}
	node == *root
}

#[cfg(test)]
mod tests {
	use super::*;

	fn leaves(n: u64) -> Vec<Felt> {
		(1..=n).map(Felt::from).collect()
	}

	#[test]
	fn test_single_leaf_tree() {
		let tree = MerkleTree::new(leaves(1));
		assert_eq!(tree.root(), Felt::ONE);
		assert_eq!(tree.proof(0), Some(vec![]));
		assert!(verify_proof(&tree.root(), &Felt::ONE, &[]));
	}

	#[test]
	fn test_every_proof_recomputes_root() {
		for n in 2..=8 {
			let tree = MerkleTree::new(leaves(n));
			for (index, leaf) in tree.leaves().to_vec().iter().enumerate() {
				let proof = tree.proof(index).unwrap();
				assert!(
					verify_proof(&tree.root(), leaf, &proof),
					"proof failed for leaf {index} of {n}"
				);
			}
		}
	}

	#[test]
	fn test_odd_levels_pad_with_zero() {
		let tree = MerkleTree::new(leaves(3));
		let expected = hash_pair(
			&hash_pair(&Felt::ONE, &Felt::TWO),
			&hash_pair(&Felt::THREE, &Felt::ZERO),
		);
		assert_eq!(tree.root(), expected);
	}

	#[test]
	fn test_wrong_leaf_fails_verification() {
		let tree = MerkleTree::new(leaves(4));
		let proof = tree.proof(0).unwrap();
		assert!(!verify_proof(&tree.root(), &Felt::from(99_u64), &proof));
	}

	#[test]
	fn test_out_of_range_proof_index() {
		let tree = MerkleTree::new(leaves(2));
		assert_eq!(tree.proof(5), None);
	}

	#[test]
	fn test_leaf_order_changes_root() {
		let forward = MerkleTree::new(leaves(4));
		let shuffled = vec![Felt::ONE, Felt::THREE, Felt::TWO, Felt::from(4_u64)];
		// Pairs are sorted but leaf positions are not; order is part of
		// the commitment.
		assert_ne!(forward.root(), MerkleTree::new(shuffled).root());
	}

	#[test]
	fn test_empty_tree_has_zero_root() {
		let tree = MerkleTree::new(vec![]);
		assert_eq!(tree.root(), Felt::ZERO);
		assert_eq!(tree.proof(0), None);
	}
}
