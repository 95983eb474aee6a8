//! Sorted-pair Keccak-256 merkle tree
//!
//! Parents hash their children in ascending byte order, so a proof is just
//! the list of siblings with no left/right flags. Leaves are sorted before
//! the tree is built. A node without a sibling is promoted to the next level
//! unchanged and contributes no proof element.

use launch_types::{EngineError, EngineResult, Hash32};
use sha3::{Digest, Keccak256};

/// Keccak-256 over the concatenation of `parts`
pub fn keccak256(parts: &[&[u8]]) -> Hash32 {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    Hash32::new(hasher.finalize().into())
}

/// keccak256(min(a, b) ‖ max(a, b))
pub fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    if a <= b {
        keccak256(&[a.as_bytes(), b.as_bytes()])
    } else {
        keccak256(&[b.as_bytes(), a.as_bytes()])
    }
}

/// Fold `proof` into `leaf` and compare with `root`
pub fn verify_proof(proof: &[Hash32], root: &Hash32, leaf: &Hash32) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |node, sibling| hash_pair(&node, sibling));
    computed == *root
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// `levels[0]` holds the sorted leaves, the last level holds the root
    levels: Vec<Vec<Hash32>>,
}

impl MerkleTree {
    pub fn from_leaves(mut leaves: Vec<Hash32>) -> EngineResult<Self> {
        if leaves.is_empty() {
            return Err(EngineError::invalid("merkle tree needs at least one leaf"));
        }
        leaves.sort_unstable();

        let mut levels = vec![leaves];
        loop {
            let level = &levels[levels.len() - 1];
            if level.len() == 1 {
                break;
            }
            let next: Vec<Hash32> = level
                .chunks(2)
                .map(|pair| match pair.get(1) {
                    Some(right) => hash_pair(&pair[0], right),
                    None => pair[0],
                })
                .collect();
            levels.push(next);
        }

        Ok(Self { levels })
    }

    pub fn root(&self) -> Hash32 {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or(Hash32::ZERO)
    }

    /// Leaves in tree order
    pub fn leaves(&self) -> &[Hash32] {
        &self.levels[0]
    }

    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Sibling path from `leaf` to the root, or `None` if the leaf is absent
    pub fn proof(&self, leaf: &Hash32) -> Option<Vec<Hash32>> {
        let mut index = self.leaves().binary_search(leaf).ok()?;
        let mut proof = Vec::with_capacity(self.depth());
        for level in &self.levels[..self.depth()] {
            let sibling = index ^ 1;
            if let Some(node) = level.get(sibling) {
                proof.push(*node);
            }
            index /= 2;
        }
        Some(proof)
    }
}
