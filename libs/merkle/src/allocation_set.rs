//! Allocation snapshots
//!
//! [`build`] turns the finalized allocation list of one vault into the tree
//! the vault contract is initialized with. The result carries every proof so
//! the claim path never rebuilds the tree.

use crate::leaf::{hash_leaf, LeafBinding};
use crate::tree::{keccak256, verify_proof, MerkleTree};
use launch_types::math::u128_word;
use launch_types::{amount, Address, EngineError, EngineResult, Hash32};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Beneficiary placed in the padding leaf of a single-allocation tree
pub const PADDING_BENEFICIARY: Address = Address::DEAD;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleAllocation {
    pub beneficiary: Address,
    #[serde(with = "amount")]
    pub entitlement: u128,
}

impl MerkleAllocation {
    pub fn new(beneficiary: Address, entitlement: u128) -> Self {
        Self {
            beneficiary,
            entitlement,
        }
    }
}

/// Frozen allocation tree for one vault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleAllocationSet {
    pub binding: LeafBinding,
    pub root: Hash32,
    /// Commitment to the allocation list itself, independent of tree shape
    pub snapshot_hash: Hash32,
    /// Leaf hashes in tree order, padding leaf included
    pub leaves: Vec<Hash32>,
    /// Real allocations sorted by beneficiary
    pub allocations: Vec<MerkleAllocation>,
    pub proofs: BTreeMap<Address, Vec<Hash32>>,
    /// A zero-entitlement padding leaf was added
    pub padded: bool,
}

impl MerkleAllocationSet {
    pub fn proof_for(&self, beneficiary: &Address) -> Option<&[Hash32]> {
        self.proofs.get(beneficiary).map(Vec::as_slice)
    }

    pub fn entitlement_of(&self, beneficiary: &Address) -> Option<u128> {
        self.allocations
            .binary_search_by(|allocation| allocation.beneficiary.cmp(beneficiary))
            .ok()
            .map(|index| self.allocations[index].entitlement)
    }

    /// Sum of real entitlements, the amount the vault must be funded with
    pub fn total_entitlement(&self) -> EngineResult<u128> {
        self.allocations.iter().try_fold(0u128, |total, allocation| {
            total
                .checked_add(allocation.entitlement)
                .ok_or(EngineError::ArithmeticOverflow {
                    context: "total entitlement",
                })
        })
    }

    pub fn verify(&self, proof: &[Hash32], beneficiary: &Address, amount: u128) -> bool {
        verify(proof, &self.root, &self.binding, beneficiary, amount)
    }
}

/// Build the allocation tree for `binding`.
///
/// Rejects empty input, zero entitlements, duplicate beneficiaries and the
/// padding address as a real beneficiary. A single allocation is padded with
/// a zero-entitlement leaf so its proof is non-empty.
pub fn build(
    binding: &LeafBinding,
    allocations: &[MerkleAllocation],
) -> EngineResult<MerkleAllocationSet> {
    validate_allocations(allocations)?;

    let mut sorted = allocations.to_vec();
    sorted.sort_by(|a, b| a.beneficiary.cmp(&b.beneficiary));

    let mut leaf_of: Vec<(Address, Hash32)> = sorted
        .iter()
        .map(|a| (a.beneficiary, hash_leaf(binding, &a.beneficiary, a.entitlement)))
        .collect();

    let padded = sorted.len() == 1;
    if padded {
        warn!(
            vault = %binding.vault,
            "Single allocation, padding tree with a zero-entitlement leaf for {}",
            PADDING_BENEFICIARY
        );
        leaf_of.push((
            PADDING_BENEFICIARY,
            hash_leaf(binding, &PADDING_BENEFICIARY, 0),
        ));
    }

    let tree = MerkleTree::from_leaves(leaf_of.iter().map(|(_, leaf)| *leaf).collect())?;
    let mut proofs = BTreeMap::new();
    for (beneficiary, leaf) in leaf_of.iter().take(sorted.len()) {
        let proof = tree
            .proof(leaf)
            .ok_or_else(|| EngineError::invalid(format!("leaf for {} missing from tree", beneficiary)))?;
        proofs.insert(*beneficiary, proof);
    }

    let set = MerkleAllocationSet {
        binding: *binding,
        root: tree.root(),
        snapshot_hash: snapshot_hash(&sorted),
        leaves: tree.leaves().to_vec(),
        allocations: sorted,
        proofs,
        padded,
    };

    info!(
        vault = %binding.vault,
        root = %set.root,
        allocations = set.allocations.len(),
        depth = tree.depth(),
        "Built allocation tree"
    );

    Ok(set)
}

/// Check that `proof` places (`beneficiary`, `amount`) under `root` for `binding`
pub fn verify(
    proof: &[Hash32],
    root: &Hash32,
    binding: &LeafBinding,
    beneficiary: &Address,
    amount: u128,
) -> bool {
    let leaf = hash_leaf(binding, beneficiary, amount);
    let valid = verify_proof(proof, root, &leaf);
    debug!(%beneficiary, amount, valid, "Verified allocation proof");
    valid
}

/// keccak256 over `address(20) ‖ amount(uint256)` per allocation, sorted by
/// address. The padding leaf is never part of the snapshot.
pub fn snapshot_hash(allocations: &[MerkleAllocation]) -> Hash32 {
    let mut sorted: Vec<&MerkleAllocation> = allocations
        .iter()
        .filter(|a| a.beneficiary != PADDING_BENEFICIARY)
        .collect();
    sorted.sort_by(|a, b| a.beneficiary.cmp(&b.beneficiary));

    let mut encoded = Vec::with_capacity(sorted.len() * (Address::LEN + 32));
    for allocation in sorted {
        encoded.extend_from_slice(allocation.beneficiary.as_bytes());
        encoded.extend_from_slice(&u128_word(allocation.entitlement));
    }
    keccak256(&[encoded.as_slice()])
}

fn validate_allocations(allocations: &[MerkleAllocation]) -> EngineResult<()> {
    if allocations.is_empty() {
        return Err(EngineError::invalid("allocation list is empty"));
    }

    let mut seen = BTreeSet::new();
    for allocation in allocations {
        if allocation.entitlement == 0 {
            return Err(EngineError::invalid(format!(
                "{} has a zero entitlement",
                allocation.beneficiary
            )));
        }
        if allocation.beneficiary == PADDING_BENEFICIARY {
            return Err(EngineError::invalid(format!(
                "{} is reserved for padding",
                PADDING_BENEFICIARY
            )));
        }
        if !seen.insert(allocation.beneficiary) {
            return Err(EngineError::invalid(format!(
                "duplicate allocation for {}",
                allocation.beneficiary
            )));
        }
    }
    Ok(())
}
