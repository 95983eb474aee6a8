//! # Launch Merkle Library
//!
//! Allocation trees for vesting vaults. Each leaf is the Keccak-256 hash of
//! the packed `(vault, chain_id, salt, beneficiary, amount)` tuple and pairs
//! are hashed in sorted order, matching the on-chain verifier byte for byte.
//!
//! ```rust
//! use launch_merkle::{build, verify, LeafBinding, MerkleAllocation};
//! use launch_types::{Address, Hash32};
//!
//! let binding = LeafBinding::new(Address::new([1; 20]), 1, Hash32::new([2; 32]));
//! let alice = Address::new([0xa1; 20]);
//! let bob = Address::new([0xb2; 20]);
//! let set = build(
//!     &binding,
//!     &[MerkleAllocation::new(alice, 600_000), MerkleAllocation::new(bob, 400_000)],
//! )
//! .unwrap();
//!
//! let proof = set.proof_for(&alice).unwrap();
//! assert!(verify(proof, &set.root, &binding, &alice, 600_000));
//! assert!(!verify(proof, &set.root, &binding, &alice, 600_001));
//! ```

pub mod allocation_set;
pub mod leaf;
pub mod tree;

pub use allocation_set::{
    build, snapshot_hash, verify, MerkleAllocation, MerkleAllocationSet, PADDING_BENEFICIARY,
};
pub use leaf::{encode_leaf, hash_leaf, leaf_preimage_hex, LeafBinding, LEAF_ENCODED_LEN};
pub use tree::{hash_pair, keccak256, verify_proof, MerkleTree};
