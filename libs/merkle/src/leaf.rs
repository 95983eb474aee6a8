//! Leaf encoding
//!
//! The on-chain verifier rebuilds each leaf from the claim arguments with
//! `abi.encodePacked(vault, chainId, salt, beneficiary, amount)`. This
//! module produces the same bytes:
//!
//! | field       | encoding             | bytes |
//! |-------------|----------------------|-------|
//! | vault       | address              | 20    |
//! | chain_id    | uint256 big-endian   | 32    |
//! | salt        | bytes32              | 32    |
//! | beneficiary | address              | 20    |
//! | amount      | uint256 big-endian   | 32    |
//!
//! Binding the vault, chain and schedule salt into every leaf means a proof
//! issued for one vault can never verify against another vault's root.

use crate::tree::keccak256;
use launch_types::math::{u128_word, u64_word};
use launch_types::{Address, Hash32};
use serde::{Deserialize, Serialize};

/// Packed leaf preimage length
pub const LEAF_ENCODED_LEN: usize = 20 + 32 + 32 + 20 + 32;

/// Context every leaf of one vault commits to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeafBinding {
    pub vault: Address,
    pub chain_id: u64,
    pub schedule_salt: Hash32,
}

impl LeafBinding {
    pub fn new(vault: Address, chain_id: u64, schedule_salt: Hash32) -> Self {
        Self {
            vault,
            chain_id,
            schedule_salt,
        }
    }
}

pub fn encode_leaf(
    binding: &LeafBinding,
    beneficiary: &Address,
    amount: u128,
) -> [u8; LEAF_ENCODED_LEN] {
    let mut out = [0u8; LEAF_ENCODED_LEN];
    out[0..20].copy_from_slice(binding.vault.as_bytes());
    out[20..52].copy_from_slice(&u64_word(binding.chain_id));
    out[52..84].copy_from_slice(binding.schedule_salt.as_bytes());
    out[84..104].copy_from_slice(beneficiary.as_bytes());
    out[104..136].copy_from_slice(&u128_word(amount));
    out
}

pub fn hash_leaf(binding: &LeafBinding, beneficiary: &Address, amount: u128) -> Hash32 {
    keccak256(&[&encode_leaf(binding, beneficiary, amount)[..]])
}

/// Packed preimage as `0x` hex, for comparing against contract test vectors
pub fn leaf_preimage_hex(binding: &LeafBinding, beneficiary: &Address, amount: u128) -> String {
    format!("0x{}", hex::encode(encode_leaf(binding, beneficiary, amount)))
}
