//! Typed identifiers for accounts, hashes and pools
//!
//! Byte arrays of different widths get distinct types so a 20-byte address
//! can never be passed where a 32-byte hash is expected. Both render and
//! serialize as `0x`-prefixed lowercase hex, which is the format the
//! persistence layer stores and the on-chain verifier emits.

use crate::errors::EngineError;
use std::str::FromStr;

/// Generates a fixed-width byte wrapper with hex `Display`, `FromStr` and serde
#[macro_export]
macro_rules! define_byte_wrapper {
    (
        $(#[$meta:meta])*
        $name:ident, $len:expr
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[repr(transparent)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Width in bytes
            pub const LEN: usize = $len;

            #[inline(always)]
            pub const fn new(inner: [u8; $len]) -> Self {
                Self(inner)
            }

            #[inline(always)]
            pub const fn into_inner(self) -> [u8; $len] {
                self.0
            }

            #[inline(always)]
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Lowercase `0x`-prefixed hex
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }

            /// Parse hex with or without the `0x` prefix; length must match exactly
            pub fn from_hex(input: &str) -> Result<Self, $crate::EngineError> {
                let trimmed = input.trim();
                let digits = trimmed
                    .strip_prefix("0x")
                    .or_else(|| trimmed.strip_prefix("0X"))
                    .unwrap_or(trimmed);
                if digits.len() != $len * 2 {
                    return Err($crate::EngineError::invalid(format!(
                        "{} must be {} hex characters, got {}",
                        stringify!($name),
                        $len * 2,
                        digits.len()
                    )));
                }
                let mut out = [0u8; $len];
                hex::decode_to_slice(digits, &mut out).map_err(|e| {
                    $crate::EngineError::invalid(format!(
                        "malformed {} '{}': {}",
                        stringify!($name),
                        input,
                        e
                    ))
                })?;
                Ok(Self(out))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::EngineError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl From<[u8; $len]> for $name {
            #[inline(always)]
            fn from(inner: [u8; $len]) -> Self {
                Self(inner)
            }
        }

        impl From<$name> for [u8; $len] {
            #[inline(always)]
            fn from(wrapper: $name) -> [u8; $len] {
                wrapper.0
            }
        }

        impl AsRef<[u8]> for $name {
            #[inline(always)]
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::from_hex(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

define_byte_wrapper!(
    /// EVM account address (20 bytes)
    ///
    /// Checksum casing is accepted on input but not validated; rendering is
    /// always lowercase.
    Address, 20
);

define_byte_wrapper!(
    /// 32-byte hash: merkle roots, proof nodes, schedule salts
    Hash32, 32
);

impl Address {
    /// The all-zero address
    pub const ZERO: Address = Address([0u8; 20]);

    /// `0x000000000000000000000000000000000000dEaD`, the well-known burn address.
    /// Used as the placeholder beneficiary when a tree must be padded.
    pub const DEAD: Address = Address([
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xde, 0xad,
    ]);

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl Hash32 {
    pub const ZERO: Hash32 = Hash32([0u8; 32]);
}

/// Pool identifier as assigned by the persistence layer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct PoolId(pub u64);

impl PoolId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PoolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}

impl FromStr for PoolId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix("pool#").unwrap_or(s.trim());
        digits
            .parse::<u64>()
            .map(PoolId)
            .map_err(|e| EngineError::invalid(format!("malformed pool id '{}': {}", s, e)))
    }
}
