//! # Launch Claims Library
//!
//! ## Purpose
//!
//! Decides vesting claims. A claim is authorized only when the beneficiary's
//! allocation proves against the vault's published merkle root and the
//! vesting engine reports a positive claimable amount. Authorizations are
//! short-lived and redeemable at most once.
//!
//! ## Architecture Role
//!
//! - [`coordinator`]: proof check, claimable computation, issuance
//! - [`registry`]: supersession, expiry and at-most-once consumption
//! - [`authorization`]: the record handed to transaction builders

pub mod authorization;
pub mod coordinator;
pub mod registry;

pub use authorization::{AllocationKey, ClaimAuthorization};
pub use coordinator::{ClaimCoordinator, ClaimRequest, DEFAULT_AUTHORIZATION_TTL_SECS};
pub use registry::AuthorizationRegistry;
