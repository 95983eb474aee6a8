//! Authorization Registry
//!
//! Tracks issued authorizations so each one is redeemed at most once. Only
//! the newest authorization for an allocation is redeemable; issuing a new
//! one supersedes the previous. Records are dropped by [`prune_expired`].
//!
//! Lock order is always `slots` then `records`.
//!
//! [`prune_expired`]: AuthorizationRegistry::prune_expired

use crate::authorization::{AllocationKey, ClaimAuthorization};
use dashmap::DashMap;
use launch_types::{Address, EngineError, EngineResult};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordState {
    Pending,
    Consumed,
    Superseded { by: u64 },
}

#[derive(Debug, Clone)]
struct Record {
    authorization: ClaimAuthorization,
    state: RecordState,
}

#[derive(Debug, Default)]
struct Slot {
    nonce: u64,
    latest: Option<u64>,
}

#[derive(Debug, Default)]
pub struct AuthorizationRegistry {
    next_id: AtomicU64,
    slots: DashMap<AllocationKey, Slot>,
    records: DashMap<u64, Record>,
}

impl AuthorizationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new authorization, superseding any earlier one for the same allocation
    pub fn issue(
        &self,
        vault: Address,
        beneficiary: Address,
        amount: u128,
        issued_at: i64,
        expires_at: i64,
    ) -> ClaimAuthorization {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let key = AllocationKey { vault, beneficiary };

        let mut slot = self.slots.entry(key).or_default();
        slot.nonce += 1;
        let authorization = ClaimAuthorization {
            id,
            vault,
            beneficiary,
            amount,
            nonce: slot.nonce,
            issued_at,
            expires_at,
        };

        if let Some(previous) = slot.latest.replace(id) {
            if let Some(mut record) = self.records.get_mut(&previous) {
                if record.state == RecordState::Pending {
                    record.state = RecordState::Superseded { by: id };
                    debug!(id = previous, by = id, "Authorization superseded");
                }
            }
        }
        self.records.insert(
            id,
            Record {
                authorization: authorization.clone(),
                state: RecordState::Pending,
            },
        );

        authorization
    }

    /// Redeem authorization `id` at `now`. Succeeds at most once per id.
    pub fn consume(&self, id: u64, now: i64) -> EngineResult<ClaimAuthorization> {
        let mut record = self
            .records
            .get_mut(&id)
            .ok_or(EngineError::AuthorizationUnknown { id })?;

        let state = record.state;
        match state {
            RecordState::Consumed => Err(EngineError::AuthorizationConsumed { id }),
            RecordState::Superseded { by } => {
                Err(EngineError::AuthorizationSuperseded { id, latest: by })
            }
            RecordState::Pending if record.authorization.is_expired(now) => {
                Err(EngineError::AuthorizationExpired {
                    id,
                    expires_at: record.authorization.expires_at,
                })
            }
            RecordState::Pending => {
                record.state = RecordState::Consumed;
                debug!(
                    id,
                    beneficiary = %record.authorization.beneficiary,
                    amount = record.authorization.amount,
                    "Authorization consumed"
                );
                Ok(record.authorization.clone())
            }
        }
    }

    /// Newest authorization for an allocation if it can still be redeemed
    pub fn pending_for(
        &self,
        vault: Address,
        beneficiary: Address,
        now: i64,
    ) -> Option<ClaimAuthorization> {
        let latest = self
            .slots
            .get(&AllocationKey { vault, beneficiary })
            .and_then(|slot| slot.latest)?;
        self.records
            .get(&latest)
            .filter(|record| {
                record.state == RecordState::Pending && !record.authorization.is_expired(now)
            })
            .map(|record| record.authorization.clone())
    }

    /// Drop every record expired at `now`; returns how many were removed.
    ///
    /// An allocation whose newest record is gone loses its slot too, so its
    /// next authorization starts again at nonce 1.
    pub fn prune_expired(&self, now: i64) -> usize {
        let before = self.records.len();
        self.records
            .retain(|_, record| !record.authorization.is_expired(now));
        let pruned = before.saturating_sub(self.records.len());
        self.slots.retain(|_, slot| {
            slot.latest
                .is_some_and(|latest| self.records.contains_key(&latest))
        });
        if pruned > 0 {
            info!(
                pruned,
                remaining = self.records.len(),
                allocations = self.slots.len(),
                "Pruned expired authorizations"
            );
        }
        pruned
    }

    /// Allocations with a live slot
    pub fn tracked_allocations(&self) -> usize {
        self.slots.len()
    }

    /// Records still held, in any state
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
