//! Pool Book
//!
//! In-memory owner of live pool reserves. Each pool sits behind its own
//! mutex so a swap reads, prices and writes reserves as one step; swaps on
//! different pools never contend. The book is the single writer for the
//! pools it holds; persisting the resulting rows is the caller's job.

use crate::fees::FeeSplitPolicy;
use crate::pool::{Pool, PoolStatus, SwapDirection, SwapQuote};
use crate::pool_traits::CurvePool;
use dashmap::DashMap;
use launch_types::{EngineError, EngineResult, PoolId};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a committed swap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapReceipt {
    pub pool_id: PoolId,
    pub quote: SwapQuote,
    pub status_after: PoolStatus,
    /// This swap pushed the pool over its graduation threshold
    pub graduated_now: bool,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct BookStats {
    pub total_pools: usize,
    pub swaps_executed: u64,
    pub swaps_rejected: u64,
    pub graduations: u64,
}

/// Manages reserve state for all pools
pub struct PoolBook {
    pools: DashMap<PoolId, Arc<Mutex<Pool>>>,
    policy: FeeSplitPolicy,
    stats: Arc<RwLock<BookStats>>,
}

impl Default for PoolBook {
    fn default() -> Self {
        Self::new(FeeSplitPolicy::default())
    }
}

impl PoolBook {
    pub fn new(policy: FeeSplitPolicy) -> Self {
        Self {
            pools: DashMap::new(),
            policy,
            stats: Arc::new(RwLock::new(BookStats::default())),
        }
    }

    /// Load pool rows fetched from persistence, replacing any held copies
    pub fn initialize_from_rows(&self, rows: Vec<Pool>) -> EngineResult<usize> {
        info!("Initializing PoolBook with {} pool rows", rows.len());
        for pool in &rows {
            pool.validate()?;
        }
        let count = rows.len();
        for pool in rows {
            self.pools.insert(pool.id, Arc::new(Mutex::new(pool)));
        }
        self.stats.write().total_pools = self.pools.len();
        info!("PoolBook initialized: {} total pools", self.pools.len());
        Ok(count)
    }

    /// Add or replace a pool; returns the previous row if one was held
    pub fn insert(&self, pool: Pool) -> EngineResult<Option<Pool>> {
        pool.validate()?;
        let previous = self
            .pools
            .insert(pool.id, Arc::new(Mutex::new(pool)))
            .map(|old| old.lock().clone());
        self.stats.write().total_pools = self.pools.len();
        Ok(previous)
    }

    pub fn remove(&self, id: PoolId) -> Option<Pool> {
        let removed = self.pools.remove(&id).map(|(_, pool)| pool.lock().clone());
        self.stats.write().total_pools = self.pools.len();
        removed
    }

    /// Copy of the current row
    pub fn snapshot(&self, id: PoolId) -> Option<Pool> {
        self.pools.get(&id).map(|entry| entry.value().lock().clone())
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn policy(&self) -> &FeeSplitPolicy {
        &self.policy
    }

    pub fn stats(&self) -> BookStats {
        self.stats.read().clone()
    }

    /// Price a swap against current reserves without committing it
    pub fn quote(
        &self,
        id: PoolId,
        direction: SwapDirection,
        input_amount: u128,
    ) -> EngineResult<SwapQuote> {
        let pool = self.entry(id)?;
        let guard = pool.lock();
        guard.get_amount_out(direction, input_amount, &self.policy)
    }

    /// Price the cheapest swap paying out at least `desired_output`, without committing it
    pub fn quote_exact_output(
        &self,
        id: PoolId,
        direction: SwapDirection,
        desired_output: u128,
    ) -> EngineResult<SwapQuote> {
        let pool = self.entry(id)?;
        let guard = pool.lock();
        guard.get_amount_in(direction, desired_output, &self.policy)
    }

    /// Price and commit a swap while holding the pool's lock.
    ///
    /// Rejects with `SlippageExceeded` if the output is below `min_output`.
    /// A BUY that reaches the graduation threshold moves the pool to
    /// `GRADUATING`, after which further swaps fail with `PoolNotLive`.
    pub fn execute_swap(
        &self,
        id: PoolId,
        direction: SwapDirection,
        input_amount: u128,
        min_output: u128,
    ) -> EngineResult<SwapReceipt> {
        let pool = self.entry(id)?;
        let mut guard = pool.lock();

        let quote = match guard.get_amount_out(direction, input_amount, &self.policy) {
            Ok(quote) => quote,
            Err(err) => {
                self.stats.write().swaps_rejected += 1;
                debug!(pool = %id, kind = %err.kind(), "Swap rejected: {}", err);
                return Err(err);
            }
        };

        if quote.output_amount < min_output {
            self.stats.write().swaps_rejected += 1;
            return Err(EngineError::SlippageExceeded {
                min_output,
                quoted: quote.output_amount,
            });
        }

        guard.apply(&quote);

        let graduated_now = direction == SwapDirection::Buy && quote.graduation.graduated;
        if graduated_now {
            guard.status = PoolStatus::Graduating;
            info!(
                pool = %id,
                raised = guard.actual_base_raised,
                threshold = guard.graduation_threshold,
                "Pool reached graduation threshold"
            );
        }
        let status_after = guard.status;
        drop(guard);

        let mut stats = self.stats.write();
        stats.swaps_executed += 1;
        if graduated_now {
            stats.graduations += 1;
        }

        Ok(SwapReceipt {
            pool_id: id,
            quote,
            status_after,
            graduated_now,
        })
    }

    /// Record a lifecycle transition decided outside the engine; returns the old status
    pub fn set_status(&self, id: PoolId, status: PoolStatus) -> EngineResult<PoolStatus> {
        let pool = self.entry(id)?;
        let mut guard = pool.lock();
        let previous = guard.status;
        if previous == PoolStatus::Migrated && status != PoolStatus::Migrated {
            warn!(pool = %id, "Refusing to move a migrated pool back to {}", status);
            return Err(EngineError::invalid(format!(
                "{} is migrated and cannot return to {}",
                id, status
            )));
        }
        guard.status = status;
        Ok(previous)
    }

    fn entry(&self, id: PoolId) -> EngineResult<Arc<Mutex<Pool>>> {
        // Clone the Arc so the map shard is released before the pool lock is taken
        self.pools
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| EngineError::invalid(format!("unknown {}", id)))
    }
}
