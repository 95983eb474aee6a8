//! Injected price cache
//!
//! Callers that display token prices may cache them per symbol. The curve
//! math never reads this cache; it is passed in where needed instead of
//! living in a global. Time is explicit so expiry is testable.

use dashmap::DashMap;

/// Get/set-with-expiry capability for scaled integer prices
pub trait PriceCache: Send + Sync {
    /// Cached price for `symbol` if it has not expired at `now`
    fn get(&self, symbol: &str, now: i64) -> Option<u128>;

    /// Store `price` for `ttl_secs` seconds starting at `now`
    fn set(&self, symbol: &str, price: u128, ttl_secs: u64, now: i64);

    /// Drop expired entries; returns how many were removed
    fn evict_expired(&self, now: i64) -> usize;
}

#[derive(Debug, Clone, Copy)]
struct CachedPrice {
    price: u128,
    expires_at: i64,
}

/// In-memory [`PriceCache`] backed by a concurrent map
#[derive(Debug, Default)]
pub struct TtlPriceCache {
    entries: DashMap<String, CachedPrice>,
}

impl TtlPriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PriceCache for TtlPriceCache {
    fn get(&self, symbol: &str, now: i64) -> Option<u128> {
        self.entries
            .get(symbol)
            .filter(|entry| now < entry.expires_at)
            .map(|entry| entry.price)
    }

    fn set(&self, symbol: &str, price: u128, ttl_secs: u64, now: i64) {
        let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        self.entries.insert(
            symbol.to_string(),
            CachedPrice {
                price,
                expires_at: now.saturating_add(ttl),
            },
        );
    }

    fn evict_expired(&self, now: i64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| now < entry.expires_at);
        before - self.entries.len()
    }
}
