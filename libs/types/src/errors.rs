//! Error taxonomy for the launch engine
//!
//! Every engine operation fails with [`EngineError`]. Variants are grouped by
//! how a caller should react: fix the input, retry later, or treat the request
//! as a hard denial. None of them describe I/O failures; those belong to the
//! caller that fetched the inputs.

use thiserror::Error;

/// Domain errors raised by the pricing, vesting, merkle and claim engines
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Input rejected before any computation (zero amounts, malformed ids, bad schedule)
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Pool is not accepting swaps in its current lifecycle state
    #[error("Pool is not live (status: {status})")]
    PoolNotLive { status: String },

    /// Vesting schedule is paused or otherwise not accepting claims
    #[error("Vesting schedule is not active")]
    ScheduleNotActive,

    /// Swap would drain the side of the pool being paid out
    #[error("Insufficient reserves: swap needs {requested}, pool can pay {available}")]
    InsufficientReserves { requested: u128, available: u128 },

    /// Quoted output fell below the caller's minimum
    #[error("Slippage exceeded: minimum output {min_output}, quote gives {quoted}")]
    SlippageExceeded { min_output: u128, quoted: u128 },

    /// Merkle proof does not verify against the published root
    #[error("Merkle proof does not verify against the published root")]
    ProofInvalid,

    /// Proof verified but nothing has unlocked beyond what was already claimed
    #[error("Nothing to claim")]
    NothingToClaim,

    /// Checked arithmetic failed; inputs are outside the engine's numeric range
    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: &'static str },

    /// Claim authorization window has elapsed
    #[error("Claim authorization {id} expired at {expires_at}")]
    AuthorizationExpired { id: u64, expires_at: i64 },

    /// A newer authorization was issued for the same allocation
    #[error("Claim authorization {id} was superseded by {latest}")]
    AuthorizationSuperseded { id: u64, latest: u64 },

    /// Authorization was already consumed by a claim
    #[error("Claim authorization {id} was already consumed")]
    AuthorizationConsumed { id: u64 },

    /// Authorization id was never issued or has been pruned
    #[error("Claim authorization {id} is unknown")]
    AuthorizationUnknown { id: u64 },
}

/// Coarse classification of [`EngineError`] for logs and counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    PoolNotLive,
    ScheduleNotActive,
    InsufficientReserves,
    SlippageExceeded,
    ProofInvalid,
    NothingToClaim,
    ArithmeticOverflow,
    AuthorizationRejected,
}

impl ErrorKind {
    /// Stable short code used as a structured log field
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::PoolNotLive => "pool_not_live",
            ErrorKind::ScheduleNotActive => "schedule_not_active",
            ErrorKind::InsufficientReserves => "insufficient_reserves",
            ErrorKind::SlippageExceeded => "slippage_exceeded",
            ErrorKind::ProofInvalid => "proof_invalid",
            ErrorKind::NothingToClaim => "nothing_to_claim",
            ErrorKind::ArithmeticOverflow => "arithmetic_overflow",
            ErrorKind::AuthorizationRejected => "authorization_rejected",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidInput`]
    pub fn invalid(reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidInput { .. } => ErrorKind::InvalidInput,
            EngineError::PoolNotLive { .. } => ErrorKind::PoolNotLive,
            EngineError::ScheduleNotActive => ErrorKind::ScheduleNotActive,
            EngineError::InsufficientReserves { .. } => ErrorKind::InsufficientReserves,
            EngineError::SlippageExceeded { .. } => ErrorKind::SlippageExceeded,
            EngineError::ProofInvalid => ErrorKind::ProofInvalid,
            EngineError::NothingToClaim => ErrorKind::NothingToClaim,
            EngineError::ArithmeticOverflow { .. } => ErrorKind::ArithmeticOverflow,
            EngineError::AuthorizationExpired { .. }
            | EngineError::AuthorizationSuperseded { .. }
            | EngineError::AuthorizationConsumed { .. }
            | EngineError::AuthorizationUnknown { .. } => ErrorKind::AuthorizationRejected,
        }
    }

    /// State-precondition failures that may succeed if the caller retries later.
    ///
    /// `ProofInvalid` is never retryable: it means tampering or a stale root.
    /// Expired or superseded authorizations are not retried either; the caller
    /// must request a fresh authorization instead.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EngineError::PoolNotLive { .. }
                | EngineError::ScheduleNotActive
                | EngineError::NothingToClaim
        )
    }
}
