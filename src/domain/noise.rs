//! Noise symbols and their process-wide allocator
//!
//! A noise symbol identifies one independent source of uncertainty ranging
//! over `[-1, 1]`. Symbols are drawn from a single monotonically increasing
//! sequence and are never reused, so two forms that mention the same symbol
//! are correlated through it and through nothing else.
//!
//! The sequence lives in an [`AtomicU64`] so that affine forms can be created
//! concurrently (see the `parallel` feature of the solvers) without ever
//! handing out the same identifier twice. The counter never wraps.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Next identifier to hand out.
static NEXT_SYMBOL: AtomicU64 = AtomicU64::new(0);

/// Identifiers at or above this bound are never restored from storage, which
/// keeps `2⁶³` fresh symbols available after any restore.
pub const RESTORE_LIMIT: u64 = 1 << 63;

/// Opaque identifier of one independent uncertainty source
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NoiseSymbol(u64);

impl NoiseSymbol {
    /// Allocate a brand-new symbol from the process-wide sequence
    ///
    /// # Panics
    ///
    /// Panics if the 64-bit sequence is exhausted rather than wrapping
    /// around to identifiers already in use.
    pub fn fresh() -> Self {
        match NEXT_SYMBOL.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| next.checked_add(1)) {
            Ok(id) => NoiseSymbol(id),
            Err(_) => panic!("noise symbol sequence exhausted"),
        }
    }

    /// Raw identifier
    pub fn id(self) -> u64 {
        self.0
    }

    /// A symbol is valid when it has already been handed out by the allocator.
    pub fn is_valid(self) -> bool {
        self.0 < NEXT_SYMBOL.load(Ordering::Relaxed)
    }

    /// Rebuild a symbol from a raw identifier read back from storage.
    ///
    /// The allocator is advanced past `id` so that forms created later can
    /// never collide with the restored one. Returns `None` for identifiers at
    /// or above [`RESTORE_LIMIT`].
    pub fn restore(id: u64) -> Option<Self> {
        if id >= RESTORE_LIMIT {
            return None;
        }
        NEXT_SYMBOL.fetch_max(id + 1, Ordering::Relaxed);
        Some(NoiseSymbol(id))
    }
}

impl fmt::Display for NoiseSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for NoiseSymbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = u64::deserialize(deserializer)?;
        NoiseSymbol::restore(id)
            .ok_or_else(|| D::Error::custom(format!("noise symbol {id} is out of range")))
    }
}

/// Number of symbols handed out so far (the current value of the sequence).
pub fn allocated() -> u64 {
    NEXT_SYMBOL.load(Ordering::Relaxed)
}

// =================================================================================================
// Tests
// =================================================================================================
