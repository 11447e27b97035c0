//! Deterministic random number generation.
//!
//! RULE: Nothing in the console may call any platform RNG.
//! All randomness flows through CollectionRng instances derived
//! from the single session seed held by the ConsoleConfig.
//!
//! Each generated collection gets its own RNG stream, seeded from
//! (session_seed XOR slot). This means:
//!   - Changing the size of one collection never shifts another's stream.
//!   - Each collection is fully reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single collection.
pub struct CollectionRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl CollectionRng {
    /// Create a collection RNG from the session seed and a stable
    /// slot index. The index must never change once assigned.
    pub fn new(session_seed: u64, slot_index: u64) -> Self {
        let derived_seed = session_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll a u64 in [lo, hi] (both inclusive).
    pub fn between(&mut self, lo: u64, hi: u64) -> u64 {
        assert!(hi >= lo, "empty range {lo}..={hi}");
        lo + self.next_u64_below(hi - lo + 1)
    }

    /// Uniformly pick one element. Panics on an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let index = self.next_u64_below(items.len() as u64) as usize;
        &items[index]
    }
}

/// All collection RNGs for a single session, indexed by stable slot.
pub struct RngBank {
    session_seed: u64,
}

impl RngBank {
    pub fn new(session_seed: u64) -> Self {
        Self { session_seed }
    }

    pub fn seed(&self) -> u64 {
        self.session_seed
    }

    pub fn for_collection(&self, slot: CollectionSlot) -> CollectionRng {
        CollectionRng::new(self.session_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable collection slot assignments.
/// NEVER reorder or remove entries, only append.
/// Reordering changes every collection's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum CollectionSlot {
    Transactions = 0,
    KycProfiles = 1,
    Investigations = 2,
    AuditLogs = 3,
    // Add new collections here, append only.
}

impl CollectionSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::KycProfiles => "kyc_profiles",
            Self::Investigations => "investigations",
            Self::AuditLogs => "audit_logs",
        }
    }
}
