//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through FarmRng streams derived from the
//! single master seed the engine was built with.
//!
//! Each concern (weather redraw, market drift, field jitter/yield)
//! gets its own stream, seeded deterministically from
//! (master_seed XOR slot_index). This means:
//!   - Adding a new slot never changes existing slots' streams.
//!   - Each stream is fully reproducible in isolation.
//!
//! Streams advance across the whole session: the same seed plus the
//! same action sequence replays the same draws, which is what the
//! determinism tests pin down.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG stream for a single concern.
pub struct FarmRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl FarmRng {
    /// Create a stream from the master seed and a stable slot index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }
}

/// All RNG streams for a single engine instance, indexed by stable slot.
pub struct RngBank {
    pub weather: FarmRng,
    pub market: FarmRng,
    pub fields: FarmRng,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self {
            weather: FarmRng::new(master_seed, RngSlot::Weather as u64).with_name("weather"),
            market: FarmRng::new(master_seed, RngSlot::Market as u64).with_name("market"),
            fields: FarmRng::new(master_seed, RngSlot::Fields as u64).with_name("fields"),
        }
    }
}

/// Stable slot assignments. NEVER reorder or remove entries — only
/// append. Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngSlot {
    Weather = 0,
    Market = 1,
    Fields = 2,
    // Add new slots here — append only.
}
