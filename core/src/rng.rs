//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through SubsystemRng instances derived
//! from the single master seed given to the engine.
//!
//! Each stream is seeded from (master_seed, slot, year, draw), so:
//!   - Adding a new slot never changes existing slots' streams.
//!   - Replaying the same commands against the same seed reproduces
//!     every draw, regardless of how many draws earlier years made.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::types::Year;

/// A named, deterministic RNG for a single subsystem draw.
pub struct SubsystemRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SubsystemRng {
    pub fn new(derived_seed: u64) -> Self {
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Uniform index in [0, len). Panics on an empty range.
    pub fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "pick_index on empty range");
        self.inner.gen_range(0..len)
    }
}

/// Seed source for every stream in a run.
#[derive(Debug, Clone, Copy)]
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Stream for a subsystem's work during one year.
    pub fn for_subsystem_at_year(&self, slot: SubsystemSlot, year: Year) -> SubsystemRng {
        self.for_draw(slot, year, 0)
    }

    /// Stream for the `draw`-th draw a slot makes within one year.
    pub fn for_draw(&self, slot: SubsystemSlot, year: Year, draw: u64) -> SubsystemRng {
        let derived = self.master_seed
            ^ (slot as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)
            ^ u64::from(year).wrapping_mul(0xbf58_476d_1ce4_e5b9)
            ^ draw.wrapping_mul(0x94d0_49bb_1331_11eb);
        SubsystemRng::new(derived).with_name(slot.name())
    }
}

/// Stable subsystem slot assignments.
/// NEVER reorder or remove entries; only append.
/// Reordering changes every subsystem's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum SubsystemSlot {
    Growth = 0,
    DelayedEffects = 1,
    AnnualReport = 2,
    CityEvents = 3,
    // Add new subsystems here, append only.
}

impl SubsystemSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Growth => "growth",
            Self::DelayedEffects => "delayed_effects",
            Self::AnnualReport => "annual_report",
            Self::CityEvents => "city_events",
        }
    }
}
