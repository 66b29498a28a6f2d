//! Subsystem trait.
//!
//! RULE: Every stage of the year tick implements SimSubsystem.
//! The engine calls update() on each registered subsystem
//! in registration order, once per year.
//! Execution order is fixed and documented in engine.rs.

use crate::{
    error::SimResult,
    event::SimEvent,
    rng::SubsystemRng,
    state::CityState,
    types::Year,
};

/// The contract every subsystem must fulfill.
pub trait SimSubsystem: Send {
    /// Unique stable name for this subsystem.
    fn name(&self) -> &'static str;

    /// Called once per year by the engine, after the year was incremented.
    ///
    /// - `year`:      the new (current) year
    /// - `city`:      the city, mutated in place
    /// - `events_in`: events emitted by earlier subsystems this year
    /// - `rng`:       this subsystem's deterministic RNG for this year
    ///
    /// Returns new events to add to the year's event list.
    fn update(
        &mut self,
        year: Year,
        city: &mut CityState,
        events_in: &[SimEvent],
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>>;
}
