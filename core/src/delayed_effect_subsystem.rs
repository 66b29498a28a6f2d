//! Delayed-effect subsystem: fires queued policy after-effects.
//!
//! Execution: after growth, before the annual report.

use crate::{
    error::SimResult,
    event::SimEvent,
    rng::SubsystemRng,
    scheduler::resolve_due,
    state::CityState,
    subsystem::SimSubsystem,
    types::Year,
};

#[derive(Debug, Default)]
pub struct DelayedEffectSubsystem;

impl DelayedEffectSubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl SimSubsystem for DelayedEffectSubsystem {
    fn name(&self) -> &'static str { "delayed_effects" }

    fn update(
        &mut self,
        year: Year,
        city: &mut CityState,
        _events_in: &[SimEvent],
        _rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let fired = resolve_due(city);
        if !fired.is_empty() {
            log::debug!(
                "year={year} delayed: fired={} still_pending={}",
                fired.len(),
                city.pending.len()
            );
        }
        Ok(fired
            .into_iter()
            .map(|p| SimEvent::DelayedEffectFired { year, note: p.note })
            .collect())
    }
}
