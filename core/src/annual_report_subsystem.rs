//! Annual report subsystem: closes the year's arithmetic.
//!
//! Execution: last in registration order.
//! Depends on: reads events_in for GrowthApplied to report the growth rate.
//! Normalizes after logging, so anything a delayed effect pushed out of
//! range is clamped before event selection looks at the city.

use crate::{
    effect::normalize,
    error::SimResult,
    event::SimEvent,
    rng::SubsystemRng,
    state::CityState,
    subsystem::SimSubsystem,
    types::Year,
};

#[derive(Debug, Default)]
pub struct AnnualReportSubsystem;

impl AnnualReportSubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl SimSubsystem for AnnualReportSubsystem {
    fn name(&self) -> &'static str { "annual_report" }

    fn update(
        &mut self,
        year: Year,
        city: &mut CityState,
        events_in: &[SimEvent],
        _rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let growth = events_in
            .iter()
            .rev()
            .find_map(|e| match e {
                SimEvent::GrowthApplied { growth, .. } => Some(*growth),
                _ => None,
            })
            .unwrap_or(0.0);

        // Ties round away from zero: 2.25 reads as 2.3.
        let shown = (growth * 10.0).round() / 10.0;
        city.log(format!(
            "{}年が経過。人口成長率は{shown:.1}。",
            year.saturating_sub(1)
        ));
        normalize(city);
        Ok(vec![])
    }
}
