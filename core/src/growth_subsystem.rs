//! Growth subsystem: the yearly growth and decay formula.
//!
//! Execution: first in registration order.
//! Each statistic is clamped as soon as it is updated, so later formulas
//! in the same year read clamped values (money reads the new population).

use crate::{
    error::SimResult,
    event::SimEvent,
    rng::SubsystemRng,
    state::CityState,
    stats::Stat,
    subsystem::SimSubsystem,
    types::Year,
};

/// Population growth for the current statistics.
pub fn growth_rate(city: &CityState) -> f64 {
    let s = &city.stats;
    (s.economy - s.unemployment + s.happiness) / 40.0
}

#[derive(Debug, Default)]
pub struct GrowthSubsystem;

impl GrowthSubsystem {
    pub fn new() -> Self {
        Self
    }

    /// Runs the formula and returns the growth rate it used.
    pub fn apply(city: &mut CityState) -> f64 {
        let growth = growth_rate(city);
        let s = &mut city.stats;

        s.population = Stat::Population.clamp_value(s.population + growth);
        s.money = Stat::Money.clamp_value(s.money + s.population * 0.4 + s.economy * 0.2 - 15.0);
        s.happiness = Stat::Happiness.clamp_value(
            s.happiness + (s.environment - 60.0) / 20.0 - (s.unemployment - 10.0) / 10.0,
        );
        let security_drift = if s.unemployment < 12.0 { 2.0 } else { -2.0 };
        s.security = Stat::Security.clamp_value(s.security + security_drift);

        growth
    }
}

impl SimSubsystem for GrowthSubsystem {
    fn name(&self) -> &'static str { "growth" }

    fn update(
        &mut self,
        year: Year,
        city: &mut CityState,
        _events_in: &[SimEvent],
        _rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let growth = Self::apply(city);

        log::debug!(
            "year={year} growth: rate={growth:.3} population={:.2} money={:.2}",
            city.stats.population,
            city.stats.money
        );

        Ok(vec![SimEvent::GrowthApplied {
            year,
            growth,
            population: city.stats.population,
            money:      city.stats.money,
        }])
    }
}
