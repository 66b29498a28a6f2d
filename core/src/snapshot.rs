//! Read-only views of an engine for presentation layers.
//!
//! A snapshot is everything a UI needs to draw one frame: stat bars,
//! the trend line, the history, the policy buttons and the event box.
//! It is never read back into an engine.

use crate::{
    city_event::{CityEvent, QUIET_YEAR_NOTICE},
    policy::Policy,
    scheduler::PendingEffect,
    state::CityState,
    stats::{CityStats, Stat, StatReading},
    types::{EventId, PolicyId, RunId, Year},
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CitySnapshot {
    pub run_id:       RunId,
    pub year:         Year,
    pub stats:        CityStats,
    pub readings:     Vec<StatReading>,
    pub trend:        String,
    pub history:      Vec<String>,
    pub pending:      Vec<PendingEffect>,
    pub policies:     Vec<PolicyView>,
    pub active_event: Option<EventView>,
    /// Set when no event is on offer.
    pub quiet_notice: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyView {
    pub id:             PolicyId,
    pub title:          String,
    pub description:    String,
    pub effect_summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    pub id:          EventId,
    pub title:       String,
    pub description: String,
    pub options:     Vec<String>,
}

impl From<&Policy> for PolicyView {
    fn from(policy: &Policy) -> Self {
        Self {
            id:             policy.id.clone(),
            title:          policy.title.clone(),
            description:    policy.description.clone(),
            effect_summary: policy.effect_summary(),
        }
    }
}

impl From<&CityEvent> for EventView {
    fn from(event: &CityEvent) -> Self {
        Self {
            id:          event.id.clone(),
            title:       event.title.clone(),
            description: event.description.clone(),
            options:     event.options.iter().map(|o| o.label.clone()).collect(),
        }
    }
}

/// One-line summary of population and treasury.
pub fn trend_line(city: &CityState) -> String {
    format!(
        "前年のまとめ: 人口 {} 万人、財政 {:.0} 億。",
        city.stats.population,
        city.stats.money.round()
    )
}

impl CitySnapshot {
    pub fn capture(
        run_id: &str,
        city: &CityState,
        policies: &[Policy],
        active_event: Option<&CityEvent>,
    ) -> Self {
        Self {
            run_id:   run_id.to_string(),
            year:     city.year,
            stats:    city.stats,
            readings: Stat::ALL
                .iter()
                .map(|s| StatReading::read(*s, city.get(*s)))
                .collect(),
            trend:    trend_line(city),
            history:  city.history().map(String::from).collect(),
            pending:  city.pending.clone(),
            policies: policies.iter().map(PolicyView::from).collect(),
            active_event: active_event.map(EventView::from),
            quiet_notice: active_event.is_none().then_some(QUIET_YEAR_NOTICE),
        }
    }
}
