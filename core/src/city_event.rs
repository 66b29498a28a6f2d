//! City events: conditional random happenings and the player's responses.
//!
//! An event is eligible while its condition holds against the normalized
//! statistics. Selection is a single uniform draw among eligible events.

use crate::{
    condition::Condition,
    effect::{apply_effect, normalize, Effect},
    rng::SubsystemRng,
    state::CityState,
    types::EventId,
};
use serde::{Deserialize, Serialize};

/// Shown instead of an event when nothing is eligible.
pub const QUIET_YEAR_NOTICE: &str = "いまは静かな一年です。";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityEvent {
    pub id:          EventId,
    pub title:       String,
    pub description: String,
    pub condition:   Condition,
    pub options:     Vec<EventOption>,
}

/// One mutually exclusive response to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOption {
    pub label:  String,
    pub effect: Effect,
    pub log:    String,
}

impl CityEvent {
    pub fn is_eligible(&self, city: &CityState) -> bool {
        self.condition.holds(&city.stats)
    }
}

/// Every catalog event whose condition currently holds, in catalog order.
pub fn eligible_events<'a>(catalog: &'a [CityEvent], city: &CityState) -> Vec<&'a CityEvent> {
    catalog.iter().filter(|e| e.is_eligible(city)).collect()
}

/// Draw one eligible event, or None for a quiet year.
pub fn select_event<'a>(
    catalog: &'a [CityEvent],
    city: &CityState,
    rng: &mut SubsystemRng,
) -> Option<&'a CityEvent> {
    let candidates = eligible_events(catalog, city);
    if candidates.is_empty() {
        return None;
    }
    let picked = candidates[rng.pick_index(candidates.len())];
    log::debug!(
        "year={} {}: picked '{}' from {} eligible",
        city.year,
        rng.name,
        picked.id,
        candidates.len()
    );
    Some(picked)
}

/// Apply a chosen response: effect, its log line verbatim, normalize.
/// The caller is responsible for drawing the next event.
pub fn resolve_option(city: &mut CityState, option: &EventOption) {
    apply_effect(city, &option.effect);
    city.log(option.log.clone());
    normalize(city);
}
