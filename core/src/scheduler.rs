//! Delayed-effect scheduler.
//!
//! Policies may carry a second effect that lands a fixed number of years
//! later. Entries fire when their due year is reached exactly; an entry
//! whose year has passed without resolution stays in the queue untouched.

use crate::{
    effect::{apply_effect, Effect},
    state::CityState,
    types::Year,
};
use serde::{Deserialize, Serialize};

/// Catalog-side description of a delayed effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayedEffect {
    pub after_years: Year,
    pub effect:      Effect,
    pub note:        String,
}

/// A queued effect waiting for its year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingEffect {
    pub due_year: Year,
    pub effect:   Effect,
    pub note:     String,
}

/// Queue `delayed` to fire `after_years` from `current_year`.
/// Returns the due year, or None when there was nothing to schedule.
pub fn schedule(
    pending: &mut Vec<PendingEffect>,
    current_year: Year,
    delayed: Option<&DelayedEffect>,
) -> Option<Year> {
    let delayed = delayed?;
    let due_year = current_year.saturating_add(delayed.after_years);
    pending.push(PendingEffect {
        due_year,
        effect: delayed.effect.clone(),
        note:   delayed.note.clone(),
    });
    Some(due_year)
}

/// Fire and remove every entry due in `city.year`, in scheduling order.
/// Does not normalize; the year tick does that afterwards.
pub fn resolve_due(city: &mut CityState) -> Vec<PendingEffect> {
    let year = city.year;
    let (due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut city.pending)
        .into_iter()
        .partition(|p| p.due_year == year);
    city.pending = rest;

    for entry in &due {
        apply_effect(city, &entry.effect);
        city.log(format!("遅延効果: {}", entry.note));
    }
    due
}
