//! Policy catalog and policy invocation.

use crate::{
    effect::{self, apply_effect, normalize, Effect},
    scheduler::{schedule, DelayedEffect},
    state::CityState,
    types::{PolicyId, Year},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id:          PolicyId,
    pub title:       String,
    pub description: String,
    pub effect:      Effect,
    #[serde(default)]
    pub delayed:     Option<DelayedEffect>,
}

impl Policy {
    /// Effect summary for a policy button, e.g. `経済力 +8 / 財政 +12`.
    pub fn effect_summary(&self) -> String {
        effect::describe(&self.effect)
    }
}

/// Enact a policy: immediate effect, delayed effect queued, log, normalize.
/// Returns the due year of the queued delayed effect, if any.
pub fn invoke_policy(city: &mut CityState, policy: &Policy) -> Option<Year> {
    apply_effect(city, &policy.effect);
    let due_year = schedule(&mut city.pending, city.year, policy.delayed.as_ref());
    city.log(format!("{}を実施。", policy.title));
    normalize(city);
    due_year
}
