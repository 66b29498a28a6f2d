//! Effect engine: sparse stat deltas and normalization.
//!
//! RULE: apply_effect never clamps. Every caller must normalize()
//! before the state is displayed or read by an eligibility check.

use crate::{state::CityState, stats::Stat};
use indexmap::IndexMap;

/// A delta map keyed by statistic name, e.g. `{"economy": 8, "money": -10}`.
/// Keys keep their catalog order, which is the order summaries list them in.
/// Keys that name no statistic are carried but ignored on application.
pub type Effect = IndexMap<String, f64>;

/// Add each known delta to the city. Unknown keys are skipped.
pub fn apply_effect(city: &mut CityState, effect: &Effect) {
    for (key, delta) in effect {
        match Stat::from_key(key) {
            Some(stat) => *city.stats.get_mut(stat) += delta,
            None => log::trace!("ignoring unknown effect key '{key}'"),
        }
    }
}

/// Clamp every statistic into its declared range.
pub fn normalize(city: &mut CityState) {
    for stat in Stat::ALL {
        let value = city.stats.get_mut(stat);
        *value = stat.clamp_value(*value);
    }
}

/// Human-readable summary like `経済力 +8 / 財政 +12`.
/// Unknown keys are shown by their raw name.
pub fn describe(effect: &Effect) -> String {
    effect
        .iter()
        .map(|(key, delta)| {
            let label = Stat::from_key(key).map_or(key.as_str(), |s| s.short_label());
            let sign = if *delta > 0.0 { "+" } else { "" };
            format!("{label} {sign}{delta}")
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Effect keys that name no statistic.
pub fn unknown_keys(effect: &Effect) -> impl Iterator<Item = &str> {
    effect
        .keys()
        .map(String::as_str)
        .filter(|k| Stat::from_key(k).is_none())
}
