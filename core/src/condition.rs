//! Eligibility conditions for city events.
//!
//! Conditions are plain data so the event catalog can live in JSON:
//!
//! ```json
//! { "any": [ { "below": { "stat": "security", "value": 45 } },
//!            { "above": { "stat": "unemployment", "value": 18 } } ] }
//! ```
//!
//! Evaluation is pure: it reads statistic values and nothing else.

use crate::stats::{CityStats, Stat};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Strictly less than.
    Below { stat: Stat, value: f64 },
    /// Strictly greater than.
    Above { stat: Stat, value: f64 },
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
    Always,
}

impl Condition {
    pub fn holds(&self, stats: &CityStats) -> bool {
        match self {
            Self::Below { stat, value } => stats.get(*stat) < *value,
            Self::Above { stat, value } => stats.get(*stat) > *value,
            Self::All(parts) => parts.iter().all(|c| c.holds(stats)),
            Self::Any(parts) => parts.iter().any(|c| c.holds(stats)),
            Self::Not(inner) => !inner.holds(stats),
            Self::Always => true,
        }
    }
}
