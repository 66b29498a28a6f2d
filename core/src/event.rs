//! The event bus: every state change, described.
//!
//! RULE: Subsystems communicate ONLY through events.
//! Each subsystem sees the events emitted earlier in the same year,
//! and every event ends up in the run journal.

use crate::types::{EventId, PolicyId, RunId, Year};
use serde::{Deserialize, Serialize};

/// Every event emitted during simulation.
/// Variants are only ever appended; journal payloads depend on the tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Engine events ──────────────────────────────
    RunInitialized {
        run_id: RunId,
        seed:   u64,
    },
    YearStarted {
        year: Year,
    },
    YearCompleted {
        year: Year,
    },

    // ── Year tick ──────────────────────────────────
    GrowthApplied {
        year:       Year,
        growth:     f64,
        population: f64,
        money:      f64,
    },
    DelayedEffectFired {
        year: Year,
        note: String,
    },

    // ── Player actions ─────────────────────────────
    PolicyEnacted {
        year:      Year,
        policy_id: PolicyId,
    },
    DelayedEffectScheduled {
        year:      Year,
        policy_id: PolicyId,
        due_year:  Year,
        note:      String,
    },

    // ── City events ────────────────────────────────
    CityEventOffered {
        year:     Year,
        event_id: EventId,
    },
    CityEventResolved {
        year:         Year,
        event_id:     EventId,
        option_index: usize,
    },
    QuietYear {
        year: Year,
    },
}

impl SimEvent {
    /// Stable string name for the event_type journal column.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RunInitialized { .. }         => "run_initialized",
            Self::YearStarted { .. }            => "year_started",
            Self::YearCompleted { .. }          => "year_completed",
            Self::GrowthApplied { .. }          => "growth_applied",
            Self::DelayedEffectFired { .. }     => "delayed_effect_fired",
            Self::PolicyEnacted { .. }          => "policy_enacted",
            Self::DelayedEffectScheduled { .. } => "delayed_effect_scheduled",
            Self::CityEventOffered { .. }       => "city_event_offered",
            Self::CityEventResolved { .. }      => "city_event_resolved",
            Self::QuietYear { .. }              => "quiet_year",
        }
    }
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id:         Option<i64>,
    pub run_id:     RunId,
    pub year:       Year,
    pub source:     String,
    pub event_type: String,
    pub payload:    String, // JSON-serialized SimEvent
}
