use crate::{
    city_event::CityEvent,
    effect,
    error::{SimError, SimResult},
    policy::Policy,
    state::CityState,
    stats::CityStats,
    types::Year,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const BUILTIN_CITY: &str = include_str!("../../data/city/initial_state.json");
const BUILTIN_POLICIES: &str = include_str!("../../data/policies/policy_catalog.json");
const BUILTIN_EVENTS: &str = include_str!("../../data/events/event_catalog.json");

/// Longest delay a catalog may give a policy's delayed effect.
pub const MAX_DELAY_YEARS: Year = 100;

/// Starting point of a new city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialCity {
    pub year:  Year,
    pub stats: CityStats,
}

impl InitialCity {
    pub fn build(&self) -> CityState {
        CityState::new(self.year, self.stats)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PolicyCatalogFile {
    policies: Vec<Policy>,
}

#[derive(Debug, Clone, Deserialize)]
struct EventCatalogFile {
    events: Vec<CityEvent>,
}

/// Static catalogs for a run. Loaded once; never mutated.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub initial:  InitialCity,
    pub policies: Vec<Policy>,
    pub events:   Vec<CityEvent>,
}

impl SimConfig {
    /// Load from the data/ directory.
    /// In tests, use SimConfig::builtin().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let city_path = format!("{data_dir}/city/initial_state.json");
        let city_content = std::fs::read_to_string(&city_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {city_path}: {e}"))?;

        let policy_path = format!("{data_dir}/policies/policy_catalog.json");
        let policy_content = std::fs::read_to_string(&policy_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {policy_path}: {e}"))?;

        let event_path = format!("{data_dir}/events/event_catalog.json");
        let event_content = std::fs::read_to_string(&event_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {event_path}: {e}"))?;

        Self::from_json(&city_content, &policy_content, &event_content)
    }

    /// The catalogs shipped with the crate.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_json(BUILTIN_CITY, BUILTIN_POLICIES, BUILTIN_EVENTS)
    }

    pub fn from_json(city: &str, policies: &str, events: &str) -> anyhow::Result<Self> {
        let initial: InitialCity = serde_json::from_str(city)?;
        let policy_file: PolicyCatalogFile = serde_json::from_str(policies)?;
        let event_file: EventCatalogFile = serde_json::from_str(events)?;

        let config = Self {
            initial,
            policies: policy_file.policies,
            events:   event_file.events,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn policy(&self, policy_id: &str) -> Option<&Policy> {
        self.policies.iter().find(|p| p.id == policy_id)
    }

    pub fn event(&self, event_id: &str) -> Option<&CityEvent> {
        self.events.iter().find(|e| e.id == event_id)
    }

    /// Structural checks. Unknown effect keys are legal and only warned about.
    pub fn validate(&self) -> SimResult<()> {
        if !self.initial.stats.in_bounds() {
            return Err(SimError::InvalidCatalog(
                "initial statistics are out of bounds".into(),
            ));
        }

        let mut seen = HashSet::new();
        for policy in &self.policies {
            if !seen.insert(policy.id.as_str()) {
                return Err(SimError::InvalidCatalog(format!(
                    "duplicate policy id '{}'",
                    policy.id
                )));
            }
            if let Some(delayed) = &policy.delayed {
                if delayed.after_years == 0 || delayed.after_years > MAX_DELAY_YEARS {
                    return Err(SimError::InvalidCatalog(format!(
                        "policy '{}' has a delayed effect with after_years = {} (allowed 1..={MAX_DELAY_YEARS})",
                        policy.id, delayed.after_years
                    )));
                }
                warn_unknown_keys(&policy.id, &delayed.effect);
            }
            warn_unknown_keys(&policy.id, &policy.effect);
        }

        let mut seen = HashSet::new();
        for event in &self.events {
            if !seen.insert(event.id.as_str()) {
                return Err(SimError::InvalidCatalog(format!(
                    "duplicate event id '{}'",
                    event.id
                )));
            }
            if event.options.is_empty() {
                return Err(SimError::InvalidCatalog(format!(
                    "event '{}' has no options",
                    event.id
                )));
            }
            for option in &event.options {
                warn_unknown_keys(&event.id, &option.effect);
            }
        }
        Ok(())
    }
}

fn warn_unknown_keys(owner: &str, effect: &effect::Effect) {
    for key in effect::unknown_keys(effect) {
        log::warn!("'{owner}': effect key '{key}' names no statistic and will be ignored");
    }
}
