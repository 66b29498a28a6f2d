//! The simulation engine: one city, its catalogs and its journal.
//!
//! YEAR TICK ORDER (fixed, documented, never reordered):
//!   0. Engine: increment the year
//!   1. Growth subsystem          (population, money, happiness, security)
//!   2. Delayed-effect subsystem  (queued policy after-effects due this year)
//!   3. Annual report subsystem   (year log line, normalization)
//!   4. Engine: draw the next city event
//!
//! RULES:
//!   - Subsystems execute in registration order, every year.
//!   - Each subsystem sees the events emitted earlier in the same year.
//!   - All randomness flows through the RngBank.
//!   - All state changes are recorded in the event log.
//!   - Every mutation is followed by normalization before anything
//!     reads the city for display or eligibility.

use crate::{
    annual_report_subsystem::AnnualReportSubsystem,
    city_event::{self, CityEvent},
    command::PlayerCommand,
    config::SimConfig,
    delayed_effect_subsystem::DelayedEffectSubsystem,
    error::{SimError, SimResult},
    event::{EventLogEntry, SimEvent},
    growth_subsystem::GrowthSubsystem,
    policy::invoke_policy,
    rng::{RngBank, SubsystemSlot},
    snapshot::CitySnapshot,
    state::CityState,
    store::SimStore,
    subsystem::SimSubsystem,
    types::{EventId, RunId, Year},
};

/// Logged once when a city is founded.
pub const SESSION_START_MESSAGE: &str = "都市運営を開始しました。";

pub struct SimEngine {
    pub run_id:   RunId,
    pub rng_bank: RngBank,
    pub store:    SimStore,
    config:       SimConfig,
    city:         CityState,
    /// The event awaiting a response, if any.
    active_event: Option<EventId>,
    /// Event draws made so far in the current year.
    draws:        u64,
    subsystems:   Vec<(SubsystemSlot, Box<dyn SimSubsystem>)>,
}

impl SimEngine {
    /// Build a fully wired engine and found the city.
    /// Inserts the run record if the store does not have one yet.
    pub fn build(run_id: RunId, seed: u64, config: SimConfig, store: SimStore) -> SimResult<Self> {
        if store.run_seed(&run_id)?.is_none() {
            store.insert_run(&run_id, seed, env!("CARGO_PKG_VERSION"), 0)?;
        }

        let mut engine = Self {
            city: config.initial.build(),
            rng_bank: RngBank::new(seed),
            store,
            config,
            active_event: None,
            draws: 0,
            subsystems: Vec::new(),
            run_id,
        };

        // YEAR TICK ORDER: fixed, documented, never reordered.
        engine.register(SubsystemSlot::Growth, Box::new(GrowthSubsystem::new()));
        engine.register(SubsystemSlot::DelayedEffects, Box::new(DelayedEffectSubsystem::new()));
        engine.register(SubsystemSlot::AnnualReport, Box::new(AnnualReportSubsystem::new()));

        let year = engine.city.year;
        let mut events = vec![SimEvent::RunInitialized {
            run_id: engine.run_id.clone(),
            seed,
        }];
        events.push(engine.offer_next_event());
        engine.city.log(SESSION_START_MESSAGE);
        engine.journal(year, "engine", &events)?;

        log::info!("run={} founded at year {year} (seed={seed})", engine.run_id);
        Ok(engine)
    }

    /// In-memory journal and builtin catalogs.
    pub fn build_test(run_id: RunId, seed: u64) -> SimResult<Self> {
        Self::build_test_with(run_id, seed, SimConfig::builtin()?)
    }

    /// In-memory journal with caller-supplied catalogs.
    pub fn build_test_with(run_id: RunId, seed: u64, config: SimConfig) -> SimResult<Self> {
        let store = SimStore::in_memory()?;
        store.migrate()?;
        Self::build(run_id, seed, config, store)
    }

    fn register(&mut self, slot: SubsystemSlot, subsystem: Box<dyn SimSubsystem>) {
        self.subsystems.push((slot, subsystem));
    }

    // ── Player actions ─────────────────────────────────────────

    /// Enact a policy by id. Unknown ids are a no-op and return false.
    pub fn enact_policy(&mut self, policy_id: &str) -> SimResult<bool> {
        let events = self.enact_policy_events(policy_id)?;
        Ok(!events.is_empty())
    }

    /// Advance one year. Returns the event now on offer, if any.
    pub fn advance_year(&mut self) -> SimResult<Option<&CityEvent>> {
        self.advance_year_events()?;
        Ok(self.active_event())
    }

    /// Answer the active event. Returns the next event on offer, if any.
    ///
    /// Fails without touching the city when `event_id` is not the active
    /// event or `option_index` is out of range.
    pub fn choose_option(
        &mut self,
        event_id: &str,
        option_index: usize,
    ) -> SimResult<Option<&CityEvent>> {
        self.choose_option_events(event_id, option_index)?;
        Ok(self.active_event())
    }

    /// Apply a serialized player command. Returns the events it produced.
    pub fn apply_command(&mut self, command: &PlayerCommand) -> SimResult<Vec<SimEvent>> {
        log::debug!("year={} command: {}", self.city.year, command.name());
        match command {
            PlayerCommand::EnactPolicy { policy_id } => self.enact_policy_events(policy_id),
            PlayerCommand::AdvanceYear => self.advance_year_events(),
            PlayerCommand::ChooseOption { event_id, option_index } => {
                self.choose_option_events(event_id, *option_index)
            }
        }
    }

    // ── Views ──────────────────────────────────────────────────

    pub fn city(&self) -> &CityState {
        &self.city
    }

    pub fn year(&self) -> Year {
        self.city.year
    }

    /// Up to eight messages, newest first.
    pub fn history(&self) -> Vec<&str> {
        self.city.history().collect()
    }

    pub fn active_event(&self) -> Option<&CityEvent> {
        self.active_event
            .as_deref()
            .and_then(|id| self.config.event(id))
    }

    pub fn snapshot(&self) -> CitySnapshot {
        CitySnapshot::capture(
            &self.run_id,
            &self.city,
            &self.config.policies,
            self.active_event(),
        )
    }

    // ── Internals ──────────────────────────────────────────────

    fn enact_policy_events(&mut self, policy_id: &str) -> SimResult<Vec<SimEvent>> {
        let year = self.city.year;
        let Some(policy) = self.config.policy(policy_id) else {
            log::warn!("year={year} unknown policy '{policy_id}' ignored");
            return Ok(vec![]);
        };

        let due_year = invoke_policy(&mut self.city, policy);
        log::info!("year={year} policy '{policy_id}' enacted");

        let mut events = vec![SimEvent::PolicyEnacted {
            year,
            policy_id: policy.id.clone(),
        }];
        if let (Some(due_year), Some(delayed)) = (due_year, &policy.delayed) {
            events.push(SimEvent::DelayedEffectScheduled {
                year,
                policy_id: policy.id.clone(),
                due_year,
                note: delayed.note.clone(),
            });
        }
        self.journal(year, "player", &events)?;
        Ok(events)
    }

    fn advance_year_events(&mut self) -> SimResult<Vec<SimEvent>> {
        if let Some(unanswered) = self.active_event.take() {
            log::debug!("year={} event '{unanswered}' left unanswered", self.city.year);
        }

        self.city.year += 1;
        self.draws = 0;
        let year = self.city.year;

        let started = SimEvent::YearStarted { year };
        self.journal(year, "engine", std::slice::from_ref(&started))?;
        let mut year_events = vec![started];

        // Execute each subsystem in registration order.
        for (slot, subsystem) in &mut self.subsystems {
            let mut rng = self.rng_bank.for_subsystem_at_year(*slot, year);
            let new_events = subsystem.update(year, &mut self.city, &year_events, &mut rng)?;
            append_all(&self.store, &self.run_id, year, subsystem.name(), &new_events)?;
            year_events.extend(new_events);
        }

        let closing = vec![self.offer_next_event(), SimEvent::YearCompleted { year }];
        self.journal(year, "engine", &closing)?;
        year_events.extend(closing);

        log::debug!(
            "year={year} done: population={:.2} money={:.2} pending={}",
            self.city.stats.population,
            self.city.stats.money,
            self.city.pending.len()
        );
        Ok(year_events)
    }

    fn choose_option_events(
        &mut self,
        event_id: &str,
        option_index: usize,
    ) -> SimResult<Vec<SimEvent>> {
        let active = self.active_event.clone().ok_or(SimError::NoActiveEvent)?;
        if active != event_id {
            return Err(SimError::StaleEvent {
                requested: event_id.to_string(),
                active,
            });
        }
        let event = self.config.event(&active).ok_or(SimError::NoActiveEvent)?;
        let option = event
            .options
            .get(option_index)
            .ok_or(SimError::OptionOutOfRange {
                event_id: active.clone(),
                index:    option_index,
                count:    event.options.len(),
            })?;

        let year = self.city.year;
        city_event::resolve_option(&mut self.city, option);
        self.active_event = None;
        log::info!("year={year} event '{active}' answered with option {option_index}");

        let events = vec![
            SimEvent::CityEventResolved {
                year,
                event_id: active,
                option_index,
            },
            self.offer_next_event(),
        ];
        self.journal(year, "player", &events)?;
        Ok(events)
    }

    /// Draw an event against the current city and make it the active one.
    fn offer_next_event(&mut self) -> SimEvent {
        let year = self.city.year;
        let mut rng = self.rng_bank.for_draw(SubsystemSlot::CityEvents, year, self.draws);
        self.draws += 1;

        self.active_event = city_event::select_event(&self.config.events, &self.city, &mut rng)
            .map(|e| e.id.clone());
        match &self.active_event {
            Some(event_id) => SimEvent::CityEventOffered {
                year,
                event_id: event_id.clone(),
            },
            None => SimEvent::QuietYear { year },
        }
    }

    fn journal(&self, year: Year, source: &str, events: &[SimEvent]) -> SimResult<()> {
        append_all(&self.store, &self.run_id, year, source, events)
    }
}

fn append_all(
    store: &SimStore,
    run_id: &str,
    year: Year,
    source: &str,
    events: &[SimEvent],
) -> SimResult<()> {
    for event in events {
        let entry = EventLogEntry {
            id:         None,
            run_id:     run_id.to_string(),
            year,
            source:     source.to_string(),
            event_type: event.type_name().to_string(),
            payload:    serde_json::to_string(event)?,
        };
        store.append_event(&entry)?;
    }
    Ok(())
}
