//! City event eligibility, selection and response tests.

use civic_core::{
    city_event::{eligible_events, select_event, CityEvent},
    config::SimConfig,
    engine::SimEngine,
    error::SimError,
    rng::{RngBank, SubsystemSlot},
    state::CityState,
    stats::Stat,
};

fn catalog() -> Vec<CityEvent> {
    SimConfig::builtin().expect("builtin catalog").events
}

fn ids(events: &[&CityEvent]) -> Vec<String> {
    events.iter().map(|e| e.id.clone()).collect()
}

/// Engine whose city starts from the builtin defaults with some stats overridden.
fn engine_with(run_id: &str, seed: u64, overrides: &[(Stat, f64)]) -> SimEngine {
    let mut config = SimConfig::builtin().expect("builtin catalog");
    for (stat, value) in overrides {
        config.initial.stats.set(*stat, *value);
    }
    SimEngine::build_test_with(run_id.into(), seed, config).expect("build test engine")
}

#[test]
fn pollution_follows_environment() {
    let events = catalog();
    let mut city = CityState::default();

    city.stats.environment = 40.0;
    assert!(ids(&eligible_events(&events, &city)).contains(&"pollution".to_string()));

    city.stats.environment = 80.0;
    assert!(!ids(&eligible_events(&events, &city)).contains(&"pollution".to_string()));
}

#[test]
fn default_city_has_no_eligible_events() {
    let events = catalog();
    let city = CityState::default();
    let mut rng = RngBank::new(1).for_draw(SubsystemSlot::CityEvents, 1, 0);

    assert!(eligible_events(&events, &city).is_empty());
    assert!(select_event(&events, &city, &mut rng).is_none());
}

/// Across a grid of cities, select_event returns None exactly when nothing
/// is eligible, and otherwise always something from the eligible subset.
#[test]
fn selection_is_drawn_from_eligible_subset() {
    let events = catalog();
    let bank = RngBank::new(0xC1_7E);
    let values = [10.0, 44.0, 50.0, 56.0, 61.0, 71.0, 100.0];
    let mut draw = 0u64;

    for environment in values {
        for security in values {
            for happiness in values {
                for economy in values {
                    let mut city = CityState::default();
                    city.stats.environment = environment;
                    city.stats.security = security;
                    city.stats.happiness = happiness;
                    city.stats.economy = economy;

                    let eligible = ids(&eligible_events(&events, &city));
                    let mut rng = bank.for_draw(SubsystemSlot::CityEvents, 1, draw);
                    draw += 1;

                    match select_event(&events, &city, &mut rng) {
                        None => assert!(eligible.is_empty(), "missed {eligible:?}"),
                        Some(picked) => assert!(eligible.contains(&picked.id)),
                    }
                }
            }
        }
    }
}

#[test]
fn selection_reaches_every_eligible_event() {
    let events = catalog();
    let mut city = CityState::default();
    city.stats.environment = 40.0;
    city.stats.security = 40.0;
    let bank = RngBank::new(99);

    let mut seen = std::collections::BTreeSet::new();
    for draw in 0..200 {
        let mut rng = bank.for_draw(SubsystemSlot::CityEvents, 1, draw);
        seen.insert(select_event(&events, &city, &mut rng).unwrap().id.clone());
    }
    assert_eq!(seen.into_iter().collect::<Vec<_>>(), vec!["crime", "pollution"]);
}

/// A polluted city is offered the protest as soon as it is founded.
#[test]
fn founding_a_polluted_city_offers_pollution() {
    let engine = engine_with("pollution-offer-test", 1, &[(Stat::Environment, 40.0)]);
    let active = engine.active_event().expect("pollution should be on offer");
    assert_eq!(active.id, "pollution");
    assert!(engine.snapshot().quiet_notice.is_none());
}

#[test]
fn quiet_city_shows_quiet_notice() {
    let engine = SimEngine::build_test("quiet-test".into(), 1).unwrap();
    assert!(engine.active_event().is_none());
    assert_eq!(engine.snapshot().quiet_notice, Some("いまは静かな一年です。"));
}

/// Regulation lifts environment above the threshold: nothing follows.
#[test]
fn answering_applies_effect_logs_and_normalizes() {
    let mut engine = engine_with("pollution-answer-test", 1, &[(Stat::Environment, 40.0)]);

    let next = engine.choose_option("pollution", 0).unwrap();
    assert!(next.is_none());

    let stats = engine.city().stats;
    assert_eq!(stats.environment, 48.0);
    assert_eq!(stats.economy, 51.0);
    assert_eq!(stats.money, 114.0);
    assert_eq!(engine.history()[0], "規制で環境が改善したが経済にブレーキ。");
    assert!(engine.active_event().is_none());
}

/// A subsidy leaves the environment untouched, so the protest chains again
/// within the same year.
#[test]
fn events_chain_within_a_year() {
    let mut engine = engine_with("pollution-chain-test", 1, &[(Stat::Environment, 40.0)]);

    for round in 1..=3 {
        let next = engine.choose_option("pollution", 1).unwrap();
        assert_eq!(next.map(|e| e.id.as_str()), Some("pollution"), "round {round}");
    }
    assert_eq!(engine.year(), 1);
    assert_eq!(engine.city().stats.money, 96.0);
    assert_eq!(engine.city().stats.happiness, 69.0);
}

#[test]
fn invalid_selections_leave_city_unchanged() {
    let mut engine = engine_with("invalid-choice-test", 1, &[(Stat::Environment, 40.0)]);
    let before = engine.city().clone();

    let stale = engine.choose_option("crime", 0).unwrap_err();
    assert!(matches!(stale, SimError::StaleEvent { .. }), "got {stale:?}");
    assert!(stale.is_invalid_selection());

    let out_of_range = engine.choose_option("pollution", 3).unwrap_err();
    assert!(
        matches!(out_of_range, SimError::OptionOutOfRange { index: 3, count: 3, .. }),
        "got {out_of_range:?}"
    );

    assert_eq!(engine.city(), &before);
    assert_eq!(engine.active_event().map(|e| e.id.as_str()), Some("pollution"));
}

#[test]
fn answering_with_nothing_on_offer_fails() {
    let mut engine = SimEngine::build_test("no-active-test".into(), 1).unwrap();
    let err = engine.choose_option("pollution", 0).unwrap_err();
    assert!(matches!(err, SimError::NoActiveEvent), "got {err:?}");
}

/// An unanswered event is replaced by the next year's draw.
#[test]
fn advancing_replaces_unanswered_event() {
    let mut engine = engine_with("replace-test", 1, &[(Stat::Environment, 40.0)]);
    assert!(engine.active_event().is_some());

    // Environment is untouched by the year tick, so pollution is drawn again,
    // but as a fresh offer for year 2.
    let offered = engine.advance_year().unwrap().map(|e| e.id.clone());
    assert_eq!(offered.as_deref(), Some("pollution"));
    assert_eq!(engine.store.event_count("replace-test", "city_event_offered").unwrap(), 2);
}
