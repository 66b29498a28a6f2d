//! Catalog loading, validation and policy presentation tests.

use civic_core::{
    config::SimConfig, engine::SimEngine, error::SimError, snapshot::trend_line, state::CityState,
};

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");

#[test]
fn data_dir_matches_builtin_catalog() {
    let loaded = SimConfig::load(DATA_DIR).expect("load data dir");
    let builtin = SimConfig::builtin().expect("builtin");

    assert_eq!(loaded.initial, builtin.initial);
    assert_eq!(loaded.policies, builtin.policies);
    assert_eq!(loaded.events, builtin.events);

    let policy_ids: Vec<&str> = builtin.policies.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(policy_ids, vec!["industrial", "green", "education", "tax", "safety"]);
    let event_ids: Vec<&str> = builtin.events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(event_ids, vec!["pollution", "crime", "boom", "festival"]);
}

#[test]
fn missing_data_dir_is_reported_with_path() {
    let err = SimConfig::load("/nonexistent/civic-data").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/civic-data/city/initial_state.json"));
}

#[test]
fn builtin_starting_city() {
    let config = SimConfig::builtin().unwrap();
    let city = config.initial.build();
    assert_eq!(city.year, 1);
    assert_eq!(city.stats.money, 120.0);
    assert_eq!(city.stats.population, 50.0);
    assert_eq!(city.stats.unemployment, 12.0);
}

fn with_policies(policies: &str) -> anyhow::Result<SimConfig> {
    let city = r#"{ "year": 1, "stats": { "money": 120, "population": 50, "happiness": 60,
        "economy": 55, "environment": 70, "security": 65, "education": 50, "unemployment": 12 } }"#;
    SimConfig::from_json(city, policies, r#"{ "events": [] }"#)
}

#[test]
fn duplicate_policy_ids_are_rejected() {
    let policies = r#"{ "policies": [
        { "id": "tax", "title": "a", "description": "", "effect": {} },
        { "id": "tax", "title": "b", "description": "", "effect": {} }
    ] }"#;
    let err = with_policies(policies).unwrap_err();
    let err = err.downcast::<SimError>().expect("catalog error");
    assert!(matches!(err, SimError::InvalidCatalog(ref m) if m.contains("tax")), "got {err}");
}

#[test]
fn zero_year_delay_is_rejected() {
    let policies = r#"{ "policies": [
        { "id": "now", "title": "now", "description": "", "effect": {},
          "delayed": { "after_years": 0, "effect": {}, "note": "" } }
    ] }"#;
    assert!(with_policies(policies).is_err());
}

#[test]
fn overlong_delay_is_rejected() {
    let policies = r#"{ "policies": [
        { "id": "forever", "title": "forever", "description": "", "effect": {},
          "delayed": { "after_years": 4294967295, "effect": {}, "note": "" } }
    ] }"#;
    let err = with_policies(policies).unwrap_err();
    let err = err.downcast::<SimError>().expect("catalog error");
    assert!(matches!(err, SimError::InvalidCatalog(ref m) if m.contains("forever")), "got {err}");
}

#[test]
fn unknown_effect_keys_are_accepted() {
    let policies = r#"{ "policies": [
        { "id": "odd", "title": "奇策", "description": "", "effect": { "morale": 5, "money": 1 } }
    ] }"#;
    let config = with_policies(policies).expect("unknown keys only warn");
    let mut engine = SimEngine::build_test_with("odd-policy-test".into(), 1, config).unwrap();

    assert!(engine.enact_policy("odd").unwrap());
    assert_eq!(engine.city().stats.money, 121.0);
    assert_eq!(engine.history()[0], "奇策を実施。");
}

#[test]
fn unknown_policy_is_a_noop() {
    let mut engine = SimEngine::build_test("unknown-policy-test".into(), 1).unwrap();
    let before = engine.city().clone();

    assert!(!engine.enact_policy("bread_and_circuses").unwrap());
    assert_eq!(engine.city(), &before);
}

#[test]
fn policy_views_summarise_effects() {
    let engine = SimEngine::build_test("policy-view-test".into(), 1).unwrap();
    let snapshot = engine.snapshot();

    let industrial = &snapshot.policies[0];
    assert_eq!(industrial.title, "工業優先政策");
    assert_eq!(industrial.effect_summary, "経済力 +8 / 失業率 -2 / 財政 +12 / 環境 -6");

    assert_eq!(snapshot.readings.len(), 8);
    assert_eq!(snapshot.readings[7].text, "12%");
    assert_eq!(snapshot.trend, "前年のまとめ: 人口 50 万人、財政 120 億。");
    assert_eq!(snapshot.history, vec!["都市運営を開始しました。"]);
}

#[test]
fn trend_line_rounds_half_money_up() {
    let mut city = CityState::default();
    city.stats.money = 120.5;
    assert_eq!(trend_line(&city), "前年のまとめ: 人口 50 万人、財政 121 億。");

    city.stats.money = 0.4;
    assert_eq!(trend_line(&city), "前年のまとめ: 人口 50 万人、財政 0 億。");
}
